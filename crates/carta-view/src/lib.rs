#![forbid(unsafe_code)]

//! Interactive windowed viewer for SVG map files.
//!
//! The view logic is headless and pure: fit calculation, viewport pan/zoom,
//! and draw-command generation against an abstract [`surface::Surface`]. The
//! window shell (winit + softbuffer + tiny-skia) is a thin presentation layer
//! over it, so the interaction behavior stays unit-testable.

pub mod controller;
pub mod error;
pub mod fit;
pub mod raster;
pub mod render;
pub mod surface;
pub mod viewport;
pub mod window;

pub use controller::{ViewCommand, ViewController};
pub use error::{Error, Result};
pub use fit::{FitOptions, fit_scale, fitted_size};
pub use render::render_paths;
pub use surface::{DrawOp, RecordingSurface, Surface};
pub use viewport::{PAN_STEP_PX, PanDirection, Viewport, ZOOM_RATIO};
pub use window::{MAX_SURFACE_RESTARTS, view_file};
