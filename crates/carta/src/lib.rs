#![forbid(unsafe_code)]

//! Geometry model and batch cleanup operations for SVG map files.
//!
//! Design goals:
//! - delegate grammar-level work to the ecosystem (`svgtypes` for path data,
//!   `roxmltree` for XML) and keep only the geometry here
//! - a closed, exhaustively-matched segment model
//! - deterministic, testable pure operations; all file I/O at the edges

pub mod coverage;
pub mod document;
pub mod error;
pub mod geom;
pub mod noise;
pub mod parse;
pub mod path;
pub mod reposition;
pub mod rescale;

pub use document::{MapDocument, ViewBox};
pub use error::{Error, Result};
pub use geom::{Bounds, Point, Vector};
pub use parse::parse_path_data;
pub use path::{CURVE_SAMPLES, Path, Segment, paths_bounds};
