//! Fit the map's bounding box into a bounded window.

use carta::Bounds;

/// Display limits the initial view is fitted into.
#[derive(Debug, Clone, Copy)]
pub struct FitOptions {
    /// Maximum window width in pixels.
    pub max_width: f64,
    /// Maximum window height in pixels.
    pub max_height: f64,
    /// World-unit margin kept around the geometry; scales with the fit.
    pub margin: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            max_width: 800.0,
            max_height: 600.0,
            margin: 20.0,
        }
    }
}

/// Scale factor that fits `bounds` plus margins inside the limits.
///
/// Never upscales: the result is always in `(0, 1]` for finite, non-empty
/// bounds. A small map is shown at its native size, a large one is shrunk.
pub fn fit_scale(bounds: Bounds, opts: &FitOptions) -> f64 {
    let w = bounds.width() + 2.0 * opts.margin;
    let h = bounds.height() + 2.0 * opts.margin;
    (opts.max_width / w).min(opts.max_height / h).min(1.0)
}

/// On-screen size of the fitted content, margins included.
pub fn fitted_size(bounds: Bounds, scale: f64, opts: &FitOptions) -> (f64, f64) {
    (
        (bounds.width() + 2.0 * opts.margin) * scale,
        (bounds.height() + 2.0 * opts.margin) * scale,
    )
}
