//! Uniform upscaling to a minimum resolution.

use crate::document::{MapDocument, ViewBox};
use crate::error::{Error, Result};
use crate::path::paths_bounds;

/// Minimum resolution (in user units) the larger ratio is driven to.
pub const DEFAULT_TARGET: f64 = 1000.0;

/// Scale all geometry so that at least one bounding-box dimension reaches
/// `target`. Uses `max` of the two ratios on purpose: the original tooling
/// guarantees a minimum resolution, not a bounded one, so maps that are
/// already large may be scaled down along the way.
///
/// Returns the applied factor. The declared canvas becomes
/// `max(dim * factor, target)` per axis and the viewBox is reset to origin.
pub fn rescale_document(doc: &mut MapDocument, target: f64) -> Result<f64> {
    let bounds = paths_bounds(&doc.paths).ok_or(Error::EmptyDocument)?;
    let (w, h) = (bounds.width(), bounds.height());
    if w <= 0.0 || h <= 0.0 {
        return Err(Error::DegenerateGeometry);
    }

    let factor = (target / w).max(target / h);
    for path in &mut doc.paths {
        path.scale(factor);
    }

    doc.width = (doc.width * factor).max(target);
    doc.height = (doc.height * factor).max(target);
    doc.view_box = Some(ViewBox {
        min_x: 0.0,
        min_y: 0.0,
        width: doc.width,
        height: doc.height,
    });
    tracing::debug!(factor, target, "rescaled document");
    Ok(factor)
}
