//! Empty-space detection.
//!
//! Compares the bounding box of the drawable geometry against the declared
//! canvas area. Files whose content covers almost none of the canvas are
//! usually broken exports (geometry pushed into a corner of a huge viewport).

use crate::document::MapDocument;
use crate::path::paths_bounds;

/// Ratio of canvas area not covered by the geometry's bounding box,
/// in `[0, 1]`. A document with no geometry or a zero-area canvas counts as
/// fully empty.
pub fn empty_space_ratio(doc: &MapDocument) -> f64 {
    let Some(bounds) = paths_bounds(&doc.paths) else {
        return 1.0;
    };
    let canvas_area = doc.width * doc.height;
    if canvas_area == 0.0 {
        return 1.0;
    }
    (1.0 - bounds.area() / canvas_area).clamp(0.0, 1.0)
}

/// Default ratio above which a file is considered mostly empty.
pub const DEFAULT_THRESHOLD: f64 = 0.8;
