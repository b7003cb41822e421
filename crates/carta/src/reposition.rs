//! Antimeridian repair: move geography stranded on the far-left edge next to
//! the right-most geometry, then refit the viewBox.
//!
//! World maps centered away from Greenwich sometimes wrap a country's eastern
//! islands to the far left of the canvas. Shifting the wrapped paths right by
//! the full bounding-box width puts them back beside the mainland.

use crate::document::MapDocument;
use crate::error::{Error, Result};
use crate::geom::vector;
use crate::path::{Path, paths_bounds};

/// Fraction of the bounding-box width treated as the "far left" strip.
pub const DEFAULT_STRIP_FRACTION: f64 = 0.1;

#[derive(Debug, Clone, Copy)]
pub struct RepositionStats {
    pub moved: usize,
    pub total: usize,
}

/// Move every path that touches the left strip to the right of the original
/// bounding box, reorder moved paths after untouched ones, and refit the
/// document's canvas and viewBox to the new geometry.
pub fn reposition_document(doc: &mut MapDocument, strip_fraction: f64) -> Result<RepositionStats> {
    let bounds = paths_bounds(&doc.paths).ok_or(Error::EmptyDocument)?;
    let cutoff = bounds.min_x + bounds.width() * strip_fraction;

    let paths = std::mem::take(&mut doc.paths);
    let total = paths.len();
    let (mut wrapped, mut remaining): (Vec<Path>, Vec<Path>) = paths
        .into_iter()
        .partition(|path| path.segment_starts().any(|p| p.x < cutoff));

    let shift = vector(bounds.width(), 0.0);
    for path in &mut wrapped {
        path.translate(shift);
    }
    let moved = wrapped.len();

    remaining.append(&mut wrapped);
    doc.paths = remaining;

    // Everything moved right, so the box is guaranteed non-empty here.
    if let Some(new_bounds) = paths_bounds(&doc.paths) {
        doc.fit_to(new_bounds);
    }
    tracing::debug!(moved, total, cutoff, "repositioned wrapped paths");
    Ok(RepositionStats { moved, total })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MapDocument;

    fn doc(paths: &str) -> MapDocument {
        MapDocument::from_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="1000" height="100">{paths}</svg>"#
        ))
        .unwrap()
    }

    #[test]
    fn left_strip_paths_move_right_of_the_rest() {
        // Mainland spans x 400..1000, wrapped island sits at x 0..20.
        let mut doc = doc(concat!(
            r#"<path id="island" d="M 0 10 L 20 10 L 20 30 Z"/>"#,
            r#"<path id="mainland" d="M 400 0 L 1000 0 L 1000 100 Z"/>"#,
        ));
        let stats = reposition_document(&mut doc, DEFAULT_STRIP_FRACTION).unwrap();
        assert_eq!(stats.moved, 1);
        assert_eq!(stats.total, 2);

        // Moved paths come after untouched ones.
        assert_eq!(doc.paths[0].attributes[0], ("id".into(), "mainland".into()));
        let island = &doc.paths[1];
        // Shifted right by the full original width (1000 - 0).
        assert_eq!(island.start().unwrap().x, 1000.0);

        // viewBox refit to the new geometry.
        let vb = doc.view_box.unwrap();
        assert_eq!(vb.min_x, 400.0);
        assert_eq!(vb.width, 620.0);
        assert_eq!(doc.width, 620.0);
    }

    #[test]
    fn path_defining_the_left_edge_is_always_in_the_strip() {
        // The strip is measured from the geometry's own min_x, so whichever
        // path defines the left edge gets moved. Single-path documents shift
        // wholesale and the viewBox follows them.
        let mut d = doc(r#"<path d="M 500 0 L 1000 0 L 1000 100 Z"/>"#);
        let stats = reposition_document(&mut d, DEFAULT_STRIP_FRACTION).unwrap();
        assert_eq!(stats.moved, 1);
        assert_eq!(d.paths[0].start().unwrap().x, 1000.0);
        assert_eq!(d.view_box.unwrap().min_x, 1000.0);
        assert_eq!(d.width, 500.0);
    }

    #[test]
    fn empty_document_is_an_error() {
        let mut d = doc("");
        assert!(matches!(
            reposition_document(&mut d, DEFAULT_STRIP_FRACTION),
            Err(Error::EmptyDocument)
        ));
    }
}
