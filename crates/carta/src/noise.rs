//! Stray-path removal.
//!
//! Map exports often carry tiny islands of junk geometry far away from the
//! actual country outline (copyright marks, legend fragments, plotting
//! artifacts). The filter keeps every path that has at least one segment
//! within a distance threshold of the centroid of all geometry; the threshold
//! itself is derived from the data, so dense small maps and sprawling large
//! ones both behave.

use crate::document::MapDocument;
use crate::error::{Error, Result};
use crate::geom::{Point, point};
use crate::path::Path;

/// Multiplier applied to the mean centroid distance to form the threshold.
pub const DEFAULT_MULTIPLIER: f64 = 5.0;

/// Threshold used when no distances can be computed at all.
pub const FALLBACK_THRESHOLD: f64 = 100.0;

/// Mean of every segment start point across all paths.
pub fn centroid(paths: &[Path]) -> Option<Point> {
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut count = 0usize;
    for p in paths.iter().flat_map(Path::segment_starts) {
        sum_x += p.x;
        sum_y += p.y;
        count += 1;
    }
    if count == 0 {
        return None;
    }
    Some(point(sum_x / count as f64, sum_y / count as f64))
}

/// Distance threshold derived from the mean distance of all segment starts
/// from the centroid.
pub fn dynamic_threshold(paths: &[Path], centroid: Point, multiplier: f64) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for p in paths.iter().flat_map(Path::segment_starts) {
        sum += (p - centroid).length();
        count += 1;
    }
    if count == 0 {
        return FALLBACK_THRESHOLD;
    }
    (sum / count as f64) * multiplier
}

/// Keep paths with at least one segment start within `threshold` of the
/// centroid.
pub fn filter_noise(paths: &[Path], centroid: Point, threshold: f64) -> Vec<Path> {
    paths
        .iter()
        .filter(|path| {
            path.segment_starts()
                .any(|p| (p - centroid).length() <= threshold)
        })
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy)]
pub struct CleanStats {
    pub total: usize,
    pub kept: usize,
}

impl CleanStats {
    pub fn dropped(&self) -> usize {
        self.total - self.kept
    }
}

/// Run the full noise pass over a document, replacing its paths with the
/// retained set. Errors with [`Error::EmptyDocument`] when there is nothing
/// to filter; when no path survives, the document is left empty and the
/// caller decides whether to skip writing it.
pub fn clean_document(doc: &mut MapDocument, multiplier: f64) -> Result<CleanStats> {
    let Some(center) = centroid(&doc.paths) else {
        return Err(Error::EmptyDocument);
    };
    let threshold = dynamic_threshold(&doc.paths, center, multiplier);
    let total = doc.paths.len();
    let kept = filter_noise(&doc.paths, center, threshold);
    tracing::debug!(
        total,
        kept = kept.len(),
        threshold,
        "noise filter applied"
    );
    let stats = CleanStats {
        total,
        kept: kept.len(),
    };
    doc.paths = kept;
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::point;
    use crate::path::Segment;

    fn square_at(x: f64, y: f64) -> Path {
        let corners = [
            point(x, y),
            point(x + 1.0, y),
            point(x + 1.0, y + 1.0),
            point(x, y + 1.0),
            point(x, y),
        ];
        Path::new(
            corners
                .windows(2)
                .map(|w| Segment::Line {
                    start: w[0],
                    end: w[1],
                })
                .collect(),
        )
    }

    #[test]
    fn centroid_of_cluster() {
        let paths = vec![square_at(0.0, 0.0), square_at(2.0, 0.0)];
        let c = centroid(&paths).unwrap();
        assert!((c.x - 1.5).abs() < 1e-9);
        assert!(centroid(&[]).is_none());
    }

    #[test]
    fn far_outlier_is_dropped_cluster_is_kept() {
        let mut paths: Vec<Path> = (0..10).map(|i| square_at(i as f64 * 2.0, 0.0)).collect();
        paths.push(square_at(100_000.0, 100_000.0));

        let c = centroid(&paths).unwrap();
        let threshold = dynamic_threshold(&paths, c, DEFAULT_MULTIPLIER);
        let kept = filter_noise(&paths, c, threshold);
        assert_eq!(kept.len(), 10);
        assert!(
            kept.iter()
                .all(|p| p.start().unwrap().x < 1000.0)
        );
    }

    #[test]
    fn clean_document_reports_stats() {
        let mut paths: Vec<Path> = (0..10).map(|i| square_at(i as f64 * 2.0, 0.0)).collect();
        paths.push(square_at(100_000.0, 0.0));
        let mut doc = MapDocument {
            width: 100.0,
            height: 100.0,
            view_box: None,
            paths,
        };
        let stats = clean_document(&mut doc, DEFAULT_MULTIPLIER).unwrap();
        assert_eq!(stats.total, 11);
        assert_eq!(stats.kept, 10);
        assert_eq!(stats.dropped(), 1);
        assert_eq!(doc.paths.len(), 10);
    }

    #[test]
    fn empty_document_is_an_error() {
        let mut doc = MapDocument {
            width: 100.0,
            height: 100.0,
            view_box: None,
            paths: vec![],
        };
        assert!(matches!(
            clean_document(&mut doc, DEFAULT_MULTIPLIER),
            Err(Error::EmptyDocument)
        ));
    }
}
