//! Draw-command generation: paths to pen commands on a [`Surface`].

use crate::error::{Error, Result};
use crate::surface::Surface;
use carta::geom::point;
use carta::{Path, Point, Segment};

/// Transform a world point to display coordinates: uniform scale plus a
/// Y-axis flip to match screen orientation.
pub fn to_display(p: Point, scale: f64) -> Point {
    point(p.x * scale, -p.y * scale)
}

/// Render every path as a filled shape.
///
/// Per path: one pen-up move to its start, fill-begin, then one draw per
/// line and eleven sampled draws per curved segment, a closing draw back to
/// the start when the geometry didn't end there, and fill-end. Mid-path
/// `Move` segments lift the pen; a move that lands where the pen already is
/// gets elided, so a path's leading `M` costs nothing extra.
pub fn render_paths(paths: &[Path], scale: f64, surface: &mut dyn Surface) -> Result<()> {
    if paths.is_empty() {
        return Err(Error::EmptyInput);
    }

    surface.clear();
    for path in paths {
        render_path(path, scale, surface);
    }
    Ok(())
}

fn render_path(path: &Path, scale: f64, surface: &mut dyn Surface) {
    let Some(start) = path.start() else {
        return;
    };
    let start = to_display(start, scale);

    surface.move_to(start);
    surface.begin_fill();

    let mut pen = start;
    for segment in &path.segments {
        match segment {
            Segment::Move { end, .. } => {
                let p = to_display(*end, scale);
                if !same_point(p, pen) {
                    surface.move_to(p);
                    pen = p;
                }
            }
            Segment::Line { end, .. } => {
                pen = to_display(*end, scale);
                surface.draw_to(pen);
            }
            Segment::Cubic { .. } | Segment::Quadratic { .. } | Segment::Arc { .. } => {
                for sample in segment.sample() {
                    pen = to_display(sample, scale);
                    surface.draw_to(pen);
                }
            }
        }
    }

    // Close back to the start before ending the fill.
    if !same_point(pen, start) {
        surface.draw_to(start);
    }
    surface.end_fill();
}

fn same_point(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawOp, RecordingSurface};
    use carta::parse_path_data;

    #[test]
    fn empty_input_is_reported_not_rendered() {
        let mut surface = RecordingSurface::new();
        let err = render_paths(&[], 1.0, &mut surface).unwrap_err();
        assert!(matches!(err, Error::EmptyInput));
        assert!(surface.ops.is_empty());
    }

    #[test]
    fn triangle_issues_one_move_three_draws_inside_one_fill() {
        let path = parse_path_data("M 0 0 L 10 0 L 10 10 Z").unwrap();
        let mut surface = RecordingSurface::new();
        render_paths(&[path], 1.0, &mut surface).unwrap();

        assert_eq!(surface.move_count(), 1);
        assert_eq!(surface.draw_count(), 3);

        // Clear, move, fill-begin before the first draw, fill-end after the
        // geometry returned to the start.
        assert_eq!(surface.ops[0], DrawOp::Clear);
        assert_eq!(surface.ops[1], DrawOp::MoveTo(point(0.0, 0.0)));
        assert_eq!(surface.ops[2], DrawOp::BeginFill);
        assert!(matches!(surface.ops[3], DrawOp::DrawTo(_)));
        assert_eq!(*surface.ops.last().unwrap(), DrawOp::EndFill);
        // The last draw returns to the start point.
        assert_eq!(surface.ops[5], DrawOp::DrawTo(point(0.0, 0.0)));
    }

    #[test]
    fn open_paths_get_a_closing_draw() {
        let path = parse_path_data("M 0 0 L 10 0 L 10 10").unwrap();
        let mut surface = RecordingSurface::new();
        render_paths(&[path], 1.0, &mut surface).unwrap();
        // Two line segments plus the synthetic close.
        assert_eq!(surface.draw_count(), 3);
        assert_eq!(surface.ops[surface.ops.len() - 2], DrawOp::DrawTo(point(0.0, 0.0)));
    }

    #[test]
    fn curves_contribute_eleven_draws_each() {
        let path = parse_path_data("M 0 0 C 0 10, 10 10, 10 0 Z").unwrap();
        let mut surface = RecordingSurface::new();
        render_paths(&[path], 1.0, &mut surface).unwrap();
        // 11 sampled draws for the cubic plus the closing line from Z.
        assert_eq!(surface.draw_count(), 12);
    }

    #[test]
    fn display_transform_scales_and_flips_y() {
        let path = parse_path_data("M 0 0 L 10 20").unwrap();
        let mut surface = RecordingSurface::new();
        render_paths(&[path], 0.5, &mut surface).unwrap();
        assert!(surface.ops.contains(&DrawOp::DrawTo(point(5.0, -10.0))));
    }

    #[test]
    fn each_path_is_its_own_fill() {
        let a = parse_path_data("M 0 0 L 1 0 L 1 1 Z").unwrap();
        let b = parse_path_data("M 5 5 L 6 5 L 6 6 Z").unwrap();
        let mut surface = RecordingSurface::new();
        render_paths(&[a, b], 1.0, &mut surface).unwrap();
        let begins = surface
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::BeginFill))
            .count();
        let ends = surface
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::EndFill))
            .count();
        assert_eq!(begins, 2);
        assert_eq!(ends, 2);
        assert_eq!(surface.move_count(), 2);
    }
}
