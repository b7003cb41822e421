//! Path-data (`d` attribute) ingestion.
//!
//! The mini-language grammar itself is handled by `svgtypes`; this module only
//! absolutizes the stream: relative commands, `H`/`V` shorthands, smooth
//! (`S`/`T`) control-point reflection, and `Z` closes all resolve to the
//! closed set of [`Segment`] kinds with absolute coordinates.

use crate::error::{Error, Result};
use crate::geom::{Point, point};
use crate::path::{Path, Segment};
use svgtypes::{PathParser, PathSegment};

/// The control point a smooth command reflects, if the previous segment
/// left one behind.
#[derive(Clone, Copy)]
enum PrevControl {
    None,
    Cubic(Point),
    Quadratic(Point),
}

/// Parse one `d` attribute into a [`Path`].
///
/// Any `svgtypes` error fails the whole parse; we never keep a partial
/// shape.
pub fn parse_path_data(data: &str) -> Result<Path> {
    let mut segments = Vec::new();
    let mut closed = false;

    let mut cur = point(0.0, 0.0);
    let mut subpath_start = cur;
    let mut prev_ctrl = PrevControl::None;

    for token in PathParser::from(data) {
        let token = token.map_err(|e| Error::MalformedPath {
            message: e.to_string(),
        })?;

        match token {
            PathSegment::MoveTo { abs, x, y } => {
                let end = resolve(abs, cur, x, y);
                segments.push(Segment::Move { start: end, end });
                cur = end;
                subpath_start = end;
                prev_ctrl = PrevControl::None;
            }
            PathSegment::LineTo { abs, x, y } => {
                let end = resolve(abs, cur, x, y);
                segments.push(Segment::Line { start: cur, end });
                cur = end;
                prev_ctrl = PrevControl::None;
            }
            PathSegment::HorizontalLineTo { abs, x } => {
                let end = if abs { point(x, cur.y) } else { point(cur.x + x, cur.y) };
                segments.push(Segment::Line { start: cur, end });
                cur = end;
                prev_ctrl = PrevControl::None;
            }
            PathSegment::VerticalLineTo { abs, y } => {
                let end = if abs { point(cur.x, y) } else { point(cur.x, cur.y + y) };
                segments.push(Segment::Line { start: cur, end });
                cur = end;
                prev_ctrl = PrevControl::None;
            }
            PathSegment::CurveTo {
                abs,
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                let ctrl1 = resolve(abs, cur, x1, y1);
                let ctrl2 = resolve(abs, cur, x2, y2);
                let end = resolve(abs, cur, x, y);
                segments.push(Segment::Cubic {
                    start: cur,
                    ctrl1,
                    ctrl2,
                    end,
                });
                cur = end;
                prev_ctrl = PrevControl::Cubic(ctrl2);
            }
            PathSegment::SmoothCurveTo { abs, x2, y2, x, y } => {
                let ctrl1 = match prev_ctrl {
                    PrevControl::Cubic(c) => reflect(c, cur),
                    _ => cur,
                };
                let ctrl2 = resolve(abs, cur, x2, y2);
                let end = resolve(abs, cur, x, y);
                segments.push(Segment::Cubic {
                    start: cur,
                    ctrl1,
                    ctrl2,
                    end,
                });
                cur = end;
                prev_ctrl = PrevControl::Cubic(ctrl2);
            }
            PathSegment::Quadratic { abs, x1, y1, x, y } => {
                let ctrl = resolve(abs, cur, x1, y1);
                let end = resolve(abs, cur, x, y);
                segments.push(Segment::Quadratic {
                    start: cur,
                    ctrl,
                    end,
                });
                cur = end;
                prev_ctrl = PrevControl::Quadratic(ctrl);
            }
            PathSegment::SmoothQuadratic { abs, x, y } => {
                let ctrl = match prev_ctrl {
                    PrevControl::Quadratic(c) => reflect(c, cur),
                    _ => cur,
                };
                let end = resolve(abs, cur, x, y);
                segments.push(Segment::Quadratic {
                    start: cur,
                    ctrl,
                    end,
                });
                cur = end;
                prev_ctrl = PrevControl::Quadratic(ctrl);
            }
            PathSegment::EllipticalArc {
                abs,
                rx,
                ry,
                x_axis_rotation,
                large_arc,
                sweep,
                x,
                y,
            } => {
                let end = resolve(abs, cur, x, y);
                // Identical endpoints: the SVG spec says the arc is omitted.
                if end != cur {
                    segments.push(Segment::Arc {
                        start: cur,
                        rx,
                        ry,
                        x_rotation: x_axis_rotation,
                        large_arc,
                        sweep,
                        end,
                    });
                    cur = end;
                }
                prev_ctrl = PrevControl::None;
            }
            PathSegment::ClosePath { .. } => {
                if cur != subpath_start {
                    segments.push(Segment::Line {
                        start: cur,
                        end: subpath_start,
                    });
                }
                cur = subpath_start;
                closed = true;
                prev_ctrl = PrevControl::None;
            }
        }
    }

    let mut path = Path::new(segments);
    path.closed = closed;
    Ok(path)
}

fn resolve(abs: bool, cur: Point, x: f64, y: f64) -> Point {
    if abs {
        point(x, y)
    } else {
        point(cur.x + x, cur.y + y)
    }
}

fn reflect(ctrl: Point, about: Point) -> Point {
    point(2.0 * about.x - ctrl.x, 2.0 * about.y - ctrl.y)
}
