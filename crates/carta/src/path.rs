//! Path model: ordered drawing primitives with absolute coordinates.
//!
//! The segment set is intentionally closed; rendering and geometry passes
//! dispatch with exhaustive matches, so a new segment kind has to extend both
//! the enum and every match together.

use crate::geom::{Bounds, Point, Vector, point};

/// Number of evenly spaced parameter values used to flatten a curved segment.
///
/// Fixed, not adaptive: `t = 0.0, 0.1, ..., 1.0`.
pub const CURVE_SAMPLES: usize = 11;

/// One drawing primitive inside a [`Path`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    /// Pen-up relocation. Start and end are the same point, matching how a
    /// bare `M` behaves mid-path.
    Move { start: Point, end: Point },
    Line {
        start: Point,
        end: Point,
    },
    Cubic {
        start: Point,
        ctrl1: Point,
        ctrl2: Point,
        end: Point,
    },
    Quadratic {
        start: Point,
        ctrl: Point,
        end: Point,
    },
    /// Elliptical arc in SVG endpoint parameterization.
    Arc {
        start: Point,
        rx: f64,
        ry: f64,
        /// Rotation of the ellipse's x-axis, in degrees.
        x_rotation: f64,
        large_arc: bool,
        sweep: bool,
        end: Point,
    },
}

impl Segment {
    pub fn start(&self) -> Point {
        match *self {
            Segment::Move { start, .. }
            | Segment::Line { start, .. }
            | Segment::Cubic { start, .. }
            | Segment::Quadratic { start, .. }
            | Segment::Arc { start, .. } => start,
        }
    }

    pub fn end(&self) -> Point {
        match *self {
            Segment::Move { end, .. }
            | Segment::Line { end, .. }
            | Segment::Cubic { end, .. }
            | Segment::Quadratic { end, .. }
            | Segment::Arc { end, .. } => end,
        }
    }

    pub fn is_curve(&self) -> bool {
        matches!(
            self,
            Segment::Cubic { .. } | Segment::Quadratic { .. } | Segment::Arc { .. }
        )
    }

    /// Evaluate the segment at parameter `t` in `[0, 1]`.
    ///
    /// `Move` and `Line` interpolate linearly; arcs go through the W3C
    /// endpoint-to-center conversion, with degenerate radii degrading to a
    /// straight line per the SVG spec.
    pub fn point_at(&self, t: f64) -> Point {
        match *self {
            Segment::Move { start, end } | Segment::Line { start, end } => start.lerp(end, t),
            Segment::Cubic {
                start,
                ctrl1,
                ctrl2,
                end,
            } => {
                let u = 1.0 - t;
                let b0 = u * u * u;
                let b1 = 3.0 * u * u * t;
                let b2 = 3.0 * u * t * t;
                let b3 = t * t * t;
                point(
                    b0 * start.x + b1 * ctrl1.x + b2 * ctrl2.x + b3 * end.x,
                    b0 * start.y + b1 * ctrl1.y + b2 * ctrl2.y + b3 * end.y,
                )
            }
            Segment::Quadratic { start, ctrl, end } => {
                let u = 1.0 - t;
                let b0 = u * u;
                let b1 = 2.0 * u * t;
                let b2 = t * t;
                point(
                    b0 * start.x + b1 * ctrl.x + b2 * end.x,
                    b0 * start.y + b1 * ctrl.y + b2 * end.y,
                )
            }
            Segment::Arc {
                start,
                rx,
                ry,
                x_rotation,
                large_arc,
                sweep,
                end,
            } => match ArcCenter::compute(start, rx, ry, x_rotation, large_arc, sweep, end) {
                Some(arc) => arc.point_at(t),
                None => start.lerp(end, t),
            },
        }
    }

    /// Flatten a curved segment to exactly [`CURVE_SAMPLES`] points,
    /// regardless of curve length or curvature.
    pub fn sample(&self) -> Vec<Point> {
        (0..CURVE_SAMPLES)
            .map(|i| self.point_at(i as f64 / (CURVE_SAMPLES - 1) as f64))
            .collect()
    }

    pub fn translate(&mut self, by: Vector) {
        let map = |p: Point| p + by;
        self.map_points(map);
    }

    /// Uniform scale about the origin. Arc radii scale with the geometry.
    pub fn scale(&mut self, factor: f64) {
        self.map_points(|p| point(p.x * factor, p.y * factor));
        if let Segment::Arc { rx, ry, .. } = self {
            *rx *= factor;
            *ry *= factor;
        }
    }

    fn map_points(&mut self, map: impl Fn(Point) -> Point) {
        match self {
            Segment::Move { start, end } | Segment::Line { start, end } => {
                *start = map(*start);
                *end = map(*end);
            }
            Segment::Cubic {
                start,
                ctrl1,
                ctrl2,
                end,
            } => {
                *start = map(*start);
                *ctrl1 = map(*ctrl1);
                *ctrl2 = map(*ctrl2);
                *end = map(*end);
            }
            Segment::Quadratic { start, ctrl, end } => {
                *start = map(*start);
                *ctrl = map(*ctrl);
                *end = map(*end);
            }
            Segment::Arc { start, end, .. } => {
                *start = map(*start);
                *end = map(*end);
            }
        }
    }
}

/// Center parameterization of an elliptical arc (W3C SVG F.6.5).
struct ArcCenter {
    cx: f64,
    cy: f64,
    rx: f64,
    ry: f64,
    cos_phi: f64,
    sin_phi: f64,
    theta1: f64,
    delta: f64,
}

impl ArcCenter {
    #[allow(clippy::too_many_arguments)]
    fn compute(
        start: Point,
        rx: f64,
        ry: f64,
        x_rotation: f64,
        large_arc: bool,
        sweep: bool,
        end: Point,
    ) -> Option<Self> {
        let mut rx = rx.abs();
        let mut ry = ry.abs();
        if rx == 0.0 || ry == 0.0 || start == end {
            return None;
        }

        let phi = x_rotation.to_radians();
        let (sin_phi, cos_phi) = phi.sin_cos();

        let dx = (start.x - end.x) / 2.0;
        let dy = (start.y - end.y) / 2.0;
        let x1p = cos_phi * dx + sin_phi * dy;
        let y1p = -sin_phi * dx + cos_phi * dy;

        // Correct out-of-range radii (F.6.6).
        let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
        if lambda > 1.0 {
            let s = lambda.sqrt();
            rx *= s;
            ry *= s;
        }

        let rx2 = rx * rx;
        let ry2 = ry * ry;
        let num = rx2 * ry2 - rx2 * y1p * y1p - ry2 * x1p * x1p;
        let den = rx2 * y1p * y1p + ry2 * x1p * x1p;
        if den == 0.0 {
            return None;
        }
        let mut coef = (num / den).max(0.0).sqrt();
        if large_arc == sweep {
            coef = -coef;
        }

        let cxp = coef * rx * y1p / ry;
        let cyp = -coef * ry * x1p / rx;
        let cx = cos_phi * cxp - sin_phi * cyp + (start.x + end.x) / 2.0;
        let cy = sin_phi * cxp + cos_phi * cyp + (start.y + end.y) / 2.0;

        let angle = |ux: f64, uy: f64, vx: f64, vy: f64| -> f64 {
            let dot = ux * vx + uy * vy;
            let len = (ux * ux + uy * uy).sqrt() * (vx * vx + vy * vy).sqrt();
            let mut a = (dot / len).clamp(-1.0, 1.0).acos();
            if ux * vy - uy * vx < 0.0 {
                a = -a;
            }
            a
        };

        let ux = (x1p - cxp) / rx;
        let uy = (y1p - cyp) / ry;
        let vx = (-x1p - cxp) / rx;
        let vy = (-y1p - cyp) / ry;

        let theta1 = angle(1.0, 0.0, ux, uy);
        let mut delta = angle(ux, uy, vx, vy) % (2.0 * std::f64::consts::PI);
        if !sweep && delta > 0.0 {
            delta -= 2.0 * std::f64::consts::PI;
        }
        if sweep && delta < 0.0 {
            delta += 2.0 * std::f64::consts::PI;
        }

        Some(Self {
            cx,
            cy,
            rx,
            ry,
            cos_phi,
            sin_phi,
            theta1,
            delta,
        })
    }

    fn point_at(&self, t: f64) -> Point {
        let theta = self.theta1 + t * self.delta;
        let (sin_t, cos_t) = theta.sin_cos();
        point(
            self.cx + self.rx * cos_t * self.cos_phi - self.ry * sin_t * self.sin_phi,
            self.cy + self.rx * cos_t * self.sin_phi + self.ry * sin_t * self.cos_phi,
        )
    }
}

/// One shape: an ordered sequence of segments with a designated start point.
///
/// Attributes carry everything from the source `<path>` element except `d`,
/// so cleanup passes can write elements back without understanding styling.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    pub segments: Vec<Segment>,
    pub closed: bool,
    pub attributes: Vec<(String, String)>,
}

impl Path {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self {
            segments,
            closed: false,
            attributes: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The designated start point: where the first segment begins.
    pub fn start(&self) -> Option<Point> {
        self.segments.first().map(Segment::start)
    }

    /// Start points of every segment, in order.
    pub fn segment_starts(&self) -> impl Iterator<Item = Point> + '_ {
        self.segments.iter().map(Segment::start)
    }

    /// Start and end points of every segment, in order.
    pub fn endpoints(&self) -> impl Iterator<Item = Point> + '_ {
        self.segments.iter().flat_map(|s| [s.start(), s.end()])
    }

    pub fn translate(&mut self, by: Vector) {
        for seg in &mut self.segments {
            seg.translate(by);
        }
    }

    pub fn scale(&mut self, factor: f64) {
        for seg in &mut self.segments {
            seg.scale(factor);
        }
    }
}

/// Minimal axis-aligned rectangle containing every segment endpoint across
/// all paths. `None` when there is no geometry at all.
pub fn paths_bounds(paths: &[Path]) -> Option<Bounds> {
    Bounds::from_points(paths.iter().flat_map(Path::endpoints))
}
