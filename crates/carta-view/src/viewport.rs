//! Viewport state: the visible display-coordinate rectangle plus the current
//! scale factor, mutated in place by pan and zoom.
//!
//! Display coordinates are world coordinates after the render transform
//! (uniform scale, Y flip), so one display unit is one pixel. There is a
//! single state, "viewing": no other mode exists and no transition leaves it.

use crate::fit::{FitOptions, fit_scale};
use crate::render::to_display;
use carta::Bounds;
use carta::geom::point;

/// Multiplier applied per zoom step; zoom-out uses the reciprocal, so the
/// scale can never reach zero or flip sign.
pub const ZOOM_RATIO: f64 = 1.1;

/// Pixel delta applied per pan step, scaled by the current scale factor.
pub const PAN_STEP_PX: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanDirection {
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub scale: f64,
    pub margin: f64,
    /// World-coordinate bounds of the content; zoom recenters on this.
    content: Bounds,
}

impl Viewport {
    /// Initial viewport: content fitted into the display limits with a
    /// scaled margin on every side.
    pub fn from_bounds(content: Bounds, opts: &FitOptions) -> Self {
        let scale = fit_scale(content, opts);
        let margin = opts.margin * scale;
        Self {
            min_x: content.min_x * scale - margin,
            // Y flip: world max_y maps to the display minimum.
            min_y: -content.max_y * scale - margin,
            max_x: content.max_x * scale + margin,
            max_y: -content.min_y * scale + margin,
            scale,
            margin,
            content,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn zoom_in(&mut self) {
        self.zoom(ZOOM_RATIO);
    }

    pub fn zoom_out(&mut self) {
        self.zoom(1.0 / ZOOM_RATIO);
    }

    /// Shift the viewport origin by a fixed pixel delta along one axis,
    /// scaled by the current scale factor. No recentering. Pans are purely
    /// additive, so any sequence of them commutes.
    pub fn pan(&mut self, direction: PanDirection) {
        let step = PAN_STEP_PX * self.scale;
        let (dx, dy) = match direction {
            PanDirection::Left => (-step, 0.0),
            PanDirection::Right => (step, 0.0),
            // Display Y grows downward; panning up shows content above.
            PanDirection::Up => (0.0, -step),
            PanDirection::Down => (0.0, step),
        };
        self.min_x += dx;
        self.max_x += dx;
        self.min_y += dy;
        self.max_y += dy;
    }

    fn zoom(&mut self, ratio: f64) {
        self.scale *= ratio;

        // Recenter on the content center at the new scale. The viewport
        // dimensions (and therefore the aspect ratio) stay fixed, so zooming
        // changes what is visible, not the window geometry.
        let half_w = self.width() / 2.0;
        let half_h = self.height() / 2.0;
        let center = to_display(self.content.center(), self.scale);
        self.min_x = center.x - half_w;
        self.max_x = center.x + half_w;
        self.min_y = center.y - half_h;
        self.max_y = center.y + half_h;
    }

    /// Map a display point to pixel coordinates for a target of the given
    /// size.
    ///
    /// Uses one uniform scale for both axes and centers the viewport in the
    /// target, so a pixel grid with a different aspect ratio letterboxes the
    /// map instead of stretching it.
    pub fn to_pixels(&self, p: carta::Point, pixel_width: f64, pixel_height: f64) -> carta::Point {
        let scale = (pixel_width / self.width()).min(pixel_height / self.height());
        let offset_x = (pixel_width - self.width() * scale) / 2.0;
        let offset_y = (pixel_height - self.height() * scale) / 2.0;
        point(
            (p.x - self.min_x) * scale + offset_x,
            (p.y - self.min_y) * scale + offset_y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carta::geom::point as pt;

    fn viewport() -> Viewport {
        let content = Bounds::from_points([pt(0.0, 0.0), pt(400.0, 300.0)]).unwrap();
        Viewport::from_bounds(content, &FitOptions::default())
    }

    #[test]
    fn initial_scale_fits_and_is_positive() {
        let vp = viewport();
        assert!(vp.scale > 0.0 && vp.scale <= 1.0);
        assert!(vp.width() <= 800.0 + 1e-9);
        assert!(vp.height() <= 600.0 + 1e-9);
    }

    #[test]
    fn zoom_in_then_out_restores_scale() {
        let mut vp = viewport();
        let before = vp.scale;
        vp.zoom_in();
        assert!(vp.scale > before);
        vp.zoom_out();
        assert!((vp.scale - before).abs() < 1e-12);
        assert!(vp.scale > 0.0);
    }

    #[test]
    fn repeated_zoom_out_never_reaches_zero() {
        let mut vp = viewport();
        for _ in 0..1000 {
            vp.zoom_out();
        }
        assert!(vp.scale > 0.0);
    }

    #[test]
    fn zoom_preserves_viewport_dimensions_and_aspect() {
        let mut vp = viewport();
        let (w, h) = (vp.width(), vp.height());
        vp.zoom_in();
        assert!((vp.width() - w).abs() < 1e-9);
        assert!((vp.height() - h).abs() < 1e-9);
        assert!((vp.width() / vp.height() - w / h).abs() < 1e-9);
    }

    #[test]
    fn zoom_recenters_on_content() {
        let mut vp = viewport();
        vp.pan(PanDirection::Right);
        vp.pan(PanDirection::Down);
        vp.zoom_in();
        let center = to_display(pt(200.0, 150.0), vp.scale);
        assert!(((vp.min_x + vp.max_x) / 2.0 - center.x).abs() < 1e-9);
        assert!(((vp.min_y + vp.max_y) / 2.0 - center.y).abs() < 1e-9);
    }

    #[test]
    fn pans_commute() {
        let mut a = viewport();
        a.pan(PanDirection::Right);
        a.pan(PanDirection::Up);

        let mut b = viewport();
        b.pan(PanDirection::Up);
        b.pan(PanDirection::Right);

        assert_eq!(a, b);
    }

    #[test]
    fn pan_shifts_one_axis_by_the_scaled_step() {
        let mut vp = viewport();
        let (x0, y0) = (vp.min_x, vp.min_y);
        vp.pan(PanDirection::Right);
        assert!((vp.min_x - x0 - PAN_STEP_PX * vp.scale).abs() < 1e-9);
        assert_eq!(vp.min_y, y0);
    }

    #[test]
    fn opposite_pans_cancel() {
        let original = viewport();
        let mut vp = original;
        vp.pan(PanDirection::Left);
        vp.pan(PanDirection::Right);
        vp.pan(PanDirection::Up);
        vp.pan(PanDirection::Down);
        assert_eq!(vp, original);
    }

    #[test]
    fn pixel_mapping_covers_a_matching_target() {
        let vp = viewport();
        let (w, h) = (vp.width(), vp.height());
        let top_left = vp.to_pixels(pt(vp.min_x, vp.min_y), w, h);
        let bottom_right = vp.to_pixels(pt(vp.max_x, vp.max_y), w, h);
        assert!((top_left.x - 0.0).abs() < 1e-9);
        assert!((top_left.y - 0.0).abs() < 1e-9);
        assert!((bottom_right.x - w).abs() < 1e-9);
        assert!((bottom_right.y - h).abs() < 1e-9);
    }

    #[test]
    fn pixel_mapping_letterboxes_a_wider_target_without_distortion() {
        let vp = viewport();
        let (w, h) = (vp.width(), vp.height());
        // Twice as wide as the viewport: the height still binds the scale,
        // and the map is centered in the extra width.
        let top_left = vp.to_pixels(pt(vp.min_x, vp.min_y), 2.0 * w, h);
        let bottom_right = vp.to_pixels(pt(vp.max_x, vp.max_y), 2.0 * w, h);
        assert!((top_left.x - w / 2.0).abs() < 1e-9);
        assert!((top_left.y - 0.0).abs() < 1e-9);
        assert!((bottom_right.x - 1.5 * w).abs() < 1e-9);
        assert!((bottom_right.y - h).abs() < 1e-9);

        // One display unit maps to the same pixel span on both axes.
        let unit_x = vp.to_pixels(pt(vp.min_x + 1.0, vp.min_y), 2.0 * w, h);
        let unit_y = vp.to_pixels(pt(vp.min_x, vp.min_y + 1.0), 2.0 * w, h);
        assert!(((unit_x.x - top_left.x) - (unit_y.y - top_left.y)).abs() < 1e-9);
    }
}
