//! tiny-skia raster backend for the drawing surface.
//!
//! Pen commands arrive in display coordinates; the viewport maps them onto
//! the pixel grid. Fills collect a polygon into a `PathBuilder` and flush on
//! `end_fill` with a solid fill plus a thin outline stroke.

use crate::error::{Error, Result};
use crate::surface::Surface;
use crate::viewport::Viewport;
use carta::Point;
use tiny_skia::{
    Color, FillRule, Paint, PathBuilder, Pixmap, Shader, Stroke, Transform,
};

const BACKGROUND: Color = Color::WHITE;

fn fill_color() -> Color {
    // Pastel blue, same as the original map fills.
    Color::from_rgba8(173, 216, 230, 255)
}

fn outline_color() -> Color {
    Color::from_rgba8(70, 130, 180, 255)
}

pub struct RasterSurface {
    pixmap: Pixmap,
    viewport: Viewport,
    builder: Option<PathBuilder>,
    pen: Option<Point>,
}

impl RasterSurface {
    /// Create a surface of the given pixel size showing `viewport`.
    pub fn new(width: u32, height: u32, viewport: Viewport) -> Result<Self> {
        let mut pixmap = Pixmap::new(width.max(1), height.max(1))
            .ok_or_else(|| Error::Window("failed to allocate pixmap".to_string()))?;
        pixmap.fill(BACKGROUND);
        Ok(Self {
            pixmap,
            viewport,
            builder: None,
            pen: None,
        })
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn to_pixels(&self, p: Point) -> (f32, f32) {
        let px = self.viewport.to_pixels(
            p,
            f64::from(self.pixmap.width()),
            f64::from(self.pixmap.height()),
        );
        (px.x as f32, px.y as f32)
    }

    fn flush_fill(&mut self) {
        let Some(mut builder) = self.builder.take() else {
            return;
        };
        builder.close();
        let Some(path) = builder.finish() else {
            return;
        };

        let mut paint = Paint {
            shader: Shader::SolidColor(fill_color()),
            anti_alias: true,
            ..Paint::default()
        };
        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);

        paint.shader = Shader::SolidColor(outline_color());
        let stroke = Stroke {
            width: 1.0,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }
}

impl Surface for RasterSurface {
    fn move_to(&mut self, p: Point) {
        let (x, y) = self.to_pixels(p);
        if let Some(builder) = &mut self.builder {
            builder.move_to(x, y);
        }
        self.pen = Some(p);
    }

    fn draw_to(&mut self, p: Point) {
        let (x, y) = self.to_pixels(p);
        if let Some(builder) = &mut self.builder {
            builder.line_to(x, y);
        }
        self.pen = Some(p);
    }

    fn begin_fill(&mut self) {
        let mut builder = PathBuilder::new();
        if let Some(pen) = self.pen {
            let (x, y) = self.to_pixels(pen);
            builder.move_to(x, y);
        }
        self.builder = Some(builder);
    }

    fn end_fill(&mut self) {
        self.flush_fill();
    }

    fn clear(&mut self) {
        self.builder = None;
        self.pixmap.fill(BACKGROUND);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fit::FitOptions;
    use crate::render::render_paths;
    use crate::viewport::Viewport;
    use carta::{parse_path_data, paths_bounds};

    fn background_pixel() -> tiny_skia::PremultipliedColorU8 {
        tiny_skia::PremultipliedColorU8::from_rgba(255, 255, 255, 255).unwrap()
    }

    #[test]
    fn rendering_touches_pixels_inside_the_shape() {
        let path = parse_path_data("M 0 0 L 100 0 L 100 100 L 0 100 Z").unwrap();
        let paths = vec![path];
        let bounds = paths_bounds(&paths).unwrap();
        let vp = Viewport::from_bounds(bounds, &FitOptions::default());

        let mut surface =
            RasterSurface::new(vp.width() as u32, vp.height() as u32, vp).unwrap();
        render_paths(&paths, vp.scale, &mut surface).unwrap();

        let pixmap = surface.pixmap();
        let center = pixmap
            .pixel(pixmap.width() / 2, pixmap.height() / 2)
            .unwrap();
        assert_ne!(center, background_pixel(), "square interior must be filled");

        // The margin area stays background.
        let corner = pixmap.pixel(1, 1).unwrap();
        assert_eq!(corner, background_pixel());
    }

    #[test]
    fn clear_resets_to_background() {
        let path = parse_path_data("M 0 0 L 100 0 L 100 100 L 0 100 Z").unwrap();
        let paths = vec![path];
        let bounds = paths_bounds(&paths).unwrap();
        let vp = Viewport::from_bounds(bounds, &FitOptions::default());

        let mut surface =
            RasterSurface::new(vp.width() as u32, vp.height() as u32, vp).unwrap();
        render_paths(&paths, vp.scale, &mut surface).unwrap();
        surface.clear();

        let pixmap = surface.pixmap();
        let center = pixmap
            .pixel(pixmap.width() / 2, pixmap.height() / 2)
            .unwrap();
        assert_eq!(center, background_pixel());
    }
}
