//! The view controller: one "viewing" state, mutated by discrete commands.

use crate::error::{Error, Result};
use crate::fit::FitOptions;
use crate::render::render_paths;
use crate::surface::Surface;
use crate::viewport::{PanDirection, Viewport};
use carta::{Bounds, Path, paths_bounds};

/// A discrete user command against the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewCommand {
    ZoomIn,
    ZoomOut,
    Pan(PanDirection),
    Quit,
}

pub struct ViewController {
    paths: Vec<Path>,
    bounds: Bounds,
    pub viewport: Viewport,
}

impl ViewController {
    /// Build a controller over an immutable path set. The paths are parsed
    /// once per file load; only the viewport mutates afterwards.
    pub fn new(paths: Vec<Path>, opts: &FitOptions) -> Result<Self> {
        let bounds = paths_bounds(&paths).ok_or(Error::EmptyInput)?;
        let viewport = Viewport::from_bounds(bounds, opts);
        Ok(Self {
            paths,
            bounds,
            viewport,
        })
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Initial window size in pixels.
    pub fn window_size(&self) -> (u32, u32) {
        (
            self.viewport.width().ceil().max(1.0) as u32,
            self.viewport.height().ceil().max(1.0) as u32,
        )
    }

    /// Apply a view command. `Quit` is a no-op here; the window shell owns
    /// shutdown. Returns whether the view changed and needs a redraw.
    pub fn apply(&mut self, command: ViewCommand) -> bool {
        match command {
            ViewCommand::ZoomIn => self.viewport.zoom_in(),
            ViewCommand::ZoomOut => self.viewport.zoom_out(),
            ViewCommand::Pan(direction) => self.viewport.pan(direction),
            ViewCommand::Quit => return false,
        }
        true
    }

    /// Replay the full render onto a surface.
    pub fn render(&self, surface: &mut dyn Surface) -> Result<()> {
        render_paths(&self.paths, self.viewport.scale, surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;
    use carta::parse_path_data;

    fn controller() -> ViewController {
        let path = parse_path_data("M 0 0 L 400 0 L 400 300 L 0 300 Z").unwrap();
        ViewController::new(vec![path], &FitOptions::default()).unwrap()
    }

    #[test]
    fn empty_path_set_is_rejected() {
        assert!(matches!(
            ViewController::new(vec![], &FitOptions::default()),
            Err(Error::EmptyInput)
        ));
    }

    #[test]
    fn commands_mutate_the_viewport() {
        let mut c = controller();
        let scale = c.viewport.scale;
        assert!(c.apply(ViewCommand::ZoomIn));
        assert!(c.viewport.scale > scale);

        let min_x = c.viewport.min_x;
        assert!(c.apply(ViewCommand::Pan(PanDirection::Right)));
        assert!(c.viewport.min_x > min_x);

        assert!(!c.apply(ViewCommand::Quit));
    }

    #[test]
    fn render_replays_every_time() {
        let c = controller();
        let mut first = RecordingSurface::new();
        let mut second = RecordingSurface::new();
        c.render(&mut first).unwrap();
        c.render(&mut second).unwrap();
        assert_eq!(first.ops, second.ops);
        assert!(!first.ops.is_empty());
    }

    #[test]
    fn window_size_respects_fit_limits() {
        let c = controller();
        let (w, h) = c.window_size();
        assert!(w >= 1 && w <= 800);
        assert!(h >= 1 && h <= 600);
    }
}
