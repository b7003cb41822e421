//! The drawing surface the renderer talks to.
//!
//! An explicit context object instead of a process-wide singleton: callers
//! create a surface, hand it to the renderer, and destroy it (drop) when the
//! session ends. Tests use [`RecordingSurface`] to assert the exact command
//! sequence; the window path uses the tiny-skia raster backend.

use carta::Point;

/// Pen commands in transformed display coordinates.
pub trait Surface {
    /// Pen-up relocation.
    fn move_to(&mut self, p: Point);
    /// Pen-down straight draw from the current position.
    fn draw_to(&mut self, p: Point);
    /// Start collecting a filled polygon.
    fn begin_fill(&mut self);
    /// Close and flush the collected polygon.
    fn end_fill(&mut self);
    /// Wipe the surface to its background.
    fn clear(&mut self);
}

/// One recorded surface command, for tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawOp {
    MoveTo(Point),
    DrawTo(Point),
    BeginFill,
    EndFill,
    Clear,
}

/// Surface that records commands instead of drawing.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draw_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::DrawTo(_)))
            .count()
    }

    pub fn move_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::MoveTo(_)))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn move_to(&mut self, p: Point) {
        self.ops.push(DrawOp::MoveTo(p));
    }

    fn draw_to(&mut self, p: Point) {
        self.ops.push(DrawOp::DrawTo(p));
    }

    fn begin_fill(&mut self) {
        self.ops.push(DrawOp::BeginFill);
    }

    fn end_fill(&mut self) {
        self.ops.push(DrawOp::EndFill);
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }
}
