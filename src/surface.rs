//! The drawing-surface seam.
//!
//! The simulation core never talks to a graphics API directly; it issues
//! clear / filled-circle / stroked-line calls against the [`Surface`] trait.
//! The crate ships two implementations: the wgpu-backed
//! [`GpuSurface`](crate::gpu::GpuSurface) used by the windowed backdrop, and
//! [`Recorder`], which captures the draw-call sequence for inspection.

use glam::Vec2;

use crate::visuals::Color;

/// A 2D drawing surface in pixel coordinates (origin top-left, y down).
///
/// Alpha handling mirrors a canvas-style context: every draw call carries
/// its own alpha, and a global multiplier applies on top of it. The render
/// loop resets the multiplier to 1.0 once per frame, after all drawing.
pub trait Surface {
    /// Erase everything drawn since the last clear.
    fn clear(&mut self);

    /// Set the global alpha multiplier applied to subsequent draws.
    fn set_alpha(&mut self, alpha: f32);

    /// Paint a filled circle.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32);

    /// Stroke a straight line segment between two points.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Color, alpha: f32, width: f32);

    /// Resize the surface's pixel dimensions.
    fn resize(&mut self, width: u32, height: u32);
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    SetAlpha(f32),
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
        alpha: f32,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
        alpha: f32,
        width: f32,
    },
    Resize {
        width: u32,
        height: u32,
    },
}

/// A [`Surface`] that records every call instead of rasterizing.
///
/// Used by the test suite to assert on exact draw sequences, and handy for
/// debugging what a field emits in a frame.
#[derive(Debug, Default)]
pub struct Recorder {
    ops: Vec<DrawOp>,
}

impl Recorder {
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Everything recorded so far, in call order.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Drop the recorded history (does not count as a `Clear`).
    pub fn reset(&mut self) {
        self.ops.clear();
    }

    /// Recorded circle draws, in call order.
    pub fn circles(&self) -> Vec<&DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Circle { .. }))
            .collect()
    }

    /// Recorded line draws, in call order.
    pub fn lines(&self) -> Vec<&DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Line { .. }))
            .collect()
    }
}

impl Surface for Recorder {
    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.ops.push(DrawOp::SetAlpha(alpha));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32) {
        self.ops.push(DrawOp::Circle {
            center,
            radius,
            color,
            alpha,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Color, alpha: f32, width: f32) {
        self.ops.push(DrawOp::Line {
            from,
            to,
            color,
            alpha,
            width,
        });
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.ops.push(DrawOp::Resize { width, height });
    }
}
