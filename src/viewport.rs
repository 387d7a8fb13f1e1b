//! Viewport bindings: who tells us how big the surface is.
//!
//! The render loop reads the viewport once at start (to size the surface
//! and place the field) and receives resize notifications afterwards; it
//! never mutates the viewport itself.

use std::sync::Arc;

use glam::Vec2;
use winit::window::Window;

/// Live access to the host viewport's dimensions.
pub trait ViewportBinding {
    /// Current width in pixels.
    fn width(&self) -> f32;

    /// Current height in pixels.
    fn height(&self) -> f32;

    /// Width and height as a vector.
    fn size(&self) -> Vec2 {
        Vec2::new(self.width(), self.height())
    }
}

/// A winit window as the viewport.
pub struct WindowViewport {
    window: Arc<Window>,
}

impl WindowViewport {
    pub fn new(window: Arc<Window>) -> Self {
        Self { window }
    }
}

impl ViewportBinding for WindowViewport {
    fn width(&self) -> f32 {
        self.window.inner_size().width as f32
    }

    fn height(&self) -> f32 {
        self.window.inner_size().height as f32
    }
}

/// A constant-size viewport for headless runs and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedViewport {
    pub width: f32,
    pub height: f32,
}

impl FixedViewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl ViewportBinding for FixedViewport {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_viewport_reports_size() {
        let vp = FixedViewport::new(800.0, 600.0);
        assert_eq!(vp.width(), 800.0);
        assert_eq!(vp.height(), 600.0);
        assert_eq!(vp.size(), Vec2::new(800.0, 600.0));
    }
}
