//! The per-frame driver.
//!
//! `RenderLoop` is the owning context for one running backdrop: the surface,
//! the field, and an explicit `{Running, Stopped}` state. The host schedules
//! `frame()` once per display refresh; the return value says whether to
//! schedule the next one. After `stop()`, an already-scheduled invocation
//! no-ops and does not re-schedule, so teardown never leaves a live callback
//! drawing against a dead surface.

use glam::Vec2;
use rand::Rng;

use crate::field::ParticleField;
use crate::surface::Surface;
use crate::time::Time;

/// Lifecycle state of a [`RenderLoop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Frames advance and request re-scheduling.
    Running,
    /// Frames are no-ops; nothing re-schedules.
    Stopped,
}

/// Owns a surface and a particle field and steps them one frame at a time.
pub struct RenderLoop<S: Surface> {
    surface: S,
    field: ParticleField,
    state: LoopState,
    time: Time,
}

impl<S: Surface> RenderLoop<S> {
    /// Bind `surface` to the viewport, spawn the field, enter `Running`.
    ///
    /// The field captures `viewport` as its permanent bounds; later resizes
    /// only retarget the surface (see [`RenderLoop::on_resize`]).
    pub fn start(
        mut surface: S,
        viewport: Vec2,
        particle_count: usize,
        link_radius: f32,
        rng: &mut impl Rng,
    ) -> Self {
        surface.resize(viewport.x as u32, viewport.y as u32);
        let field = ParticleField::with_link_radius(particle_count, viewport, link_radius, rng);
        Self {
            surface,
            field,
            state: LoopState::Running,
            time: Time::new(),
        }
    }

    /// Run one frame: clear, advance, render, reset the global alpha.
    ///
    /// Returns `true` if the host should schedule the next frame. When the
    /// loop is stopped this touches nothing and returns `false`.
    pub fn frame(&mut self) -> bool {
        if self.state == LoopState::Stopped {
            return false;
        }

        self.time.update();
        self.surface.clear();
        self.field.advance();
        self.field.render(&mut self.surface);
        // Once per frame, never per link.
        self.surface.set_alpha(1.0);
        true
    }

    /// Adapt the surface to a new viewport size.
    ///
    /// Only the surface's pixel dimensions change. The field keeps its
    /// construction-time bounds, so particles go on reflecting at the old
    /// edges. Shrinking the window can leave particles drifting outside
    /// the visible area; growing it leaves an inactive margin.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        self.surface.resize(width, height);
    }

    /// Stop the loop. The next scheduled `frame()` becomes a no-op.
    pub fn stop(&mut self) {
        self.state = LoopState::Stopped;
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Frame/FPS bookkeeping for the current run.
    pub fn time(&self) -> &Time {
        &self.time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawOp, Recorder};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn started(count: usize) -> RenderLoop<Recorder> {
        let mut rng = SmallRng::seed_from_u64(17);
        RenderLoop::start(
            Recorder::new(),
            Vec2::new(800.0, 600.0),
            count,
            120.0,
            &mut rng,
        )
    }

    #[test]
    fn test_start_sizes_surface_and_spawns_field() {
        let rl = started(150);
        assert!(rl.is_running());
        assert_eq!(rl.field().particles().len(), 150);
        assert_eq!(rl.surface().ops()[0], DrawOp::Resize { width: 800, height: 600 });
    }

    #[test]
    fn test_frame_sequence_clear_first_alpha_reset_last() {
        let mut rl = started(10);
        rl.surface_mut().reset();
        assert!(rl.frame());

        let ops = rl.surface().ops();
        assert_eq!(ops[0], DrawOp::Clear);
        assert_eq!(*ops.last().unwrap(), DrawOp::SetAlpha(1.0));
        // Exactly one alpha reset per frame.
        let resets = ops.iter().filter(|op| matches!(op, DrawOp::SetAlpha(_))).count();
        assert_eq!(resets, 1);
    }

    #[test]
    fn test_stopped_frame_is_noop_and_does_not_reschedule() {
        let mut rl = started(10);
        rl.stop();
        rl.surface_mut().reset();

        assert!(!rl.frame());
        assert!(rl.surface().ops().is_empty());
        assert!(!rl.is_running());
    }

    #[test]
    fn test_resize_touches_surface_not_field_bounds() {
        let mut rl = started(10);
        let bounds_before = rl.field().bounds();
        rl.surface_mut().reset();

        rl.on_resize(1024, 768);

        assert_eq!(
            rl.surface().ops(),
            &[DrawOp::Resize { width: 1024, height: 768 }]
        );
        assert_eq!(rl.field().bounds(), bounds_before);
    }

    #[test]
    fn test_frame_advances_time() {
        let mut rl = started(5);
        assert_eq!(rl.time().frame(), 0);
        rl.frame();
        rl.frame();
        assert_eq!(rl.time().frame(), 2);
    }
}
