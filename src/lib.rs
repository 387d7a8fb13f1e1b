//! # driftmesh
//!
//! An ambient, animated backdrop of drifting particles joined by proximity
//! links: every particle pair closer than the link radius gets a line whose
//! alpha fades linearly with distance. Meant to sit behind page content,
//! purely decorative, never in the way.
//!
//! ## Quick Start
//!
//! ```ignore
//! use driftmesh::Backdrop;
//!
//! fn main() {
//!     Backdrop::new()
//!         .with_particle_count(150)
//!         .with_link_radius(120.0)
//!         .run()
//!         .unwrap();
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Particles
//!
//! A [`Particle`] is a plain record: position, a constant-magnitude
//! velocity, and visual attributes fixed at spawn (radius in [1, 4),
//! opacity in [0.2, 0.7), one of six palette [`Color`]s). Each frame it
//! takes one Euler step and reflects off the field bounds by flipping the
//! offending velocity component.
//!
//! ### The field
//!
//! [`ParticleField`] owns the particle sequence and its construction-time
//! bounds. `advance()` steps everything; `render()` paints circles and then
//! the links. The pairwise scan is O(n²), fine at the default count of 150;
//! past a cutoff the field switches to a uniform grid
//! ([`spatial::LinkGrid`]) that emits the identical draw sequence.
//!
//! ### The loop
//!
//! [`RenderLoop`] is an explicit `{Running, Stopped}` state machine. The
//! host schedules `frame()` once per refresh; after `stop()` a scheduled
//! invocation no-ops instead of drawing against a dead surface. The
//! windowed [`Backdrop`] wires this to winit's `RedrawRequested`.
//!
//! ### Surfaces
//!
//! Drawing goes through the [`Surface`] trait. [`gpu::GpuSurface`]
//! rasterizes with wgpu (instanced circle and line quads);
//! [`surface::Recorder`] captures the draw-call sequence for tests and
//! debugging.

pub mod backdrop;
pub mod error;
pub mod field;
pub mod gpu;
pub mod particle;
pub mod render_loop;
pub mod spatial;
pub mod surface;
pub mod time;
pub mod viewport;
pub mod visuals;

pub use backdrop::Backdrop;
pub use error::{BackdropError, GpuError};
pub use field::{ParticleField, DEFAULT_LINK_RADIUS, DEFAULT_PARTICLE_COUNT};
pub use glam::Vec2;
pub use particle::Particle;
pub use render_loop::{LoopState, RenderLoop};
pub use surface::{DrawOp, Recorder, Surface};
pub use viewport::{FixedViewport, ViewportBinding, WindowViewport};
pub use visuals::Color;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::backdrop::Backdrop;
    pub use crate::field::ParticleField;
    pub use crate::particle::Particle;
    pub use crate::render_loop::{LoopState, RenderLoop};
    pub use crate::surface::{DrawOp, Recorder, Surface};
    pub use crate::time::Time;
    pub use crate::viewport::{FixedViewport, ViewportBinding, WindowViewport};
    pub use crate::visuals::Color;
    pub use crate::Vec2;
}
