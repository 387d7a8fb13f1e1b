//! The particle field: simulation state and per-frame drawing.
//!
//! `ParticleField` owns the particle sequence and the construction-time
//! bounds. `advance()` steps every particle; `render()` paints the circles
//! and then the proximity links. Link detection is the one algorithmic
//! routine here: every particle pair closer than the link radius gets a
//! line whose alpha falls off linearly with distance.

use glam::Vec2;
use rand::Rng;

use crate::particle::Particle;
use crate::spatial::LinkGrid;
use crate::surface::Surface;

/// Default number of particles in the field.
pub const DEFAULT_PARTICLE_COUNT: usize = 150;

/// Default link radius: pairs closer than this get a connecting line.
pub const DEFAULT_LINK_RADIUS: f32 = 120.0;

/// Peak link alpha, reached as the pair distance approaches zero.
pub const LINK_MAX_ALPHA: f32 = 0.2;

/// Stroke width of link lines, in pixels.
pub const LINK_WIDTH: f32 = 1.0;

/// Particle count above which `connect` switches from the brute-force pair
/// scan to the uniform grid. Both paths emit identical draw sequences.
const GRID_CUTOFF: usize = 512;

/// An ordered set of particles drifting inside fixed bounds.
pub struct ParticleField {
    particles: Vec<Particle>,
    /// Viewport size captured at construction. Reflection keeps using this
    /// even if the surface is later resized; see `RenderLoop::on_resize`.
    bounds: Vec2,
    link_radius: f32,
}

impl ParticleField {
    /// Create `count` particles uniformly spread over `bounds`.
    pub fn new(count: usize, bounds: Vec2, rng: &mut impl Rng) -> Self {
        Self::with_link_radius(count, bounds, DEFAULT_LINK_RADIUS, rng)
    }

    /// Like [`ParticleField::new`] with a custom link radius.
    pub fn with_link_radius(
        count: usize,
        bounds: Vec2,
        link_radius: f32,
        rng: &mut impl Rng,
    ) -> Self {
        let particles = (0..count).map(|_| Particle::spawn(bounds, rng)).collect();
        Self {
            particles,
            bounds,
            link_radius,
        }
    }

    /// Build a field from an explicit spawner, called once per index.
    ///
    /// Gives callers (and tests) exact control over the layout instead of
    /// uniform random placement.
    pub fn from_spawner(
        count: usize,
        bounds: Vec2,
        mut spawner: impl FnMut(usize) -> Particle,
    ) -> Self {
        Self {
            particles: (0..count).map(&mut spawner).collect(),
            bounds,
            link_radius: DEFAULT_LINK_RADIUS,
        }
    }

    /// Step every particle one frame, in sequence order.
    ///
    /// Particles do not interact physically, so the order has no effect on
    /// the result; it is kept stable for the sake of `connect`'s pair
    /// iteration.
    pub fn advance(&mut self) {
        for particle in &mut self.particles {
            particle.update(self.bounds);
        }
    }

    /// Draw the whole field: every particle, then the proximity links.
    ///
    /// Pure with respect to field state: rendering twice without an
    /// `advance()` in between emits identical draw sequences.
    pub fn render(&self, surface: &mut impl Surface) {
        for particle in &self.particles {
            particle.draw(surface);
        }
        self.connect(surface);
    }

    /// Stroke a line between every pair of particles closer than the link
    /// radius.
    ///
    /// For a pair `(i, j)` with `i < j` at distance `d`, the line takes
    /// particle `i`'s color and alpha `(r - d) / r * 0.2`: zero at the
    /// threshold, 0.2 at zero distance. Width is always 1.
    pub fn connect(&self, surface: &mut impl Surface) {
        if self.particles.len() >= GRID_CUTOFF {
            let points: Vec<Vec2> = self.particles.iter().map(|p| p.position).collect();
            let grid = LinkGrid::build(&points, self.link_radius);
            for (i, j) in grid.pairs_within(&points, self.link_radius) {
                self.stroke_link(surface, i, j);
            }
        } else {
            for i in 0..self.particles.len() {
                for j in (i + 1)..self.particles.len() {
                    let distance = self.particles[i].position.distance(self.particles[j].position);
                    if distance < self.link_radius {
                        self.stroke_link(surface, i, j);
                    }
                }
            }
        }
    }

    fn stroke_link(&self, surface: &mut impl Surface, i: usize, j: usize) {
        let a = &self.particles[i];
        let b = &self.particles[j];
        let distance = a.position.distance(b.position);
        let alpha = (self.link_radius - distance) / self.link_radius * LINK_MAX_ALPHA;
        // The earlier-indexed particle's color wins.
        surface.stroke_line(a.position, b.position, a.color, alpha, LINK_WIDTH);
    }

    /// The particles, in stable sequence order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// The construction-time bounds used for reflection.
    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    /// The link radius in effect.
    pub fn link_radius(&self) -> f32 {
        self.link_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawOp, Recorder};
    use crate::visuals::Color;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    const BOUNDS: Vec2 = Vec2::new(800.0, 600.0);

    fn fixture(positions: &[(f32, f32)]) -> ParticleField {
        let particles = positions
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Particle {
                position: Vec2::new(x, y),
                velocity: Vec2::ZERO,
                radius: 2.0,
                opacity: 0.5,
                color: Color::ALL[i % Color::ALL.len()],
            })
            .collect();
        ParticleField {
            particles,
            bounds: BOUNDS,
            link_radius: DEFAULT_LINK_RADIUS,
        }
    }

    #[test]
    fn test_new_spawns_exact_count() {
        let mut rng = SmallRng::seed_from_u64(1);
        let field = ParticleField::new(DEFAULT_PARTICLE_COUNT, BOUNDS, &mut rng);
        assert_eq!(field.particles().len(), 150);
        assert_eq!(field.bounds(), BOUNDS);
    }

    #[test]
    fn test_connect_pair_at_distance_50() {
        let field = fixture(&[(100.0, 100.0), (150.0, 100.0)]);
        let mut rec = Recorder::new();
        field.connect(&mut rec);

        assert_eq!(rec.lines().len(), 1);
        let DrawOp::Line {
            from,
            to,
            color,
            alpha,
            width,
        } = rec.lines()[0]
        else {
            unreachable!()
        };
        assert_eq!(*from, Vec2::new(100.0, 100.0));
        assert_eq!(*to, Vec2::new(150.0, 100.0));
        // Earlier-indexed particle's color.
        assert_eq!(*color, Color::Coral);
        assert!((alpha - (120.0 - 50.0) / 120.0 * 0.2).abs() < 1e-6);
        assert_eq!(*width, 1.0);
    }

    #[test]
    fn test_connect_pair_at_distance_150_draws_nothing() {
        let field = fixture(&[(100.0, 100.0), (250.0, 100.0)]);
        let mut rec = Recorder::new();
        field.connect(&mut rec);
        assert!(rec.lines().is_empty());
    }

    #[test]
    fn test_connect_alpha_vanishes_at_threshold() {
        let field = fixture(&[(0.0, 0.0), (119.999, 0.0)]);
        let mut rec = Recorder::new();
        field.connect(&mut rec);
        assert_eq!(rec.lines().len(), 1);
        let DrawOp::Line { alpha, .. } = rec.lines()[0] else {
            unreachable!()
        };
        assert!(*alpha >= 0.0 && *alpha < 1e-5);
    }

    #[test]
    fn test_connect_pair_order_is_lexicographic() {
        // A triangle where all three pairs link.
        let field = fixture(&[(0.0, 0.0), (50.0, 0.0), (0.0, 50.0)]);
        let mut rec = Recorder::new();
        field.connect(&mut rec);

        let froms: Vec<Vec2> = rec
            .lines()
            .into_iter()
            .map(|op| {
                let DrawOp::Line { from, .. } = op else {
                    unreachable!()
                };
                *from
            })
            .collect();
        // (0,1), (0,2), (1,2)
        assert_eq!(
            froms,
            vec![Vec2::ZERO, Vec2::ZERO, Vec2::new(50.0, 0.0)]
        );
    }

    #[test]
    fn test_render_draws_circles_before_lines() {
        let field = fixture(&[(0.0, 0.0), (50.0, 0.0)]);
        let mut rec = Recorder::new();
        field.render(&mut rec);

        assert_eq!(rec.circles().len(), 2);
        assert_eq!(rec.lines().len(), 1);
        assert!(matches!(rec.ops()[0], DrawOp::Circle { .. }));
        assert!(matches!(rec.ops()[2], DrawOp::Line { .. }));
    }

    #[test]
    fn test_render_is_idempotent_without_advance() {
        let mut rng = SmallRng::seed_from_u64(8);
        let field = ParticleField::new(40, BOUNDS, &mut rng);

        let mut first = Recorder::new();
        field.render(&mut first);
        let mut second = Recorder::new();
        field.render(&mut second);

        assert_eq!(first.ops(), second.ops());
    }

    #[test]
    fn test_grid_and_brute_paths_emit_identical_sequences() {
        let mut rng = SmallRng::seed_from_u64(21);
        // Above the cutoff: connect() takes the grid path.
        let field = ParticleField::new(GRID_CUTOFF, BOUNDS, &mut rng);
        let mut gridded = Recorder::new();
        field.connect(&mut gridded);

        // Same particles, forced through the brute path.
        let brute_field = ParticleField {
            particles: field.particles().to_vec(),
            bounds: BOUNDS,
            link_radius: DEFAULT_LINK_RADIUS,
        };
        let mut brute = Recorder::new();
        for i in 0..brute_field.particles.len() {
            for j in (i + 1)..brute_field.particles.len() {
                let d = brute_field.particles[i]
                    .position
                    .distance(brute_field.particles[j].position);
                if d < brute_field.link_radius {
                    brute_field.stroke_link(&mut brute, i, j);
                }
            }
        }

        assert_eq!(gridded.ops(), brute.ops());
    }

    #[test]
    fn test_advance_moves_every_particle_by_its_velocity() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut field = ParticleField::new(150, BOUNDS, &mut rng);
        let before: Vec<(Vec2, Vec2)> = field
            .particles()
            .iter()
            .map(|p| (p.position, p.velocity))
            .collect();

        field.advance();

        for (p, (pos, vel)) in field.particles().iter().zip(&before) {
            assert_eq!(p.position, *pos + *vel);
        }
    }
}
