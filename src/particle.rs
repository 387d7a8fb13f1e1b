//! A single backdrop particle.
//!
//! Particles are plain data records: a position, a constant-magnitude
//! velocity, and visual attributes fixed at spawn time. There is no
//! per-particle polymorphism; every particle behaves the same way.

use glam::Vec2;
use rand::Rng;

use crate::surface::Surface;
use crate::visuals::Color;

/// One drifting point-light element.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Current position in surface pixels.
    pub position: Vec2,
    /// Per-frame displacement. Each axis is in (-1, 1) at spawn and only
    /// ever changes sign, never magnitude.
    pub velocity: Vec2,
    /// Draw radius in pixels, in [1, 4).
    pub radius: f32,
    /// Fill alpha, fixed for the particle's lifetime, in [0.2, 0.7).
    pub opacity: f32,
    /// Palette entry, fixed at spawn.
    pub color: Color,
}

impl Particle {
    /// Spawn a particle uniformly positioned over `bounds` with randomized
    /// attributes.
    pub fn spawn(bounds: Vec2, rng: &mut impl Rng) -> Self {
        Self {
            position: Vec2::new(
                rng.gen_range(0.0..bounds.x),
                rng.gen_range(0.0..bounds.y),
            ),
            velocity: Vec2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)),
            radius: rng.gen_range(1.0..4.0),
            opacity: rng.gen_range(0.2..0.7),
            color: Color::sample(rng),
        }
    }

    /// Advance one frame: position += velocity, then reflect off `bounds`.
    ///
    /// The bound check runs after the move and only negates the velocity
    /// component; the position is never corrected. A particle that stepped
    /// out of bounds sits outside for exactly one frame before the flipped
    /// velocity carries it back in.
    pub fn update(&mut self, bounds: Vec2) {
        self.position += self.velocity;

        if self.position.x > bounds.x || self.position.x < 0.0 {
            self.velocity.x = -self.velocity.x;
        }
        if self.position.y > bounds.y || self.position.y < 0.0 {
            self.velocity.y = -self.velocity.y;
        }
    }

    /// Paint this particle as one filled circle.
    pub fn draw(&self, surface: &mut impl Surface) {
        surface.fill_circle(self.position, self.radius, self.color, self.opacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawOp, Recorder};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    const BOUNDS: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn test_spawn_attribute_ranges() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..200 {
            let p = Particle::spawn(BOUNDS, &mut rng);
            assert!(p.position.x >= 0.0 && p.position.x < BOUNDS.x);
            assert!(p.position.y >= 0.0 && p.position.y < BOUNDS.y);
            assert!(p.velocity.x > -1.0 && p.velocity.x < 1.0);
            assert!(p.velocity.y > -1.0 && p.velocity.y < 1.0);
            assert!(p.radius >= 1.0 && p.radius < 4.0);
            assert!(p.opacity >= 0.2 && p.opacity < 0.7);
            assert!(Color::ALL.contains(&p.color));
        }
    }

    #[test]
    fn test_update_is_pure_euler_step() {
        let mut p = Particle {
            position: Vec2::new(100.0, 100.0),
            velocity: Vec2::new(0.5, -0.25),
            radius: 2.0,
            opacity: 0.5,
            color: Color::Sky,
        };
        p.update(BOUNDS);
        assert_eq!(p.position, Vec2::new(100.5, 99.75));
        assert_eq!(p.velocity, Vec2::new(0.5, -0.25));
    }

    #[test]
    fn test_update_reflects_at_right_edge_without_clamping() {
        let mut p = Particle {
            position: Vec2::new(799.8, 300.0),
            velocity: Vec2::new(0.6, 0.1),
            radius: 2.0,
            opacity: 0.5,
            color: Color::Coral,
        };
        p.update(BOUNDS);
        // Moved out, velocity flipped, position untouched.
        assert_eq!(p.position.x, 799.8 + 0.6);
        assert_eq!(p.velocity, Vec2::new(-0.6, 0.1));

        // One more frame brings it back inside.
        p.update(BOUNDS);
        assert!(p.position.x <= BOUNDS.x);
    }

    #[test]
    fn test_update_reflects_at_top_edge() {
        let mut p = Particle {
            position: Vec2::new(400.0, 0.3),
            velocity: Vec2::new(0.0, -0.9),
            radius: 1.5,
            opacity: 0.3,
            color: Color::Sage,
        };
        p.update(BOUNDS);
        assert_eq!(p.position.y, 0.3 - 0.9);
        assert_eq!(p.velocity.y, 0.9);
    }

    #[test]
    fn test_speed_magnitude_invariant_over_many_frames() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut p = Particle::spawn(BOUNDS, &mut rng);
        let speed = (p.velocity.x.abs(), p.velocity.y.abs());
        for _ in 0..10_000 {
            p.update(BOUNDS);
            assert_eq!((p.velocity.x.abs(), p.velocity.y.abs()), speed);
        }
    }

    #[test]
    fn test_draw_emits_single_circle() {
        let p = Particle {
            position: Vec2::new(10.0, 20.0),
            velocity: Vec2::ZERO,
            radius: 3.0,
            opacity: 0.4,
            color: Color::Butter,
        };
        let mut rec = Recorder::new();
        p.draw(&mut rec);
        assert_eq!(
            rec.ops(),
            &[DrawOp::Circle {
                center: Vec2::new(10.0, 20.0),
                radius: 3.0,
                color: Color::Butter,
                alpha: 0.4,
            }]
        );
    }
}
