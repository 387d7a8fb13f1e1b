//! Visual attributes for backdrop particles.
//!
//! The backdrop uses one fixed six-color palette. Every particle picks a
//! color uniformly at creation and keeps it for its whole lifetime; link
//! lines inherit the color of the earlier-indexed endpoint.

use glam::Vec3;
use rand::Rng;

/// The fixed backdrop palette.
///
/// RGB values are 0.0–1.0, converted from the canonical hex palette
/// (`#ff6b6b`, `#4ecdc4`, `#45b7d1`, `#96ceb4`, `#ffeaa7`, `#dfe6e9`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Warm red (`#ff6b6b`).
    Coral,
    /// Green-cyan (`#4ecdc4`).
    Turquoise,
    /// Light blue (`#45b7d1`).
    Sky,
    /// Muted green (`#96ceb4`).
    Sage,
    /// Pale yellow (`#ffeaa7`).
    Butter,
    /// Near-white grey (`#dfe6e9`).
    Mist,
}

impl Color {
    /// All palette entries, in canonical order.
    pub const ALL: [Color; 6] = [
        Color::Coral,
        Color::Turquoise,
        Color::Sky,
        Color::Sage,
        Color::Butter,
        Color::Mist,
    ];

    /// RGB components of this palette entry.
    pub fn rgb(&self) -> Vec3 {
        match self {
            Color::Coral => Vec3::new(1.0, 0.420, 0.420),
            Color::Turquoise => Vec3::new(0.306, 0.804, 0.769),
            Color::Sky => Vec3::new(0.271, 0.718, 0.820),
            Color::Sage => Vec3::new(0.588, 0.808, 0.706),
            Color::Butter => Vec3::new(1.0, 0.918, 0.655),
            Color::Mist => Vec3::new(0.875, 0.902, 0.914),
        }
    }

    /// Pick a palette entry uniformly at random.
    pub fn sample(rng: &mut impl Rng) -> Color {
        Color::ALL[rng.gen_range(0..Color::ALL.len())]
    }
}
