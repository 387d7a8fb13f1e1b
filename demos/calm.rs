//! # Calm Field
//!
//! A sparse, slow-feeling backdrop: fewer particles and a wider link
//! radius, seeded so the layout is the same every run.
//!
//! Run with: `cargo run --example calm`

use driftmesh::Backdrop;

fn main() {
    if let Err(e) = Backdrop::new()
        .with_particle_count(60)
        .with_link_radius(180.0)
        .with_seed(42)
        .with_title("driftmesh — calm")
        .run()
    {
        eprintln!("Backdrop error: {}", e);
    }
}
