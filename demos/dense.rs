//! # Dense Field
//!
//! A heavier backdrop: 800 particles, enough to push link detection onto
//! the uniform-grid path. The drawn output is identical to what the
//! brute-force scan would produce, just cheaper to find.
//!
//! Run with: `cargo run --example dense`

use driftmesh::Backdrop;

fn main() {
    if let Err(e) = Backdrop::new()
        .with_particle_count(800)
        .with_link_radius(90.0)
        .with_title("driftmesh — dense")
        .run()
    {
        eprintln!("Backdrop error: {}", e);
    }
}
