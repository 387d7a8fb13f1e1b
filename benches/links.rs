//! Link-detection benchmark: brute-force pair scan vs uniform grid.
//!
//! Run with: `cargo bench --bench links`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use driftmesh::spatial::{brute_force_pairs, LinkGrid};
use driftmesh::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const LINK_RADIUS: f32 = 120.0;

fn random_points(n: usize) -> Vec<Vec2> {
    let mut rng = SmallRng::seed_from_u64(0xD81F);
    (0..n)
        .map(|_| Vec2::new(rng.gen_range(0.0..1920.0), rng.gen_range(0.0..1080.0)))
        .collect()
}

fn bench_links(c: &mut Criterion) {
    let mut group = c.benchmark_group("links");

    for n in [150, 600, 2400] {
        let points = random_points(n);

        group.bench_with_input(BenchmarkId::new("brute_force", n), &points, |b, points| {
            b.iter(|| brute_force_pairs(points, LINK_RADIUS));
        });

        group.bench_with_input(BenchmarkId::new("grid", n), &points, |b, points| {
            b.iter(|| {
                let grid = LinkGrid::build(points, LINK_RADIUS);
                grid.pairs_within(points, LINK_RADIUS)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_links);
criterion_main!(benches);
