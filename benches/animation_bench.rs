//! Benchmarks for the per-tick animation step and world-matrix resolve.

#![allow(missing_docs)]

use std::hint::black_box;

use atomviz::animation::AtomAnimator;
use atomviz::options::Options;
use atomviz::scene::build_atom;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

fn advance_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("atom_advance");

    for count in [3_u32, 12, 48] {
        let mut options = Options::default();
        options.scene.body_count = count;
        let (mut scene, mut rig) = build_atom(&options);
        let mut animator = AtomAnimator::new(options.animation.clone());

        let _ = group.bench_with_input(
            BenchmarkId::from_parameter(count),
            &count,
            |b, _| {
                b.iter(|| animator.advance(black_box(&mut scene), &mut rig));
            },
        );
    }

    group.finish();
}

fn world_matrices_benchmark(c: &mut Criterion) {
    let (scene, _) = build_atom(&Options::default());
    let _ = c.bench_function("world_matrices", |b| {
        b.iter(|| black_box(scene.world_matrices()));
    });
}

criterion_group!(benches, advance_benchmark, world_matrices_benchmark);
criterion_main!(benches);
