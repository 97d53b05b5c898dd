//! Benchmarks for puzzle generation.
//!
//! Measures the complete generation pipeline — solved-grid completion,
//! symmetry-respecting carving with uniqueness checks, and difficulty
//! probing — for an easy and a hard target, each over three fixed seeds so
//! runs are reproducible while covering several carving paths.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench generator
//! ```

use std::{hint, time::Duration};

use criterion::{BenchmarkId, Criterion, PlottingBackend, criterion_group, criterion_main};
use kiridoku_generator::{PuzzleGenerator, Symmetry};
use kiridoku_solver::Difficulty;

const SEEDS: [u32; 3] = [0x00C0_FFEE, 0xDEAD_BEEF, 0x1234_5678];

fn bench_generate_easy(c: &mut Criterion) {
    for (i, seed) in SEEDS.into_iter().enumerate() {
        c.bench_with_input(
            BenchmarkId::new("generate_easy_rot180", format!("seed_{i}")),
            &seed,
            |b, &seed| {
                let mut generator = PuzzleGenerator::new();
                b.iter(|| {
                    generator.generate_with_seed(
                        Difficulty::Easy,
                        Symmetry::Rot180,
                        hint::black_box(seed),
                    )
                });
            },
        );
    }
}

fn bench_generate_hard(c: &mut Criterion) {
    for (i, seed) in SEEDS.into_iter().enumerate() {
        c.bench_with_input(
            BenchmarkId::new("generate_hard_none", format!("seed_{i}")),
            &seed,
            |b, &seed| {
                let mut generator = PuzzleGenerator::new();
                b.iter(|| {
                    generator.generate_with_seed(
                        Difficulty::Hard,
                        Symmetry::None,
                        hint::black_box(seed),
                    )
                });
            },
        );
    }
}

criterion_group!(
    name = benches;
    config =
        Criterion::default()
            .plotting_backend(PlottingBackend::Plotters)
            .measurement_time(Duration::from_secs(15));
    targets =
        bench_generate_easy,
        bench_generate_hard
);
criterion_main!(benches);
