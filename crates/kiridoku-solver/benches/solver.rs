//! Benchmarks for solving and uniqueness counting.
//!
//! Two fixed grids are measured: the classic 30-given puzzle (solvable almost
//! entirely by propagation) and a 17-given puzzle that forces real search.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench solver
//! ```

use std::{hint, time::Duration};

use criterion::{BenchmarkId, Criterion, PlottingBackend, criterion_group, criterion_main};
use kiridoku_core::Grid81;
use kiridoku_solver::Solver;

const GRIDS: [(&str, &str); 2] = [
    (
        "classic",
        "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79",
    ),
    (
        "sparse17",
        ".......1.4.........2...........5.4.7..8...3....1.9....3..4..2...5.1........8.6...",
    ),
];

fn bench_solve_stop_at_one(c: &mut Criterion) {
    for (name, text) in GRIDS {
        let grid: Grid81 = text.parse().unwrap();
        c.bench_with_input(
            BenchmarkId::new("solve_stop_at_one", name),
            &grid,
            |b, grid| {
                let mut solver = Solver::new();
                b.iter(|| {
                    solver.load_grid(hint::black_box(grid)).unwrap();
                    hint::black_box(solver.solve_stop_at_one())
                });
            },
        );
    }
}

fn bench_count_solutions(c: &mut Criterion) {
    for (name, text) in GRIDS {
        let grid: Grid81 = text.parse().unwrap();
        c.bench_with_input(
            BenchmarkId::new("count_solutions_2", name),
            &grid,
            |b, grid| {
                let mut solver = Solver::new();
                b.iter(|| {
                    solver.load_grid(hint::black_box(grid)).unwrap();
                    hint::black_box(solver.count_solutions(2))
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
            .measurement_time(Duration::from_secs(10));
    targets =
        bench_solve_stop_at_one,
        bench_count_solutions
);
criterion_main!(benches);
