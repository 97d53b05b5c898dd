//! Bitmask constraint-propagation and backtracking search for 9×9 sudoku.
//!
//! The solver keeps one 9-bit candidate domain per cell plus per-digit
//! "planes" (81-bit sets of cells still allowing each digit), and drives them
//! to a fixpoint of cheap deductions — naked singles, hidden singles, locked
//! candidates, and optionally hidden pairs — between the decisions of an
//! iterative depth-first search. All mutations are undone exactly through an
//! append-only trail, so no search node ever snapshots the board.
//!
//! [`Solver`] is the public load/solve/count facade; each call returns a
//! [`SolveReport`] carrying the status, any solution, an optional
//! [`Difficulty`], and a [`SolveStats`] snapshot.
//!
//! # Examples
//!
//! ```
//! use kiridoku_core::Grid81;
//! use kiridoku_solver::{SolveStatus, Solver};
//!
//! let grid: Grid81 =
//!     "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79"
//!         .parse()?;
//! let mut solver = Solver::new();
//! solver.load_grid(&grid)?;
//!
//! let report = solver.solve_stop_at_one();
//! assert_eq!(report.status, SolveStatus::Unique);
//! assert_eq!(report.solution.unwrap().get(2), 4);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod board;
mod propagate;
mod rules;
mod search;
mod solver;
mod stats;
mod trail;

pub use self::{
    board::LoadError,
    solver::{Difficulty, SolveReport, SolveStatus, Solver},
    stats::SolveStats,
};
