//! Sudoku puzzle generation with target difficulty and symmetry.
//!
//! A generation attempt completes a random solved grid, then carves clues
//! away orbit by orbit under the requested [`Symmetry`], rejecting any
//! removal that breaks solution uniqueness or overshoots the target
//! difficulty. Three independent solver instances back the pipeline, one per
//! role: completion, uniqueness checking, and difficulty probing.
//!
//! Generation is fully deterministic for a given base seed: per-attempt
//! seeds, the solved grid, the orbit shuffle, and every probe all derive from
//! it, so a recorded seed replays bit for bit.
//!
//! # Examples
//!
//! ```
//! use kiridoku_generator::{PuzzleGenerator, Symmetry};
//! use kiridoku_solver::{Difficulty, SolveStatus, Solver};
//!
//! let mut generator = PuzzleGenerator::new();
//! let generated = generator.generate_with_seed(Difficulty::Easy, Symmetry::Rot180, 42)?;
//!
//! let mut solver = Solver::new();
//! solver.load_grid(&generated.puzzle)?;
//! let report = solver.solve_stop_at_one();
//! assert_eq!(report.status, SolveStatus::Unique);
//! assert_eq!(report.solution, Some(generated.solution));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod carve;
mod generate;
mod policy;
mod roles;
pub mod symmetry;

pub use self::{
    generate::{GenerateError, GeneratedPuzzle, GeneratorConfig, PuzzleGenerator},
    symmetry::{Orbit, Symmetry},
};
