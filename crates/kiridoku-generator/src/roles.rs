//! The three solver roles behind one generation attempt.
//!
//! Completion, uniqueness checking, and difficulty probing each get their own
//! [`Solver`] so no role's in-flight state can disturb another's.

use kiridoku_core::Grid81;
use kiridoku_solver::{Difficulty, SolveStatus, Solver};

/// Node ceiling for carve-time uniqueness checks.
const UNIQUE_NODE_LIMIT: u64 = 20_000;
/// Node ceiling for difficulty probes.
const PROBE_NODE_LIMIT: u64 = 8_000;

#[derive(Debug, Default)]
pub(crate) struct SolverRoles {
    completion: Solver,
    uniqueness: Solver,
    probe: Solver,
}

fn configure(solver: &mut Solver, randomize: bool) {
    solver.clear_stats();
    solver.clear_limits();
    solver.set_heavy_rules(true);
    solver.set_random_tie_break(randomize);
    solver.set_random_value_choice(randomize);
}

impl SolverRoles {
    /// Completes an empty grid into a full, seed-determined solution.
    ///
    /// # Panics
    ///
    /// Panics if the search fails on an empty grid, which cannot happen with
    /// intact geometry tables.
    pub(crate) fn complete_grid(&mut self, seed: u32) -> Grid81 {
        configure(&mut self.completion, true);
        self.completion.set_random_seed(seed);
        self.completion
            .load_grid(&Grid81::EMPTY)
            .expect("an empty grid has no contradictory givens");
        let report = self.completion.count_solutions(1);
        assert_eq!(
            report.status,
            SolveStatus::Unique,
            "an empty grid must complete"
        );
        report.solution.expect("a found solution is materialized")
    }

    /// Bounded-node uniqueness check. Limit hits count as not unique.
    pub(crate) fn is_unique(&mut self, puzzle: &Grid81) -> bool {
        configure(&mut self.uniqueness, false);
        self.uniqueness.set_node_limit(UNIQUE_NODE_LIMIT);
        if self.uniqueness.load_grid(puzzle).is_err() {
            return false;
        }
        self.uniqueness.count_solutions(2).status == SolveStatus::Unique
    }

    /// Bounded-node deterministic difficulty probe.
    ///
    /// A limit hit rates as [`Difficulty::Samurai`]; a genuine solver failure
    /// yields `None`.
    pub(crate) fn probe_difficulty(&mut self, puzzle: &Grid81) -> Option<Difficulty> {
        configure(&mut self.probe, false);
        self.probe.set_node_limit(PROBE_NODE_LIMIT);
        if self.probe.load_grid(puzzle).is_err() {
            return None;
        }
        let report = self.probe.solve_stop_at_one();
        match report.status {
            SolveStatus::Unique => report.difficulty,
            SolveStatus::NodeLimit | SolveStatus::Timeout => Some(Difficulty::Samurai),
            SolveStatus::NoSolution | SolveStatus::Multiple => None,
        }
    }
}
