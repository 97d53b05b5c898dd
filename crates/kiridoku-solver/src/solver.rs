//! The public solve/count/load facade.

use std::time::{Duration, Instant};

use kiridoku_core::{Grid81, XorShift32};

use crate::{
    board::{Board, LoadError},
    search::{Search, SearchOptions, Solutions},
    stats::{Budget, LimitKind, SolveStats},
};

/// Outcome classification of one solve call.
///
/// The two limit variants are distinct from the definitive outcomes: they say
/// nothing about solvability, only that a budget ran out first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum SolveStatus {
    /// The givens admit no completion.
    NoSolution,
    /// Exactly one solution was found before the stop threshold.
    Unique,
    /// The stop threshold of solutions was reached.
    Multiple,
    /// The node ceiling was hit before a definitive answer.
    NodeLimit,
    /// The wall-clock deadline passed before a definitive answer.
    Timeout,
}

/// Heuristic difficulty buckets, ordered by increasing rank.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display,
)]
pub enum Difficulty {
    /// Solvable almost entirely by cheap deductions.
    Easy,
    /// A few guesses or heavier eliminations needed.
    Medium,
    /// Sustained search with backtracking.
    Hard,
    /// Deep search; also assigned when a bounded probe runs out of budget.
    Samurai,
}

impl Difficulty {
    /// All difficulties in rank order.
    pub const ALL: [Self; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Samurai];

    /// Numeric rank, `0` for the easiest.
    #[must_use]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Buckets a logic score. The thresholds are an empirically tuned policy
    /// kept stable for compatibility with existing puzzle corpora.
    #[must_use]
    pub const fn from_score(score: u32) -> Self {
        if score <= 300 {
            Self::Easy
        } else if score <= 500 {
            Self::Medium
        } else if score <= 900 {
            Self::Hard
        } else {
            Self::Samurai
        }
    }
}

/// Everything one solve call produced.
#[derive(Debug, Clone)]
pub struct SolveReport {
    /// Outcome classification.
    pub status: SolveStatus,
    /// Solutions found, capped at the requested stop threshold.
    pub solution_count: u32,
    /// The first solution found, if any.
    pub solution: Option<Grid81>,
    /// Difficulty, present when requested and the status is
    /// [`SolveStatus::Unique`].
    pub difficulty: Option<Difficulty>,
    /// Metrics snapshot for this call.
    pub stats: SolveStats,
}

/// A 9×9 sudoku solver: bitmask constraint propagation plus backtracking
/// search.
///
/// Load a grid, then solve or count solutions. Each instance owns its board,
/// trail, decision stack, and metrics exclusively; with a fixed seed and
/// fixed toggles every run is deterministic.
///
/// # Examples
///
/// ```
/// use kiridoku_core::Grid81;
/// use kiridoku_solver::{SolveStatus, Solver};
///
/// let grid: Grid81 =
///     "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79"
///         .parse()?;
/// let mut solver = Solver::new();
/// solver.load_grid(&grid)?;
/// let report = solver.solve_stop_at_one();
/// assert_eq!(report.status, SolveStatus::Unique);
/// assert!(report.difficulty.is_some());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Solver {
    board: Board,
    search: Search,
    rng: XorShift32,
    options: SearchOptions,
    node_limit: u64,
    timeout: Option<Duration>,
    stats: SolveStats,
    solutions: Solutions,
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    /// Creates a solver with an all-blank board, heavy rules enabled, and
    /// deterministic selection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            search: Search::new(),
            rng: XorShift32::default(),
            options: SearchOptions::default(),
            node_limit: 0,
            timeout: None,
            stats: SolveStats::default(),
            solutions: Solutions::default(),
        }
    }

    /// Loads a grid, replacing any previous board state.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] when a given contradicts an earlier one; the
    /// board is then left fully reset, never partially loaded.
    pub fn load_grid(&mut self, grid: &Grid81) -> Result<(), LoadError> {
        self.search.reset_activity();
        self.solutions.clear();
        self.board.load(grid)
    }

    /// Solves to the first solution and computes its difficulty.
    pub fn solve_stop_at_one(&mut self) -> SolveReport {
        self.solve_with(1, true)
    }

    /// Solves to at most two solutions and computes difficulty when the
    /// result is unique.
    pub fn solve_unique(&mut self) -> SolveReport {
        self.solve_with(2, true)
    }

    /// Counts solutions up to `stop_at` without computing difficulty. Used
    /// for uniqueness testing with `stop_at = 2`.
    pub fn count_solutions(&mut self, stop_at: u32) -> SolveReport {
        self.solve_with(stop_at.max(1), false)
    }

    /// Enables or disables the heavy rule tier (hidden pairs).
    pub fn set_heavy_rules(&mut self, on: bool) {
        self.options.heavy_rules = on;
    }

    /// Schedules the heavy tier: at the root only, or at depths up to
    /// `depth_limit`; scoped to dirty houses or to all 27 unconditionally.
    pub fn set_heavy_schedule(&mut self, root_only: bool, depth_limit: u32, dirty_only: bool) {
        self.options.heavy_root_only = root_only;
        self.options.heavy_depth_limit = depth_limit;
        self.options.heavy_dirty_only = dirty_only;
    }

    /// Breaks MRV ties with a seeded coin flip instead of the activity score.
    pub fn set_random_tie_break(&mut self, on: bool) {
        self.options.random_tie_break = on;
    }

    /// Picks branch digits uniformly at random instead of lowest-first.
    pub fn set_random_value_choice(&mut self, on: bool) {
        self.options.random_value_choice = on;
    }

    /// Reseeds the generator behind all randomized choices.
    pub fn set_random_seed(&mut self, seed: u32) {
        self.rng.reseed(seed);
    }

    /// Caps branching attempts; `0` means unlimited.
    pub fn set_node_limit(&mut self, limit: u64) {
        self.node_limit = limit;
    }

    /// Caps wall-clock time for one solve call.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = Some(timeout);
    }

    /// Removes both resource ceilings.
    pub fn clear_limits(&mut self) {
        self.node_limit = 0;
        self.timeout = None;
    }

    /// Zeroes all counters and recorded solutions. The given count from the
    /// last load is preserved for difficulty scoring.
    pub fn clear_stats(&mut self) {
        self.stats = SolveStats::default();
        self.solutions.clear();
    }

    /// Metrics of the last solve call.
    #[must_use]
    pub fn stats(&self) -> &SolveStats {
        &self.stats
    }

    /// First solution found by the last solve call, if any.
    #[must_use]
    pub fn solution(&self) -> Option<&Grid81> {
        self.solutions.first.as_ref()
    }

    /// Solutions found by the last solve call, capped at its stop threshold.
    #[must_use]
    pub fn solution_count(&self) -> u32 {
        self.solutions.count
    }

    fn solve_with(&mut self, stop_at: u32, compute_difficulty: bool) -> SolveReport {
        self.clear_stats();
        let start = Instant::now();
        let deadline = self.timeout.map(|timeout| start + timeout);
        let budget = Budget::new(self.node_limit, deadline);

        let limit = self.search.run(
            &mut self.board,
            &mut self.stats,
            &budget,
            &mut self.rng,
            &self.options,
            stop_at,
            &mut self.solutions,
        );
        self.stats.elapsed = start.elapsed();

        let status = match limit {
            Some(LimitKind::Nodes) => SolveStatus::NodeLimit,
            Some(LimitKind::Time) => SolveStatus::Timeout,
            None => match self.solutions.count {
                0 => SolveStatus::NoSolution,
                1 => SolveStatus::Unique,
                _ => SolveStatus::Multiple,
            },
        };
        let solution = match status {
            SolveStatus::Unique | SolveStatus::NodeLimit | SolveStatus::Timeout => {
                self.solutions.first
            }
            SolveStatus::NoSolution | SolveStatus::Multiple => None,
        };
        let difficulty = (compute_difficulty && status == SolveStatus::Unique)
            .then(|| Difficulty::from_score(self.logic_score()));

        SolveReport {
            status,
            solution_count: self.solutions.count,
            solution,
            difficulty,
            stats: self.stats,
        }
    }

    /// The difficulty score: weighted rule firings and search effort, reduced
    /// by a bonus for givens beyond the 17-clue theoretical minimum. The
    /// weights are policy constants preserved verbatim.
    fn logic_score(&self) -> u32 {
        let s = &self.stats;
        let logic = s.hidden_singles
            + s.locked_candidate_elims * 2
            + s.hidden_pair_elims * 4
            + s.guesses * 10
            + u64::from(s.max_depth) * 3
            + s.conflicts;
        let bonus = u64::from(self.board.givens().saturating_sub(17)) * 3;
        u32::try_from(logic.saturating_sub(bonus)).unwrap_or(u32::MAX)
    }
}
