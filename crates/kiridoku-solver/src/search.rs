//! Iterative depth-first search over an explicit decision stack.

use kiridoku_core::{DigitSet, Grid81, XorShift32};

use crate::{
    board::Board,
    propagate::{self, Halt},
    stats::{Budget, LimitKind, SolveStats},
};

const ACTIVITY_DECAY: f64 = 0.95;
const RESCALE_THRESHOLD: f64 = 1e150;
const RESCALE_FACTOR: f64 = 1e-100;

/// Per-cell decision counter with exponential decay, VSIDS style.
///
/// Chosen cells are bumped by a shared increment; the increment grows by the
/// decay factor after every conflict, so recent conflicts weigh more. Both
/// are rescaled down once any value crosses the threshold to keep the floats
/// bounded.
#[derive(Debug, Clone)]
struct Activity {
    score: [f64; 81],
    inc: f64,
}

impl Activity {
    fn new() -> Self {
        Self {
            score: [0.0; 81],
            inc: 1.0,
        }
    }

    fn reset(&mut self) {
        self.score = [0.0; 81];
        self.inc = 1.0;
    }

    fn get(&self, cell: u8) -> f64 {
        self.score[usize::from(cell)]
    }

    fn bump(&mut self, cell: u8) {
        self.score[usize::from(cell)] += self.inc;
        if self.score[usize::from(cell)] >= RESCALE_THRESHOLD {
            self.rescale();
        }
    }

    fn decay(&mut self) {
        self.inc /= ACTIVITY_DECAY;
        if self.inc >= RESCALE_THRESHOLD {
            self.rescale();
        }
    }

    fn rescale(&mut self) {
        for score in &mut self.score {
            *score *= RESCALE_FACTOR;
        }
        self.inc *= RESCALE_FACTOR;
    }
}

/// One branch point: the chosen cell, its untried digits, and the trail mark
/// taken when the decision was pushed.
#[derive(Debug, Clone, Copy)]
struct Decision {
    cell: u8,
    untried: DigitSet,
    mark: usize,
}

/// Solutions found in one solve call: the running count and the first
/// materialized grid.
#[derive(Debug, Clone, Default)]
pub(crate) struct Solutions {
    pub(crate) count: u32,
    pub(crate) first: Option<Grid81>,
}

impl Solutions {
    fn record(&mut self, board: &Board) {
        if self.first.is_none() {
            self.first = Some(board.solution_grid());
        }
        self.count += 1;
    }

    pub(crate) fn clear(&mut self) {
        self.count = 0;
        self.first = None;
    }
}

/// Behavior toggles for one search run.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SearchOptions {
    pub(crate) heavy_rules: bool,
    pub(crate) heavy_root_only: bool,
    pub(crate) heavy_depth_limit: u32,
    pub(crate) heavy_dirty_only: bool,
    pub(crate) random_tie_break: bool,
    pub(crate) random_value_choice: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            heavy_rules: true,
            heavy_root_only: false,
            heavy_depth_limit: 1,
            heavy_dirty_only: true,
            random_tie_break: false,
            random_value_choice: false,
        }
    }
}

/// The backtracking engine: MRV cell selection with activity or random
/// tie-breaks, digit choice, and the decision-stack state machine.
#[derive(Debug, Clone)]
pub(crate) struct Search {
    decisions: Vec<Decision>,
    activity: Activity,
}

impl Search {
    pub(crate) fn new() -> Self {
        Self {
            decisions: Vec::with_capacity(81),
            activity: Activity::new(),
        }
    }

    pub(crate) fn reset_activity(&mut self) {
        self.activity.reset();
    }

    /// Runs the search until the stack empties, `stop_at` solutions are
    /// recorded, or a budget ceiling is hit. On a ceiling hit the board is
    /// unwound to the root mark and the limit kind returned.
    pub(crate) fn run(
        &mut self,
        board: &mut Board,
        stats: &mut SolveStats,
        budget: &Budget,
        rng: &mut XorShift32,
        opts: &SearchOptions,
        stop_at: u32,
        solutions: &mut Solutions,
    ) -> Option<LimitKind> {
        let root_mark = board.trail_mark();
        self.decisions.clear();

        // The root pass runs unit logic over every house once.
        board.mark_all_houses_dirty();
        match propagate::run(board, stats, budget, opts.heavy_rules, opts.heavy_dirty_only) {
            Err(Halt::Contradiction) => {
                self.conflict(stats);
                board.undo_to(root_mark);
                return None;
            }
            Err(Halt::Limit(kind)) => {
                board.undo_to(root_mark);
                return Some(kind);
            }
            Ok(()) => {}
        }

        if board.is_complete() {
            solutions.record(board);
            board.undo_to(root_mark);
            return None;
        }

        let Some(cell) = self.select_cell(board, rng, opts) else {
            self.conflict(stats);
            board.undo_to(root_mark);
            return None;
        };
        self.push_decision(board, cell, stats);

        while !self.decisions.is_empty() && solutions.count < stop_at {
            if let Some(kind) = budget.check(stats.nodes) {
                self.decisions.clear();
                board.undo_to(root_mark);
                return Some(kind);
            }

            let top = self.decisions.len() - 1;
            let Decision { cell, untried, mark } = self.decisions[top];
            board.undo_to(mark);

            let Some(digit) = pick_digit(untried, rng, opts) else {
                self.decisions.pop();
                self.conflict(stats);
                continue;
            };
            self.decisions[top].untried.remove(digit);
            stats.nodes += 1;

            let attempt_mark = board.trail_mark();
            if board.assign(cell, digit).is_err() {
                self.conflict(stats);
                board.undo_to(attempt_mark);
                continue;
            }

            #[expect(clippy::cast_possible_truncation)]
            let depth = self.decisions.len() as u32;
            let heavy_now =
                opts.heavy_rules && !opts.heavy_root_only && depth <= opts.heavy_depth_limit;
            match propagate::run(board, stats, budget, heavy_now, opts.heavy_dirty_only) {
                Err(Halt::Contradiction) => {
                    self.conflict(stats);
                    board.undo_to(attempt_mark);
                    continue;
                }
                Err(Halt::Limit(kind)) => {
                    self.decisions.clear();
                    board.undo_to(root_mark);
                    return Some(kind);
                }
                Ok(()) => {}
            }

            if board.is_complete() {
                solutions.record(board);
                board.undo_to(attempt_mark);
                continue;
            }

            let Some(next) = self.select_cell(board, rng, opts) else {
                self.conflict(stats);
                board.undo_to(attempt_mark);
                continue;
            };
            self.push_decision(board, next, stats);
        }

        self.decisions.clear();
        board.undo_to(root_mark);
        None
    }

    fn conflict(&mut self, stats: &mut SolveStats) {
        stats.conflicts += 1;
        self.activity.decay();
    }

    fn push_decision(&mut self, board: &Board, cell: u8, stats: &mut SolveStats) {
        self.decisions.push(Decision {
            cell,
            untried: board.domain(cell),
            mark: board.trail_mark(),
        });
        stats.guesses += 1;
        self.activity.bump(cell);
        #[expect(clippy::cast_possible_truncation)]
        let depth = self.decisions.len() as u32;
        if depth > stats.max_depth {
            stats.max_depth = depth;
        }
    }

    /// Scans all unassigned cells for the smallest domain; ties go to a
    /// random coin flip or to the highest activity score.
    fn select_cell(
        &self,
        board: &Board,
        rng: &mut XorShift32,
        opts: &SearchOptions,
    ) -> Option<u8> {
        let mut best = None;
        let mut best_candidates = u8::MAX;
        let mut best_activity = f64::NEG_INFINITY;
        for cell in 0..81u8 {
            let domain = board.domain(cell);
            if domain.is_empty() || domain.single().is_some() {
                continue;
            }
            let candidates = domain.len();
            let replace = if candidates < best_candidates {
                true
            } else if candidates > best_candidates {
                false
            } else if opts.random_tie_break {
                rng.next_u32() & 1 == 0
            } else {
                self.activity.get(cell) > best_activity
            };
            if replace {
                best_candidates = candidates;
                best_activity = self.activity.get(cell);
                best = Some(cell);
            }
        }
        best
    }
}

/// The lowest untried digit, or a seeded-uniform choice when enabled.
fn pick_digit(untried: DigitSet, rng: &mut XorShift32, opts: &SearchOptions) -> Option<u8> {
    if untried.is_empty() {
        return None;
    }
    if opts.random_value_choice {
        #[expect(clippy::cast_possible_truncation)]
        let index = rng.next_index(u32::from(untried.len())) as u8;
        untried.nth(index)
    } else {
        untried.lowest()
    }
}
