//! Per-difficulty carving policy: clue floors, probe cadence, and scoring.
//!
//! Every constant here is a tuned policy preserved verbatim; the generator's
//! output for a given seed depends on all of them.

use kiridoku_solver::Difficulty;

/// No valid 9×9 sudoku has fewer givens than this.
const THEORETICAL_MIN_CLUES: u8 = 17;

/// Carving knobs for one target difficulty.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TargetPolicy {
    /// Fewest clues a puzzle for this target should keep.
    pub(crate) min_clues: u8,
    /// Difficulty probing starts once the clue count falls to this gate.
    pub(crate) probe_gate: u8,
    /// Probe on every n-th successful removal.
    pub(crate) probe_stride: u32,
}

impl TargetPolicy {
    pub(crate) const fn for_target(target: Difficulty) -> Self {
        match target {
            Difficulty::Easy => Self {
                min_clues: 32,
                probe_gate: 45,
                probe_stride: 1,
            },
            Difficulty::Medium => Self {
                min_clues: 27,
                probe_gate: 40,
                probe_stride: 3,
            },
            Difficulty::Hard => Self {
                min_clues: 22,
                probe_gate: 35,
                probe_stride: 2,
            },
            Difficulty::Samurai => Self {
                min_clues: 17,
                probe_gate: 30,
                probe_stride: 2,
            },
        }
    }

    /// Hard floor on clue count during carving.
    pub(crate) fn floor_clues(&self) -> u8 {
        self.min_clues.max(THEORETICAL_MIN_CLUES)
    }

    /// Whether a difficulty probe is due at this point of the carve.
    pub(crate) fn should_probe(&self, probe_step: u32, clue_count: u8) -> bool {
        probe_step % self.probe_stride == 0 && clue_count <= self.probe_gate
    }

    /// Distance of a probed difficulty from the target, weighted so that any
    /// rank mismatch dominates, plus a shortfall penalty while the clue count
    /// is still above the target's minimum. Lower is better.
    pub(crate) fn score(&self, target: Difficulty, probed: Difficulty, clue_count: u8) -> u32 {
        let distance = u32::from(target.rank().abs_diff(probed.rank())) * 1000;
        let shortfall = u32::from(clue_count.saturating_sub(self.min_clues));
        distance + shortfall
    }
}

/// Whether a probed difficulty lands beyond the target.
pub(crate) fn overshoots(target: Difficulty, probed: Difficulty) -> bool {
    probed.rank() > target.rank()
}

/// Whether a final probed difficulty is acceptable for the target.
pub(crate) fn accepts(target: Difficulty, probed: Difficulty, hard_accepts_samurai: bool) -> bool {
    probed == target
        || (hard_accepts_samurai
            && target == Difficulty::Hard
            && probed == Difficulty::Samurai)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_never_below_theoretical_minimum() {
        for target in Difficulty::ALL {
            assert!(TargetPolicy::for_target(target).floor_clues() >= THEORETICAL_MIN_CLUES);
        }
        assert_eq!(TargetPolicy::for_target(Difficulty::Easy).floor_clues(), 32);
        assert_eq!(
            TargetPolicy::for_target(Difficulty::Samurai).floor_clues(),
            17
        );
    }

    #[test]
    fn test_probe_gate_and_stride() {
        let policy = TargetPolicy::for_target(Difficulty::Medium);
        // Too many clues left: no probe regardless of step.
        assert!(!policy.should_probe(3, 50));
        // Stride of three fires on every third removal.
        assert!(policy.should_probe(3, 40));
        assert!(!policy.should_probe(4, 40));
        assert!(policy.should_probe(6, 38));
    }

    #[test]
    fn test_score_prefers_exact_difficulty() {
        let policy = TargetPolicy::for_target(Difficulty::Hard);
        let exact = policy.score(Difficulty::Hard, Difficulty::Hard, 22);
        let near = policy.score(Difficulty::Hard, Difficulty::Medium, 22);
        assert_eq!(exact, 0);
        assert_eq!(near, 1000);
        // A rank mismatch outweighs any clue shortfall.
        assert!(policy.score(Difficulty::Hard, Difficulty::Hard, 81) < near);
    }

    #[test]
    fn test_score_penalizes_excess_clues() {
        let policy = TargetPolicy::for_target(Difficulty::Easy);
        assert_eq!(policy.score(Difficulty::Easy, Difficulty::Easy, 32), 0);
        assert_eq!(policy.score(Difficulty::Easy, Difficulty::Easy, 40), 8);
    }

    #[test]
    fn test_overshoot_is_one_directional() {
        assert!(overshoots(Difficulty::Medium, Difficulty::Hard));
        assert!(!overshoots(Difficulty::Medium, Difficulty::Easy));
        assert!(!overshoots(Difficulty::Medium, Difficulty::Medium));
    }

    #[test]
    fn test_hard_accepts_samurai_behind_flag() {
        assert!(accepts(Difficulty::Hard, Difficulty::Samurai, true));
        assert!(!accepts(Difficulty::Hard, Difficulty::Samurai, false));
        assert!(!accepts(Difficulty::Medium, Difficulty::Hard, true));
        assert!(accepts(Difficulty::Easy, Difficulty::Easy, false));
    }
}
