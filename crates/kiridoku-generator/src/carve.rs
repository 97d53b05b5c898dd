//! Clue removal under uniqueness and difficulty constraints.

use kiridoku_core::Grid81;
use kiridoku_solver::Difficulty;

use crate::{
    policy::{self, TargetPolicy},
    roles::SolverRoles,
    symmetry::{self, Orbit, Symmetry},
};

/// A carving candidate: the puzzle, its probed difficulty, and clue count.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Carved {
    pub(crate) puzzle: Grid81,
    pub(crate) difficulty: Difficulty,
    pub(crate) clue_count: u8,
}

/// Counters for one carve pass, reported at debug level.
#[derive(Debug, Default)]
struct CarveStats {
    probes: u32,
    unique_rejects: u32,
    null_probe_rejects: u32,
    overshoot_rejects: u32,
}

/// Carves the solved grid toward the target difficulty.
///
/// Orbits of the requested symmetry are visited in a seed-shuffled order.
/// Each orbit is tentatively blanked; the removal survives only while the
/// puzzle stays unique, and — once the clue count is under the probe gate —
/// while a bounded difficulty probe neither fails nor overshoots the target.
/// Returns the best-scoring candidate seen, short-circuiting on an exact
/// difficulty match at or below the target's minimum clue count.
pub(crate) fn carve(
    roles: &mut SolverRoles,
    solved: &Grid81,
    target: Difficulty,
    symmetry: Symmetry,
    seed: u32,
) -> Option<Carved> {
    let policy = TargetPolicy::for_target(target);
    let floor = policy.floor_clues();
    let mut orbits = symmetry.orbits();
    symmetry::shuffle_orbits(&mut orbits, seed);

    let mut puzzle = *solved;
    let mut clue_count = 81u8;
    let mut probe_step = 0u32;
    let mut stats = CarveStats::default();
    let mut best: Option<(Carved, u32)> = None;

    for orbit in &orbits {
        #[expect(clippy::cast_possible_truncation)]
        let len = orbit.len() as u8;
        if clue_count < floor + len {
            continue;
        }

        let saved = blank_orbit(&mut puzzle, orbit);
        if !roles.is_unique(&puzzle) {
            restore_orbit(&mut puzzle, orbit, &saved);
            stats.unique_rejects += 1;
            continue;
        }
        clue_count -= len;
        probe_step += 1;

        if !policy.should_probe(probe_step, clue_count) {
            continue;
        }

        let probed = roles.probe_difficulty(&puzzle);
        stats.probes += 1;
        log::trace!("probe clues={clue_count} difficulty={probed:?}");
        let Some(probed) = probed else {
            restore_orbit(&mut puzzle, orbit, &saved);
            clue_count += len;
            stats.null_probe_rejects += 1;
            continue;
        };
        if policy::overshoots(target, probed) {
            restore_orbit(&mut puzzle, orbit, &saved);
            clue_count += len;
            stats.overshoot_rejects += 1;
            continue;
        }

        let score = policy.score(target, probed, clue_count);
        let candidate = Carved {
            puzzle,
            difficulty: probed,
            clue_count,
        };
        if best.as_ref().is_none_or(|(_, best_score)| score < *best_score) {
            best = Some((candidate, score));
        }
        if probed == target && clue_count <= policy.min_clues {
            log_summary(target, &stats);
            return Some(candidate);
        }
    }

    log_summary(target, &stats);
    best.map(|(carved, _)| carved)
}

fn blank_orbit(puzzle: &mut Grid81, orbit: &Orbit) -> Orbit {
    let mut saved = Orbit::new();
    for &cell in orbit {
        saved.push(puzzle.get(cell));
        puzzle.clear(cell);
    }
    saved
}

fn restore_orbit(puzzle: &mut Grid81, orbit: &Orbit, saved: &Orbit) {
    for (&cell, &digit) in orbit.iter().zip(saved.iter()) {
        puzzle.set(cell, digit);
    }
}

fn log_summary(target: Difficulty, stats: &CarveStats) {
    log::debug!(
        "carve target={target} probes={} unique_rejects={} null_probes={} overshoots={}",
        stats.probes,
        stats.unique_rejects,
        stats.null_probe_rejects,
        stats.overshoot_rejects,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_and_restore_round_trip() {
        let mut puzzle: Grid81 = format!("12345{}", ".".repeat(76)).parse().unwrap();
        let original = puzzle;
        let orbit = Orbit::from_iter([0u8, 2, 4]);
        let saved = blank_orbit(&mut puzzle, &orbit);
        assert!(puzzle.is_blank(0));
        assert!(puzzle.is_blank(2));
        assert!(puzzle.is_blank(4));
        assert_eq!(puzzle.get(1), 2);
        restore_orbit(&mut puzzle, &orbit, &saved);
        assert_eq!(puzzle, original);
    }

    #[test]
    fn test_carve_respects_clue_floor_and_uniqueness() {
        let mut roles = SolverRoles::default();
        let solved = roles.complete_grid(0x00C0_FFEE);
        let carved = carve(
            &mut roles,
            &solved,
            Difficulty::Easy,
            Symmetry::Rot180,
            0x00C0_FFEE,
        )
        .expect("an easy carve from a full grid succeeds");
        assert!(carved.clue_count >= 32);
        assert_eq!(carved.puzzle.given_count(), carved.clue_count);
        assert!(roles.is_unique(&carved.puzzle));
        // Every given agrees with the solution it was carved from.
        for (cell, digit) in carved.puzzle.given_cells() {
            assert_eq!(digit, solved.get(cell));
        }
    }
}
