//! The attempt loop that turns a base seed into a validated puzzle.

use kiridoku_core::{Grid81, mix32};
use kiridoku_solver::Difficulty;
use rand::RngExt as _;

use crate::{
    carve,
    policy::{self, TargetPolicy},
    roles::SolverRoles,
    symmetry::Symmetry,
};

/// One generated puzzle with everything needed to reproduce and verify it.
///
/// Immutable once produced: the same `(target, symmetry, seed)` triple
/// regenerates it byte for byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratedPuzzle {
    /// The carved puzzle, blanks as zero.
    pub puzzle: Grid81,
    /// The completed grid the puzzle was carved from.
    pub solution: Grid81,
    /// The per-attempt seed that produced this puzzle.
    pub seed: u32,
    /// Difficulty achieved, as probed deterministically.
    pub difficulty: Difficulty,
    /// Number of givens left in `puzzle`.
    pub clue_count: u8,
}

/// Generation gave up without an acceptable puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("no acceptable puzzle found within {attempts} attempts")]
pub struct GenerateError {
    /// Attempts made before giving up.
    pub attempts: u32,
}

/// Attempt budget and acceptance policy.
#[derive(Debug, Clone, Copy)]
pub struct GeneratorConfig {
    /// Carving attempts before generation fails.
    pub max_attempts: u32,
    /// Return the closest-scoring candidate when no attempt is accepted.
    pub best_effort_fallback: bool,
    /// Let a [`Difficulty::Hard`] target accept a [`Difficulty::Samurai`]
    /// result.
    pub hard_accepts_samurai: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_attempts: 1000,
            best_effort_fallback: true,
            hard_accepts_samurai: true,
        }
    }
}

/// Builds puzzles with a target difficulty and symmetry.
///
/// Holds three solver roles (completion, uniqueness, difficulty probing) and
/// reuses them across attempts. Everything downstream of a base seed is
/// deterministic, so generation is replayable from the recorded seed.
///
/// # Examples
///
/// ```
/// use kiridoku_generator::{PuzzleGenerator, Symmetry};
/// use kiridoku_solver::Difficulty;
///
/// let mut generator = PuzzleGenerator::new();
/// let puzzle = generator.generate_with_seed(Difficulty::Easy, Symmetry::Rot180, 7)?;
/// assert!(puzzle.clue_count >= 32);
/// # Ok::<(), kiridoku_generator::GenerateError>(())
/// ```
#[derive(Debug, Default)]
pub struct PuzzleGenerator {
    roles: SolverRoles,
    config: GeneratorConfig,
}

impl PuzzleGenerator {
    /// Creates a generator with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a generator with an explicit configuration.
    #[must_use]
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self {
            roles: SolverRoles::default(),
            config,
        }
    }

    /// Generates a puzzle from an entropy seed.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError`] when no attempt produced an acceptable
    /// puzzle and best-effort fallback is disabled.
    pub fn generate(
        &mut self,
        target: Difficulty,
        symmetry: Symmetry,
    ) -> Result<GeneratedPuzzle, GenerateError> {
        self.generate_with_seed(target, symmetry, rand::rng().random())
    }

    /// Generates a puzzle deterministically from a base seed.
    ///
    /// Each attempt derives its own seed via [`mix32`], completes a random
    /// solved grid, carves it, and re-probes the carved result. The first
    /// attempt whose final difficulty is accepted for the target ends the
    /// loop; otherwise the best-scoring candidate across attempts is used as
    /// a fallback when enabled.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError`] when no attempt produced an acceptable
    /// puzzle and best-effort fallback is disabled.
    pub fn generate_with_seed(
        &mut self,
        target: Difficulty,
        symmetry: Symmetry,
        base_seed: u32,
    ) -> Result<GeneratedPuzzle, GenerateError> {
        log::debug!("generate target={target} symmetry={symmetry} base_seed={base_seed}");
        let policy = TargetPolicy::for_target(target);
        let mut best: Option<(GeneratedPuzzle, u32)> = None;

        for attempt in 1..=self.config.max_attempts {
            let seed = mix32(base_seed, attempt);
            let solution = self.roles.complete_grid(seed);

            let Some(carved) = carve::carve(&mut self.roles, &solution, target, symmetry, seed)
            else {
                log::debug!("attempt={attempt} seed={seed} carve failed");
                continue;
            };
            log::debug!(
                "attempt={attempt} seed={seed} difficulty={} clues={}",
                carved.difficulty,
                carved.clue_count,
            );

            let Some(final_difficulty) = self.roles.probe_difficulty(&carved.puzzle) else {
                continue;
            };
            let score = policy.score(target, final_difficulty, carved.clue_count);
            let candidate = GeneratedPuzzle {
                puzzle: carved.puzzle,
                solution,
                seed,
                difficulty: final_difficulty,
                clue_count: carved.clue_count,
            };
            if best.as_ref().is_none_or(|(_, best_score)| score < *best_score) {
                best = Some((candidate, score));
            }
            if policy::accepts(target, final_difficulty, self.config.hard_accepts_samurai) {
                let (accepted, _) = best.take().expect("a candidate was just recorded");
                return Ok(accepted);
            }
        }

        match best {
            Some((fallback, _)) if self.config.best_effort_fallback => {
                log::debug!(
                    "falling back to closest candidate difficulty={} clues={}",
                    fallback.difficulty,
                    fallback.clue_count,
                );
                Ok(fallback)
            }
            _ => Err(GenerateError {
                attempts: self.config.max_attempts,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use kiridoku_solver::{SolveStatus, Solver};

    use super::*;

    fn generate_easy(seed: u32) -> GeneratedPuzzle {
        let mut generator = PuzzleGenerator::new();
        generator
            .generate_with_seed(Difficulty::Easy, Symmetry::Rot180, seed)
            .unwrap()
    }

    #[test]
    fn test_round_trip_against_recorded_solution() {
        let generated = generate_easy(0x5EED_0001);
        let mut solver = Solver::new();
        solver.load_grid(&generated.puzzle).unwrap();
        let report = solver.solve_stop_at_one();
        assert_eq!(report.status, SolveStatus::Unique);
        assert_eq!(report.solution, Some(generated.solution));
    }

    #[test]
    fn test_generation_is_seed_deterministic() {
        let first = generate_easy(0x5EED_0002);
        let second = generate_easy(0x5EED_0002);
        assert_eq!(first, second);
    }

    #[test]
    fn test_clue_floor_holds() {
        let generated = generate_easy(0x5EED_0003);
        assert!(generated.clue_count >= 32);
        assert_eq!(generated.puzzle.given_count(), generated.clue_count);
    }

    #[test]
    fn test_uniqueness_of_generated_puzzle() {
        let generated = generate_easy(0x5EED_0004);
        let mut solver = Solver::new();
        solver.load_grid(&generated.puzzle).unwrap();
        assert_eq!(solver.count_solutions(2).status, SolveStatus::Unique);
    }

    #[test]
    fn test_blanks_are_whole_orbits() {
        let generated = generate_easy(0x5EED_0005);
        for orbit in Symmetry::Rot180.orbits() {
            let blanks = orbit
                .iter()
                .filter(|&&cell| generated.puzzle.is_blank(cell))
                .count();
            assert!(
                blanks == 0 || blanks == orbit.len(),
                "orbit {orbit:?} partially blanked"
            );
        }
    }

    #[test]
    fn test_exhausted_attempts_without_fallback_fail() {
        let mut generator = PuzzleGenerator::with_config(GeneratorConfig {
            max_attempts: 0,
            best_effort_fallback: false,
            hard_accepts_samurai: true,
        });
        let err = generator
            .generate_with_seed(Difficulty::Easy, Symmetry::None, 1)
            .unwrap_err();
        assert_eq!(err, GenerateError { attempts: 0 });
    }
}
