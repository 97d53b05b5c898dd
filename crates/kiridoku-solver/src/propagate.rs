//! The constraint-propagation fixpoint.

use kiridoku_core::geom;

use crate::{
    board::{Board, Contradiction},
    rules,
    stats::{Budget, LimitKind, SolveStats},
};

/// Why a propagation pass stopped before quiescence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Halt {
    /// A domain or house ran out of candidates.
    Contradiction,
    /// A resource ceiling was hit; neither success nor contradiction.
    Limit(LimitKind),
}

impl From<Contradiction> for Halt {
    fn from(_: Contradiction) -> Self {
        Self::Contradiction
    }
}

/// Drives the board to a fixpoint of cheap deductions.
///
/// Each round drains the dirty-cell queue (naked singles eliminate their
/// digit from peers), then snapshots the dirty-house queue and runs hidden
/// singles, locked candidates, and, when `heavy` is set, hidden pairs over
/// it. The budget is polled at the top of each round and per dirty house;
/// a hit stops propagation without declaring success or contradiction.
pub(crate) fn run(
    board: &mut Board,
    stats: &mut SolveStats,
    budget: &Budget,
    heavy: bool,
    heavy_dirty_only: bool,
) -> Result<(), Halt> {
    loop {
        board.clear_changed();
        if let Some(kind) = budget.check(stats.nodes) {
            return Err(Halt::Limit(kind));
        }

        while let Some(cell) = board.pop_dirty_cell() {
            if let Some(kind) = budget.check(stats.nodes) {
                return Err(Halt::Limit(kind));
            }
            let domain = board.domain(cell);
            if domain.is_empty() {
                return Err(Halt::Contradiction);
            }
            let Some(digit) = domain.single() else {
                continue;
            };
            let peers = board
                .plane(digit)
                .intersection(geom::PEER_MASKS[usize::from(cell)]);
            for peer in peers {
                board.remove(peer, digit)?;
            }
        }

        let houses = board.take_dirty_houses();
        for house in 0..27u8 {
            if houses & (1 << house) == 0 {
                continue;
            }
            if let Some(kind) = budget.check(stats.nodes) {
                return Err(Halt::Limit(kind));
            }
            rules::hidden_singles(board, house, stats)?;
        }
        rules::locked_candidates(board, houses, stats)?;
        if heavy {
            rules::hidden_pairs(board, houses, heavy_dirty_only, stats)?;
        }

        if !board.changed() {
            return Ok(());
        }
    }
}
