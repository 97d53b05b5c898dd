//! The mutable board: per-cell domains, digit planes, and dirty queues.

use kiridoku_core::{CellSet, DigitSet, Grid81, geom};

use crate::trail::Trail;

/// All 27 house bits set; marking every house dirty forces one full pass.
pub(crate) const ALL_HOUSES: u32 = 0x07FF_FFFF;

/// Marker for a mutation that would empty a domain or overflow the trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Contradiction;

/// A given that cannot coexist with the givens loaded before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("given {digit} at cell {cell} contradicts an earlier given")]
pub struct LoadError {
    /// Cell index of the rejected given.
    pub cell: u8,
    /// The digit that could not be placed there.
    pub digit: u8,
}

/// The canonical board representation.
///
/// Each cell owns a 9-bit candidate domain; per-digit planes record which
/// cells still allow each digit and are kept in lock-step with every domain
/// mutation. Mutations record their prior state on the trail and mark the
/// touched cell and its three houses dirty for the propagation engine.
#[derive(Debug, Clone)]
pub(crate) struct Board {
    domains: [DigitSet; 81],
    planes: [CellSet; 9],
    dirty_cells: CellSet,
    dirty_houses: u32,
    trail: Trail,
    assigned: u8,
    changed: bool,
    givens: u8,
}

impl Board {
    pub(crate) fn new() -> Self {
        Self {
            domains: [DigitSet::FULL; 81],
            planes: [CellSet::ALL; 9],
            dirty_cells: CellSet::EMPTY,
            dirty_houses: ALL_HOUSES,
            trail: Trail::new(),
            assigned: 0,
            changed: false,
            givens: 0,
        }
    }

    /// Reinitializes every domain to all nine digits, clears the trail, and
    /// marks every house dirty.
    pub(crate) fn reset(&mut self) {
        self.domains = [DigitSet::FULL; 81];
        self.planes = [CellSet::ALL; 9];
        self.dirty_cells = CellSet::EMPTY;
        self.dirty_houses = ALL_HOUSES;
        self.trail.clear();
        self.assigned = 0;
        self.changed = false;
        self.givens = 0;
    }

    /// Resets, then assigns each given in cell order.
    ///
    /// On failure the board is left fully reset, never partially loaded.
    pub(crate) fn load(&mut self, grid: &Grid81) -> Result<(), LoadError> {
        self.reset();
        for (cell, digit) in grid.given_cells() {
            if self.assign(cell, digit).is_err() {
                self.reset();
                return Err(LoadError { cell, digit });
            }
        }
        self.givens = grid.given_count();
        Ok(())
    }

    pub(crate) fn domain(&self, cell: u8) -> DigitSet {
        self.domains[usize::from(cell)]
    }

    /// Cells still allowing `digit`.
    pub(crate) fn plane(&self, digit: u8) -> CellSet {
        self.planes[usize::from(digit - 1)]
    }

    pub(crate) fn is_complete(&self) -> bool {
        self.assigned == 81
    }

    /// Given count recorded by the last successful load.
    pub(crate) fn givens(&self) -> u8 {
        self.givens
    }

    pub(crate) fn trail_mark(&self) -> usize {
        self.trail.mark()
    }

    /// Whether any domain changed since [`Board::clear_changed`].
    pub(crate) fn changed(&self) -> bool {
        self.changed
    }

    pub(crate) fn clear_changed(&mut self) {
        self.changed = false;
    }

    pub(crate) fn pop_dirty_cell(&mut self) -> Option<u8> {
        self.dirty_cells.pop_first()
    }

    /// Snapshots and clears the dirty-house queue.
    pub(crate) fn take_dirty_houses(&mut self) -> u32 {
        std::mem::take(&mut self.dirty_houses)
    }

    pub(crate) fn mark_all_houses_dirty(&mut self) {
        self.dirty_houses = ALL_HOUSES;
    }

    fn mark_dirty(&mut self, cell: u8) {
        self.dirty_cells.insert(cell);
        let [row, col, bx] = geom::CELL_HOUSES[usize::from(cell)];
        self.dirty_houses |= (1 << row) | (1 << col) | (1 << bx);
    }

    fn adjust_assigned(&mut self, old: DigitSet, new: DigitSet) {
        match (old.single().is_some(), new.single().is_some()) {
            (true, false) => self.assigned -= 1,
            (false, true) => self.assigned += 1,
            _ => {}
        }
    }

    /// Trails, stores, and queues one domain change.
    fn commit(&mut self, cell: u8, old: DigitSet, new: DigitSet) -> Result<(), Contradiction> {
        if !self.trail.push(cell, old) {
            return Err(Contradiction);
        }
        self.adjust_assigned(old, new);
        self.domains[usize::from(cell)] = new;
        self.changed = true;
        self.mark_dirty(cell);
        Ok(())
    }

    /// Clears one candidate bit. A no-op when the bit is already clear; fails
    /// when the domain would become empty.
    pub(crate) fn remove(&mut self, cell: u8, digit: u8) -> Result<(), Contradiction> {
        let old = self.domain(cell);
        if !old.contains(digit) {
            return Ok(());
        }
        let new = old.without(digit);
        if new.is_empty() {
            return Err(Contradiction);
        }
        self.commit(cell, old, new)?;
        self.planes[usize::from(digit - 1)].remove(cell);
        Ok(())
    }

    /// Forces `cell` to `digit` and eliminates the digit from all peers.
    ///
    /// Fails when the digit is not a candidate of the cell or a peer's domain
    /// would empty. Cascaded consequences (a peer collapsing to a single) are
    /// picked up through the dirty-cell queue, not here.
    pub(crate) fn assign(&mut self, cell: u8, digit: u8) -> Result<(), Contradiction> {
        let old = self.domain(cell);
        if !old.contains(digit) {
            return Err(Contradiction);
        }
        let new = DigitSet::only(digit);
        if old == new {
            return Ok(());
        }
        self.commit(cell, old, new)?;
        for dropped in old.without(digit) {
            self.planes[usize::from(dropped - 1)].remove(cell);
        }
        let peers = self.plane(digit).intersection(geom::PEER_MASKS[usize::from(cell)]);
        for peer in peers {
            self.remove(peer, digit)?;
        }
        Ok(())
    }

    /// Intersects the domain with `keep`, returning how many bits were
    /// removed. Fails when the intersection is empty.
    pub(crate) fn restrict_to(&mut self, cell: u8, keep: DigitSet) -> Result<u8, Contradiction> {
        let old = self.domain(cell);
        let new = old.intersection(keep);
        if new.is_empty() {
            return Err(Contradiction);
        }
        if new == old {
            return Ok(0);
        }
        self.commit(cell, old, new)?;
        let dropped = old.difference(new);
        for digit in dropped {
            self.planes[usize::from(digit - 1)].remove(cell);
        }
        Ok(dropped.len())
    }

    /// Rolls the board back to an earlier trail mark, restoring domains and
    /// planes exactly.
    pub(crate) fn undo_to(&mut self, mark: usize) {
        while self.trail.mark() > mark {
            let Some((cell, prior)) = self.trail.pop() else {
                break;
            };
            let current = self.domain(cell);
            self.adjust_assigned(current, prior);
            self.domains[usize::from(cell)] = prior;
            for digit in 1..=9 {
                if prior.contains(digit) {
                    self.planes[usize::from(digit - 1)].insert(cell);
                } else {
                    self.planes[usize::from(digit - 1)].remove(cell);
                }
            }
            self.mark_dirty(cell);
        }
    }

    /// Materializes the solved grid. Meaningful only when the board is
    /// complete.
    pub(crate) fn solution_grid(&self) -> Grid81 {
        debug_assert!(self.is_complete());
        let mut grid = Grid81::EMPTY;
        for cell in 0..81 {
            if let Some(digit) = self.domain(cell).single() {
                grid.set(cell, digit);
            }
        }
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Planes must mirror domains bit for bit.
    fn assert_planes_in_sync(board: &Board) {
        for digit in 1..=9 {
            for cell in 0..81 {
                assert_eq!(
                    board.plane(digit).contains(cell),
                    board.domain(cell).contains(digit),
                    "digit {digit} cell {cell}"
                );
            }
        }
    }

    #[test]
    fn test_assign_eliminates_from_peers() {
        let mut board = Board::new();
        board.assign(0, 5).unwrap();
        assert_eq!(board.domain(0), DigitSet::only(5));
        // Row, column, and box peers all lose 5.
        assert!(!board.domain(1).contains(5));
        assert!(!board.domain(9).contains(5));
        assert!(!board.domain(10).contains(5));
        // A non-peer keeps it.
        assert!(board.domain(40).contains(5));
        assert_planes_in_sync(&board);
    }

    #[test]
    fn test_assign_conflicting_digit_fails() {
        let mut board = Board::new();
        board.assign(0, 5).unwrap();
        assert_eq!(board.assign(1, 5), Err(Contradiction));
    }

    #[test]
    fn test_assign_is_idempotent() {
        let mut board = Board::new();
        board.assign(0, 5).unwrap();
        let mark = board.trail_mark();
        board.assign(0, 5).unwrap();
        assert_eq!(board.trail_mark(), mark);
    }

    #[test]
    fn test_remove_no_op_and_empty_domain() {
        let mut board = Board::new();
        for digit in 1..=8 {
            board.remove(0, digit).unwrap();
        }
        // Already-clear bit is a no-op.
        let mark = board.trail_mark();
        board.remove(0, 3).unwrap();
        assert_eq!(board.trail_mark(), mark);
        // Removing the last candidate is a contradiction.
        assert_eq!(board.remove(0, 9), Err(Contradiction));
        assert_eq!(board.domain(0), DigitSet::only(9));
    }

    #[test]
    fn test_restrict_to_reports_removed_count() {
        let mut board = Board::new();
        let keep = DigitSet::pair(2, 7);
        assert_eq!(board.restrict_to(0, keep), Ok(7));
        assert_eq!(board.domain(0), keep);
        // Restricting again removes nothing.
        assert_eq!(board.restrict_to(0, keep), Ok(0));
        assert_eq!(
            board.restrict_to(0, DigitSet::only(9)),
            Err(Contradiction)
        );
        assert_planes_in_sync(&board);
    }

    #[test]
    fn test_undo_restores_domains_and_planes() {
        let mut board = Board::new();
        let mark = board.trail_mark();
        board.assign(0, 5).unwrap();
        board.restrict_to(40, DigitSet::pair(1, 2)).unwrap();
        board.undo_to(mark);
        for cell in 0..81 {
            assert_eq!(board.domain(cell), DigitSet::FULL);
        }
        assert!(!board.is_complete());
        assert_planes_in_sync(&board);
    }

    #[test]
    fn test_load_counts_givens() {
        let grid: Grid81 = format!("12345678.{}", ".".repeat(72)).parse().unwrap();
        let mut board = Board::new();
        board.load(&grid).unwrap();
        assert_eq!(board.givens(), 8);
        // The remaining cell of the row collapses to a naked single.
        assert_eq!(board.domain(8), DigitSet::only(9));
    }

    #[test]
    fn test_load_contradiction_resets_board() {
        // Identical rows conflict cell by cell.
        let grid: Grid81 = format!("123456789123456789{}", ".".repeat(63))
            .parse()
            .unwrap();
        let mut board = Board::new();
        let err = board.load(&grid).unwrap_err();
        assert_eq!(err, LoadError { cell: 9, digit: 1 });
        // The board is fully reset, never partially loaded.
        assert_eq!(board.givens(), 0);
        for cell in 0..81 {
            assert_eq!(board.domain(cell), DigitSet::FULL);
        }
        assert_eq!(board.trail_mark(), 0);
    }

    #[test]
    fn test_solution_grid_round_trip() {
        let solved: Grid81 = concat!(
            "534678912",
            "672195348",
            "198342567",
            "859761423",
            "426853791",
            "713924856",
            "961537284",
            "287419635",
            "345286179",
        )
        .parse()
        .unwrap();
        let mut board = Board::new();
        board.load(&solved).unwrap();
        assert!(board.is_complete());
        assert_eq!(board.solution_grid(), solved);
        assert_planes_in_sync(&board);
    }
}
