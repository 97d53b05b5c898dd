//! Board geometry: houses, peers, and coordinate helpers.
//!
//! All tables are built at compile time and shared read-only by every solver
//! instance. Houses are numbered rows 0-8, columns 9-17, boxes 18-26; cells
//! are row-major indices 0-80.

use crate::cell_set::CellSet;

/// Row of a cell index.
#[inline]
#[must_use]
pub const fn row_of(cell: u8) -> u8 {
    cell / 9
}

/// Column of a cell index.
#[inline]
#[must_use]
pub const fn col_of(cell: u8) -> u8 {
    cell % 9
}

/// Box (0-8, left to right, top to bottom) of a cell index.
#[inline]
#[must_use]
pub const fn box_of(cell: u8) -> u8 {
    (row_of(cell) / 3) * 3 + col_of(cell) / 3
}

/// Cell index at `(row, col)`.
#[inline]
#[must_use]
pub const fn cell_at(row: u8, col: u8) -> u8 {
    row * 9 + col
}

/// The nine cells of each house, rows then columns then boxes.
pub const HOUSE_MASKS: [CellSet; 27] = {
    let mut masks = [CellSet::EMPTY; 27];
    let mut cell = 0u8;
    while cell < 81 {
        masks[row_of(cell) as usize].insert(cell);
        masks[9 + col_of(cell) as usize].insert(cell);
        masks[18 + box_of(cell) as usize].insert(cell);
        cell += 1;
    }
    masks
};

/// The three houses owning each cell: `[row, 9 + col, 18 + box]`.
pub const CELL_HOUSES: [[u8; 3]; 81] = {
    let mut houses = [[0u8; 3]; 81];
    let mut cell = 0u8;
    while cell < 81 {
        houses[cell as usize] = [row_of(cell), 9 + col_of(cell), 18 + box_of(cell)];
        cell += 1;
    }
    houses
};

/// The 20 cells sharing a row, column, or box with each cell, excluding the
/// cell itself.
pub const PEER_MASKS: [CellSet; 81] = {
    let mut masks = [CellSet::EMPTY; 81];
    let mut cell = 0u8;
    while cell < 81 {
        let [row, col, bx] = CELL_HOUSES[cell as usize];
        let mut peers = HOUSE_MASKS[row as usize]
            .union(HOUSE_MASKS[col as usize])
            .union(HOUSE_MASKS[bx as usize]);
        peers.remove(cell);
        masks[cell as usize] = peers;
        cell += 1;
    }
    masks
};
