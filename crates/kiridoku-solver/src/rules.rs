//! The deduction rules fired by the propagation engine.
//!
//! Each rule works on the digit planes intersected with house masks, so a
//! full house scan is nine word-wise intersections rather than 81 cell reads.

use kiridoku_core::{CellSet, DigitSet, geom};

use crate::{
    board::{Board, Contradiction},
    stats::SolveStats,
};

/// Assigns every digit that has exactly one candidate cell left in `house`.
///
/// A digit with zero candidate cells in a house is a contradiction.
pub(crate) fn hidden_singles(
    board: &mut Board,
    house: u8,
    stats: &mut SolveStats,
) -> Result<(), Contradiction> {
    let mask = geom::HOUSE_MASKS[usize::from(house)];
    for digit in 1..=9 {
        let candidates = board.plane(digit).intersection(mask);
        if candidates.is_empty() {
            return Err(Contradiction);
        }
        if let Some(cell) = candidates.as_single() {
            stats.hidden_singles += 1;
            board.assign(cell, digit)?;
        }
    }
    Ok(())
}

/// Locked candidates (pointing and claiming) over the dirty boxes.
///
/// When a digit's remaining candidates within a box all lie on one row or
/// column, the digit is eliminated from the rest of that line outside the box.
pub(crate) fn locked_candidates(
    board: &mut Board,
    dirty_houses: u32,
    stats: &mut SolveStats,
) -> Result<(), Contradiction> {
    for box_index in 0..9u8 {
        let box_house = 18 + box_index;
        if dirty_houses & (1 << box_house) == 0 {
            continue;
        }
        let box_mask = geom::HOUSE_MASKS[usize::from(box_house)];
        let band_row = (box_index / 3) * 3;
        let band_col = (box_index % 3) * 3;
        for digit in 1..=9 {
            let box_candidates = board.plane(digit).intersection(box_mask);
            if box_candidates.is_empty() {
                return Err(Contradiction);
            }
            for line in 0..3 {
                confine_to_line(board, digit, box_candidates, band_row + line, stats)?;
                confine_to_line(board, digit, box_candidates, 9 + band_col + line, stats)?;
            }
        }
    }
    Ok(())
}

/// If all of `box_candidates` lie on `line_house`, eliminates the digit from
/// that line's cells outside the box.
fn confine_to_line(
    board: &mut Board,
    digit: u8,
    box_candidates: CellSet,
    line_house: u8,
    stats: &mut SolveStats,
) -> Result<(), Contradiction> {
    let line_mask = geom::HOUSE_MASKS[usize::from(line_house)];
    if !box_candidates.difference(line_mask).is_empty() {
        return Ok(());
    }
    let outside = board
        .plane(digit)
        .intersection(line_mask)
        .difference(box_candidates);
    for cell in outside {
        board.remove(cell, digit)?;
        stats.locked_candidate_elims += 1;
    }
    Ok(())
}

/// Hidden pairs: two digits whose candidates within a house coincide in
/// exactly two cells restrict those cells to just that pair.
pub(crate) fn hidden_pairs(
    board: &mut Board,
    dirty_houses: u32,
    dirty_only: bool,
    stats: &mut SolveStats,
) -> Result<(), Contradiction> {
    for house in 0..27u8 {
        if dirty_only && dirty_houses & (1 << house) == 0 {
            continue;
        }
        let mask = geom::HOUSE_MASKS[usize::from(house)];
        let mut candidates = [CellSet::EMPTY; 9];
        for digit in 1..=9u8 {
            candidates[usize::from(digit - 1)] = board.plane(digit).intersection(mask);
        }
        for first in 1..=8u8 {
            let cells = candidates[usize::from(first - 1)];
            if cells.len() != 2 {
                continue;
            }
            for second in first + 1..=9 {
                if candidates[usize::from(second - 1)] != cells {
                    continue;
                }
                let keep = DigitSet::pair(first, second);
                for cell in cells {
                    let removed = board.restrict_to(cell, keep)?;
                    stats.hidden_pair_elims += u64::from(removed);
                }
            }
        }
    }
    Ok(())
}
