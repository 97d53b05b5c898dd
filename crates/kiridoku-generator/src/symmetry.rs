//! Board symmetries and the cell orbits they induce.

use kiridoku_core::{geom, mix32};
use tinyvec::ArrayVec;

/// A group of cells mapped onto one another by repeated application of a
/// symmetry transform. Carving blanks or keeps whole orbits, never parts of
/// one. Quarter-turn orbits are the largest at four cells.
pub type Orbit = ArrayVec<[u8; 4]>;

/// Symmetries available to the generator.
///
/// Each variant defines a deterministic mapping of cell index to cell index;
/// the orbits of that mapping are the units of clue removal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Symmetry {
    /// No symmetry; every cell is its own orbit.
    #[default]
    None,
    /// Half-turn rotation about the board center; orbits of up to two cells.
    Rot180,
    /// Quarter-turn rotation; orbits of up to four cells.
    Rot90,
    /// Reflection across the main diagonal; orbits of up to two cells.
    MirrorXy,
}

impl Symmetry {
    /// All symmetries.
    pub const ALL: [Self; 4] = [Self::None, Self::Rot180, Self::Rot90, Self::MirrorXy];

    /// Maps a cell index through the transform.
    #[must_use]
    pub fn map_cell(self, cell: u8) -> u8 {
        let (row, col) = (geom::row_of(cell), geom::col_of(cell));
        match self {
            Self::None => cell,
            Self::Rot180 => geom::cell_at(8 - row, 8 - col),
            Self::Rot90 => geom::cell_at(col, 8 - row),
            Self::MirrorXy => geom::cell_at(col, row),
        }
    }

    /// Partitions all 81 cells into orbits, ordered by their smallest cell.
    #[must_use]
    pub fn orbits(self) -> Vec<Orbit> {
        let mut seen = [false; 81];
        let mut orbits = Vec::new();
        for start in 0..81u8 {
            if seen[usize::from(start)] {
                continue;
            }
            let mut orbit = Orbit::new();
            let mut cell = start;
            loop {
                orbit.push(cell);
                seen[usize::from(cell)] = true;
                cell = self.map_cell(cell);
                if cell == start {
                    break;
                }
            }
            orbits.push(orbit);
        }
        orbits
    }
}

/// Permutes `orbits` in place, Fisher-Yates driven by [`mix32`] so the order
/// is a pure function of the seed.
#[expect(clippy::cast_possible_truncation)]
pub(crate) fn shuffle_orbits(orbits: &mut [Orbit], seed: u32) {
    let mut state = seed;
    for i in (2..=orbits.len()).rev() {
        state = mix32(state, i as u32);
        let j = (state % i as u32) as usize;
        orbits.swap(i - 1, j);
    }
}
