//! Core data structures for the kiridoku sudoku engine.
//!
//! This crate provides the fixed-size, bit-packed building blocks shared by
//! the solver and generator crates:
//!
//! - [`bits`]: word-level helpers and the 9-bit popcount lookup table
//! - [`digit_set`]: candidate digits for one cell, packed into nine bits
//! - [`cell_set`]: sets of board cells packed into three 32-bit words
//! - [`geom`]: houses (rows, columns, boxes), peer masks, and coordinate
//!   helpers, all built at compile time
//! - [`grid`]: the flat 81-cell interchange format
//! - [`rng`]: the seeded xorshift32 generator behind every randomized choice
//!
//! Everything here is plain data with no interior mutability. The geometry
//! tables are `const` and shared read-only by every solver instance.
//!
//! # Examples
//!
//! ```
//! use kiridoku_core::{CellSet, DigitSet, Grid81};
//!
//! let mut domain = DigitSet::FULL;
//! domain.remove(5);
//! assert_eq!(domain.len(), 8);
//!
//! let grid: Grid81 = ".".repeat(81).parse().unwrap();
//! assert_eq!(grid.given_count(), 0);
//!
//! let row0 = kiridoku_core::geom::HOUSE_MASKS[0];
//! assert_eq!(row0.len(), 9);
//! assert!(row0.contains(8));
//! assert!(!row0.contains(9));
//! let _ = CellSet::EMPTY;
//! ```

pub mod bits;
pub mod cell_set;
pub mod digit_set;
pub mod geom;
pub mod grid;
pub mod rng;

pub use self::{
    cell_set::CellSet,
    digit_set::DigitSet,
    grid::{Grid81, GridError},
    rng::{XorShift32, mix32},
};
