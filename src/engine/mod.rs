//! Engine module: the seeded 4x4 board, slide/merge resolution and the
//! deterministic spawn generator.
//!
//! - `Board` is the immutable game state with its embedded generator.
//! - `MoveSet` holds the four boards one ply away from a parent.
//! - Internals (line tables and the generator) live in submodules.

mod ops;
mod rng;
pub mod state;

pub use rng::SEED_LIMIT;
pub use state::{
    exponents_into, Board, BoardError, Direction, MoveSet, TilesIter, ValuesIter, BLOCK_LEN,
    GRID_LEN, MAX_EXPONENT,
};

/// Build the line tables ahead of the first move.
/// Optional; tables are built lazily otherwise. Safe to call multiple times.
pub fn warm() {
    ops::warm();
}
