//! Deterministic spawn generator.
//!
//! A 32-bit LCG. Every board carries a copy of the generator alongside the
//! seed it started from, so spawns after any sequence of moves are a pure
//! function of `(seed, moves)`.

use super::state::Tile;

const MULTIPLIER: u32 = 1_664_525;
const INCREMENT: u32 = 1_013_904_223;

/// Exclusive upper bound of the seed (and state) domain.
pub const SEED_LIMIT: u64 = 1 << 32;

/// Number of tiles placed by `Board::from_seed`.
pub(crate) const START_TILES: usize = 2;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) struct SpawnRng {
    seed: u32,
    state: u32,
}

impl SpawnRng {
    /// Start a fresh sequence; `None` if `seed` is outside the generator domain.
    pub(crate) fn new(seed: u64) -> Option<Self> {
        let seed = u32::try_from(seed).ok()?;
        Some(SpawnRng { seed, state: seed })
    }

    /// Rebuild a generator mid-sequence from its serialized parts.
    pub(crate) fn from_parts(seed: u64, state: u64) -> Option<Self> {
        Some(SpawnRng {
            seed: u32::try_from(seed).ok()?,
            state: u32::try_from(state).ok()?,
        })
    }

    #[inline]
    pub(crate) fn seed(&self) -> u64 {
        self.seed as u64
    }

    #[inline]
    pub(crate) fn state(&self) -> u64 {
        self.state as u64
    }

    /// Advance once, returning the high half of the new state.
    /// The low bits of a power-of-two LCG cycle with short periods.
    #[inline]
    pub(crate) fn next_draw(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        self.state >> 16
    }

    /// Pick the slot among `free` empty cells for the next tile.
    #[inline]
    pub(crate) fn next_slot(&mut self, free: u64) -> u64 {
        debug_assert!(free > 0);
        self.next_draw() as u64 % free
    }

    /// Exponent of the next spawned tile: 1 (a 2) nine times in ten, else 2 (a 4).
    #[inline]
    pub(crate) fn next_tile(&mut self) -> Tile {
        if self.next_draw() % 10 < 9 {
            1
        } else {
            2
        }
    }
}
