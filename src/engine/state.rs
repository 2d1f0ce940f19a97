use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::ops;
use super::rng::{SpawnRng, SEED_LIMIT, START_TILES};

// Internal type aliases for packed representation
pub(crate) type BoardRaw = u64;
pub(crate) type Line = u16;
pub(crate) type Tile = u8;

/// Largest exponent a cell can hold (a 32768 tile).
pub const MAX_EXPONENT: Tile = 15;

/// Length of the block produced by [`Board::to_bytes`].
pub const BLOCK_LEN: usize = 24;

/// Length of the leading packed-grid part of the block.
pub const GRID_LEN: usize = 8;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("seed {0} is outside the generator domain [0, 2^32)")]
    InvalidSeed(u64),
    #[error("malformed board encoding: {0}")]
    MalformedEncoding(String),
}

/// A direction to slide/merge tiles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions in `MoveSet` field order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Stable byte code used by trace files.
    #[inline]
    pub fn code(self) -> u8 {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Direction> {
        Direction::ALL.get(code as usize).copied()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
        };
        f.write_str(name)
    }
}

/// Packed 4x4 board (16 4-bit exponents in a `u64`) plus the spawn
/// generator that continues its seeded sequence.
///
/// Boards are values: every move returns a new `Board`. Equality and hashing
/// look at the packed grid only, so two boards with the same layout compare
/// equal however they were reached.
#[derive(Clone, Copy)]
pub struct Board {
    grid: BoardRaw,
    rng: SpawnRng,
}

impl Board {
    /// Seed a new game: place the starting tiles using the generator for `seed`.
    ///
    /// ```
    /// use seeded_2048::engine::Board;
    /// let a = Board::from_seed(290797).unwrap();
    /// let b = Board::from_seed(290797).unwrap();
    /// assert_eq!(a.to_bytes(), b.to_bytes());
    /// assert_eq!(a.seed(), 290797);
    /// assert_eq!(a.count_empty(), 14);
    /// ```
    pub fn from_seed(seed: u64) -> Result<Self, BoardError> {
        let rng = SpawnRng::new(seed).ok_or(BoardError::InvalidSeed(seed))?;
        let mut board = Board { grid: 0, rng };
        for _ in 0..START_TILES {
            board = board.spawn();
        }
        Ok(board)
    }

    /// Rebuild a board from a block previously produced by [`Board::to_bytes`].
    ///
    /// ```
    /// use seeded_2048::engine::Board;
    /// let b = Board::from_seed(7).unwrap();
    /// let c = Board::from_data(&b.to_bytes()).unwrap();
    /// assert_eq!(b, c);
    /// assert!(Board::from_data(&[0u8; 8]).is_err());
    /// ```
    pub fn from_data(bytes: &[u8]) -> Result<Self, BoardError> {
        let block: &[u8; BLOCK_LEN] = bytes.try_into().map_err(|_| {
            BoardError::MalformedEncoding(format!(
                "expected {BLOCK_LEN} bytes, got {}",
                bytes.len()
            ))
        })?;
        let grid = read_u64_be(block, 0);
        let seed = read_u64_be(block, GRID_LEN);
        let state = read_u64_be(block, 16);
        let rng = SpawnRng::from_parts(seed, state).ok_or_else(|| {
            BoardError::MalformedEncoding(format!(
                "generator seed {seed} / state {state} outside [0, {SEED_LIMIT})"
            ))
        })?;
        Ok(Board { grid, rng })
    }

    /// Build a board from 16 row-major exponents and a fresh generator for `seed`.
    ///
    /// ```
    /// use seeded_2048::engine::Board;
    /// let mut exps = [0u8; 16];
    /// exps[0] = 1;
    /// exps[1] = 1;
    /// let b = Board::from_exponents(&exps, 3).unwrap();
    /// assert_eq!(b.values().take(2).collect::<Vec<_>>(), vec![2, 2]);
    /// assert!(Board::from_exponents(&[16; 16], 3).is_err());
    /// ```
    pub fn from_exponents(exponents: &[u8], seed: u64) -> Result<Self, BoardError> {
        if exponents.len() != 16 {
            return Err(BoardError::MalformedEncoding(format!(
                "expected 16 exponents, got {}",
                exponents.len()
            )));
        }
        let rng = SpawnRng::new(seed).ok_or(BoardError::InvalidSeed(seed))?;
        let mut grid: BoardRaw = 0;
        for (idx, &e) in exponents.iter().enumerate() {
            if e > MAX_EXPONENT {
                return Err(BoardError::MalformedEncoding(format!(
                    "exponent {e} at cell {idx} exceeds {MAX_EXPONENT}"
                )));
            }
            grid |= (e as BoardRaw) << (60 - 4 * idx);
        }
        Ok(Board { grid, rng })
    }

    /// Serialize to the fixed-length block: packed grid, origin seed, generator state.
    pub fn to_bytes(&self) -> [u8; BLOCK_LEN] {
        let mut buf = [0u8; BLOCK_LEN];
        buf[..GRID_LEN].copy_from_slice(&self.grid.to_be_bytes());
        buf[GRID_LEN..16].copy_from_slice(&self.rng.seed().to_be_bytes());
        buf[16..24].copy_from_slice(&self.rng.state().to_be_bytes());
        buf
    }

    /// The seed this board's game was started from.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// The packed grid (cell 0 in the high nibble).
    #[inline]
    pub fn raw(&self) -> BoardRaw {
        self.grid
    }

    /// Resolve all four directions from this board.
    ///
    /// ```
    /// use seeded_2048::engine::Board;
    /// let b = Board::from_seed(290797).unwrap();
    /// let moves = b.moves();
    /// assert_ne!(moves.down, b);
    /// ```
    pub fn moves(&self) -> MoveSet {
        MoveSet {
            up: self.apply(Direction::Up),
            down: self.apply(Direction::Down),
            left: self.apply(Direction::Left),
            right: self.apply(Direction::Right),
        }
    }

    /// Slide/merge toward `direction`, then spawn one tile if anything moved.
    /// A no-op returns `self` unchanged, generator included.
    pub fn apply(&self, direction: Direction) -> Board {
        let shifted = ops::shift(self.grid, direction);
        if shifted == self.grid {
            return *self;
        }
        Board {
            grid: shifted,
            rng: self.rng,
        }
        .spawn()
    }

    /// True when no direction changes the board.
    pub fn is_stuck(&self) -> bool {
        Direction::ALL
            .iter()
            .all(|&d| ops::shift(self.grid, d) == self.grid)
    }

    /// Count the number of empty cells on the board.
    #[inline]
    pub fn count_empty(&self) -> u64 {
        ops::count_empty(self.grid)
    }

    /// Exponent at row-major index `idx` (0 for empty), or `None` past the
    /// last cell.
    ///
    /// ```
    /// use seeded_2048::engine::Board;
    /// let b = Board::from_exponents(&[3; 16], 0).unwrap();
    /// assert_eq!(b.tile(15), Some(3));
    /// assert_eq!(b.tile(16), None);
    /// ```
    #[inline]
    pub fn tile(&self, idx: usize) -> Option<u8> {
        (idx < 16).then(|| ops::get_tile(self.grid, idx))
    }

    /// Iterate over tile exponents in row-major order.
    #[inline]
    pub fn tiles(&self) -> TilesIter {
        TilesIter {
            raw: self.grid,
            idx: 0,
        }
    }

    /// Iterate over tile values (0 or 2^exponent) in row-major order.
    /// Boards are `Copy`, so this can be called as often as needed.
    #[inline]
    pub fn values(&self) -> ValuesIter {
        ValuesIter(self.tiles())
    }

    /// Collect tile exponents into a fixed array.
    pub fn exponents(&self) -> [u8; 16] {
        let mut out = [0u8; 16];
        for (dst, e) in out.iter_mut().zip(self.tiles()) {
            *dst = e;
        }
        out
    }

    /// Highest tile value on the board (0 for an empty board).
    pub fn highest_tile(&self) -> u16 {
        self.values().max().unwrap_or(0)
    }

    fn spawn(self) -> Board {
        let free = self.count_empty();
        if free == 0 {
            return self;
        }
        let mut rng = self.rng;
        let slot = rng.next_slot(free);
        let tile = rng.next_tile();
        Board {
            grid: ops::place_tile(self.grid, slot, tile),
            rng,
        }
    }
}

#[inline]
fn read_u64_be(block: &[u8; BLOCK_LEN], off: usize) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&block[off..off + 8]);
    u64::from_be_bytes(buf)
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.grid == other.grid
    }
}

impl Eq for Board {}

impl Hash for Board {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.grid.hash(state);
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Board({:#018x}, seed={}, state={})",
            self.grid,
            self.rng.seed(),
            self.rng.state()
        )
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<String> = self.tiles().map(ops::format_val).collect();
        for row in cells.chunks(4) {
            writeln!(f, "{}", row.join("|"))?;
        }
        Ok(())
    }
}

impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.to_bytes())
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes: Vec<u8> = block_visitor::deserialize(deserializer)?;
        Board::from_data(&bytes).map_err(serde::de::Error::custom)
    }
}

mod block_visitor {
    use serde::de::{self, SeqAccess, Visitor};
    use serde::Deserializer;
    use std::fmt;

    struct BytesVisitor;

    impl<'de> Visitor<'de> for BytesVisitor {
        type Value = Vec<u8>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a board byte block")
        }

        fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Vec<u8>, E> {
            Ok(v.to_vec())
        }

        fn visit_byte_buf<E: de::Error>(self, v: Vec<u8>) -> Result<Vec<u8>, E> {
            Ok(v)
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Vec<u8>, A::Error> {
            let mut out = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(b) = seq.next_element::<u8>()? {
                out.push(b);
            }
            Ok(out)
        }
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        d.deserialize_bytes(BytesVisitor)
    }
}

/// The four boards reachable from one parent in a single ply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveSet {
    pub up: Board,
    pub down: Board,
    pub left: Board,
    pub right: Board,
}

impl MoveSet {
    #[inline]
    pub fn get(&self, direction: Direction) -> Board {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// `(direction, child)` pairs in Up, Down, Left, Right order.
    pub fn iter(&self) -> impl Iterator<Item = (Direction, Board)> + '_ {
        Direction::ALL.into_iter().map(move |d| (d, self.get(d)))
    }
}

impl fmt::Display for MoveSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (direction, board) in self.iter() {
            writeln!(f, "{direction}:")?;
            write!(f, "{board}")?;
        }
        Ok(())
    }
}

/// Iterator over board tiles (exponents) in row-major order.
#[derive(Clone, Debug)]
pub struct TilesIter {
    raw: BoardRaw,
    idx: usize,
}

impl Iterator for TilesIter {
    type Item = u8;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.idx >= 16 {
            return None;
        }
        let n = ops::get_tile(self.raw, self.idx);
        self.idx += 1;
        Some(n)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = 16 - self.idx.min(16);
        (left, Some(left))
    }
}

impl ExactSizeIterator for TilesIter {}

/// Iterator over board tile values in row-major order.
#[derive(Clone, Debug)]
pub struct ValuesIter(TilesIter);

impl Iterator for ValuesIter {
    type Item = u16;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(ops::tile_value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl ExactSizeIterator for ValuesIter {}

impl IntoIterator for Board {
    type Item = u16;
    type IntoIter = ValuesIter;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.values()
    }
}

impl IntoIterator for &Board {
    type Item = u16;
    type IntoIter = ValuesIter;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.values()
    }
}

/// Fill `out` with 16 row-major exponents per board.
///
/// - `out` must be length = `boards.len() * 16`.
/// - If `parallel` is true, uses Rayon to parallelize across cores.
///
/// ```
/// use seeded_2048::engine::{Board, exponents_into};
/// let boards = [Board::from_seed(1).unwrap(), Board::from_seed(2).unwrap()];
/// let mut out = vec![0u8; boards.len() * 16];
/// exponents_into(&mut out, &boards, false);
/// assert_eq!(&out[..16], &boards[0].exponents());
/// ```
pub fn exponents_into(out: &mut [u8], boards: &[Board], parallel: bool) {
    assert_eq!(
        out.len(),
        boards.len() * 16,
        "out buffer must be N*16 bytes"
    );
    if parallel {
        use rayon::prelude::*;
        out.par_chunks_mut(16)
            .zip(boards.par_iter())
            .for_each(|(dst, b)| dst.copy_from_slice(&b.exponents()));
    } else {
        for (dst, b) in out.chunks_mut(16).zip(boards) {
            dst.copy_from_slice(&b.exponents());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    fn board(exponents: [u8; 16]) -> Board {
        Board::from_exponents(&exponents, 5).unwrap()
    }

    #[test]
    fn seeded_fixtures() {
        let b = Board::from_seed(0).unwrap();
        assert_eq!(b.raw(), 0x0000_0000_2000_0010);
        assert_eq!(b.rng.state(), 2_868_466_484);

        let b = Board::from_seed(290_797).unwrap();
        assert_eq!(hex(&b.to_bytes()), "00000010001000000000000000046fed00000000ea809371");

        let b = Board::from_seed(SEED_LIMIT - 1).unwrap();
        assert_eq!(b.raw(), 0x1000_0100_0000_0000);
    }

    #[test]
    fn regression_290797_moves() {
        let b = Board::from_seed(290_797).unwrap();
        let moves = b.moves();
        assert_eq!(moves.up.raw(), 0x0020_0000_0000_0100);
        assert_eq!(moves.down.raw(), 0x0000_0000_0000_1020);
        assert_eq!(moves.left.raw(), 0x0000_1000_1000_0010);
        assert_eq!(moves.right.raw(), 0x0000_0001_0001_0010);
        assert_eq!(moves.down.seed(), 290_797);
        assert_eq!(
            hex(&moves.down.to_bytes()),
            "00000000000010200000000000046fed00000000b2e61acb"
        );
        for (_, child) in moves.iter() {
            assert_eq!(child.rng.state(), 3_001_424_587);
        }
    }

    #[test]
    fn invalid_seed() {
        assert_eq!(
            Board::from_seed(SEED_LIMIT),
            Err(BoardError::InvalidSeed(SEED_LIMIT))
        );
        assert!(matches!(
            Board::from_exponents(&[0; 16], u64::MAX),
            Err(BoardError::InvalidSeed(_))
        ));
    }

    #[test]
    fn seed_round_trip() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let seed = rng.gen_range(0..SEED_LIMIT);
            assert_eq!(Board::from_seed(seed).unwrap().seed(), seed);
        }
        assert_eq!(Board::from_seed(0).unwrap().seed(), 0);
    }

    #[test]
    fn data_round_trip() {
        let b = Board::from_seed(123).unwrap().moves().left;
        let bytes = b.to_bytes();
        let c = Board::from_data(&bytes).unwrap();
        assert_eq!(c, b);
        assert_eq!(c.to_bytes(), bytes);
        assert_eq!(c.seed(), 123);
        // The rebuilt board continues the same spawn sequence.
        assert_eq!(c.moves().up.to_bytes(), b.moves().up.to_bytes());
    }

    #[test]
    fn arbitrary_blocks_round_trip() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..1000 {
            let grid: u64 = rng.gen();
            let seed = rng.gen_range(0..SEED_LIMIT);
            let state = rng.gen_range(0..SEED_LIMIT);
            let mut block = [0u8; BLOCK_LEN];
            block[..GRID_LEN].copy_from_slice(&grid.to_be_bytes());
            block[GRID_LEN..16].copy_from_slice(&seed.to_be_bytes());
            block[16..].copy_from_slice(&state.to_be_bytes());
            let b = Board::from_data(&block).unwrap();
            assert_eq!(b.to_bytes(), block);
            assert_eq!(b.raw(), grid);
            assert_eq!(b.seed(), seed);
        }
    }

    #[test]
    fn tile_bounds() {
        let b = board([1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 0]);
        assert_eq!(b.tile(0), Some(1));
        assert_eq!(b.tile(14), Some(15));
        assert_eq!(b.tile(15), Some(0));
        assert_eq!(b.tile(16), None);
        assert_eq!(b.tile(usize::MAX), None);
    }

    #[test]
    fn malformed_blocks() {
        let bytes = Board::from_seed(9).unwrap().to_bytes();
        assert!(matches!(
            Board::from_data(&bytes[..GRID_LEN]),
            Err(BoardError::MalformedEncoding(_))
        ));
        let mut long = bytes.to_vec();
        long.push(0);
        assert!(Board::from_data(&long).is_err());

        let mut bad_state = bytes;
        bad_state[16] = 1;
        assert!(matches!(
            Board::from_data(&bad_state),
            Err(BoardError::MalformedEncoding(_))
        ));
        let mut bad_seed = bytes;
        bad_seed[11] = 1;
        assert!(Board::from_data(&bad_seed).is_err());
    }

    #[test]
    fn from_exponents_validates() {
        assert!(matches!(
            Board::from_exponents(&[1; 15], 0),
            Err(BoardError::MalformedEncoding(_))
        ));
        let mut exps = [0u8; 16];
        exps[7] = 16;
        assert!(matches!(
            Board::from_exponents(&exps, 0),
            Err(BoardError::MalformedEncoding(_))
        ));
        exps[7] = 15;
        assert_eq!(Board::from_exponents(&exps, 0).unwrap().exponents(), exps);
    }

    #[test]
    fn merges_once_per_pair() {
        let b = board([1, 1, 2, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        let left = b.apply(Direction::Left);
        assert_eq!(left.raw(), 0x2301_0000_0000_0000);
        // [4, 8] after the merge; the spawn takes the first empty cell
        assert_eq!(left.values().take(4).collect::<Vec<_>>(), vec![4, 8, 0, 2]);

        let b = board([1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        let left = b.apply(Direction::Left);
        assert_eq!(ops::shift(b.raw(), Direction::Left), 0x2200_0000_0000_0000);
        assert_eq!(&left.exponents()[..2], &[2, 2]);
    }

    #[test]
    fn no_op_keeps_generator() {
        let b = board([1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        let moves = b.moves();
        assert_eq!(moves.left.to_bytes(), b.to_bytes());
        assert_eq!(moves.up.to_bytes(), b.to_bytes());
        assert_ne!(moves.right, b);
        assert_ne!(moves.down, b);
    }

    #[test]
    fn stuck_board_is_total() {
        let b = board([1, 2, 1, 2, 2, 1, 2, 1, 1, 2, 1, 2, 2, 1, 2, 1]);
        assert!(b.is_stuck());
        let moves = b.moves();
        for (_, child) in moves.iter() {
            assert_eq!(child, b);
            assert_eq!(child.to_bytes(), b.to_bytes());
        }
        assert!(!Board::from_seed(1).unwrap().is_stuck());
    }

    #[test]
    fn equality_ignores_generator() {
        let exps = [0, 1, 0, 0, 2, 0, 0, 0, 0, 0, 3, 0, 0, 0, 0, 0];
        let a = Board::from_exponents(&exps, 5).unwrap();
        let b = Board::from_exponents(&exps, 9).unwrap();
        assert_eq!(a, b);
        assert_ne!(a.to_bytes(), b.to_bytes());
        assert_eq!(a.to_bytes()[..GRID_LEN], b.to_bytes()[..GRID_LEN]);
    }

    #[test]
    fn children_add_exactly_one_tile() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let mut b = Board::from_seed(rng.gen_range(0..SEED_LIMIT)).unwrap();
            for _ in 0..200 {
                let moves = b.moves();
                for (d, child) in moves.iter() {
                    let shifted = ops::shift(b.raw(), d);
                    if shifted == b.raw() {
                        assert_eq!(child.to_bytes(), b.to_bytes());
                        continue;
                    }
                    assert_ne!(child.rng, b.rng);
                    let new_cells: Vec<usize> = (0..16)
                        .filter(|&i| Some(ops::get_tile(shifted, i)) != child.tile(i))
                        .collect();
                    assert_eq!(new_cells.len(), 1);
                    let i = new_cells[0];
                    assert_eq!(ops::get_tile(shifted, i), 0);
                    assert!(matches!(child.tile(i), Some(1 | 2)));
                }
                if b.is_stuck() {
                    break;
                }
                let d = Direction::ALL[rng.gen_range(0..4)];
                b = moves.get(d);
            }
        }
    }

    #[test]
    fn values_are_restartable() {
        let exps: Vec<u8> = (0..16).collect();
        let b = Board::from_exponents(&exps, 0).unwrap();
        let first: Vec<u16> = b.values().collect();
        let second: Vec<u16> = (&b).into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(first[0], 0);
        assert_eq!(first[1], 2);
        assert_eq!(first[11], 2048);
        assert_eq!(first[15], 32768);
        assert_eq!(b.values().len(), 16);
        assert_eq!(b.highest_tile(), 32768);
    }

    #[test]
    fn display_is_a_grid() {
        let b = board([1, 0, 0, 0, 0, 11, 0, 0, 0, 0, 0, 0, 0, 0, 0, 15]);
        let text = b.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        for line in &lines {
            assert_eq!(line.len(), 4 * 7 + 3);
            assert_eq!(line.matches('|').count(), 3);
        }
        assert!(lines[1].contains("2048"));
        assert!(lines[3].contains("32768"));

        let moves = b.moves().to_string();
        assert!(moves.starts_with("UP:\n"));
        assert!(moves.contains("RIGHT:\n"));
    }

    #[test]
    fn direction_codes() {
        for d in Direction::ALL {
            assert_eq!(Direction::from_code(d.code()), Some(d));
        }
        assert_eq!(Direction::from_code(4), None);
    }

    #[test]
    fn serde_uses_the_block() {
        let b = Board::from_seed(77).unwrap().moves().up;
        let bytes = postcard::to_allocvec(&b).unwrap();
        let c: Board = postcard::from_bytes(&bytes).unwrap();
        assert_eq!(c.to_bytes(), b.to_bytes());
    }

    #[test]
    fn serde_directions() {
        let bytes = postcard::to_allocvec(&Direction::ALL).unwrap();
        let back: [Direction; 4] = postcard::from_bytes(&bytes).unwrap();
        assert_eq!(back, Direction::ALL);
        let played = vec![Direction::Left, Direction::Left, Direction::Down];
        let bytes = postcard::to_allocvec(&played).unwrap();
        assert_eq!(postcard::from_bytes::<Vec<Direction>>(&bytes).unwrap(), played);
    }

    #[test]
    fn batch_exponents() {
        let boards: Vec<Board> = (0..64).map(|s| Board::from_seed(s).unwrap()).collect();
        let mut seq = vec![0u8; boards.len() * 16];
        let mut par = vec![0u8; boards.len() * 16];
        exponents_into(&mut seq, &boards, false);
        exponents_into(&mut par, &boards, true);
        assert_eq!(seq, par);
        assert_eq!(&seq[16..32], &boards[1].exponents());
    }
}
