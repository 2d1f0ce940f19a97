//! Hot board ops: line tables, transpose, slide/merge and spawn placement.

use std::sync::OnceLock;

use super::state::{BoardRaw, Direction, Line, Tile, MAX_EXPONENT};

const LINE_TABLE_SIZE: usize = 0x1_0000; // 65,536 possible 16-bit lines

struct Stores {
    shift_left: Box<[Line]>,
    shift_right: Box<[Line]>,
}

static STORES: OnceLock<Stores> = OnceLock::new();

#[inline(always)]
fn stores() -> &'static Stores {
    STORES.get_or_init(create_stores)
}

/// Build the line tables now instead of on the first move.
pub(crate) fn warm() {
    stores();
}

fn create_stores() -> Stores {
    // Allocate on the heap to avoid large stack frames
    let mut shift_left = vec![0 as Line; LINE_TABLE_SIZE];
    let mut shift_right = vec![0 as Line; LINE_TABLE_SIZE];
    for val in 0..LINE_TABLE_SIZE {
        let tiles = line_to_tiles(val as Line);
        shift_left[val] = tiles_to_line(merge_left(tiles));
        shift_right[val] = tiles_to_line(merge_right(tiles));
    }
    Stores {
        shift_left: shift_left.into_boxed_slice(),
        shift_right: shift_right.into_boxed_slice(),
    }
}

/// Slide and merge every row or column of `grid` toward `direction`.
pub(crate) fn shift(grid: BoardRaw, direction: Direction) -> BoardRaw {
    let s = stores();
    match direction {
        Direction::Left => shift_rows(grid, &s.shift_left),
        Direction::Right => shift_rows(grid, &s.shift_right),
        Direction::Up => transpose(shift_rows(transpose(grid), &s.shift_left)),
        Direction::Down => transpose(shift_rows(transpose(grid), &s.shift_right)),
    }
}

fn shift_rows(grid: BoardRaw, table: &[Line]) -> BoardRaw {
    (0..4).fold(0, |acc, row_idx| {
        let row = extract_line(grid, row_idx);
        acc | ((table[row as usize] as BoardRaw) << ((3 - row_idx) * 16))
    })
}

// Credit to Nneonneo
pub(crate) fn transpose(x: BoardRaw) -> BoardRaw {
    let a1 = x & 0xF0F00F0FF0F00F0F;
    let a2 = x & 0x0000F0F00000F0F0;
    let a3 = x & 0x0F0F00000F0F0000;
    let a = a1 | (a2 << 12) | (a3 >> 12);
    let b1 = a & 0xFF00FF0000FF00FF;
    let b2 = a & 0x00FF00FF00000000;
    let b3 = a & 0x00000000FF00FF00;
    b1 | (b2 >> 24) | (b3 << 24)
}

#[inline]
pub(crate) fn extract_line(grid: BoardRaw, line_idx: u32) -> Line {
    ((grid >> ((3 - line_idx) * 16)) & 0xffff) as Line
}

fn line_to_tiles(line: Line) -> [Tile; 4] {
    [
        (line >> 12) & 0xf,
        (line >> 8) & 0xf,
        (line >> 4) & 0xf,
        line & 0xf,
    ]
    .map(|t| t as Tile)
}

fn tiles_to_line(tiles: [Tile; 4]) -> Line {
    tiles.iter().fold(0, |line, &t| (line << 4) | Line::from(t))
}

/// Compact a line toward index 0, then merge equal neighbours once each.
///
/// A tile produced by a merge is never merged again in the same move, so
/// `[1, 1, 1, 1]` becomes `[2, 2, 0, 0]`. Merged exponents saturate at 15.
pub(crate) fn merge_left(tiles: [Tile; 4]) -> [Tile; 4] {
    let compact: Vec<Tile> = tiles.into_iter().filter(|&t| t != 0).collect();
    let mut out = [0; 4];
    let mut len = 0;
    let mut i = 0;
    while i < compact.len() {
        if i + 1 < compact.len() && compact[i] == compact[i + 1] {
            out[len] = (compact[i] + 1).min(MAX_EXPONENT);
            i += 2;
        } else {
            out[len] = compact[i];
            i += 1;
        }
        len += 1;
    }
    out
}

pub(crate) fn merge_right(mut tiles: [Tile; 4]) -> [Tile; 4] {
    tiles.reverse();
    let mut out = merge_left(tiles);
    out.reverse();
    out
}

#[inline]
pub(crate) fn get_tile(grid: BoardRaw, idx: usize) -> Tile {
    ((grid >> (60 - 4 * idx)) & 0xf) as Tile
}

// https://stackoverflow.com/questions/38225571/count-number-of-zero-nibbles-in-an-unsigned-64-bit-integer
pub(crate) fn count_empty(grid: BoardRaw) -> u64 {
    let mut x = grid;
    x |= x >> 1;
    x |= x >> 2;
    x &= 0x1111111111111111;
    16 - x.count_ones() as u64
}

/// Set the `slot`-th empty cell (row-major) to `tile`.
pub(crate) fn place_tile(grid: BoardRaw, mut slot: u64, tile: Tile) -> BoardRaw {
    for idx in 0..16 {
        if get_tile(grid, idx) != 0 {
            continue;
        }
        if slot == 0 {
            return grid | ((tile as BoardRaw) << (60 - 4 * idx));
        }
        slot -= 1;
    }
    debug_assert!(false, "no empty cell left for slot");
    grid
}

/// Magnitude of a tile exponent: 0 for empty, else 2^exponent.
#[inline]
pub(crate) fn tile_value(exponent: Tile) -> u16 {
    if exponent == 0 {
        0
    } else {
        1 << exponent
    }
}

pub(crate) fn format_val(exponent: Tile) -> String {
    format!("{:^7}", tile_value(exponent))
}
