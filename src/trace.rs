//! Binary trace files for seeded games.
//!
//! A game is fully determined by its seed and the directions played, so a
//! trace stores just those plus the final board block as a checksum of the
//! whole run. Layout (little-endian integers):
//!
//! ```text
//! magic "S2T1" | version u8 | seed u64 | steps u32 | steps x direction u8
//! | final board block (24 bytes) | CRC32C of everything before it
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use log::debug;

use crate::engine::{Board, BoardError, Direction, BLOCK_LEN};

const MAGIC: &[u8; 4] = b"S2T1"; // ASCII magic
const VERSION: u8 = 1;
const HEADER_LEN: usize = 4 + 1 + 8 + 4;
const CHECKSUM_LEN: usize = 4;

/// A recorded game: seed, directions in play order, and the board it ended on.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub seed: u64,
    pub moves: Vec<Direction>,
    pub final_board: Board,
}

#[derive(thiserror::Error, Debug)]
pub enum TraceError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid magic or version")]
    MagicOrVersion,
    #[error("file too short or malformed")]
    Malformed,
    #[error("checksum mismatch")]
    Checksum,
    #[error("board error: {0}")]
    Board(#[from] BoardError),
    #[error("step {0} replays as a no-op move")]
    IllegalMove(usize),
    #[error("replayed final board does not match the recorded one")]
    ReplayMismatch,
}

impl Trace {
    /// Number of moves played.
    pub fn steps(&self) -> usize {
        self.moves.len()
    }

    /// Re-derive every board of the game from the seed.
    ///
    /// Returns `steps + 1` boards, starting with the seeded board. Fails if a
    /// recorded direction was a no-op or the last board's block (generator
    /// state included) differs from the recorded one.
    pub fn replay(&self) -> Result<Vec<Board>, TraceError> {
        let mut board = Board::from_seed(self.seed)?;
        let mut boards = Vec::with_capacity(self.moves.len() + 1);
        boards.push(board);
        for (step, &direction) in self.moves.iter().enumerate() {
            let next = board.apply(direction);
            if next == board {
                return Err(TraceError::IllegalMove(step));
            }
            board = next;
            boards.push(board);
        }
        if board.to_bytes() != self.final_board.to_bytes() {
            return Err(TraceError::ReplayMismatch);
        }
        Ok(boards)
    }
}

#[inline]
fn read_u32_le(bytes: &[u8]) -> Option<u32> {
    Some(u32::from_le_bytes(bytes.get(..4)?.try_into().ok()?))
}

#[inline]
fn read_u64_le(bytes: &[u8]) -> Option<u64> {
    Some(u64::from_le_bytes(bytes.get(..8)?.try_into().ok()?))
}

pub fn encode_trace(trace: &Trace) -> Result<Vec<u8>, TraceError> {
    let steps: u32 = trace
        .moves
        .len()
        .try_into()
        .map_err(|_| TraceError::Malformed)?;
    let mut buf = Vec::with_capacity(HEADER_LEN + trace.moves.len() + BLOCK_LEN + CHECKSUM_LEN);

    // Header
    buf.extend_from_slice(MAGIC);
    buf.push(VERSION);
    buf.extend_from_slice(&trace.seed.to_le_bytes());
    buf.extend_from_slice(&steps.to_le_bytes());

    // Payload: one byte per direction, then the final board block
    buf.extend(trace.moves.iter().map(|d| d.code()));
    buf.extend_from_slice(&trace.final_board.to_bytes());

    // Trailer: CRC32C of all preceding bytes
    let checksum = crc32c::crc32c(&buf);
    buf.extend_from_slice(&checksum.to_le_bytes());
    Ok(buf)
}

pub fn write_trace_to_path<P: AsRef<Path>>(path: P, trace: &Trace) -> Result<(), TraceError> {
    let data = encode_trace(trace)?;
    let mut f = fs::File::create(path.as_ref())?;
    f.write_all(&data)?;
    debug!(
        "wrote trace seed={} steps={} ({} bytes) to {}",
        trace.seed,
        trace.steps(),
        data.len(),
        path.as_ref().display()
    );
    Ok(())
}

pub fn parse_trace_bytes(bytes: &[u8]) -> Result<Trace, TraceError> {
    if bytes.len() < HEADER_LEN + BLOCK_LEN + CHECKSUM_LEN {
        return Err(TraceError::Malformed);
    }

    // Validate checksum first to avoid panics while reading fields
    let (content, trailer) = bytes.split_at(bytes.len() - CHECKSUM_LEN);
    let file_crc = read_u32_le(trailer).ok_or(TraceError::Malformed)?;
    if file_crc != crc32c::crc32c(content) {
        return Err(TraceError::Checksum);
    }

    if &content[..4] != MAGIC || content[4] != VERSION {
        return Err(TraceError::MagicOrVersion);
    }
    let seed = read_u64_le(&content[5..]).ok_or(TraceError::Malformed)?;
    let steps = read_u32_le(&content[13..]).ok_or(TraceError::Malformed)? as usize;

    if content.len() != HEADER_LEN + steps + BLOCK_LEN {
        return Err(TraceError::Malformed);
    }
    let (codes, block) = content[HEADER_LEN..].split_at(steps);
    let moves = codes
        .iter()
        .map(|&c| Direction::from_code(c).ok_or(TraceError::Malformed))
        .collect::<Result<Vec<_>, _>>()?;
    let final_board = Board::from_data(block)?;

    Ok(Trace {
        seed,
        moves,
        final_board,
    })
}

pub fn parse_trace_file<P: AsRef<Path>>(path: P) -> Result<Trace, TraceError> {
    let data = fs::read(path.as_ref())?;
    debug!("read {} trace bytes from {}", data.len(), path.as_ref().display());
    parse_trace_bytes(&data)
}
