//! Fixed-priority rollouts used by the CLI and tests.
//!
//! No search and no learning: at each ply the first direction (in
//! [`GREEDY_ORDER`]) that changes the board is played.

use crate::engine::{Board, BoardError, Direction};
use crate::trace::Trace;

/// Preference order for [`play_greedy`].
pub const GREEDY_ORDER: [Direction; 4] = [
    Direction::Up,
    Direction::Left,
    Direction::Right,
    Direction::Down,
];

/// First legal direction from `board` in [`GREEDY_ORDER`], with its child.
pub fn next_greedy(board: &Board) -> Option<(Direction, Board)> {
    let moves = board.moves();
    GREEDY_ORDER
        .iter()
        .map(|&d| (d, moves.get(d)))
        .find(|(_, child)| child != board)
}

/// Play from `seed` until stuck or `max_steps` moves have been made.
///
/// ```
/// use seeded_2048::rollout::play_greedy;
/// let a = play_greedy(290797, Some(25)).unwrap();
/// let b = play_greedy(290797, Some(25)).unwrap();
/// assert_eq!(a.moves, b.moves);
/// assert!(a.steps() <= 25);
/// ```
pub fn play_greedy(seed: u64, max_steps: Option<usize>) -> Result<Trace, BoardError> {
    let mut board = Board::from_seed(seed)?;
    let mut moves = Vec::new();
    while max_steps.map_or(true, |cap| moves.len() < cap) {
        match next_greedy(&board) {
            Some((direction, child)) => {
                moves.push(direction);
                board = child;
            }
            None => break,
        }
    }
    Ok(Trace {
        seed,
        moves,
        final_board: board,
    })
}
