//! seeded-2048: a deterministic 2048 board engine
//!
//! This crate provides:
//! - A compact, immutable `Board` that carries its own seeded spawn generator
//!   (`from_seed`, `from_data`, `to_bytes`, `moves`, `values`, ...)
//! - `MoveSet`: the four boards one ply away, with no-op directions equal
//!   to the parent
//! - A binary trace format for seeded games (`trace` module)
//! - Fixed-priority rollouts for diagnostics (`rollout` module)
//!
//! Quick start:
//! ```
//! use seeded_2048::engine::Board;
//!
//! let board = Board::from_seed(290797).unwrap();
//! let moves = board.moves();
//! for (direction, child) in moves.iter() {
//!     if child == board {
//!         println!("{direction} is a no-op");
//!     }
//! }
//! let features: Vec<u16> = moves.down.values().collect();
//! assert_eq!(features.len(), 16);
//! assert_eq!(moves.down.seed(), 290797);
//!
//! // Boards round-trip through their byte block, generator included.
//! let restored = Board::from_data(&moves.down.to_bytes()).unwrap();
//! assert_eq!(restored.to_bytes(), moves.down.to_bytes());
//! ```
//!
//! Every operation is a pure function of its inputs. Boards are `Copy` and
//! hold no shared state, so they can be moved freely across threads.
pub mod engine;
pub mod rollout;
pub mod trace;
