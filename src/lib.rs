//! Agents for playing the board game 'Connect 4'
//!
//! Two interchangeable decision engines drive play: an exhaustive
//! minimax search with alpha-beta pruning, and a Monte Carlo selector that
//! scores moves by biased-random play-outs and hands small endgames back to
//! the exact search. Both are written against the [`game::Game`] trait, so
//! they work on any finite two-player zero-sum game that can enumerate
//! moves, build child states and detect a finished game.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_agents::board::{Board, Geometry, Move};
//! use connect4_agents::game::Role;
//! use connect4_agents::minimax::Minimax;
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! // a 3x3 drop game where the first player threatens a vertical run
//! let board = Board::from_moves_on(Geometry::new(3, 3, 3), "1213")?;
//! let mut agent = Minimax::new(Role::Maximizer);
//!
//! let (score, best_move) = agent.value(&board)?;
//! assert_eq!((score, best_move), (1, Some(Move { row: 0, column: 0 })));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod board;

pub mod error;

pub mod game;

pub mod minimax;

pub mod montecarlo;

pub mod rollout;


/// The width of the standard game board in cells
pub const WIDTH: usize = 7;

/// The height of the standard game board in cells
pub const HEIGHT: usize = 6;

/// The run length needed to win on the standard board
pub const WIN_LENGTH: usize = 4;

// a winning run must fit on the standard board in every scanned direction
const_assert!(WIN_LENGTH <= WIDTH && WIN_LENGTH <= HEIGHT);
