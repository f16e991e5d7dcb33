//! MCTS-Four: a connect-four style game against a Monte Carlo Tree Search
//! opponent.
//!
//! Players alternately claim any empty cell of a rectangular grid; the first
//! to hold a run of the configured length horizontally, vertically or
//! diagonally wins.
//!
//! ## Modules
//!
//! - [`constants`] - Default geometry, search parameters and markers
//! - [`config`] - Explicit geometry and search configuration
//! - [`board`] - Grid state, legal moves, line detection
//! - [`ucb`] - UCB1 selection score
//! - [`tree`] - Arena search tree: selection, expansion, backpropagation
//! - [`playout`] - Uniform random rollouts
//! - [`mcts`] - The search engine and its decision statistics
//! - [`game`] - Interactive human vs engine session
//! - [`logging`] - Logger setup for the binary
//!
//! ## Example
//!
//! ```
//! use mcts_four::board::{Board, Move, Side};
//! use mcts_four::mcts::Engine;
//!
//! let mut board = Board::new(4, 5);
//! board.apply(Move::new(3, 2), Side::Human).unwrap();
//!
//! let mut engine = Engine::with_rng(4, 1.4, fastrand::Rng::with_seed(1));
//! let decision = engine.decide(&board, 200).unwrap();
//! println!("Best move: {}", decision.best);
//! ```

pub mod board;
pub mod config;
pub mod constants;
pub mod error;
pub mod game;
pub mod logging;
pub mod mcts;
pub mod playout;
pub mod tree;
pub mod ucb;

pub use error::{GameError, Result};
