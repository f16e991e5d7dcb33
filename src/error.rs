use thiserror::Error;

use crate::board::Side;

/// Errors surfaced by the board, the engine and the game session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("illegal move ({row}, {col}): outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("illegal move ({row}, {col}): cell is not empty")]
    Occupied { row: usize, col: usize },

    #[error("no available moves on this board")]
    NoAvailableMoves,

    #[error("search with {simulations} simulations produced no candidate moves")]
    NoCandidates { simulations: usize },

    #[error("the game is already over")]
    GameOver,

    #[error("it is {expected}'s turn")]
    OutOfTurn { expected: Side },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience Result type for game and search operations.
pub type Result<T> = std::result::Result<T, GameError>;
