//! Explicit configuration for the board geometry and the search.
//!
//! Every board and engine operation takes its parameters from these values
//! rather than from compiled-in constants, so several geometries can coexist
//! in one process (and in one test binary).

use crate::constants::{COLS, EXPLORATION, MIN_SIMULATIONS, N_SIMS, ROWS, WIN_LENGTH};
use crate::error::{GameError, Result};

/// Grid dimensions and the run length required to win.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub rows: usize,
    pub cols: usize,
    pub win_length: usize,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            rows: ROWS,
            cols: COLS,
            win_length: WIN_LENGTH,
        }
    }
}

impl Geometry {
    pub fn new(rows: usize, cols: usize, win_length: usize) -> Self {
        Self {
            rows,
            cols,
            win_length,
        }
    }

    /// Check that every dimension is at least one.
    ///
    /// A `win_length` longer than both sides is accepted: no line can form and
    /// every game ends in a draw.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GameError::InvalidConfig(format!(
                "grid must have at least one row and one column (got {}x{})",
                self.rows, self.cols
            )));
        }
        if self.win_length == 0 {
            return Err(GameError::InvalidConfig(
                "win length must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parameters for a single MCTS decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    /// Number of select/expand/simulate/backpropagate cycles per decision.
    pub simulations: usize,
    /// UCB1 exploration constant.
    pub exploration: f64,
    /// Seed for rollouts and random child choice; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            simulations: N_SIMS,
            exploration: EXPLORATION,
            seed: None,
        }
    }
}

impl SearchConfig {
    /// The root is only expanded on its second visit, so fewer than
    /// [`MIN_SIMULATIONS`] simulations can never produce a move.
    pub fn validate(&self) -> Result<()> {
        if self.simulations < MIN_SIMULATIONS {
            return Err(GameError::InvalidConfig(format!(
                "at least {MIN_SIMULATIONS} simulations are needed to choose a move (got {})",
                self.simulations
            )));
        }
        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(GameError::InvalidConfig(format!(
                "exploration constant must be finite and non-negative (got {})",
                self.exploration
            )));
        }
        Ok(())
    }
}

/// Full configuration of an interactive game.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Config {
    pub geometry: Geometry,
    pub search: SearchConfig,
    /// Let the engine make the opening move.
    pub ai_first: bool,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        self.geometry.validate()?;
        self.search.validate()
    }
}
