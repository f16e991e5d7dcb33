//! Default game geometry, search parameters, and cell markers.
//!
//! Nothing in the engine reads these directly: they seed [`crate::config`]
//! and the command-line defaults, and every operation receives its geometry
//! and search parameters explicitly.

// =============================================================================
// Board Geometry
// =============================================================================

/// Default number of rows.
pub const ROWS: usize = 4;

/// Default number of columns.
pub const COLS: usize = 5;

/// Default number of aligned marks needed to win.
pub const WIN_LENGTH: usize = 4;

// =============================================================================
// MCTS Parameters
// =============================================================================

/// Default number of simulations per decision.
pub const N_SIMS: usize = 200;

/// Smallest budget that can yield a move: the root expands on its second visit.
pub const MIN_SIMULATIONS: usize = 2;

/// Default UCB1 exploration constant.
pub const EXPLORATION: f64 = 1.4;

// =============================================================================
// Cell Markers (console rendering)
// =============================================================================

/// Empty cell.
pub const EMPTY: char = '.';

/// Cell held by the human player.
pub const HUMAN: char = 'X';

/// Cell held by the engine.
pub const AI: char = 'O';
