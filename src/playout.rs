//! Random playouts (rollouts).
//!
//! A playout copies the board and plays uniformly random moves for
//! alternating sides until one side has a line or the board is full. Each
//! step fills one cell, so a playout always terminates.

use crate::board::{Board, Side};

/// Terminal result of a playout.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win(Side),
    Draw,
}

/// Play `board` out at random with `to_move` acting first.
///
/// The AI line is checked before the human line on every step, matching the
/// order the search relies on. The caller's board is never modified.
pub fn simulate(
    board: &Board,
    to_move: Side,
    win_length: usize,
    rng: &mut fastrand::Rng,
) -> Outcome {
    let mut board = board.clone();
    let mut current = to_move;

    loop {
        if board.has_line(Side::Ai, win_length) {
            return Outcome::Win(Side::Ai);
        }
        if board.has_line(Side::Human, win_length) {
            return Outcome::Win(Side::Human);
        }

        let moves = board.available_moves();
        if moves.is_empty() {
            return Outcome::Draw;
        }

        let mv = moves[rng.usize(..moves.len())];
        board.place(mv, current);
        current = current.opponent();
    }
}
