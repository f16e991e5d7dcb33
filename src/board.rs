//! Grid state, legal moves, and line detection.
//!
//! The board is a plain `rows x cols` grid stored row-major. It is a value
//! type: cloning it yields an independent snapshot, which is how every search
//! node and every rollout gets its own copy.

use std::fmt;

use crate::constants::{AI, EMPTY, HUMAN};
use crate::error::{GameError, Result};

/// One of the two players.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Human,
    Ai,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Human => Side::Ai,
            Side::Ai => Side::Human,
        }
    }

    fn marker(self) -> char {
        match self {
            Side::Human => HUMAN,
            Side::Ai => AI,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Human => write!(f, "human"),
            Side::Ai => write!(f, "AI"),
        }
    }
}

/// Contents of a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Taken(Side),
}

/// A `(row, col)` coordinate into the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Outcome of a position.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    InProgress,
    Won(Side),
    Draw,
}

impl Status {
    pub fn is_over(self) -> bool {
        self != Status::InProgress
    }
}

/// Line directions as (row step, col step): horizontal, vertical,
/// down-right diagonal, down-left diagonal.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty `rows x cols` board.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn idx(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Cell at `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.cells[self.idx(row, col)])
    }

    /// All empty cells in row-major order.
    pub fn available_moves(&self) -> Vec<Move> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Empty)
            .map(|(i, _)| Move::new(i / self.cols, i % self.cols))
            .collect()
    }

    /// Place `side`'s marker at `mv`.
    ///
    /// Rejects moves outside the grid or onto a taken cell without touching
    /// the board.
    pub fn apply(&mut self, mv: Move, side: Side) -> Result<()> {
        match self.get(mv.row, mv.col) {
            None => Err(GameError::OutOfBounds {
                row: mv.row,
                col: mv.col,
                rows: self.rows,
                cols: self.cols,
            }),
            Some(Cell::Taken(_)) => Err(GameError::Occupied {
                row: mv.row,
                col: mv.col,
            }),
            Some(Cell::Empty) => {
                let i = self.idx(mv.row, mv.col);
                self.cells[i] = Cell::Taken(side);
                Ok(())
            }
        }
    }

    /// Place a move already known to be legal (taken from `available_moves`).
    pub(crate) fn place(&mut self, mv: Move, side: Side) {
        let i = self.idx(mv.row, mv.col);
        debug_assert_eq!(self.cells[i], Cell::Empty, "move {mv} is not available");
        self.cells[i] = Cell::Taken(side);
    }

    /// Copy of this board with a legal move applied.
    pub(crate) fn with_move(&self, mv: Move, side: Side) -> Board {
        let mut next = self.clone();
        next.place(mv, side);
        next
    }

    /// Whether `side` holds `length` consecutive cells horizontally,
    /// vertically or along either diagonal.
    pub fn has_line(&self, side: Side, length: usize) -> bool {
        // A run longer than both sides cannot fit; this also keeps the
        // isize arithmetic below in range.
        if length == 0 || length > self.rows.max(self.cols) {
            return false;
        }
        let target = Cell::Taken(side);
        let span = (length - 1) as isize;

        for row in 0..self.rows {
            for col in 0..self.cols {
                if self.cells[self.idx(row, col)] != target {
                    continue;
                }
                for (dr, dc) in DIRECTIONS {
                    // Check that the far end of the run is inside the grid
                    let end_row = row as isize + dr * span;
                    let end_col = col as isize + dc * span;
                    if end_row >= self.rows as isize
                        || end_col < 0
                        || end_col >= self.cols as isize
                    {
                        continue;
                    }
                    let run = (1..length as isize).all(|k| {
                        let r = (row as isize + dr * k) as usize;
                        let c = (col as isize + dc * k) as usize;
                        self.cells[self.idx(r, c)] == target
                    });
                    if run {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// True when no empty cell remains.
    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Game status for a given run length. A human line is reported before
    /// an AI line; a full board without a line is a draw.
    pub fn status(&self, win_length: usize) -> Status {
        if self.has_line(Side::Human, win_length) {
            Status::Won(Side::Human)
        } else if self.has_line(Side::Ai, win_length) {
            Status::Won(Side::Ai)
        } else if self.is_full() {
            Status::Draw
        } else {
            Status::InProgress
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let ch = match self.cells[self.idx(row, col)] {
                    Cell::Empty => EMPTY,
                    Cell::Taken(side) => side.marker(),
                };
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
