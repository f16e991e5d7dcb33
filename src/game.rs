//! Interactive game between a human and the engine.
//!
//! [`Game`] holds the live board and whose turn it is, validates human moves
//! before touching the board, and asks the [`Engine`] for the AI's replies.
//! [`Game::run`] drives a full session over any reader/writer pair, so the
//! console front end and the tests share the same loop.
//!
//! ## Example
//!
//! ```
//! use mcts_four::board::{Move, Status};
//! use mcts_four::config::Config;
//! use mcts_four::game::Game;
//!
//! let mut config = Config::default();
//! config.search.seed = Some(7);
//! let mut game = Game::new(config).unwrap();
//!
//! assert_eq!(game.play_human(Move::new(3, 2)).unwrap(), Status::InProgress);
//! let decision = game.play_ai().unwrap();
//! println!("AI played {}", decision.best);
//! ```

use std::io::{BufRead, Write};

use anyhow::Context;
use log::debug;

use crate::board::{Board, Move, Side, Status};
use crate::config::Config;
use crate::error::{GameError, Result};
use crate::mcts::{Decision, Engine, dump_stats};

pub struct Game {
    board: Board,
    to_move: Side,
    config: Config,
    engine: Engine,
}

impl Game {
    /// Start a game on an empty board.
    pub fn new(config: Config) -> Result<Self> {
        let engine = Engine::new(config.geometry.win_length, &config.search);
        Self::with_engine(config, engine)
    }

    /// Start a game with a caller-supplied engine.
    pub fn with_engine(config: Config, engine: Engine) -> Result<Self> {
        config.validate()?;
        let board = Board::new(config.geometry.rows, config.geometry.cols);
        let to_move = if config.ai_first { Side::Ai } else { Side::Human };
        Ok(Self {
            board,
            to_move,
            config,
            engine,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Side {
        self.to_move
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn status(&self) -> Status {
        self.board.status(self.config.geometry.win_length)
    }

    fn check_turn(&self, side: Side) -> Result<()> {
        if self.status().is_over() {
            return Err(GameError::GameOver);
        }
        if self.to_move != side {
            return Err(GameError::OutOfTurn {
                expected: self.to_move,
            });
        }
        Ok(())
    }

    /// Apply the human's move and return the resulting status.
    pub fn play_human(&mut self, mv: Move) -> Result<Status> {
        self.check_turn(Side::Human)?;
        self.board.apply(mv, Side::Human)?;
        debug!("human played {mv}");
        self.to_move = Side::Ai;
        Ok(self.status())
    }

    /// Let the engine choose and apply the AI's move.
    pub fn play_ai(&mut self) -> Result<Decision> {
        self.check_turn(Side::Ai)?;
        let decision = self
            .engine
            .decide(&self.board, self.config.search.simulations)?;
        self.board.apply(decision.best, Side::Ai)?;
        self.to_move = Side::Human;
        Ok(decision)
    }

    /// Play a whole game, reading the human's moves from `input` and writing
    /// boards, search statistics and the result to `output`.
    ///
    /// Returns the final status, or `InProgress` if `input` ran out first.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        mut input: R,
        mut output: W,
    ) -> anyhow::Result<Status> {
        write!(output, "{}", self.board)?;
        writeln!(output)?;

        loop {
            let status = self.status();
            if status.is_over() {
                writeln!(output, "{}", result_message(status))?;
                return Ok(status);
            }

            match self.to_move {
                Side::Human => {
                    let Some(mv) = read_move(&mut input, &mut output)? else {
                        return Ok(Status::InProgress);
                    };
                    if let Err(err) = self.play_human(mv) {
                        writeln!(output, "{err}")?;
                        continue;
                    }
                }
                Side::Ai => {
                    let decision = self.play_ai().context("engine failed to choose a move")?;
                    dump_stats(&mut output, &decision)?;
                }
            }
            write!(output, "{}", self.board)?;
            writeln!(output)?;
        }
    }
}

fn result_message(status: Status) -> &'static str {
    match status {
        Status::Won(Side::Human) => "You win!",
        Status::Won(Side::Ai) => "AI wins!",
        Status::Draw => "Draw!",
        Status::InProgress => "",
    }
}

/// Prompt for a row and a column. `None` at end of input.
fn read_move<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<Option<Move>> {
    let Some(row) = read_coord(input, output, "Row: ")? else {
        return Ok(None);
    };
    let Some(col) = read_coord(input, output, "Col: ")? else {
        return Ok(None);
    };
    Ok(Some(Move::new(row, col)))
}

fn read_coord<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> anyhow::Result<Option<usize>> {
    loop {
        write!(output, "{prompt}")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line).context("failed to read move")? == 0 {
            return Ok(None);
        }
        match line.trim().parse::<usize>() {
            Ok(value) => return Ok(Some(value)),
            Err(_) => writeln!(output, "Please enter a non-negative number.")?,
        }
    }
}
