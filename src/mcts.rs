//! Monte Carlo Tree Search driver.
//!
//! Each simulation runs the four classic phases on a fresh tree:
//! - selection by UCB1 down to a leaf
//! - expansion of that leaf, but only once it has been visited before
//! - a uniform random playout from the chosen node
//! - backpropagation of the AI's result to the root
//!
//! The decision is the most visited child of the root. The tree is thrown
//! away afterwards; nothing is reused across moves.

use std::io::{self, Write};

use log::{debug, info};

use crate::board::{Board, Move, Side};
use crate::config::SearchConfig;
use crate::error::{GameError, Result};
use crate::playout::simulate;
use crate::tree::{NodeId, Tree};

/// Search statistics for one root child.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveStats {
    pub mv: Move,
    pub visits: u32,
    /// `wins / visits`, or 0 for an unvisited child
    pub win_rate: f64,
}

/// Result of a decision: the chosen move and the statistics behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub best: Move,
    /// One entry per root child, in move order
    pub stats: Vec<MoveStats>,
}

impl Decision {
    /// Statistics for the chosen move.
    pub fn best_stats(&self) -> Option<&MoveStats> {
        self.stats.iter().find(|s| s.mv == self.best)
    }
}

/// MCTS engine playing the AI side.
///
/// The random source is owned by the engine so a seeded engine replays the
/// exact same searches.
pub struct Engine {
    win_length: usize,
    exploration: f64,
    rng: fastrand::Rng,
}

impl Engine {
    /// Create an engine for boards won with `win_length` in a row, seeded
    /// from `search.seed` when present.
    pub fn new(win_length: usize, search: &SearchConfig) -> Self {
        let rng = match search.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Self::with_rng(win_length, search.exploration, rng)
    }

    /// Create an engine with an explicit random source.
    pub fn with_rng(win_length: usize, exploration: f64, rng: fastrand::Rng) -> Self {
        Self {
            win_length,
            exploration,
            rng,
        }
    }

    pub fn win_length(&self) -> usize {
        self.win_length
    }

    pub fn exploration(&self) -> f64 {
        self.exploration
    }

    /// Build a tree for `board` with the AI to move and run `simulations`
    /// cycles on it.
    pub fn search(&mut self, board: &Board, simulations: usize) -> Tree {
        let mut tree = Tree::new(board.clone(), Side::Ai);

        for _ in 0..simulations {
            let mut leaf = tree.select(self.exploration);

            // Expand on the second visit, then simulate one random new child
            if tree.get(leaf).visits > 0 && tree.expand(leaf) > 0 {
                let children = &tree.get(leaf).children;
                leaf = children[self.rng.usize(..children.len())];
            }

            let node = tree.get(leaf);
            let outcome = simulate(&node.board, node.to_move, self.win_length, &mut self.rng);
            tree.backpropagate(leaf, outcome);
        }

        debug!(
            "search finished: {} simulations, {} nodes, root win rate {:.3}",
            simulations,
            tree.len(),
            tree.root().win_rate()
        );
        tree
    }

    /// Choose the AI's move on `board` using `simulations` cycles.
    ///
    /// # Errors
    /// - [`GameError::NoAvailableMoves`] if the board has no empty cell.
    /// - [`GameError::NoCandidates`] if the root was never expanded, which
    ///   happens for budgets of 0 or 1 since the root expands on its second
    ///   visit.
    pub fn decide(&mut self, board: &Board, simulations: usize) -> Result<Decision> {
        if board.is_full() {
            return Err(GameError::NoAvailableMoves);
        }

        let tree = self.search(board, simulations);
        let stats = root_stats(&tree);
        let best = best_move(&tree).ok_or(GameError::NoCandidates { simulations })?;

        info!("chose move {best} after {simulations} simulations");
        Ok(Decision { best, stats })
    }
}

/// Statistics for each root child, in move order.
pub fn root_stats(tree: &Tree) -> Vec<MoveStats> {
    tree.root()
        .children
        .iter()
        .map(|&id| tree.get(id))
        .filter_map(|child| {
            child.mv.map(|mv| MoveStats {
                mv,
                visits: child.visits,
                win_rate: child.win_rate(),
            })
        })
        .collect()
}

/// Most visited root child; the first one wins a tie.
pub fn best_move(tree: &Tree) -> Option<Move> {
    best_child(tree).and_then(|id| tree.get(id).mv)
}

fn best_child(tree: &Tree) -> Option<NodeId> {
    tree.root()
        .children
        .iter()
        .copied()
        .reduce(|best, id| {
            if tree.get(id).visits > tree.get(best).visits {
                id
            } else {
                best
            }
        })
}

/// Write the per-move statistics block followed by the chosen move.
pub fn dump_stats<W: Write>(out: &mut W, decision: &Decision) -> io::Result<()> {
    writeln!(out, "\n--- MCTS Move Statistics ---")?;
    for s in &decision.stats {
        writeln!(
            out,
            "Move {}: visits={}, win rate={:.2}",
            s.mv, s.visits, s.win_rate
        )?;
    }
    writeln!(out, "Chosen move: {}\n", decision.best)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(seed: u64) -> Engine {
        Engine::with_rng(4, 1.4, fastrand::Rng::with_seed(seed))
    }

    #[test]
    fn test_root_expands_on_second_simulation() {
        let board = Board::new(4, 5);
        let mut engine = engine(1);

        let tree = engine.search(&board, 1);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root().visits, 1);

        let tree = engine.search(&board, 2);
        assert_eq!(tree.root().children.len(), 20);
        assert_eq!(tree.root().visits, 2);
        let visited: u32 = tree.root().children.iter().map(|&c| tree.get(c).visits).sum();
        assert_eq!(visited, 1);
    }

    #[test]
    fn test_root_visits_equal_budget() {
        let board = Board::new(4, 5);
        let tree = engine(3).search(&board, 150);
        assert_eq!(tree.root().visits, 150);
    }

    #[test]
    fn test_zero_budget_fails() {
        let board = Board::new(4, 5);
        let err = engine(5).decide(&board, 0).unwrap_err();
        assert_eq!(err, GameError::NoCandidates { simulations: 0 });
    }

    #[test]
    fn test_single_simulation_fails() {
        let board = Board::new(4, 5);
        assert!(matches!(
            engine(5).decide(&board, 1),
            Err(GameError::NoCandidates { simulations: 1 })
        ));
    }

    #[test]
    fn test_full_board_fails() {
        let mut board = Board::new(1, 2);
        board.apply(Move::new(0, 0), Side::Human).unwrap();
        board.apply(Move::new(0, 1), Side::Ai).unwrap();
        assert_eq!(
            engine(5).decide(&board, 50).unwrap_err(),
            GameError::NoAvailableMoves
        );
    }

    #[test]
    fn test_single_available_move() {
        let mut board = Board::new(1, 3);
        board.apply(Move::new(0, 0), Side::Human).unwrap();
        board.apply(Move::new(0, 2), Side::Ai).unwrap();
        let decision = engine(9).decide(&board, 10).unwrap();
        assert_eq!(decision.best, Move::new(0, 1));
        assert_eq!(decision.stats.len(), 1);
        assert_eq!(decision.stats[0].visits, 9);
    }

    #[test]
    fn test_stats_cover_every_available_move() {
        let mut board = Board::new(4, 5);
        board.apply(Move::new(3, 2), Side::Human).unwrap();
        let decision = engine(11).decide(&board, 200).unwrap();

        let moves: Vec<Move> = decision.stats.iter().map(|s| s.mv).collect();
        assert_eq!(moves, board.available_moves());
        let total: u32 = decision.stats.iter().map(|s| s.visits).sum();
        assert_eq!(total, 199);
        for s in &decision.stats {
            assert!((0.0..=1.0).contains(&s.win_rate));
        }

        let best = decision.best_stats().unwrap();
        assert!(decision.stats.iter().all(|s| s.visits <= best.visits));
    }

    #[test]
    fn test_best_move_tie_goes_to_first() {
        // Every child visited exactly once: the first move wins the tie.
        let board = Board::new(1, 3);
        let decision = engine(2).decide(&board, 4).unwrap();
        assert!(decision.stats.iter().all(|s| s.visits == 1));
        assert_eq!(decision.best, Move::new(0, 0));
    }

    #[test]
    fn test_dump_stats_format() {
        let decision = Decision {
            best: Move::new(0, 3),
            stats: vec![
                MoveStats {
                    mv: Move::new(0, 3),
                    visits: 12,
                    win_rate: 1.0,
                },
                MoveStats {
                    mv: Move::new(1, 0),
                    visits: 0,
                    win_rate: 0.0,
                },
            ],
        };
        let mut out = Vec::new();
        dump_stats(&mut out, &decision).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("--- MCTS Move Statistics ---"));
        assert!(text.contains("Move (0, 3): visits=12, win rate=1.00"));
        assert!(text.contains("Move (1, 0): visits=0, win rate=0.00"));
        assert!(text.contains("Chosen move: (0, 3)"));
    }
}
