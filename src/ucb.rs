//! UCB1 scoring used during selection.

use crate::tree::Node;

/// UCB1 score of `child` under a parent visited `parent_visits` times.
///
/// Unvisited children score positive infinity so every sibling is tried once
/// before any exploitation comparison happens.
pub fn score(child: &Node, parent_visits: u32, exploration: f64) -> f64 {
    if child.visits == 0 {
        return f64::INFINITY;
    }
    let visits = child.visits as f64;
    let exploitation = child.wins as f64 / visits;
    let exploration_term = exploration * ((parent_visits as f64).ln() / visits).sqrt();
    exploitation + exploration_term
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Side};

    fn node_with(visits: u32, wins: u32) -> Node {
        let mut node = Node::root(Board::new(2, 2), Side::Ai);
        node.visits = visits;
        node.wins = wins;
        node
    }

    #[test]
    fn test_unvisited_is_infinite() {
        assert_eq!(score(&node_with(0, 0), 10, 1.4), f64::INFINITY);
    }

    #[test]
    fn test_formula() {
        let node = node_with(4, 3);
        let expected = 0.75 + 1.4 * ((10f64).ln() / 4.0).sqrt();
        assert!((score(&node, 10, 1.4) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_zero_exploration_is_win_rate() {
        assert_eq!(score(&node_with(8, 2), 50, 0.0), 0.25);
    }

    #[test]
    fn test_single_parent_visit_has_no_bonus() {
        // ln(1) == 0
        assert_eq!(score(&node_with(2, 1), 1, 1.4), 0.5);
    }

    #[test]
    fn test_fewer_visits_score_higher() {
        let rarely = node_with(2, 1);
        let often = node_with(20, 10);
        assert!(score(&rarely, 22, 1.4) > score(&often, 22, 1.4));
    }
}
