//! Arena-allocated search tree.
//!
//! Nodes live in a single `Vec` and refer to each other by [`NodeId`].
//! Ownership runs parent to child through `children`; `parent` is a plain
//! index back into the arena, so there are no reference cycles and the whole
//! tree is dropped at once when the search is done.

use crate::board::{Board, Move, Side};
use crate::playout::Outcome;
use crate::ucb;

/// Index of a node in the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root is always the first node.
    pub const ROOT: NodeId = NodeId(0);
}

/// A reachable game state and its search statistics.
#[derive(Clone, Debug)]
pub struct Node {
    /// Snapshot owned by this node alone
    pub board: Board,
    /// Side that acts next from `board`
    pub to_move: Side,
    pub parent: Option<NodeId>,
    /// Move that led here from the parent (`None` for the root)
    pub mv: Option<Move>,
    /// Empty until expanded; stays empty for a full board
    pub children: Vec<NodeId>,
    /// Simulations that passed through this node
    pub visits: u32,
    /// Simulations through this node that the AI won
    pub wins: u32,
}

impl Node {
    pub fn root(board: Board, to_move: Side) -> Self {
        Self {
            board,
            to_move,
            parent: None,
            mv: None,
            children: Vec::new(),
            visits: 0,
            wins: 0,
        }
    }

    /// Observed AI win rate, 0 for an unvisited node.
    pub fn win_rate(&self) -> f64 {
        if self.visits > 0 {
            self.wins as f64 / self.visits as f64
        } else {
            0.0
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

#[derive(Debug)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Create a tree holding only a root for `board` with `to_move` to act.
    pub fn new(board: Board, to_move: Side) -> Self {
        Self {
            nodes: vec![Node::root(board, to_move)],
        }
    }

    /// # Panics
    /// Panics if the id does not belong to this tree.
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn root(&self) -> &Node {
        self.get(NodeId::ROOT)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over every node with its id.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Descend from the root, always taking the child with the highest UCB1
    /// score, until reaching a node without children.
    ///
    /// Ties go to the first child in move order.
    pub fn select(&self, exploration: f64) -> NodeId {
        let mut current = NodeId::ROOT;
        loop {
            let node = self.get(current);
            let Some((&first, rest)) = node.children.split_first() else {
                return current;
            };

            let parent_visits = node.visits;
            let mut best = first;
            let mut best_score = ucb::score(self.get(first), parent_visits, exploration);
            for &child in rest {
                let s = ucb::score(self.get(child), parent_visits, exploration);
                if s > best_score {
                    best = child;
                    best_score = s;
                }
            }
            current = best;
        }
    }

    /// Add one child per available move of `id`'s board, in row-major move
    /// order. Each child gets its own copy of the board with the move applied
    /// for the side to move, and the opposite side to act next.
    ///
    /// Does nothing for a node that already has children or whose board is
    /// full. Returns the number of children.
    pub fn expand(&mut self, id: NodeId) -> usize {
        if !self.get(id).children.is_empty() {
            return self.get(id).children.len();
        }

        let parent = self.get(id);
        let to_move = parent.to_move;
        let children: Vec<Node> = parent
            .board
            .available_moves()
            .into_iter()
            .map(|mv| Node {
                board: parent.board.with_move(mv, to_move),
                to_move: to_move.opponent(),
                parent: Some(id),
                mv: Some(mv),
                children: Vec::new(),
                visits: 0,
                wins: 0,
            })
            .collect();

        let first = self.nodes.len();
        let count = children.len();
        self.nodes.extend(children);
        self.get_mut(id).children = (first..first + count).map(NodeId).collect();
        count
    }

    /// Record one simulation result on `leaf` and every ancestor up to the
    /// root. Wins are always counted for the AI, whichever side is to move
    /// at each node.
    pub fn backpropagate(&mut self, leaf: NodeId, outcome: Outcome) {
        let ai_won = outcome == Outcome::Win(Side::Ai);
        let mut current = Some(leaf);
        while let Some(id) = current {
            let node = self.get_mut(id);
            node.visits += 1;
            if ai_won {
                node.wins += 1;
            }
            current = node.parent;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_creation() {
        let tree = Tree::new(Board::new(4, 5), Side::Ai);
        assert_eq!(tree.len(), 1);
        assert!(tree.root().is_leaf());
        assert!(tree.root().parent.is_none());
        assert!(tree.root().mv.is_none());
    }

    #[test]
    fn test_expand_creates_one_child_per_move() {
        let mut board = Board::new(2, 2);
        board.apply(Move::new(0, 0), Side::Human).unwrap();
        let mut tree = Tree::new(board.clone(), Side::Ai);

        assert_eq!(tree.expand(NodeId::ROOT), 3);
        assert_eq!(tree.len(), 4);

        let moves: Vec<Move> = tree
            .root()
            .children
            .iter()
            .map(|&c| tree.get(c).mv.unwrap())
            .collect();
        assert_eq!(moves, board.available_moves());

        for &c in &tree.root().children {
            let child = tree.get(c);
            assert_eq!(child.parent, Some(NodeId::ROOT));
            assert_eq!(child.to_move, Side::Human);
            assert_eq!(child.board.available_moves().len(), 2);
        }
        // Root board untouched
        assert_eq!(tree.root().board, board);
    }

    #[test]
    fn test_expand_twice_is_noop() {
        let mut tree = Tree::new(Board::new(2, 2), Side::Ai);
        tree.expand(NodeId::ROOT);
        assert_eq!(tree.expand(NodeId::ROOT), 4);
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn test_expand_full_board() {
        let mut board = Board::new(1, 1);
        board.apply(Move::new(0, 0), Side::Human).unwrap();
        let mut tree = Tree::new(board, Side::Ai);
        assert_eq!(tree.expand(NodeId::ROOT), 0);
        assert!(tree.root().is_leaf());
    }

    #[test]
    fn test_select_prefers_unvisited_in_order() {
        let mut tree = Tree::new(Board::new(2, 2), Side::Ai);
        tree.expand(NodeId::ROOT);
        let children = tree.root().children.clone();

        tree.backpropagate(children[0], Outcome::Win(Side::Ai));
        // First child visited, second is the first infinite candidate
        assert_eq!(tree.select(1.4), children[1]);

        tree.backpropagate(children[1], Outcome::Draw);
        assert_eq!(tree.select(1.4), children[2]);
    }

    #[test]
    fn test_select_exploits_after_all_tried() {
        let mut tree = Tree::new(Board::new(1, 3), Side::Ai);
        tree.expand(NodeId::ROOT);
        let children = tree.root().children.clone();
        tree.backpropagate(children[0], Outcome::Win(Side::Human));
        tree.backpropagate(children[1], Outcome::Win(Side::Ai));
        tree.backpropagate(children[2], Outcome::Draw);
        assert_eq!(tree.select(1.4), children[1]);
    }

    #[test]
    fn test_select_tie_goes_to_first() {
        let mut tree = Tree::new(Board::new(1, 3), Side::Ai);
        tree.expand(NodeId::ROOT);
        let children = tree.root().children.clone();
        for &c in &children {
            tree.backpropagate(c, Outcome::Draw);
        }
        assert_eq!(tree.select(1.4), children[0]);
    }

    #[test]
    fn test_backpropagate_counts_ai_wins_only() {
        let mut tree = Tree::new(Board::new(2, 2), Side::Ai);
        tree.expand(NodeId::ROOT);
        let child = tree.root().children[0];
        tree.expand(child);
        let grandchild = tree.get(child).children[0];

        tree.backpropagate(grandchild, Outcome::Win(Side::Ai));
        tree.backpropagate(grandchild, Outcome::Win(Side::Human));
        tree.backpropagate(grandchild, Outcome::Draw);

        for id in [grandchild, child, NodeId::ROOT] {
            assert_eq!(tree.get(id).visits, 3);
            assert_eq!(tree.get(id).wins, 1);
        }
        let sibling = tree.root().children[1];
        assert_eq!(tree.get(sibling).visits, 0);
    }

    #[test]
    fn test_win_rate() {
        let mut node = Node::root(Board::new(1, 1), Side::Ai);
        assert_eq!(node.win_rate(), 0.0);
        node.visits = 4;
        node.wins = 1;
        assert_eq!(node.win_rate(), 0.25);
    }
}
