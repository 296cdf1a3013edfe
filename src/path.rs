//! Shortest-path queries on the legality graph.

use petgraph::algo::{astar, has_path_connecting};

use crate::board::Coord;
use crate::error::{QuoridorError, Result};
use crate::graph::{LegalityGraph, Node};

/// Shortest path from the tile `from` to `to`, both ends included.
///
/// Every step costs 1 and no heuristic is used, so the search expands in
/// breadth-first order and the returned path is deterministic for a given graph.
pub fn shortest_path(graph: &LegalityGraph, from: Coord, to: Node) -> Result<Vec<Node>> {
    let start = Node::Tile(from);
    astar(graph, start, |node| node == to, |_| 1usize, |_| 0)
        .map(|(_, path)| path)
        .ok_or(QuoridorError::NoPath { from: start, to })
}

/// Whether the tile `from` reaches `to` at all.
pub fn has_path(graph: &LegalityGraph, from: Coord, to: Node) -> bool {
    let start = Node::Tile(from);
    graph.contains_node(start) && has_path_connecting(graph, start, to, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::WallSet;
    use crate::game::Player;
    use crate::graph::build_graph;

    #[test]
    fn test_straight_run_to_goal() {
        let graph = build_graph([(5, 1), (5, 9)], &WallSet::new());
        let path = shortest_path(&graph, (5, 1), Node::Goal(Player::Player1)).unwrap();
        // 9 tiles plus the sink
        assert_eq!(path.len(), 10);
        assert_eq!(path[0], Node::Tile((5, 1)));
        assert_eq!(path[9], Node::Goal(Player::Player1));
    }

    #[test]
    fn test_path_uses_jump() {
        let graph = build_graph([(5, 5), (5, 6)], &WallSet::new());
        let path = shortest_path(&graph, (5, 5), Node::Goal(Player::Player1)).unwrap();
        assert_eq!(path[1], Node::Tile((5, 7)));
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn test_detour_around_wall() {
        let walls = WallSet {
            horizontal: vec![(1, 2)],
            vertical: vec![],
        };
        let graph = build_graph([(1, 9), (9, 9)], &walls);
        let path = shortest_path(&graph, (1, 1), Node::Goal(Player::Player2)).unwrap();
        assert_eq!(path.len(), 2);
        let path = shortest_path(&graph, (1, 2), Node::Goal(Player::Player2)).unwrap();
        // (1,2) -> (2,2) -> (3,2) -> (3,1) -> sink
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn test_no_path() {
        let walls = WallSet {
            horizontal: vec![(1, 2)],
            vertical: vec![(3, 1)],
        };
        let graph = build_graph([(1, 1), (9, 9)], &walls);
        assert!(!has_path(&graph, (1, 1), Node::Goal(Player::Player1)));
        assert!(matches!(
            shortest_path(&graph, (1, 1), Node::Goal(Player::Player1)),
            Err(QuoridorError::NoPath { .. })
        ));
    }

    #[test]
    fn test_off_board_start_has_no_path() {
        let graph = build_graph([(5, 1), (5, 9)], &WallSet::new());
        assert!(!has_path(&graph, (0, 0), Node::Goal(Player::Player1)));
    }

    #[test]
    fn test_deterministic() {
        let graph = build_graph([(2, 3), (7, 6)], &WallSet::new());
        let first = shortest_path(&graph, (2, 3), Node::Goal(Player::Player1)).unwrap();
        let second = shortest_path(&graph, (2, 3), Node::Goal(Player::Player1)).unwrap();
        assert_eq!(first, second);
    }
}
