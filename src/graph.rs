//! Legality graph: which single pawn steps are admissible right now.
//!
//! The graph is rebuilt from scratch from the pawn positions and the placed
//! walls every time it is needed; nothing is maintained incrementally.

use petgraph::graphmap::DiGraphMap;

use crate::board::{Coord, WallSet, BOARD_SIZE};
use crate::game::Player;

/// A node of the legality graph: a board tile or a player's goal sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Node {
    Tile(Coord),
    /// Reached from any tile on the far row of the given player.
    Goal(Player),
}

pub type LegalityGraph = DiGraphMap<Node, ()>;

// Fixed neighbour order; path search output depends on it.
const STEPS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Builds the directed graph of admissible pawn steps for `players`
/// (player 1's tile first) given the placed `walls`.
pub fn build_graph(players: [Coord; 2], walls: &WallSet) -> LegalityGraph {
    let mut graph = LegalityGraph::new();

    // Open board
    for x in 1..=BOARD_SIZE {
        for y in 1..=BOARD_SIZE {
            for (dx, dy) in STEPS {
                let (nx, ny) = (x + dx, y + dy);
                if (1..=BOARD_SIZE).contains(&nx) && (1..=BOARD_SIZE).contains(&ny) {
                    graph.add_edge(Node::Tile((x, y)), Node::Tile((nx, ny)), ());
                }
            }
        }
    }

    // A horizontal wall cuts rows y-1 and y apart on columns x and x+1
    for &(x, y) in &walls.horizontal {
        cut(&mut graph, (x, y - 1), (x, y));
        cut(&mut graph, (x + 1, y - 1), (x + 1, y));
    }

    // A vertical wall cuts columns x-1 and x apart on rows y and y+1
    for &(x, y) in &walls.vertical {
        cut(&mut graph, (x - 1, y), (x, y));
        cut(&mut graph, (x - 1, y + 1), (x, y + 1));
    }

    let [a, b] = players;
    if is_step(&graph, a, b) || is_step(&graph, b, a) {
        cut(&mut graph, a, b);

        // Both jump sets are read off the wall-pruned graph before either is added.
        let jumps: Vec<(Coord, Coord)> = jump_targets(&graph, a, b)
            .into_iter()
            .map(|target| (a, target))
            .chain(jump_targets(&graph, b, a).into_iter().map(|target| (b, target)))
            .collect();
        for (from, to) in jumps {
            graph.add_edge(Node::Tile(from), Node::Tile(to), ());
        }
    }

    for x in 1..=BOARD_SIZE {
        graph.add_edge(Node::Tile((x, BOARD_SIZE)), Node::Goal(Player::Player1), ());
        graph.add_edge(Node::Tile((x, 1)), Node::Goal(Player::Player2), ());
    }

    graph
}

/// Whether `to` is a direct successor of `from`.
pub fn is_step(graph: &LegalityGraph, from: Coord, to: Coord) -> bool {
    graph.contains_edge(Node::Tile(from), Node::Tile(to))
}

/// Tiles a pawn standing on `from` may move to, in neighbour order.
pub fn destinations(graph: &LegalityGraph, from: Coord) -> Vec<Coord> {
    tile_successors(graph, from).collect()
}

fn tile_successors(graph: &LegalityGraph, from: Coord) -> impl Iterator<Item = Coord> + '_ {
    graph.neighbors(Node::Tile(from)).filter_map(|node| match node {
        Node::Tile(coord) => Some(coord),
        Node::Goal(_) => None,
    })
}

fn cut(graph: &mut LegalityGraph, a: Coord, b: Coord) {
    graph.remove_edge(Node::Tile(a), Node::Tile(b));
    graph.remove_edge(Node::Tile(b), Node::Tile(a));
}

/// Where a pawn on `from` may land by jumping over the pawn on `over`:
/// straight ahead when that side of `over` is open, otherwise every open
/// side of `over`.
fn jump_targets(graph: &LegalityGraph, from: Coord, over: Coord) -> Vec<Coord> {
    let straight = (2 * over.0 - from.0, 2 * over.1 - from.1);
    if is_step(graph, over, straight) {
        vec![straight]
    } else {
        tile_successors(graph, over)
            .filter(|&target| target != from)
            .collect()
    }
}
