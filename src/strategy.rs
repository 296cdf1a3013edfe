//! Automatic play: strategies that pick one action for a side.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::board::{Coord, Orientation};
use crate::error::{QuoridorError, Result};
use crate::game::{Player, Quoridor};
use crate::graph::{build_graph, Node};
use crate::path::shortest_path;
use crate::walls::classify;

/// One turn: a pawn step or a wall placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Action {
    MovePawn { to: Coord },
    PlaceWall { anchor: Coord, orientation: Orientation },
}

pub trait Strategy {
    fn name(&self) -> String;
    fn choose_action(&mut self, game: &Quoridor, player: Player) -> Result<Action>;
}

/// Order in which wall candidates are tried. Among equally good walls of
/// one orientation the first one tried wins.
#[derive(Debug, Clone, Default)]
pub enum CandidateOrder {
    /// Lexicographic by `(x, y)`.
    #[default]
    Sorted,
    Shuffled(StdRng),
}

/// Greedy one-ply player.
///
/// Runs for the goal while strictly ahead (or out of walls). Otherwise it
/// tries every open wall and keeps the one that widens the gap between the
/// opponent's and its own shortest path the most, falling back to a pawn
/// step when no wall helps.
#[derive(Debug, Clone, Default)]
pub struct GreedyStrategy {
    order: CandidateOrder,
}

impl GreedyStrategy {
    pub fn new(order: CandidateOrder) -> Self {
        GreedyStrategy { order }
    }

    pub fn shuffled(seed: u64) -> Self {
        Self::new(CandidateOrder::Shuffled(StdRng::seed_from_u64(seed)))
    }

    /// Best wall of one orientation as `(gain, anchor)`; gain 0 means none helps.
    fn best_wall(
        &mut self,
        game: &Quoridor,
        player: Player,
        orientation: Orientation,
        own_len: usize,
        opponent_len: usize,
    ) -> (isize, Option<Coord>) {
        let opponent = player.opponent();
        let positions = game.positions();
        let mut anchors = classify(game.walls()).valid(orientation).to_vec();
        if let CandidateOrder::Shuffled(rng) = &mut self.order {
            anchors.shuffle(rng);
        }

        let mut best = (0, None);
        for anchor in anchors {
            let walls = game.walls().with(orientation, anchor);
            let graph = build_graph(positions, &walls);
            let own = shortest_path(&graph, game.player(player).position, player.goal());
            let theirs = shortest_path(&graph, game.player(opponent).position, opponent.goal());
            // A wall that cuts anyone off is illegal, not just bad.
            let (Ok(own), Ok(theirs)) = (own, theirs) else {
                continue;
            };

            let opponent_delta = theirs.len() as isize - opponent_len as isize;
            let own_delta = own.len() as isize - own_len as isize;
            let gain = opponent_delta - own_delta;
            trace!(?anchor, %orientation, gain, "wall candidate");
            if gain > best.0 {
                best = (gain, Some(anchor));
            }
        }
        best
    }
}

impl Strategy for GreedyStrategy {
    fn name(&self) -> String {
        match self.order {
            CandidateOrder::Sorted => "Greedy".to_string(),
            CandidateOrder::Shuffled(_) => "GreedyShuffled".to_string(),
        }
    }

    fn choose_action(&mut self, game: &Quoridor, player: Player) -> Result<Action> {
        if game.is_finished().is_some() {
            return Err(QuoridorError::GameAlreadyFinished);
        }

        let opponent = player.opponent();
        let graph = game.graph();
        let own = shortest_path(&graph, game.player(player).position, player.goal())?;
        let theirs = shortest_path(&graph, game.player(opponent).position, opponent.goal())?;
        let step = Action::MovePawn { to: next_step(&own)? };

        if own.len() < theirs.len() || game.player(player).walls_remaining == 0 {
            return Ok(step);
        }

        let (h_gain, h_anchor) =
            self.best_wall(game, player, Orientation::Horizontal, own.len(), theirs.len());
        let (v_gain, v_anchor) =
            self.best_wall(game, player, Orientation::Vertical, own.len(), theirs.len());

        let action = match (h_gain.cmp(&v_gain), h_anchor, v_anchor) {
            (std::cmp::Ordering::Greater, Some(anchor), _) => Action::PlaceWall {
                anchor,
                orientation: Orientation::Horizontal,
            },
            (std::cmp::Ordering::Less, _, Some(anchor)) => Action::PlaceWall {
                anchor,
                orientation: Orientation::Vertical,
            },
            _ => step,
        };
        Ok(action)
    }
}

/// Pawn-only baseline: always steps along its own shortest path.
#[derive(Debug, Clone, Default)]
pub struct ShortestPathStrategy;

impl Strategy for ShortestPathStrategy {
    fn name(&self) -> String {
        "ShortestPath".to_string()
    }

    fn choose_action(&mut self, game: &Quoridor, player: Player) -> Result<Action> {
        if game.is_finished().is_some() {
            return Err(QuoridorError::GameAlreadyFinished);
        }
        let path = game.shortest_path(player)?;
        Ok(Action::MovePawn { to: next_step(&path)? })
    }
}

/// First tile after the start of `path`.
fn next_step(path: &[Node]) -> Result<Coord> {
    match path.get(1) {
        Some(&Node::Tile(coord)) => Ok(coord),
        // Only a pawn already on its goal row steps straight into the sink.
        _ => Err(QuoridorError::GameAlreadyFinished),
    }
}

/// Builds one of the named strategies used by the self-play driver.
pub fn strategy_by_name(name: &str, seed: u64) -> Option<Box<dyn Strategy>> {
    match name {
        "Greedy" => Some(Box::new(GreedyStrategy::default())),
        "GreedyShuffled" => Some(Box::new(GreedyStrategy::shuffled(seed))),
        "ShortestPath" => Some(Box::new(ShortestPathStrategy)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::WallSet;
    use crate::game::{PlayerState, Snapshot};

    fn game(players: [(u32, Coord); 2], walls: WallSet) -> Quoridor {
        Quoridor::from_snapshot(Snapshot {
            players: vec![
                PlayerState::new("alice", players[0].0, players[0].1),
                PlayerState::new("bob", players[1].0, players[1].1),
            ],
            walls,
        })
        .unwrap()
    }

    #[test]
    fn test_runs_when_ahead() {
        let game = game([(10, (5, 7)), (10, (5, 5))], WallSet::new());
        let action = GreedyStrategy::default().choose_action(&game, Player::Player1).unwrap();
        assert_eq!(action, Action::MovePawn { to: (5, 8) });
    }

    #[test]
    fn test_runs_when_out_of_walls() {
        let walls = WallSet {
            horizontal: vec![(1, 4), (3, 4), (5, 4), (7, 4), (1, 6)],
            vertical: vec![(2, 7), (4, 7), (6, 7), (8, 7), (9, 2)],
        };
        let game = game([(0, (5, 1)), (10, (5, 9))], walls);
        let action = GreedyStrategy::default().choose_action(&game, Player::Player1).unwrap();
        assert!(matches!(action, Action::MovePawn { .. }));
    }

    #[test]
    fn test_walls_off_a_leading_opponent() {
        // Bob is one step from row 1; alice is far behind with walls in hand.
        let game = game([(10, (5, 1)), (10, (5, 2))], WallSet::new());
        let game = {
            let mut g = game;
            g.move_pawn(1, (4, 1)).unwrap();
            g
        };
        let action = GreedyStrategy::default().choose_action(&game, Player::Player1).unwrap();
        // h(4, 2) would also cost alice a step, so only h(5, 2) gains.
        assert_eq!(
            action,
            Action::PlaceWall {
                anchor: (5, 2),
                orientation: Orientation::Horizontal,
            }
        );
    }

    #[test]
    fn test_first_of_equally_good_walls_wins() {
        // h(4, 2) and h(5, 2) both cost bob one step; (4, 2) is tried first.
        let game = game([(10, (1, 5)), (10, (5, 2))], WallSet::new());
        let action = GreedyStrategy::default().choose_action(&game, Player::Player1).unwrap();
        assert_eq!(
            action,
            Action::PlaceWall {
                anchor: (4, 2),
                orientation: Orientation::Horizontal,
            }
        );
    }

    #[test]
    fn test_vertical_wall_beats_weaker_horizontal() {
        // Bob must walk right along row 2; v(2, 2) and v(3, 2) both add four
        // steps, the best horizontal only two.
        let walls = WallSet {
            horizontal: vec![(1, 2)],
            vertical: vec![],
        };
        let game = game([(10, (9, 5)), (9, (1, 2))], walls);
        let action = GreedyStrategy::default().choose_action(&game, Player::Player1).unwrap();
        assert_eq!(
            action,
            Action::PlaceWall {
                anchor: (2, 2),
                orientation: Orientation::Vertical,
            }
        );
    }

    #[test]
    fn test_equal_gains_fall_back_to_a_step() {
        // Bob has a detour of one extra step on either side, so the best
        // horizontal and the best vertical both gain exactly one.
        let walls = WallSet {
            horizontal: vec![(4, 2), (6, 2)],
            vertical: vec![],
        };
        let game = game([(10, (9, 5)), (8, (5, 2))], walls);
        let action = GreedyStrategy::default().choose_action(&game, Player::Player1).unwrap();
        assert_eq!(action, Action::MovePawn { to: (9, 6) });
    }

    #[test]
    fn test_sorted_order_is_reproducible() {
        let game = Quoridor::new("alice", "bob");
        let first = GreedyStrategy::default().choose_action(&game, Player::Player2).unwrap();
        let second = GreedyStrategy::default().choose_action(&game, Player::Player2).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_shuffled_order_keeps_action_kind() {
        let mut game = Quoridor::new("alice", "bob");
        game.move_pawn(1, (5, 2)).unwrap();
        let sorted = GreedyStrategy::default().choose_action(&game, Player::Player2).unwrap();
        for seed in 0..4 {
            let shuffled = GreedyStrategy::shuffled(seed)
                .choose_action(&game, Player::Player2)
                .unwrap();
            assert_eq!(
                std::mem::discriminant(&sorted),
                std::mem::discriminant(&shuffled)
            );
            if let Action::PlaceWall { orientation, .. } = sorted {
                assert!(matches!(
                    shuffled,
                    Action::PlaceWall { orientation: o, .. } if o == orientation
                ));
            }
        }
    }

    #[test]
    fn test_finished_game_is_an_error() {
        let game = game([(10, (5, 9)), (10, (5, 5))], WallSet::new());
        assert!(matches!(
            GreedyStrategy::default().choose_action(&game, Player::Player2),
            Err(QuoridorError::GameAlreadyFinished)
        ));
        assert!(matches!(
            ShortestPathStrategy.choose_action(&game, Player::Player2),
            Err(QuoridorError::GameAlreadyFinished)
        ));
    }

    #[test]
    fn test_shortest_path_strategy_steps_forward() {
        let game = Quoridor::new("alice", "bob");
        let action = ShortestPathStrategy.choose_action(&game, Player::Player2).unwrap();
        assert_eq!(action, Action::MovePawn { to: (5, 8) });
    }

    #[test]
    fn test_strategy_by_name() {
        assert_eq!(strategy_by_name("Greedy", 0).unwrap().name(), "Greedy");
        assert_eq!(strategy_by_name("GreedyShuffled", 0).unwrap().name(), "GreedyShuffled");
        assert!(strategy_by_name("Minimax", 0).is_none());
    }
}
