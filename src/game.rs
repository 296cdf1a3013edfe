//! The authoritative game record and its two mutations: moving a pawn and
//! placing a wall.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::board::{on_board, Coord, Orientation, WallSet, TOTAL_WALLS, WALLS_PER_PLAYER};
use crate::error::{QuoridorError, Result};
use crate::graph::{build_graph, destinations, is_step, LegalityGraph, Node};
use crate::path::{has_path, shortest_path};
use crate::strategy::{Action, GreedyStrategy, Strategy};
use crate::walls::classify;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Player {
    /// Starts on row 1 and races to row 9.
    Player1,
    /// Starts on row 9 and races to row 1.
    Player2,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::Player1, Player::Player2];

    /// Maps the public 1-based player number onto a side.
    pub fn from_index(index: usize) -> Result<Self> {
        match index {
            1 => Ok(Player::Player1),
            2 => Ok(Player::Player2),
            other => Err(QuoridorError::InvalidPlayerIndex(other)),
        }
    }

    pub fn index(self) -> usize {
        match self {
            Player::Player1 => 1,
            Player::Player2 => 2,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Player::Player1 => Player::Player2,
            Player::Player2 => Player::Player1,
        }
    }

    pub fn goal_row(self) -> i32 {
        match self {
            Player::Player1 => 9,
            Player::Player2 => 1,
        }
    }

    pub fn start(self) -> Coord {
        match self {
            Player::Player1 => (5, 1),
            Player::Player2 => (5, 9),
        }
    }

    /// The sink node this player's paths end in.
    pub fn goal(self) -> Node {
        Node::Goal(self)
    }

    fn slot(self) -> usize {
        self.index() - 1
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.index())
    }
}

/// One side of the table as exchanged with collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    pub name: String,
    pub walls_remaining: u32,
    pub position: Coord,
}

impl PlayerState {
    pub fn new(name: impl Into<String>, walls_remaining: u32, position: Coord) -> Self {
        Self {
            name: name.into(),
            walls_remaining,
            position,
        }
    }
}

/// Full game state in the shape shared with I/O adapters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub players: Vec<PlayerState>,
    #[serde(default)]
    pub walls: WallSet,
}

/// A Quoridor game in progress.
///
/// Every instance satisfies the rules invariants: 20 walls in total between
/// the two budgets and the board, every wall anchored in range without
/// overlap, and both pawns able to reach their goal row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quoridor {
    players: [PlayerState; 2],
    walls: WallSet,
}

impl Quoridor {
    /// A fresh game: pawns on their start tiles, 10 walls each, empty board.
    pub fn new(name1: impl Into<String>, name2: impl Into<String>) -> Self {
        Quoridor {
            players: [
                PlayerState::new(name1, WALLS_PER_PLAYER, Player::Player1.start()),
                PlayerState::new(name2, WALLS_PER_PLAYER, Player::Player2.start()),
            ],
            walls: WallSet::new(),
        }
    }

    /// Rebuilds a game from an external snapshot, checking every invariant.
    ///
    /// Walls are replayed one at a time, horizontal list first, each checked
    /// against only the walls before it.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self> {
        let Snapshot { players, walls } = snapshot;
        let players: [PlayerState; 2] = players
            .try_into()
            .map_err(|players: Vec<PlayerState>| QuoridorError::InvalidPlayerCount(players.len()))?;

        // u64 so that two u32 budgets cannot overflow on 32-bit targets
        let budgets: u64 = players.iter().map(|p| u64::from(p.walls_remaining)).sum();
        let total = budgets + walls.len() as u64;
        if total != TOTAL_WALLS as u64 {
            return Err(QuoridorError::InvalidWallBudgetTotal(total));
        }

        let positions = [players[0].position, players[1].position];
        let mut placed = WallSet::new();
        for orientation in Orientation::ALL {
            for &anchor in walls.get(orientation) {
                check_structure(&placed, orientation, anchor)?;
                let candidate = placed.with(orientation, anchor);
                if blocks_anyone(positions, &candidate) {
                    return Err(blockade(orientation, anchor));
                }
                placed = candidate;
            }
        }

        for player in &players {
            if player.walls_remaining > WALLS_PER_PLAYER {
                return Err(QuoridorError::InvalidPlayerSpec {
                    name: player.name.clone(),
                    reason: format!(
                        "wall budget {} exceeds {}",
                        player.walls_remaining, WALLS_PER_PLAYER
                    ),
                });
            }
            if !on_board(player.position) {
                return Err(QuoridorError::InvalidPlayerSpec {
                    name: player.name.clone(),
                    reason: format!("position {:?} is off the board", player.position),
                });
            }
        }
        if positions[0] == positions[1] {
            return Err(QuoridorError::InvalidPlayerSpec {
                name: players[1].name.clone(),
                reason: format!("position {:?} is already occupied", positions[1]),
            });
        }

        Ok(Quoridor { players, walls })
    }

    /// Parses a JSON snapshot and validates it like [`Quoridor::from_snapshot`].
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_snapshot(serde_json::from_str(json)?)
    }

    pub fn player(&self, player: Player) -> &PlayerState {
        &self.players[player.slot()]
    }

    pub fn players(&self) -> &[PlayerState; 2] {
        &self.players
    }

    pub fn walls(&self) -> &WallSet {
        &self.walls
    }

    pub fn positions(&self) -> [Coord; 2] {
        [self.players[0].position, self.players[1].position]
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            players: self.players.to_vec(),
            walls: self.walls.clone(),
        }
    }

    /// The legality graph for the current position.
    pub fn graph(&self) -> LegalityGraph {
        build_graph(self.positions(), &self.walls)
    }

    /// Player 1 wins on row 9, player 2 on row 1; player 1 is checked first.
    pub fn winner(&self) -> Option<Player> {
        Player::ALL
            .into_iter()
            .find(|&player| self.player(player).position.1 == player.goal_row())
    }

    /// Name of the winner, if the game is over.
    pub fn is_finished(&self) -> Option<&str> {
        self.winner().map(|player| self.player(player).name.as_str())
    }

    /// Moves `player`'s pawn to `destination` if that is one legal step away.
    pub fn move_pawn(&mut self, player: usize, destination: Coord) -> Result<()> {
        let player = Player::from_index(player)?;
        self.ensure_running()?;

        let from = self.player(player).position;
        if !is_step(&self.graph(), from, destination) {
            return Err(QuoridorError::IllegalMove {
                player,
                from,
                to: destination,
            });
        }

        self.players[player.slot()].position = destination;
        debug!(%player, ?from, to = ?destination, "pawn moved");
        Ok(())
    }

    /// Places a wall for `player` at `anchor`, spending one of their walls.
    pub fn place_wall(
        &mut self,
        player: usize,
        anchor: Coord,
        orientation: Orientation,
    ) -> Result<()> {
        let player = Player::from_index(player)?;
        self.ensure_running()?;

        if self.player(player).walls_remaining == 0 {
            return Err(QuoridorError::NoWallsRemaining(player));
        }
        check_structure(&self.walls, orientation, anchor)?;

        let walls = self.walls.with(orientation, anchor);
        if blocks_anyone(self.positions(), &walls) {
            return Err(blockade(orientation, anchor));
        }

        self.walls = walls;
        self.players[player.slot()].walls_remaining -= 1;
        debug!(
            %player,
            ?anchor,
            %orientation,
            remaining = self.player(player).walls_remaining,
            "wall placed"
        );
        Ok(())
    }

    /// Tiles `player` may move to right now.
    pub fn legal_moves(&self, player: Player) -> Vec<Coord> {
        destinations(&self.graph(), self.player(player).position)
    }

    /// Every wall `player` could legally place right now.
    pub fn legal_walls(&self, player: Player) -> Vec<(Coord, Orientation)> {
        if self.player(player).walls_remaining == 0 {
            return Vec::new();
        }
        let candidates = classify(&self.walls);
        Orientation::ALL
            .into_iter()
            .flat_map(|orientation| {
                candidates
                    .valid(orientation)
                    .iter()
                    .map(move |&anchor| (anchor, orientation))
            })
            .filter(|&(anchor, orientation)| {
                !blocks_anyone(self.positions(), &self.walls.with(orientation, anchor))
            })
            .collect()
    }

    /// Shortest route from `player`'s pawn to their goal sink.
    pub fn shortest_path(&self, player: Player) -> Result<Vec<Node>> {
        shortest_path(&self.graph(), self.player(player).position, player.goal())
    }

    /// Number of pawn moves `player` needs to reach their goal row.
    pub fn distance_to_goal(&self, player: Player) -> Result<usize> {
        // The path holds the starting tile and the sink.
        Ok(self.shortest_path(player)?.len() - 2)
    }

    /// Lets the built-in greedy heuristic play one action for `player`.
    pub fn play(&mut self, player: usize) -> Result<Action> {
        self.play_with(player, &mut GreedyStrategy::default())
    }

    /// Lets `strategy` choose one action for `player` and applies it.
    #[instrument(level = "debug", skip(self, strategy), fields(strategy = %strategy.name()))]
    pub fn play_with(&mut self, player: usize, strategy: &mut dyn Strategy) -> Result<Action> {
        let player = Player::from_index(player)?;
        let action = strategy.choose_action(self, player)?;
        self.apply(player, action)?;
        Ok(action)
    }

    /// Applies a pre-chosen action through the validating mutations.
    pub fn apply(&mut self, player: Player, action: Action) -> Result<()> {
        match action {
            Action::MovePawn { to } => self.move_pawn(player.index(), to),
            Action::PlaceWall {
                anchor,
                orientation,
            } => self.place_wall(player.index(), anchor, orientation),
        }
    }

    fn ensure_running(&self) -> Result<()> {
        match self.winner() {
            Some(_) => Err(QuoridorError::GameAlreadyFinished),
            None => Ok(()),
        }
    }
}

/// Range and overlap checks for a new wall against `walls`.
fn check_structure(walls: &WallSet, orientation: Orientation, anchor: Coord) -> Result<()> {
    if !orientation.in_range(anchor) {
        return Err(QuoridorError::InvalidWallPosition {
            orientation,
            position: anchor,
            reason: "anchor is out of range",
        });
    }
    if !classify(walls).is_open(orientation, anchor) {
        return Err(QuoridorError::InvalidWallPosition {
            orientation,
            position: anchor,
            reason: "overlaps or crosses an existing wall",
        });
    }
    Ok(())
}

/// Whether either pawn would be cut off from its goal with `walls` on the board.
pub(crate) fn blocks_anyone(positions: [Coord; 2], walls: &WallSet) -> bool {
    let graph = build_graph(positions, walls);
    Player::ALL
        .into_iter()
        .zip(positions)
        .any(|(player, position)| !has_path(&graph, position, player.goal()))
}

fn blockade(orientation: Orientation, anchor: Coord) -> QuoridorError {
    QuoridorError::InvalidWallPosition {
        orientation,
        position: anchor,
        reason: "would leave a player without a path to goal",
    }
}
