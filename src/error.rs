//! Error types for the rules engine.

use thiserror::Error;

use crate::board::{Coord, Orientation};
use crate::game::Player;
use crate::graph::Node;

/// Every way a rules-engine call can be rejected.
///
/// Failed mutations leave the game untouched; failed construction yields no game.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum QuoridorError {
    #[error("expected exactly 2 players, got {0}")]
    InvalidPlayerCount(usize),

    #[error("invalid player '{name}': {reason}")]
    InvalidPlayerSpec { name: String, reason: String },

    #[error("placed and remaining walls must total 20, got {0}")]
    InvalidWallBudgetTotal(u64),

    #[error("invalid {orientation} wall at {position:?}: {reason}")]
    InvalidWallPosition {
        orientation: Orientation,
        position: Coord,
        reason: &'static str,
    },

    #[error("player index must be 1 or 2, got {0}")]
    InvalidPlayerIndex(usize),

    #[error("{0} has no walls left to place")]
    NoWallsRemaining(Player),

    #[error("{player} cannot move from {from:?} to {to:?}")]
    IllegalMove { player: Player, from: Coord, to: Coord },

    #[error("the game is already finished")]
    GameAlreadyFinished,

    #[error("no path from {from:?} to {to:?}")]
    NoPath { from: Node, to: Node },

    #[error("malformed snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Convenience type alias for Results using the crate's error type
pub type Result<T> = std::result::Result<T, QuoridorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_error_display() {
        let err = QuoridorError::InvalidWallPosition {
            orientation: Orientation::Horizontal,
            position: (4, 5),
            reason: "overlaps an existing wall",
        };
        assert_eq!(
            err.to_string(),
            "invalid horizontal wall at (4, 5): overlaps an existing wall"
        );
    }

    #[test]
    fn test_illegal_move_display() {
        let err = QuoridorError::IllegalMove {
            player: Player::Player2,
            from: (5, 9),
            to: (5, 7),
        };
        assert_eq!(err.to_string(), "player 2 cannot move from (5, 9) to (5, 7)");
    }
}
