//! Board geometry: tiles, wall anchors and the fixed rule constants.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A board tile `(x, y)`, column then row, both in `1..=9`.
pub type Coord = (i32, i32);

pub const BOARD_SIZE: i32 = 9;
pub const WALLS_PER_PLAYER: u32 = 10;
pub const TOTAL_WALLS: usize = 20;

/// Returns true if the coordinate names a tile on the 9x9 board.
pub fn on_board(coord: Coord) -> bool {
    (1..=BOARD_SIZE).contains(&coord.0) && (1..=BOARD_SIZE).contains(&coord.1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub const ALL: [Orientation; 2] = [Orientation::Horizontal, Orientation::Vertical];

    /// Whether `anchor` lies inside the anchor range of this orientation.
    ///
    /// Horizontal anchors sit on `1..=8 x 2..=9` and block the boundary below
    /// row `y`; vertical anchors sit on `2..=9 x 1..=8` and block the boundary
    /// left of column `x`.
    pub fn in_range(self, anchor: Coord) -> bool {
        let (x, y) = anchor;
        match self {
            Orientation::Horizontal => {
                (1..BOARD_SIZE).contains(&x) && (2..=BOARD_SIZE).contains(&y)
            }
            Orientation::Vertical => {
                (2..=BOARD_SIZE).contains(&x) && (1..BOARD_SIZE).contains(&y)
            }
        }
    }

    /// Every anchor in range for this orientation, sorted by `(x, y)`.
    pub fn anchors(self) -> impl Iterator<Item = Coord> {
        (1..=BOARD_SIZE)
            .flat_map(|x| (1..=BOARD_SIZE).map(move |y| (x, y)))
            .filter(move |&anchor| self.in_range(anchor))
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Horizontal => write!(f, "horizontal"),
            Orientation::Vertical => write!(f, "vertical"),
        }
    }
}

/// Placed walls, each list kept in placement order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallSet {
    #[serde(default)]
    pub horizontal: Vec<Coord>,
    #[serde(default)]
    pub vertical: Vec<Coord>,
}

impl WallSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.horizontal.len() + self.vertical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, orientation: Orientation) -> &[Coord] {
        match orientation {
            Orientation::Horizontal => &self.horizontal,
            Orientation::Vertical => &self.vertical,
        }
    }

    pub fn push(&mut self, orientation: Orientation, anchor: Coord) {
        match orientation {
            Orientation::Horizontal => self.horizontal.push(anchor),
            Orientation::Vertical => self.vertical.push(anchor),
        }
    }

    /// A copy of this set with one more wall appended.
    pub fn with(&self, orientation: Orientation, anchor: Coord) -> WallSet {
        let mut walls = self.clone();
        walls.push(orientation, anchor);
        walls
    }
}
