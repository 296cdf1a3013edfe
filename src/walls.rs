//! Structural wall validation: overlap and crossing with walls already down.
//!
//! This says nothing about connectivity. A position absent from the invalid
//! sets is only a candidate until the blockade rule has been checked against
//! a rebuilt legality graph.

use std::collections::BTreeSet;

use crate::board::{Coord, Orientation, WallSet};

/// Every anchor partitioned into structurally open and forbidden, per orientation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WallCandidates {
    pub valid_horizontal: Vec<Coord>,
    pub invalid_horizontal: BTreeSet<Coord>,
    pub valid_vertical: Vec<Coord>,
    pub invalid_vertical: BTreeSet<Coord>,
}

impl WallCandidates {
    /// Structurally open anchors for `orientation`, sorted by `(x, y)`.
    pub fn valid(&self, orientation: Orientation) -> &[Coord] {
        match orientation {
            Orientation::Horizontal => &self.valid_horizontal,
            Orientation::Vertical => &self.valid_vertical,
        }
    }

    pub fn invalid(&self, orientation: Orientation) -> &BTreeSet<Coord> {
        match orientation {
            Orientation::Horizontal => &self.invalid_horizontal,
            Orientation::Vertical => &self.invalid_vertical,
        }
    }

    pub fn is_open(&self, orientation: Orientation, anchor: Coord) -> bool {
        !self.invalid(orientation).contains(&anchor)
    }
}

/// Classifies every anchor of both orientations against `walls`.
pub fn classify(walls: &WallSet) -> WallCandidates {
    let mut invalid_horizontal = BTreeSet::new();
    let mut invalid_vertical = BTreeSet::new();

    for &(x, y) in &walls.horizontal {
        invalid_horizontal.insert((x, y));
        invalid_horizontal.insert((x + 1, y));
        invalid_horizontal.insert((x - 1, y));
        // Crossing at the shared midpoint
        invalid_vertical.insert((x + 1, y - 1));
    }

    for &(x, y) in &walls.vertical {
        invalid_vertical.insert((x, y));
        invalid_vertical.insert((x, y + 1));
        invalid_vertical.insert((x, y - 1));
        invalid_horizontal.insert((x - 1, y + 1));
    }

    let valid_horizontal = Orientation::Horizontal
        .anchors()
        .filter(|anchor| !invalid_horizontal.contains(anchor))
        .collect();
    let valid_vertical = Orientation::Vertical
        .anchors()
        .filter(|anchor| !invalid_vertical.contains(anchor))
        .collect();

    WallCandidates {
        valid_horizontal,
        invalid_horizontal,
        valid_vertical,
        invalid_vertical,
    }
}
