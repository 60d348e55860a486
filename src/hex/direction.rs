//! The six hex directions
//!
//! Order is fixed: clockwise starting east, with r growing "south". Ring,
//! neighbor and rendering code all iterate in this order.

use serde::{Deserialize, Serialize};

use crate::hex::coord::HexCoord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HexDirection {
    #[default]
    East,
    SouthEast,
    SouthWest,
    West,
    NorthWest,
    NorthEast,
}

impl HexDirection {
    /// All directions, clockwise from east
    pub const ALL: [HexDirection; 6] = [
        HexDirection::East,
        HexDirection::SouthEast,
        HexDirection::SouthWest,
        HexDirection::West,
        HexDirection::NorthWest,
        HexDirection::NorthEast,
    ];

    /// Unit offset for this direction
    pub const fn offset(&self) -> HexCoord {
        match self {
            HexDirection::East => HexCoord::new(1, 0),
            HexDirection::SouthEast => HexCoord::new(0, 1),
            HexDirection::SouthWest => HexCoord::new(-1, 1),
            HexDirection::West => HexCoord::new(-1, 0),
            HexDirection::NorthWest => HexCoord::new(0, -1),
            HexDirection::NorthEast => HexCoord::new(1, -1),
        }
    }

    /// Position in `ALL`
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 6]
    }

    pub fn opposite(&self) -> Self {
        Self::from_index(self.index() + 3)
    }

    pub fn clockwise(&self) -> Self {
        Self::from_index(self.index() + 1)
    }

    pub fn counter_clockwise(&self) -> Self {
        Self::from_index(self.index() + 5)
    }
}
