use std::fmt;

use serde::{Deserialize, Serialize};

/// Grid-edge direction where a room can have a passable border.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    N,
    E,
    S,
    W,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::N, Self::E, Self::S, Self::W];

    fn bit(self) -> u8 {
        match self {
            Self::N => 1,
            Self::E => 2,
            Self::S => 4,
            Self::W => 8,
        }
    }
}

/// Order-independent set of door directions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DoorSignature(u8);

impl DoorSignature {
    pub fn from_directions(directions: &[Direction]) -> Self {
        let mut signature = Self::default();
        for &direction in directions {
            signature.insert(direction);
        }
        signature
    }

    pub fn insert(&mut self, direction: Direction) {
        self.0 |= direction.bit();
    }

    pub fn contains(self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Directions present, in fixed N, E, S, W order.
    pub fn directions(self) -> Vec<Direction> {
        Direction::ALL.into_iter().filter(|&direction| self.contains(direction)).collect()
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Empty,
    Wall,
    Spike,
    Liquid,
    Platform,
    Crate,
}

impl TileKind {
    /// Fixed glyph mapping for template tile rows. Unknown glyphs are empty.
    pub fn from_glyph(glyph: char) -> Self {
        match glyph {
            '#' => Self::Wall,
            '^' => Self::Spike,
            '~' => Self::Liquid,
            '=' => Self::Platform,
            '[' | ']' => Self::Crate,
            _ => Self::Empty,
        }
    }
}

/// Absolute position in world tile space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

/// Room identity on the fixed band grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoomId {
    pub band: usize,
    pub index: usize,
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}r{}", self.band, self.index)
    }
}
