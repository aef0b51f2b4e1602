use serde::{Deserialize, Serialize};

pub mod board;
pub mod economy;
pub mod energy;
pub mod map;
pub mod path;
pub mod planner;
pub mod random;
pub mod sandbox;
pub mod selector;
pub mod smart;
pub mod state;
pub mod strategy;

/// Represents a 2D coordinate on the board. `y` grows upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Returns the manhattan distance between two positions.
    pub fn manhattan_distance(&self, other: &Position) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Signed `(dx, dy)` needed to go from `self` to `other`.
    pub fn delta_to(&self, other: &Position) -> (isize, isize) {
        (
            other.x as isize - self.x as isize,
            other.y as isize - self.y as isize,
        )
    }
}

/// The three mineable resource kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Diamond,
    Emerald,
    Ruby,
}

/// The two sides of a match. Red moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    Red,
    Blue,
}

impl Team {
    pub fn from_is_red(is_red: bool) -> Self {
        if is_red { Team::Red } else { Team::Blue }
    }

    pub fn opponent(self) -> Self {
        match self {
            Team::Red => Team::Blue,
            Team::Blue => Team::Red,
        }
    }
}

/// One mined resource unit. Strategies carry these around without looking inside;
/// only the economy cares about the kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub kind: ResourceKind,
}

impl InventoryItem {
    pub fn new(kind: ResourceKind) -> Self {
        Self { kind }
    }
}
