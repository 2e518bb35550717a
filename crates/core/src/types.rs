use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

use crate::actions::ActionKind;

new_key_type! {
    pub struct EntityId;
    pub struct ItemId;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub const fn new(y: i32, x: i32) -> Self {
        Self { y, x }
    }

    pub fn offset(self, dy: i32, dx: i32) -> Self {
        Self { y: self.y + dy, x: self.x + dx }
    }

    /// Squared Euclidean distance; compared against squared radii so no float is needed.
    pub fn distance_sq(self, other: Pos) -> i32 {
        let dy = other.y - self.y;
        let dx = other.x - self.x;
        dy * dy + dx * dx
    }

    /// True when `other` lies within Euclidean distance 1.5, i.e. one king-move away.
    pub fn is_adjacent(self, other: Pos) -> bool {
        self.distance_sq(other) <= 2
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TileKind {
    Wall,
    Floor,
    Door,
    Hall,
    UpStair,
    DownStair,
}

impl TileKind {
    pub fn is_wall(self) -> bool {
        self == TileKind::Wall
    }
}

/// The eight compass headings, listed counter-clockwise starting east.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
    North,
    NorthEast,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
        Direction::North,
        Direction::NorthEast,
    ];

    /// `(dy, dx)` step for this heading.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::East => (0, 1),
            Direction::SouthEast => (1, 1),
            Direction::South => (1, 0),
            Direction::SouthWest => (1, -1),
            Direction::West => (0, -1),
            Direction::NorthWest => (-1, -1),
            Direction::North => (-1, 0),
            Direction::NorthEast => (-1, 1),
        }
    }

    /// Heading for a sign vector; `None` for the zero vector.
    pub fn from_delta(dy: i32, dx: i32) -> Option<Direction> {
        let wanted = (dy.signum(), dx.signum());
        Direction::ALL.into_iter().find(|dir| dir.delta() == wanted)
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Next heading 45 degrees along the `ALL` ordering.
    pub fn rotated_left(self) -> Direction {
        Direction::ALL[(self.index() + 1) % 8]
    }

    /// Previous heading 45 degrees along the `ALL` ordering.
    pub fn rotated_right(self) -> Direction {
        Direction::ALL[(self.index() + 7) % 8]
    }

    pub fn step(self, from: Pos) -> Pos {
        let (dy, dx) = self.delta();
        from.offset(dy, dx)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Rock,
}

impl ItemKind {
    pub fn name(self) -> &'static str {
        match self {
            ItemKind::Rock => "Rock",
        }
    }

    pub fn display(self) -> DisplayIndex {
        match self {
            ItemKind::Rock => display::ITEM_ROCK,
        }
    }

    /// Action the item teaches when picked up.
    pub fn grants(self) -> ActionKind {
        match self {
            ItemKind::Rock => ActionKind::ThrowRock,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeKind {
    Arm,
    Leg,
    Body,
    Mind,
}

/// Sprite slot handed to the presentation layer.
pub type DisplayIndex = u8;

pub mod display {
    use super::DisplayIndex;

    pub const PLAYER: DisplayIndex = 0;
    pub const BLOB: DisplayIndex = 1;
    pub const RAT: DisplayIndex = 3;
    pub const MUSCLE_BLOB: DisplayIndex = 4;
    pub const LEG_BLOB: DisplayIndex = 5;
    pub const DECONSTITUTED: DisplayIndex = 6;

    pub const ITEM_ROCK: DisplayIndex = 3;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    PlayerTurn,
    Targeting,
    LevelUp,
    Dead,
}

/// Fixed per-turn command vocabulary accepted from the input layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Move(Direction),
    Wait,
    PickUpItem,
    EnterRangedTargeting,
    CancelTargeting,
    CommitAttack { offset: Pos },
    SelectAbility(ActionKind),
    AscendStairs,
    DescendStairs,
    ChooseLevelUpStat(AttributeKind),
}
