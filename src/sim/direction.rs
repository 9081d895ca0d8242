//! Skier headings, ordered from full left to full right

use serde::{Deserialize, Serialize};

use crate::assets::Sprite;

/// Five headings; turning is a clamped ±1 step along this order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    Left = 0,
    LeftDown = 1,
    Down = 2,
    RightDown = 3,
    Right = 4,
}

impl Direction {
    pub const ALL: [Direction; 5] = [
        Direction::Left,
        Direction::LeftDown,
        Direction::Down,
        Direction::RightDown,
        Direction::Right,
    ];

    #[inline]
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(ordinal as usize).copied()
    }

    /// Move `delta` headings to the right (negative = left), clamped at the ends
    pub fn step(self, delta: i32) -> Self {
        let ordinal = (self.ordinal() as i32 + delta).clamp(0, Self::ALL.len() as i32 - 1);
        Self::ALL[ordinal as usize]
    }

    pub fn turn_left(self) -> Self {
        self.step(-1)
    }

    pub fn turn_right(self) -> Self {
        self.step(1)
    }

    /// Facing somewhere downhill (jumping is only allowed here)
    pub fn is_downhill(self) -> bool {
        matches!(
            self,
            Direction::LeftDown | Direction::Down | Direction::RightDown
        )
    }

    /// Fully horizontal ("parked") heading
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Skier sprite for this heading
    pub fn sprite(self) -> Sprite {
        match self {
            Direction::Left => Sprite::SkierLeft,
            Direction::LeftDown => Sprite::SkierLeftDown,
            Direction::Down => Sprite::SkierDown,
            Direction::RightDown => Sprite::SkierRightDown,
            Direction::Right => Sprite::SkierRight,
        }
    }
}
