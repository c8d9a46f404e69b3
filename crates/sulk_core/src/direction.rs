//! Facing, turning and relative headings.
//!
//! A [`Facing`] is one of the four cardinal directions, numbered clockwise
//! from north. A [`Heading`] names where an adjacent square lies relative to
//! a piece's facing, in eight 45° steps.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::coord::Coord;

/// Cardinal facing of a piece or door.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    /// Towards `y - 1`.
    #[default]
    North,
    /// Towards `x + 1`.
    East,
    /// Towards `y + 1`.
    South,
    /// Towards `x - 1`.
    West,
}

impl Facing {
    /// All facings in clockwise order starting at north.
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Index in quarter turns clockwise from north (`0..4`).
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }

    /// Facing for a quarter-turn index, taken modulo 4.
    #[must_use]
    pub const fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Self::North,
            1 => Self::East,
            2 => Self::South,
            _ => Self::West,
        }
    }

    /// Facing after performing `turn`.
    #[must_use]
    pub const fn turned(self, turn: Turn) -> Self {
        Self::from_index(self.index() + turn.quarters())
    }

    /// The facing directly behind.
    #[must_use]
    pub const fn opposite(self) -> Self {
        self.turned(Turn::About)
    }

    /// Unit step `(dx, dy)` one square ahead.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }

    /// The square one step ahead of `from`.
    #[must_use]
    pub const fn step(self, from: Coord) -> Coord {
        let (dx, dy) = self.offset();
        from.offset(dx, dy)
    }
}

/// Rotate `facing` by a signed number of quarter turns (-1 left, +1 right, +2 about).
#[must_use]
pub fn turn(facing: Facing, delta: i32) -> Facing {
    facing.turned(Turn::from_delta(delta))
}

/// A rotation in quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Turn {
    /// Keep the current facing.
    None,
    /// 90° clockwise.
    Right,
    /// 180°.
    About,
    /// 90° counter-clockwise.
    Left,
}

impl Turn {
    /// Normalise a signed quarter-turn count (`-1`, `1`, `2`, ...).
    #[must_use]
    pub const fn from_delta(delta: i32) -> Self {
        match delta.rem_euclid(4) {
            0 => Self::None,
            1 => Self::Right,
            2 => Self::About,
            _ => Self::Left,
        }
    }

    /// Clockwise quarter turns (`0..4`).
    #[must_use]
    pub const fn quarters(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Right => 1,
            Self::About => 2,
            Self::Left => 3,
        }
    }

    /// The turn that takes `from` to `to`.
    #[must_use]
    pub const fn between(from: Facing, to: Facing) -> Self {
        Self::from_delta(to.index() as i32 - from.index() as i32)
    }
}

/// Direction of an adjacent square relative to a facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    /// Straight ahead.
    Forward,
    /// Ahead and to the right.
    ForwardRight,
    /// Side-step right.
    Right,
    /// Behind and to the right.
    BackRight,
    /// Straight behind.
    Back,
    /// Behind and to the left.
    BackLeft,
    /// Side-step left.
    Left,
    /// Ahead and to the left.
    ForwardLeft,
}

impl Heading {
    /// All headings in clockwise order starting at forward.
    pub const ALL: [Self; 8] = [
        Self::Forward,
        Self::ForwardRight,
        Self::Right,
        Self::BackRight,
        Self::Back,
        Self::BackLeft,
        Self::Left,
        Self::ForwardLeft,
    ];

    /// Heading of `to` as seen from `from` by a piece with `facing`.
    ///
    /// Returns `None` unless the squares are distinct 8-neighbours.
    #[must_use]
    pub fn between(from: Coord, to: Coord, facing: Facing) -> Option<Self> {
        let (dx, dy) = from.delta_to(to);
        let octant = compass_octant(dx, dy)?;
        // One quarter turn of facing is two octants.
        let relative = (octant + 8 - 2 * facing.index()) % 8;
        Some(Self::ALL[relative as usize])
    }

    /// Short label (`F`, `FR`, `R`, ...).
    #[must_use]
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::Forward => "F",
            Self::ForwardRight => "FR",
            Self::Right => "R",
            Self::BackRight => "BR",
            Self::Back => "B",
            Self::BackLeft => "BL",
            Self::Left => "L",
            Self::ForwardLeft => "FL",
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// Absolute 8-way direction of a unit displacement, clockwise from north.
const fn compass_octant(dx: i64, dy: i64) -> Option<u8> {
    match (dx, dy) {
        (0, -1) => Some(0),
        (1, -1) => Some(1),
        (1, 0) => Some(2),
        (1, 1) => Some(3),
        (0, 1) => Some(4),
        (-1, 1) => Some(5),
        (-1, 0) => Some(6),
        (-1, -1) => Some(7),
        _ => None,
    }
}
