//! Obstacles attached to squares.
//!
//! Every feature answers two questions through [`Obstacle`]: may a piece
//! enter its square, and can sight pass through it.

use serde::{Deserialize, Serialize};

use crate::coord::Coord;
use crate::direction::Facing;

/// Capability queries shared by all features.
pub trait Obstacle {
    /// If true this feature forbids entering its square.
    fn blocks_move(&self) -> bool;

    /// If true this feature blocks line of sight through its square.
    fn blocks_los(&self) -> bool;
}

/// A door that can be opened and closed. Doors start closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Door {
    facing: Facing,
    closed: bool,
}

impl Door {
    /// Create a closed door.
    #[must_use]
    pub const fn new(facing: Facing) -> Self {
        Self {
            facing,
            closed: true,
        }
    }

    /// Direction the door faces.
    #[must_use]
    pub const fn facing(&self) -> Facing {
        self.facing
    }

    /// Whether the door is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !self.closed
    }

    /// Open the door.
    pub fn open(&mut self) {
        self.closed = false;
    }

    /// Close the door.
    pub fn close(&mut self) {
        self.closed = true;
    }

    /// Flip between open and closed.
    pub fn toggle(&mut self) {
        if self.closed {
            self.open();
        } else {
            self.close();
        }
    }
}

impl Obstacle for Door {
    fn blocks_move(&self) -> bool {
        self.closed
    }

    fn blocks_los(&self) -> bool {
        self.closed
    }
}

/// A static obstacle with fixed blocking behaviour (walls, rubble, smoke).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Blocker {
    blocks_move: bool,
    blocks_los: bool,
}

impl Blocker {
    /// Solid wall: blocks movement and sight.
    pub const WALL: Self = Self::new(true, true);

    /// Impassable but see-through (e.g. a grating).
    pub const BARRIER: Self = Self::new(true, false);

    /// Passable but opaque (e.g. smoke).
    pub const SMOKE: Self = Self::new(false, true);

    /// Create a blocker with explicit behaviour.
    #[must_use]
    pub const fn new(blocks_move: bool, blocks_los: bool) -> Self {
        Self {
            blocks_move,
            blocks_los,
        }
    }
}

impl Obstacle for Blocker {
    fn blocks_move(&self) -> bool {
        self.blocks_move
    }

    fn blocks_los(&self) -> bool {
        self.blocks_los
    }
}

/// The concrete kind of a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureKind {
    /// An openable door.
    Door(Door),
    /// A fixed obstacle.
    Blocker(Blocker),
}

impl Obstacle for FeatureKind {
    fn blocks_move(&self) -> bool {
        match self {
            Self::Door(door) => door.blocks_move(),
            Self::Blocker(blocker) => blocker.blocks_move(),
        }
    }

    fn blocks_los(&self) -> bool {
        match self {
            Self::Door(door) => door.blocks_los(),
            Self::Blocker(blocker) => blocker.blocks_los(),
        }
    }
}

impl From<Door> for FeatureKind {
    fn from(door: Door) -> Self {
        Self::Door(door)
    }
}

impl From<Blocker> for FeatureKind {
    fn from(blocker: Blocker) -> Self {
        Self::Blocker(blocker)
    }
}

/// A feature attached to a square.
///
/// The square owns its features; `square` only records where the feature sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Feature {
    square: Coord,
    kind: FeatureKind,
}

impl Feature {
    pub(crate) const fn new(square: Coord, kind: FeatureKind) -> Self {
        Self { square, kind }
    }

    /// Coordinate of the square this feature is attached to.
    #[must_use]
    pub const fn square(&self) -> Coord {
        self.square
    }

    /// The feature's kind.
    #[must_use]
    pub const fn kind(&self) -> &FeatureKind {
        &self.kind
    }

    /// The door, if this feature is one.
    #[must_use]
    pub fn as_door(&self) -> Option<&Door> {
        match &self.kind {
            FeatureKind::Door(door) => Some(door),
            FeatureKind::Blocker(_) => None,
        }
    }

    /// Mutable access to the door, if this feature is one.
    pub fn as_door_mut(&mut self) -> Option<&mut Door> {
        match &mut self.kind {
            FeatureKind::Door(door) => Some(door),
            FeatureKind::Blocker(_) => None,
        }
    }
}

impl Obstacle for Feature {
    fn blocks_move(&self) -> bool {
        self.kind.blocks_move()
    }

    fn blocks_los(&self) -> bool {
        self.kind.blocks_los()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_door_blocks_everything() {
        let door = Door::new(Facing::North);
        assert!(!door.is_open());
        assert!(door.blocks_move());
        assert!(door.blocks_los());
    }

    #[test]
    fn test_open_door_blocks_nothing() {
        let mut door = Door::new(Facing::North);
        door.open();
        assert!(door.is_open());
        assert!(!door.blocks_move());
        assert!(!door.blocks_los());

        door.close();
        assert!(door.blocks_move());
    }

    #[test]
    fn test_toggle_flips_state() {
        let mut door = Door::new(Facing::East);
        door.toggle();
        assert!(!door.blocks_move());
        door.toggle();
        assert!(door.blocks_move());
        assert_eq!(door.facing(), Facing::East);
    }

    #[test]
    fn test_blocker_presets() {
        assert!(Blocker::WALL.blocks_move() && Blocker::WALL.blocks_los());
        assert!(Blocker::BARRIER.blocks_move() && !Blocker::BARRIER.blocks_los());
        assert!(!Blocker::SMOKE.blocks_move() && Blocker::SMOKE.blocks_los());
    }

    #[test]
    fn test_feature_dispatch() {
        let mut feature = Feature::new(Coord::new(1, 2), Door::new(Facing::South).into());
        assert_eq!(feature.square(), Coord::new(1, 2));
        assert!(feature.blocks_los());

        feature.as_door_mut().unwrap().open();
        assert!(!feature.blocks_los());
        assert!(feature.as_door().unwrap().is_open());

        let wall = Feature::new(Coord::ZERO, Blocker::WALL.into());
        assert!(wall.as_door().is_none());
        assert!(wall.blocks_move());
    }
}
