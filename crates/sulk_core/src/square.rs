//! Single board squares and their section membership.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::coord::Coord;
use crate::direction::{Facing, Heading};
use crate::feature::{Door, Feature, FeatureKind, Obstacle};

/// Whether a square is part of a corridor or a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SquareKind {
    /// Corridor square.
    #[default]
    Corridor,
    /// Room square.
    Room,
}

/// Identifier of the section (room or corridor) a square belongs to.
///
/// `-1` means unassigned, `0` is the shared corridor section and positive
/// values are room ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(i32);

impl SectionId {
    /// Square not assigned to any section.
    pub const UNASSIGNED: Self = Self(-1);

    /// The corridor section.
    pub const CORRIDOR: Self = Self(0);

    /// Wrap a raw section id.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw integer value.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }

    /// True for room ids (`> 0`).
    #[must_use]
    pub const fn is_room(self) -> bool {
        self.0 > 0
    }

    /// True unless this is [`SectionId::UNASSIGNED`] (or any other negative id).
    #[must_use]
    pub const fn is_assigned(self) -> bool {
        self.0 >= 0
    }

    /// Default section for squares of `kind` that carry no explicit id.
    #[must_use]
    pub const fn default_for(kind: SquareKind) -> Self {
        match kind {
            SquareKind::Corridor => Self::CORRIDOR,
            SquareKind::Room => Self::UNASSIGNED,
        }
    }
}

impl Default for SectionId {
    fn default() -> Self {
        Self::UNASSIGNED
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Serialized description of one square, as found in mission files.
///
/// ```json
/// { "x": 3, "y": 1, "kind": "room", "section": 2 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquareData {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
    /// Corridor or room.
    #[serde(default)]
    pub kind: SquareKind,
    /// Explicit section id; derived from `kind` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<i32>,
}

impl SquareData {
    /// Corridor record at `(x, y)`.
    #[must_use]
    pub const fn corridor(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            kind: SquareKind::Corridor,
            section: None,
        }
    }

    /// Room record at `(x, y)` in room `section`.
    #[must_use]
    pub const fn room(x: i32, y: i32, section: i32) -> Self {
        Self {
            x,
            y,
            kind: SquareKind::Room,
            section: Some(section),
        }
    }

    /// Coordinate of the record.
    #[must_use]
    pub const fn coord(&self) -> Coord {
        Coord::new(self.x, self.y)
    }

    /// Section id, falling back to the kind's default.
    #[must_use]
    pub const fn section_id(&self) -> SectionId {
        match self.section {
            Some(id) => SectionId::new(id),
            None => SectionId::default_for(self.kind),
        }
    }
}

/// A single cell of the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Square {
    coord: Coord,
    kind: SquareKind,
    section: SectionId,
    features: Vec<Feature>,
}

impl Square {
    /// Create a featureless square.
    #[must_use]
    pub const fn new(coord: Coord, kind: SquareKind, section: SectionId) -> Self {
        Self {
            coord,
            kind,
            section,
            features: Vec::new(),
        }
    }

    /// Grid coordinate. Fixed for the square's lifetime.
    #[must_use]
    pub const fn coord(&self) -> Coord {
        self.coord
    }

    /// Corridor or room.
    #[must_use]
    pub const fn kind(&self) -> SquareKind {
        self.kind
    }

    /// Section membership.
    #[must_use]
    pub const fn section(&self) -> SectionId {
        self.section
    }

    /// Features attached to this square.
    #[must_use]
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Attach a feature and return it.
    pub fn add_feature(&mut self, kind: impl Into<FeatureKind>) -> &mut Feature {
        self.features.push(Feature::new(self.coord, kind.into()));
        let last = self.features.len() - 1;
        &mut self.features[last]
    }

    /// Remove every feature.
    pub fn clear_features(&mut self) {
        self.features.clear();
    }

    /// First door on this square, if any.
    #[must_use]
    pub fn door(&self) -> Option<&Door> {
        self.features.iter().find_map(Feature::as_door)
    }

    /// Mutable access to the first door on this square.
    pub fn door_mut(&mut self) -> Option<&mut Door> {
        self.features.iter_mut().find_map(Feature::as_door_mut)
    }

    /// True if any feature forbids entering this square.
    #[must_use]
    pub fn blocks_move(&self) -> bool {
        self.features.iter().any(Obstacle::blocks_move)
    }

    /// True if any feature blocks sight through this square.
    #[must_use]
    pub fn blocks_los(&self) -> bool {
        self.features.iter().any(Obstacle::blocks_los)
    }

    /// True if `other` is one of this square's eight neighbours.
    #[must_use]
    pub fn is_adjacent(&self, other: &Square) -> bool {
        self.coord.is_adjacent(other.coord)
    }

    /// Chebyshev distance to another square.
    #[must_use]
    pub fn distance(&self, other: &Square) -> u32 {
        self.coord.distance(other.coord)
    }

    /// Heading of `other` relative to `facing`; `None` unless adjacent.
    #[must_use]
    pub fn heading_to(&self, other: &Square, facing: Facing) -> Option<Heading> {
        Heading::between(self.coord, other.coord, facing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::Blocker;

    fn corridor(x: i32, y: i32) -> Square {
        Square::new(Coord::new(x, y), SquareKind::Corridor, SectionId::CORRIDOR)
    }

    #[test]
    fn test_section_ids() {
        assert!(!SectionId::UNASSIGNED.is_assigned());
        assert!(SectionId::CORRIDOR.is_assigned());
        assert!(!SectionId::CORRIDOR.is_room());
        assert!(SectionId::new(3).is_room());
        assert_eq!(SectionId::default(), SectionId::UNASSIGNED);
    }

    #[test]
    fn test_square_data_section_fallback() {
        assert_eq!(SquareData::corridor(0, 0).section_id(), SectionId::CORRIDOR);
        assert_eq!(SquareData::room(0, 0, 4).section_id(), SectionId::new(4));
        let bare_room = SquareData {
            section: None,
            ..SquareData::room(1, 1, 0)
        };
        assert_eq!(bare_room.section_id(), SectionId::UNASSIGNED);
    }

    #[test]
    fn test_square_data_json_shape() {
        let data: SquareData =
            serde_json::from_str(r#"{"x": 3, "y": 1, "kind": "room", "section": 2}"#).unwrap();
        assert_eq!(data, SquareData::room(3, 1, 2));

        let data: SquareData = serde_json::from_str(r#"{"x": 0, "y": 4}"#).unwrap();
        assert_eq!(data, SquareData::corridor(0, 4));
    }

    #[test]
    fn test_features_drive_blocking() {
        let mut square = corridor(2, 1);
        assert!(!square.blocks_move());
        assert!(!square.blocks_los());

        let feature = square.add_feature(Door::new(Facing::North));
        assert_eq!(feature.square(), Coord::new(2, 1));
        assert!(square.blocks_move());
        assert!(square.blocks_los());

        square.door_mut().unwrap().open();
        assert!(!square.blocks_move());

        square.add_feature(Blocker::SMOKE);
        assert!(!square.blocks_move());
        assert!(square.blocks_los());

        square.clear_features();
        assert!(square.features().is_empty());
        assert!(square.door().is_none());
    }

    #[test]
    fn test_heading_and_distance() {
        let a = corridor(2, 2);
        assert_eq!(a.heading_to(&corridor(2, 1), Facing::North), Some(Heading::Forward));
        assert_eq!(a.heading_to(&corridor(2, 2), Facing::North), None);
        assert_eq!(a.heading_to(&corridor(0, 0), Facing::North), None);
        assert_eq!(a.distance(&corridor(4, 5)), 3);
        assert!(a.is_adjacent(&corridor(3, 3)));
    }
}
