//! Integer grid coordinates.
//!
//! The board uses screen orientation: `x` grows to the right and `y` grows
//! downwards, so "north" is `y - 1`. Coordinates are signed so that
//! neighbours of edge squares can be named and then rejected by bounds checks.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A square position on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coord {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Coord {
    /// The origin square.
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Coordinate shifted by `(dx, dy)`, saturating at the `i32` range.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Displacement from `self` to `other`.
    ///
    /// Widened to `i64` so that any two coordinates have a representable
    /// displacement.
    #[must_use]
    pub const fn delta_to(self, other: Self) -> (i64, i64) {
        (
            other.x as i64 - self.x as i64,
            other.y as i64 - self.y as i64,
        )
    }

    /// Chebyshev (king-move) distance to another coordinate.
    #[must_use]
    pub fn distance(self, other: Self) -> u32 {
        let (dx, dy) = self.delta_to(other);
        // At most 2^32 - 1, so the conversion cannot saturate.
        u32::try_from(dx.unsigned_abs().max(dy.unsigned_abs())).unwrap_or(u32::MAX)
    }

    /// True if `other` is one of the eight neighbours of `self`.
    #[must_use]
    pub fn is_adjacent(self, other: Self) -> bool {
        self.distance(other) == 1
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Chebyshev distance for a displacement.
#[must_use]
pub fn chebyshev(dx: i32, dy: i32) -> u32 {
    dx.unsigned_abs().max(dy.unsigned_abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chebyshev() {
        assert_eq!(chebyshev(3, 5), 5);
        assert_eq!(chebyshev(-3, -5), 5);
        assert_eq!(chebyshev(3, -5), 5);
        assert_eq!(chebyshev(0, 0), 0);
    }

    #[test]
    fn test_distance() {
        let a = Coord::new(2, 2);
        assert_eq!(a.distance(Coord::new(4, 5)), 3);
        assert_eq!(a.distance(a), 0);
    }

    #[test]
    fn test_adjacency_is_eight_connected() {
        let centre = Coord::new(2, 2);
        let mut count = 0;
        for y in 0..5 {
            for x in 0..5 {
                if centre.is_adjacent(Coord::new(x, y)) {
                    count += 1;
                }
            }
        }
        assert_eq!(count, 8);
        assert!(!centre.is_adjacent(centre));
        assert!(!centre.is_adjacent(Coord::new(0, 0)));
    }

    #[test]
    fn test_extreme_coordinates() {
        let low = Coord::new(i32::MIN, i32::MIN);
        let high = Coord::new(i32::MAX, i32::MAX);
        assert_eq!(low.delta_to(high), (u32::MAX as i64, u32::MAX as i64));
        assert_eq!(low.distance(high), u32::MAX);
        assert!(!low.is_adjacent(high));
        assert!(!Coord::new(2, 2).is_adjacent(Coord::new(i32::MIN, 0)));

        assert_eq!(high.offset(1, 1), high);
        assert_eq!(low.offset(-1, 0), low);
    }
}
