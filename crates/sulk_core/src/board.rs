//! The board: a dense grid of squares plus spatial queries.
//!
//! Squares are stored in row-major order and never move, so neighbourhood
//! lookups are memoized per square for the lifetime of the board.
//!
//! # Example
//!
//! ```
//! use sulk_core::board::Board;
//! use sulk_core::coord::Coord;
//!
//! let board = Board::new(5, 5);
//! assert_eq!(board.all_squares().count(), 25);
//! assert!(board.get(5, 0).is_none());
//! assert_eq!(board.adjacents_of(Coord::new(0, 0)).len(), 3);
//! ```

use std::cell::OnceCell;
use std::collections::{BTreeMap, HashSet};

use crate::coord::Coord;
use crate::error::{GameError, Result};
use crate::feature::{Door, FeatureKind};
use crate::square::{SectionId, Square, SquareData, SquareKind};

/// Offsets of the 8-neighbourhood in row-major order.
const NEIGHBOURS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Largest number of squares a board may hold.
pub const MAX_BOARD_SQUARES: u64 = 1 << 20;

/// Check that a `width x height` board can be built.
///
/// Each side must fit in an `i32` coordinate and the area may not exceed
/// [`MAX_BOARD_SQUARES`]. Zero-sized boards are allowed.
///
/// # Errors
///
/// Returns [`GameError::BoardTooLarge`] otherwise.
pub fn check_dimensions(width: u32, height: u32) -> Result<()> {
    let side_ok = i32::try_from(width).is_ok() && i32::try_from(height).is_ok();
    let area = u64::from(width) * u64::from(height);
    if side_ok && area <= MAX_BOARD_SQUARES {
        Ok(())
    } else {
        Err(GameError::BoardTooLarge { width, height })
    }
}

/// Check square records against a `width x height` board.
///
/// # Errors
///
/// Returns [`GameError::SquareOutOfBounds`] for a record outside
/// `[0, width) x [0, height)` and [`GameError::DuplicateSquare`] when a
/// coordinate is listed twice.
pub fn validate_records(width: u32, height: u32, records: &[SquareData]) -> Result<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        let in_bounds = u32::try_from(record.x).is_ok_and(|x| x < width)
            && u32::try_from(record.y).is_ok_and(|y| y < height);
        if !in_bounds {
            return Err(GameError::SquareOutOfBounds {
                x: record.x,
                y: record.y,
                width,
                height,
            });
        }
        if !seen.insert(record.coord()) {
            return Err(GameError::DuplicateSquare {
                x: record.x,
                y: record.y,
            });
        }
    }
    Ok(())
}

/// All squares of a mission plus cached adjacency.
///
/// The adjacency cache uses interior mutability and is not thread-safe;
/// each game owns its own board.
#[derive(Debug, Clone)]
pub struct Board {
    width: u32,
    height: u32,
    /// Row-major, exactly `width * height` entries.
    squares: Vec<Square>,
    /// Lazily computed neighbours, parallel to `squares`.
    adjacency: Vec<OnceCell<Vec<Coord>>>,
}

impl Board {
    /// Create a board with no listed squares.
    ///
    /// Every coordinate is backfilled as an unassigned corridor square.
    ///
    /// # Panics
    ///
    /// Panics if the dimensions are rejected by [`check_dimensions`]. Use
    /// [`Board::from_squares`] for untrusted sizes.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        assert!(
            check_dimensions(width, height).is_ok(),
            "Board {width}x{height} exceeds the supported size"
        );

        let count = (width as usize) * (height as usize);
        let mut squares = Vec::with_capacity(count);
        for y in 0..height {
            for x in 0..width {
                squares.push(Square::new(
                    Coord::new(x as i32, y as i32),
                    SquareKind::Corridor,
                    SectionId::UNASSIGNED,
                ));
            }
        }
        Self {
            width,
            height,
            squares,
            adjacency: vec![OnceCell::new(); count],
        }
    }

    /// Build a board from explicit square records.
    ///
    /// Listed squares take their kind and section from the record; unlisted
    /// coordinates are backfilled as in [`Board::new`].
    ///
    /// # Errors
    ///
    /// Returns [`GameError::BoardTooLarge`] for dimensions rejected by
    /// [`check_dimensions`], and the errors of [`validate_records`].
    pub fn from_squares(width: u32, height: u32, records: &[SquareData]) -> Result<Self> {
        check_dimensions(width, height)?;
        validate_records(width, height, records)?;

        let mut board = Self::new(width, height);
        for record in records {
            if let Some(index) = board.index_of(record.coord()) {
                board.squares[index] = Square::new(record.coord(), record.kind, record.section_id());
            }
        }

        #[cfg(feature = "debug-validation")]
        board.validate_layout();

        tracing::debug!(
            width,
            height,
            listed = records.len(),
            "Board constructed"
        );
        Ok(board)
    }

    /// Board width in squares.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Board height in squares.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Check if a coordinate lies on the board.
    #[must_use]
    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as u32) < self.width
            && (coord.y as u32) < self.height
    }

    #[inline]
    fn index_of(&self, coord: Coord) -> Option<usize> {
        if self.in_bounds(coord) {
            Some((coord.y as usize) * (self.width as usize) + (coord.x as usize))
        } else {
            None
        }
    }

    /// Square at `(x, y)`, or `None` when off the board.
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<&Square> {
        self.square(Coord::new(x, y))
    }

    /// Square at `coord`, or `None` when off the board.
    #[must_use]
    pub fn square(&self, coord: Coord) -> Option<&Square> {
        self.index_of(coord).map(|i| &self.squares[i])
    }

    /// Mutable square at `coord`.
    pub fn square_mut(&mut self, coord: Coord) -> Option<&mut Square> {
        self.index_of(coord).map(|i| &mut self.squares[i])
    }

    /// Every square, row by row.
    pub fn all_squares(&self) -> impl ExactSizeIterator<Item = &Square> {
        self.squares.iter()
    }

    /// The in-bounds 8-neighbours of `coord`, in row-major order.
    ///
    /// Computed once per square and then served from the cache, so repeated
    /// calls return the same slice. Off-board coordinates have no neighbours.
    #[must_use]
    pub fn adjacents_of(&self, coord: Coord) -> &[Coord] {
        match self.index_of(coord) {
            Some(index) => self.adjacency[index].get_or_init(|| self.compute_adjacents(coord)),
            None => &[],
        }
    }

    /// The neighbouring squares of `coord`.
    pub fn adjacent_squares(&self, coord: Coord) -> impl Iterator<Item = &Square> + '_ {
        self.adjacents_of(coord)
            .iter()
            .filter_map(move |c| self.square(*c))
    }

    fn compute_adjacents(&self, coord: Coord) -> Vec<Coord> {
        NEIGHBOURS
            .iter()
            .map(|&(dx, dy)| coord.offset(dx, dy))
            .filter(|c| self.in_bounds(*c))
            .collect()
    }

    /// True if a piece may stand on `coord`: on the board and not blocked by
    /// any feature.
    #[must_use]
    pub fn is_passable(&self, coord: Coord) -> bool {
        self.square(coord).is_some_and(|s| !s.blocks_move())
    }

    /// True if the square at `coord` blocks line of sight. Off-board
    /// coordinates never block.
    #[must_use]
    pub fn blocks_los(&self, coord: Coord) -> bool {
        self.square(coord).is_some_and(Square::blocks_los)
    }

    /// Attach a feature to the square at `coord`.
    /// Returns `false` if out of bounds.
    pub fn add_feature(&mut self, coord: Coord, kind: impl Into<FeatureKind>) -> bool {
        match self.square_mut(coord) {
            Some(square) => {
                square.add_feature(kind);
                true
            }
            None => false,
        }
    }

    /// The door on the square at `coord`, if any.
    pub fn door_mut(&mut self, coord: Coord) -> Option<&mut Door> {
        self.square_mut(coord).and_then(Square::door_mut)
    }

    /// Toggle the door at `coord`. Returns `false` if there is no door.
    pub fn toggle_door(&mut self, coord: Coord) -> bool {
        match self.door_mut(coord) {
            Some(door) => {
                door.toggle();
                tracing::debug!(%coord, open = door.is_open(), "Door toggled");
                true
            }
            None => false,
        }
    }

    /// Coordinates of every square in section `id`, row by row.
    #[must_use]
    pub fn section(&self, id: SectionId) -> Vec<Coord> {
        self.squares
            .iter()
            .filter(|s| s.section() == id)
            .map(Square::coord)
            .collect()
    }

    /// All squares grouped by section, in ascending section order.
    #[must_use]
    pub fn sections(&self) -> BTreeMap<SectionId, Vec<Coord>> {
        let mut sections: BTreeMap<SectionId, Vec<Coord>> = BTreeMap::new();
        for square in &self.squares {
            sections
                .entry(square.section())
                .or_default()
                .push(square.coord());
        }
        sections
    }

    #[cfg(feature = "debug-validation")]
    fn validate_layout(&self) {
        assert_eq!(
            self.squares.len(),
            (self.width as usize) * (self.height as usize),
            "Board must hold exactly width * height squares"
        );
        for (i, square) in self.squares.iter().enumerate() {
            assert_eq!(
                self.index_of(square.coord()),
                Some(i),
                "Square {} stored at the wrong index",
                square.coord()
            );
        }
    }
}
