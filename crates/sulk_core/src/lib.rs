//! # Sulk Core
//!
//! Rules engine for a grid-based tactical board game.
//!
//! This crate contains **only** game rules:
//! - No rendering
//! - No input handling
//! - No networking or persistence
//!
//! Everything is synchronous and deterministic. The only I/O is reading
//! mission files in [`mission::MissionLibrary`].
//!
//! ## Crate Structure
//!
//! - [`board`] - Squares on a grid, adjacency and section queries
//! - [`los`] - Line of sight tracing
//! - [`feature`] - Doors and other obstacles
//! - [`direction`] - Facing, turns and relative headings
//! - [`costs`] - Action point tables
//! - [`piece`] - Pieces and their move/turn actions
//! - [`phase`] - Turn phases and the game cycle
//! - [`mission`] - Mission data loading
//! - [`engine`] - Facade owning a whole game

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod board;
pub mod coord;
pub mod costs;
pub mod direction;
pub mod engine;
pub mod error;
pub mod feature;
pub mod los;
pub mod mission;
pub mod phase;
pub mod piece;
pub mod square;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::board::Board;
    pub use crate::coord::{chebyshev, Coord};
    pub use crate::costs::{move_cost, turn_cost, AP_PER_TURN};
    pub use crate::direction::{turn, Facing, Heading, Turn};
    pub use crate::engine::{GameEngine, PieceId};
    pub use crate::error::{GameError, Result};
    pub use crate::feature::{Blocker, Door, Feature, FeatureKind, Obstacle};
    pub use crate::los::has_line_of_sight;
    pub use crate::mission::{CompiledMission, MissionData, MissionLibrary};
    pub use crate::phase::{CycleEvent, GameCycle, Phase};
    pub use crate::piece::{Piece, PieceKind, Rejection, Side};
    pub use crate::square::{SectionId, Square, SquareData, SquareKind};
}
