//! Error types for the rules core.
//!
//! Only mission loading can fail. Illegal actions and off-board queries are
//! ordinary outcomes and are reported through `Option`/`bool` returns instead.

use thiserror::Error;

/// Result type alias using [`GameError`].
pub type Result<T> = std::result::Result<T, GameError>;

/// Top-level error type for the rules core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Mission data failed validation.
    #[error("Invalid mission: {0}")]
    InvalidMission(String),

    /// A square record lies outside the declared board.
    #[error("Square ({x}, {y}) lies outside the {width}x{height} board")]
    SquareOutOfBounds {
        /// Column of the offending record.
        x: i32,
        /// Row of the offending record.
        y: i32,
        /// Declared board width.
        width: u32,
        /// Declared board height.
        height: u32,
    },

    /// The board would be too large to build.
    #[error("A {width}x{height} board exceeds the supported size")]
    BoardTooLarge {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// The same coordinate was listed twice.
    #[error("Square ({x}, {y}) is listed more than once")]
    DuplicateSquare {
        /// Column of the duplicated record.
        x: i32,
        /// Row of the duplicated record.
        y: i32,
    },

    /// Mission file parsing error.
    #[error("Failed to parse mission '{path}': {message}")]
    MissionParse {
        /// Path or name of the source that failed to parse.
        path: String,
        /// Error message.
        message: String,
    },

    /// No mission file exists for the requested name.
    #[error("Mission not found: {0}")]
    MissionNotFound(String),

    /// Reading a mission source failed.
    #[error("Failed to read '{path}': {message}")]
    Io {
        /// Path that could not be read.
        path: String,
        /// Error message.
        message: String,
    },
}
