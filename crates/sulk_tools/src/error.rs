//! Tool errors.

use sulk_core::error::GameError;
use thiserror::Error;

/// Errors raised by the development tools.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The rules core rejected something.
    #[error(transparent)]
    Game(#[from] GameError),

    /// Some mission files failed validation.
    #[error("{failed} of {total} mission files failed validation")]
    ValidationFailed {
        /// Files that failed.
        failed: usize,
        /// Files checked.
        total: usize,
    },

    /// No mission files were found under the given paths.
    #[error("No mission files found")]
    NothingToValidate,

    /// A coordinate argument could not be parsed.
    #[error("Invalid coordinate '{0}', expected x,y")]
    BadCoord(String),

    /// A requested square is not on the board.
    #[error("Square {0} is not on the board")]
    OffBoard(String),
}

/// Result type for tool operations.
pub type Result<T> = std::result::Result<T, ToolError>;
