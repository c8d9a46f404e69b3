//! # Sulk Development Tools
//!
//! Command-line tools for development:
//! - Mission validators
//! - ASCII board inspection with line of sight overlays

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod error;
pub mod render;
pub mod validate;
