//! # Sulk Test Utilities
//!
//! Shared testing utilities for all crates:
//! - Board, piece and mission fixtures
//! - Scripted piece actions for legality checks
//! - Property-based testing strategies

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod actions;
pub mod fixtures;

/// Re-export proptest for convenience.
pub use proptest;
