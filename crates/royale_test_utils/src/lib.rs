//! # Royale Test Utilities
//!
//! Shared testing utilities for all crates:
//! - Fixture helpers for sites, units and whole turns
//! - Property-based testing strategies

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod strategies;

pub use fixtures::TurnBuilder;

/// Re-export proptest for convenience.
pub use proptest;
