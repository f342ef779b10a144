//! # Royale Core
//!
//! Decision engine for a two-player base-building contest: each turn it
//! reads the observable state and produces one queen action and one
//! training order.
//!
//! This crate contains **only** deterministic logic:
//! - No IO (the `royale_bot` crate owns stdin/stdout)
//! - No randomness
//! - No floating-point math (uses fixed-point)
//!
//! ## Crate Structure
//!
//! - [`math`] - Fixed-point vectors
//! - [`spatial`] - Nearest-entity queries
//! - [`entities`] - Sites, units and their categories
//! - [`tally`] - Per-category counts keyed by enum
//! - [`competitor`] - Per-player snapshot rebuilt every turn
//! - [`turn`] - The full turn snapshot handed to the planners
//! - [`allocator`] - Proportional-fair category selection
//! - [`planner`] - Queen and training strategies
//! - [`policy`] - Target mixes and defence thresholds
//! - [`orders`] - Output commands

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod allocator;
pub mod competitor;
pub mod entities;
pub mod error;
pub mod math;
pub mod orders;
pub mod planner;
pub mod policy;
pub mod spatial;
pub mod tally;
pub mod turn;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::allocator::{allocate, select_category};
    pub use crate::competitor::Competitor;
    pub use crate::entities::{
        BuildingSite, Entity, Placement, Side, SiteId, StructureKind, Unit, UnitKind, UnitRole,
    };
    pub use crate::error::{GameError, Result};
    pub use crate::math::{Fixed, Vec2Fixed};
    pub use crate::orders::{QueenAction, TrainingOrder, TurnOrders};
    pub use crate::planner::{queen_action, training_order, Planner, TouchHistory};
    pub use crate::policy::{DefenseRules, Policy, PolicyError};
    pub use crate::spatial::{nearest, Nearest, Positioned};
    pub use crate::tally::{Category, Tally};
    pub use crate::turn::TurnState;
}
