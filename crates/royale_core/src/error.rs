//! Error types for turn snapshots.

use thiserror::Error;

use crate::entities::Side;

/// Result type alias using [`GameError`].
pub type Result<T> = std::result::Result<T, GameError>;

/// A turn snapshot that cannot be planned on.
///
/// These indicate the state rebuild went wrong, not a recoverable
/// in-game situation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// A player has no queen in the unit list.
    #[error("No queen reported for {0:?} player")]
    MissingQueen(Side),

    /// A player has more than one queen in the unit list.
    #[error("More than one queen reported for {0:?} player")]
    DuplicateQueen(Side),

    /// A unit without an owner.
    #[error("Unit at ({x}, {y}) has no owner")]
    UnownedUnit {
        /// Truncated x coordinate.
        x: i32,
        /// Truncated y coordinate.
        y: i32,
    },
}
