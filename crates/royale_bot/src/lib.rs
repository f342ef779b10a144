//! Turn driver for the royale decision core.
//!
//! Reads the game state the server prints on stdin, asks the
//! [`Planner`](royale_core::planner::Planner) for orders and writes them to
//! stdout.
//!
//! # Protocol
//!
//! - **stdin**: site layout once, then one state block per turn
//! - **stdout**: exactly two order lines per turn
//! - **stderr**: logs
//!
//! See [`protocol`] for the input layout.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod protocol;
pub mod runner;

pub use protocol::{read_layout, read_turn, ProtocolError, SiteLayout, TokenReader};
pub use runner::BotRunner;
