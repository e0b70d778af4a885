//! CLI tool for inspecting consistent hash ring placements.
//!
//! Provides commands for:
//! - Looking up the nodes responsible for a key
//! - Describing the ring
//! - Showing how much of the hash space each node owns
//! - Dumping virtual node positions

pub mod commands;
pub mod config;
pub mod logging;

pub use commands::{Command, CommandResult};
pub use config::CliConfig;
