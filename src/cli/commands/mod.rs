//! CLI command handlers for `taxontree`.
//!
//! Each subcommand is implemented in its own submodule.

pub mod config;
pub mod lookup;
pub mod render;
pub mod stats;
pub mod tree;
