//! Core layout and interaction engine, independent of any display

pub mod camera;
pub mod config;
pub mod dataset;
pub mod geometry;
pub mod layout;
pub mod models;
pub mod navigation;
pub mod render;
pub mod session;
pub mod statistics;

/// Returns the current version of the `taxon-tree` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
