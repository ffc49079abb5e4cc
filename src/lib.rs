//! Collapsible taxonomy tree engine
//!
//! Lays out a nested language-family dataset as a left-to-right dendrogram,
//! expands and collapses subtrees on demand, animates between layouts and
//! drives a pan/zoom camera. Hosts talk to it through [`core::session::Session`].

pub mod core;

pub use crate::core::{config, get_version};
