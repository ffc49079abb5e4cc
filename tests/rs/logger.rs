//! Integration tests for logger behavior as the engine uses it.

use logger::{debug, error, info, set_level, set_level_from_str, warn, Level};
use taxon_tree::core::dataset::default_dataset;
use taxon_tree::core::layout::{layout, LayoutConfig};
use taxon_tree::core::models::TaxonTree;

#[test]
fn level_parse_accepts_valid() {
    assert!(set_level_from_str("error"));
    assert!(set_level_from_str("warn"));
    assert!(set_level_from_str("info"));
    assert!(set_level_from_str("debug"));
}

#[test]
fn level_parse_rejects_invalid() {
    assert!(!set_level_from_str("invalid"));
    assert!(!set_level_from_str(""));
}

#[test]
fn logs_do_not_panic() {
    set_level(Level::Debug);
    info!("info integration");
    warn!("warn integration");
    error!("error integration");
    debug!("debug integration");
}

#[test]
fn engine_logging_at_debug_does_not_panic() {
    set_level(Level::Debug);
    logger::enable_debug();
    let mut tree = TaxonTree::build(&default_dataset(), 3);
    let result = layout(&mut tree, &LayoutConfig::default());
    assert!(!result.visible.is_empty());
}
