//! Integration smoke tests for `taxon_tree`

use taxon_tree::core::dataset::default_dataset;
use taxon_tree::core::models::TaxonTree;
use taxon_tree::get_version;

#[test]
fn version_is_not_empty() {
    let v = get_version();
    assert!(!v.trim().is_empty());
}

#[test]
fn default_dataset_builds_a_tree() {
    let tree = TaxonTree::build(&default_dataset(), 3);
    assert!(!tree.is_empty());
    assert!(tree.find_by_name("English").is_some());
    assert!(tree.visible_ids().len() < tree.len());
}
