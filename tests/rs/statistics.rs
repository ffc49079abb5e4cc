//! Integration tests for dataset statistics

use taxon_tree::core::dataset::{default_dataset, parse_dataset};
use taxon_tree::core::statistics::{compute_statistics, DEFAULT_FAMILY_DEPTH};

#[test]
fn germanic_example() {
    let root = parse_dataset(
        r#"{
            "name": "Root",
            "children": [{
                "name": "Germanic",
                "children": [
                    { "name": "English" },
                    { "name": "German" },
                    { "name": "Gothic", "status": "extinct" }
                ]
            }]
        }"#,
    )
    .unwrap();
    let stats = compute_statistics(&root, DEFAULT_FAMILY_DEPTH);
    assert_eq!(stats.total_languages, 3);
    assert_eq!(stats.total_families, 1);
    assert_eq!(stats.living_languages, 2);
    assert_eq!(stats.extinct_languages, 1);
    assert_eq!(stats.family_breakdown.len(), 1);
    assert_eq!(stats.family_breakdown["Germanic"], 3);
}

#[test]
fn living_plus_extinct_is_total() {
    let stats = compute_statistics(&default_dataset(), DEFAULT_FAMILY_DEPTH);
    assert_eq!(
        stats.living_languages + stats.extinct_languages,
        stats.total_languages
    );
}

#[test]
fn breakdown_covers_family_languages() {
    let root = default_dataset();
    let stats = compute_statistics(&root, DEFAULT_FAMILY_DEPTH);
    assert_eq!(stats.family_breakdown.len(), stats.total_families);

    // Isolates hang directly off the root and belong to no family.
    let isolates = root.children().iter().filter(|c| c.is_language()).count();
    assert_eq!(
        stats.family_breakdown.values().sum::<usize>() + isolates,
        stats.total_languages
    );
}

#[test]
fn statistics_serialize_to_json() {
    let stats = compute_statistics(&default_dataset(), DEFAULT_FAMILY_DEPTH);
    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["total_languages"], 100);
    assert_eq!(json["family_breakdown"]["Turkic"], 5);
}
