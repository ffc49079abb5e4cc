//! Taxonomy statistics
//!
//! Computed straight from the raw dataset (not the arena), so the result does
//! not depend on what is currently expanded.

use crate::core::models::TaxonNode;
use serde::Serialize;
use std::collections::BTreeMap;

/// Depth of the nodes counted as top-level families
pub const DEFAULT_FAMILY_DEPTH: usize = 1;

/// Language count per top-level family, keyed by family name
pub type FamilyBreakdown = BTreeMap<String, usize>;

/// Aggregate counts over a taxonomy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    /// Number of languages (leaves)
    pub total_languages: usize,
    /// Number of top-level families
    pub total_families: usize,
    /// Languages whose status is not `"extinct"`
    pub living_languages: usize,
    /// Languages whose status is `"extinct"`
    pub extinct_languages: usize,
    /// Languages under each top-level family
    pub family_breakdown: FamilyBreakdown,
}

/// One row of the family ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FamilySize {
    /// Family name
    pub name: String,
    /// Languages under it
    pub languages: usize,
}

impl Statistics {
    /// Families ordered by language count, largest first (ties by name)
    #[must_use]
    pub fn families_by_size(&self) -> Vec<FamilySize> {
        let mut families: Vec<FamilySize> = self
            .family_breakdown
            .iter()
            .map(|(name, &languages)| FamilySize {
                name: name.clone(),
                languages,
            })
            .collect();
        families.sort_by(|a, b| b.languages.cmp(&a.languages).then_with(|| a.name.cmp(&b.name)));
        families
    }

    /// The family with the most languages, if there is any family
    #[must_use]
    pub fn largest_family(&self) -> Option<FamilySize> {
        self.families_by_size().into_iter().next()
    }
}

/// Compute statistics for a taxonomy.
///
/// A node with children at exactly `family_depth` below the root counts as
/// one family and contributes its leaf count to the breakdown. Every leaf
/// counts as a language, living unless its status is `"extinct"`. The root is
/// never a family; an empty `children` array reads as a leaf.
#[must_use]
pub fn compute_statistics(root: &TaxonNode, family_depth: usize) -> Statistics {
    let mut stats = Statistics::default();
    traverse(root, 0, family_depth, &mut stats);
    stats
}

fn traverse(node: &TaxonNode, depth: usize, family_depth: usize, stats: &mut Statistics) {
    if node.is_language() {
        stats.total_languages += 1;
        if node.is_extinct() {
            stats.extinct_languages += 1;
        } else {
            stats.living_languages += 1;
        }
        return;
    }

    if depth > 0 && depth == family_depth {
        stats
            .family_breakdown
            .insert(node.name.clone(), count_languages(node));
        stats.total_families += 1;
    }

    for child in node.children() {
        traverse(child, depth + 1, family_depth, stats);
    }
}

/// Number of languages (leaves) under `node`, counting `node` itself if it is one
#[must_use]
pub fn count_languages(node: &TaxonNode) -> usize {
    if node.is_language() {
        return 1;
    }
    node.children().iter().map(count_languages).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn germanic() -> TaxonNode {
        TaxonNode::family(
            "Root",
            vec![TaxonNode::family(
                "Germanic",
                vec![
                    TaxonNode::language("English"),
                    TaxonNode::language("German"),
                    TaxonNode::language("Gothic").with_status("extinct"),
                ],
            )],
        )
    }

    #[test]
    fn test_germanic_example() {
        let stats = compute_statistics(&germanic(), DEFAULT_FAMILY_DEPTH);
        assert_eq!(stats.total_languages, 3);
        assert_eq!(stats.total_families, 1);
        assert_eq!(stats.living_languages, 2);
        assert_eq!(stats.extinct_languages, 1);
        assert_eq!(stats.family_breakdown.get("Germanic"), Some(&3));
        assert_eq!(stats.family_breakdown.len(), 1);
    }

    #[test]
    fn test_nested_families_count_once() {
        let root = TaxonNode::family(
            "Root",
            vec![
                TaxonNode::family(
                    "Indo-European",
                    vec![
                        TaxonNode::family(
                            "Italic",
                            vec![
                                TaxonNode::language("Latin").with_status("extinct"),
                                TaxonNode::language("Spanish"),
                            ],
                        ),
                        TaxonNode::language("Albanian"),
                    ],
                ),
                TaxonNode::language("Basque"),
            ],
        );
        let stats = compute_statistics(&root, DEFAULT_FAMILY_DEPTH);
        assert_eq!(stats.total_families, 1);
        assert_eq!(stats.total_languages, 4);
        assert_eq!(stats.family_breakdown.get("Indo-European"), Some(&3));
        assert!(!stats.family_breakdown.contains_key("Italic"));
    }

    #[test]
    fn test_empty_children_counts_as_language() {
        let root = TaxonNode::family(
            "Root",
            vec![TaxonNode {
                name: "Hollow".to_string(),
                children: Some(Vec::new()),
                ..TaxonNode::default()
            }],
        );
        let stats = compute_statistics(&root, DEFAULT_FAMILY_DEPTH);
        assert_eq!(stats.total_languages, 1);
        assert_eq!(stats.total_families, 0);
        assert!(stats.family_breakdown.is_empty());
    }

    #[test]
    fn test_configurable_family_depth() {
        let root = TaxonNode::family(
            "Root",
            vec![TaxonNode::family(
                "Indo-European",
                vec![
                    TaxonNode::family("Celtic", vec![TaxonNode::language("Irish")]),
                    TaxonNode::family(
                        "Slavic",
                        vec![TaxonNode::language("Polish"), TaxonNode::language("Czech")],
                    ),
                ],
            )],
        );
        let stats = compute_statistics(&root, 2);
        assert_eq!(stats.total_families, 2);
        assert_eq!(stats.family_breakdown.get("Slavic"), Some(&2));
        assert_eq!(stats.family_breakdown.values().sum::<usize>(), stats.total_languages);
    }

    #[test]
    fn test_families_by_size() {
        let mut stats = Statistics::default();
        stats.family_breakdown.insert("Uralic".to_string(), 3);
        stats.family_breakdown.insert("Indo-European".to_string(), 10);
        stats.family_breakdown.insert("Turkic".to_string(), 3);
        let order: Vec<_> = stats
            .families_by_size()
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(order, vec!["Indo-European", "Turkic", "Uralic"]);
        assert_eq!(stats.largest_family().unwrap().languages, 10);
        assert!(Statistics::default().largest_family().is_none());
    }

    #[test]
    fn test_count_languages() {
        assert_eq!(count_languages(&germanic()), 3);
        assert_eq!(count_languages(&TaxonNode::language("Solo")), 1);
    }
}
