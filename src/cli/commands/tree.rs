//! Tree command handler

use taxon_tree::config::Config;
use taxon_tree::core::models::{TaxonNode, TaxonTree};

/// Print the tree outline, optionally with every family expanded
pub fn run(dataset: &TaxonNode, config: &Config, expand_all: bool) {
    let tree = build(dataset, config, expand_all);
    logger::verbose!(
        "Printing {} of {} taxa",
        tree.visible_ids().len(),
        tree.len()
    );
    print!("{tree}");
}

/// Build the arena with the configured collapse policy or fully expanded
pub fn build(dataset: &TaxonNode, config: &Config, expand_all: bool) -> TaxonTree {
    let mut tree = TaxonTree::build(dataset, config.layout.collapse_depth);
    if expand_all {
        let ids: Vec<_> = tree.iter().map(|n| n.id).collect();
        for id in ids {
            tree.expand(id);
        }
    }
    tree
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_all_shows_every_taxon() {
        let dataset = TaxonNode::family(
            "Root",
            vec![TaxonNode::family(
                "A",
                vec![TaxonNode::family(
                    "B",
                    vec![TaxonNode::family("C", vec![TaxonNode::language("D")])],
                )],
            )],
        );
        let config = Config::default();
        assert!(build(&dataset, &config, false).visible_ids().len() < 5);
        assert_eq!(build(&dataset, &config, true).visible_ids().len(), 5);
    }
}
