//! Lookup command handler

use std::error::Error;
use taxon_tree::config::Config;
use taxon_tree::core::models::{TaxonNode, TaxonTree};
use taxon_tree::core::navigation::{lookup_identifier, reference_url};

/// Print where a taxon sits in the tree and its reference link
///
/// # Errors
///
/// Returns an error if no taxon has that name
pub fn run(dataset: &TaxonNode, config: &Config, name: &str) -> Result<(), Box<dyn Error>> {
    let tree = TaxonTree::build(dataset, config.layout.collapse_depth);
    let id = tree
        .find_by_name(name)
        .ok_or_else(|| format!("No taxon named '{name}'"))?;
    let Some(node) = tree.node(id) else {
        return Err(format!("No taxon named '{name}'").into());
    };

    let mut path: Vec<&str> = tree
        .ancestors(id)
        .iter()
        .rev()
        .filter_map(|&a| tree.node(a).map(|n| n.name.as_str()))
        .collect();
    path.push(&node.name);

    println!("✓ {}", node.name);
    println!("  Path:       {}", path.join(" › "));
    if let Some(proto) = &node.proto {
        println!("  Proto:      {proto}");
    }
    if let Some(status) = &node.status {
        println!("  Status:     {status}");
    }
    if let Some(note) = &node.note {
        println!("  Note:       {note}");
    }
    if node.is_leaf() {
        println!("  Identifier: {}", lookup_identifier(&node.name));
        println!("  Reference:  {}", reference_url(&node.name, &config.navigation));
    } else {
        println!("  Children:   {}", node.children().len());
    }
    Ok(())
}
