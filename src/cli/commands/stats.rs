//! Stats command handler

use std::error::Error;
use taxon_tree::config::Config;
use taxon_tree::core::models::TaxonNode;
use taxon_tree::core::statistics::{compute_statistics, Statistics};

/// Print dataset statistics as a table or JSON
///
/// # Errors
///
/// Returns an error if JSON serialization fails
pub fn run(dataset: &TaxonNode, config: &Config, json: bool) -> Result<(), Box<dyn Error>> {
    let stats = compute_statistics(dataset, config.layout.family_depth);
    logger::debug!(
        "Computed statistics: {} languages in {} families",
        stats.total_languages,
        stats.total_families
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print!("{}", format_table(&dataset.name, &stats));
    }
    Ok(())
}

/// Human-readable summary, families ordered largest first
pub fn format_table(title: &str, stats: &Statistics) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    let _ = writeln!(out, "\n=== {title} ===\n");
    let _ = writeln!(out, "  Languages: {:>5}", stats.total_languages);
    let _ = writeln!(out, "  Living:    {:>5}", stats.living_languages);
    let _ = writeln!(out, "  Extinct:   {:>5}", stats.extinct_languages);
    let _ = writeln!(out, "  Families:  {:>5}", stats.total_families);

    let families = stats.families_by_size();
    if !families.is_empty() {
        let width = families.iter().map(|f| f.name.chars().count()).max().unwrap_or(0);
        let _ = writeln!(out, "\n  Families by size:");
        for family in families {
            let _ = writeln!(out, "    {:<width$}  {:>4}", family.name, family.languages);
        }
    }
    out
}
