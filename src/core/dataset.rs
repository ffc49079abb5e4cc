//! Taxonomy dataset loading
//!
//! The dataset is a single nested JSON document matching [`TaxonNode`]. A
//! default world-languages dataset is compiled into the binary.

use crate::core::models::TaxonNode;
use crate::core::statistics::count_languages;
use logger::{info, warn};
use std::error::Error;
use std::fs;
use std::path::Path;

/// Compiled-in dataset
pub const DEFAULT_DATASET: &str = include_str!("../assets/languages.json");

/// Parse a dataset from JSON text
///
/// # Errors
///
/// Returns an error if the text is not valid JSON or does not match the
/// taxon shape.
pub fn parse_dataset(json: &str) -> Result<TaxonNode, serde_json::Error> {
    let root: TaxonNode = serde_json::from_str(json)?;
    let unnamed = count_unnamed(&root);
    if unnamed > 0 {
        warn!("Dataset contains {unnamed} unnamed taxa");
    }
    Ok(root)
}

fn count_unnamed(node: &TaxonNode) -> usize {
    usize::from(node.name.trim().is_empty())
        + node.children().iter().map(count_unnamed).sum::<usize>()
}

/// Load a dataset from a JSON file
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_dataset(path: &Path) -> Result<TaxonNode, Box<dyn Error>> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read dataset {}: {e}", path.display()))?;
    let root = parse_dataset(&contents)
        .map_err(|e| format!("Failed to parse dataset {}: {e}", path.display()))?;
    info!(
        "Loaded dataset with {} languages from {}",
        count_languages(&root),
        path.display()
    );
    Ok(root)
}

/// The compiled-in dataset
///
/// # Panics
///
/// Panics if the embedded dataset is malformed, which is a build defect.
#[must_use]
pub fn default_dataset() -> TaxonNode {
    parse_dataset(DEFAULT_DATASET).expect("embedded dataset is valid JSON")
}

/// The dataset at `path`, or the compiled-in one when no path is given
///
/// # Errors
///
/// Returns an error if a path is given and it cannot be loaded.
pub fn resolve_dataset(path: Option<&Path>) -> Result<TaxonNode, Box<dyn Error>> {
    match path {
        Some(path) => load_dataset(path),
        None => Ok(default_dataset()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::statistics::{compute_statistics, DEFAULT_FAMILY_DEPTH};
    use std::io::Write;

    #[test]
    fn test_default_dataset_shape() {
        let root = default_dataset();
        assert_eq!(root.name, "World Languages");
        let stats = compute_statistics(&root, DEFAULT_FAMILY_DEPTH);
        assert_eq!(stats.total_languages, 100);
        assert_eq!(stats.total_families, 7);
        assert_eq!(stats.extinct_languages, 21);
        assert_eq!(stats.largest_family().unwrap().name, "Indo-European");
    }

    #[test]
    fn test_parse_minimal() {
        let root = parse_dataset(r#"{"name":"Root","children":[{"name":"Basque"}]}"#).unwrap();
        assert_eq!(root.children().len(), 1);
        assert!(root.children()[0].is_language());
    }

    #[test]
    fn test_parse_rejects_bad_shape() {
        assert!(parse_dataset(r#"{"children": 3}"#).is_err());
        assert!(parse_dataset("not json").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"name":"Root","children":[{{"name":"Gothic","status":"extinct"}}]}}"#)
            .unwrap();
        let root = load_dataset(file.path()).unwrap();
        assert!(root.children()[0].is_extinct());
    }

    #[test]
    fn test_resolve_missing_file_errors() {
        let err = resolve_dataset(Some(Path::new("/nonexistent/taxa.json"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read dataset"));
        assert_eq!(resolve_dataset(None).unwrap().name, "World Languages");
    }
}
