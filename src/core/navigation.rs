//! Reference lookups for languages
//!
//! Turns a display name into an article identifier and builds the external
//! reference URL opened when a language is clicked.

use logger::debug;
use serde::{Deserialize, Serialize};

/// Reference link settings, stored under `[navigation]` in the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Prefix of every reference URL
    pub base_url: String,
    /// Appended after the identifier
    pub suffix: String,
    /// Call-to-action shown in the detail panel of languages
    pub hint: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            base_url: "https://en.wikipedia.org/wiki/".to_string(),
            suffix: "_language".to_string(),
            hint: "Click to view on Wikipedia →".to_string(),
        }
    }
}

/// Article identifier for a display name.
///
/// Keeps the part before the first comma, drops trailing parentheticals,
/// joins words with `_` and percent-encodes the result.
/// `"Norman (French dialect), historical"` becomes `"Norman"`.
#[must_use]
pub fn lookup_identifier(name: &str) -> String {
    let head = name.split(',').next().unwrap_or_default();
    let mut head = head.trim_end();
    while head.ends_with(')') {
        match head.rfind('(') {
            Some(open) => head = head[..open].trim_end(),
            None => break,
        }
    }
    let cleaned: String = head.chars().filter(|c| !matches!(c, '(' | ')')).collect();
    let joined = cleaned.split_whitespace().collect::<Vec<_>>().join("_");
    urlencoding::encode(&joined).into_owned()
}

/// Full reference URL for a display name
#[must_use]
pub fn reference_url(name: &str, config: &NavigationConfig) -> String {
    let url = format!(
        "{}{}{}",
        config.base_url,
        lookup_identifier(name),
        config.suffix
    );
    debug!("Reference for '{name}': {url}");
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_name() {
        assert_eq!(lookup_identifier("English"), "English");
    }

    #[test]
    fn test_comma_and_parenthetical() {
        assert_eq!(lookup_identifier("Norman (French dialect), historical"), "Norman");
        assert_eq!(lookup_identifier("Frisian (West) (Dutch)"), "Frisian");
        assert_eq!(lookup_identifier("Scots, Ulster"), "Scots");
    }

    #[test]
    fn test_whitespace_and_encoding() {
        assert_eq!(lookup_identifier("  Old   Norse "), "Old_Norse");
        assert_eq!(lookup_identifier("Māori"), "M%C4%81ori");
        assert_eq!(lookup_identifier("Ge'ez"), "Ge%27ez");
    }

    #[test]
    fn test_stray_parens_removed() {
        assert_eq!(lookup_identifier("Tok (Pisin"), "Tok_Pisin");
    }

    #[test]
    fn test_reference_url() {
        let config = NavigationConfig::default();
        assert_eq!(
            reference_url("Old English", &config),
            "https://en.wikipedia.org/wiki/Old_English_language"
        );
    }
}
