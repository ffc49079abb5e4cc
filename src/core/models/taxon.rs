//! Taxon model: the raw, read-only dataset node

use serde::{Deserialize, Serialize};

/// Status value that marks a language as extinct
pub const EXTINCT: &str = "extinct";

/// One node of the input taxonomy: a family, sub-family or language
///
/// A node without `children` (or with an empty `children` array) is a
/// language; anything else is a family/group.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaxonNode {
    /// Display name (e.g., "Germanic", "Old Norse")
    pub name: String,

    /// Reconstructed ancestor language (e.g., "Proto-Germanic")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proto: Option<String>,

    /// Free-form status; only `"extinct"` has meaning to the engine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Free-text note shown in the detail panel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// Ordered sub-taxa
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TaxonNode>>,
}

impl TaxonNode {
    /// Create a language (leaf) node
    #[must_use]
    pub fn language(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Create a family node with the given children
    #[must_use]
    pub fn family(name: &str, children: Vec<Self>) -> Self {
        Self {
            name: name.to_string(),
            children: Some(children),
            ..Self::default()
        }
    }

    /// Set the proto-language
    #[must_use]
    pub fn with_proto(mut self, proto: &str) -> Self {
        self.proto = Some(proto.to_string());
        self
    }

    /// Set the status
    #[must_use]
    pub fn with_status(mut self, status: &str) -> Self {
        self.status = Some(status.to_string());
        self
    }

    /// Set the note
    #[must_use]
    pub fn with_note(mut self, note: &str) -> Self {
        self.note = Some(note.to_string());
        self
    }

    /// Children as a slice; absent children read as empty
    #[must_use]
    pub fn children(&self) -> &[Self] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Whether this node is a language (no children, or an empty array)
    #[must_use]
    pub fn is_language(&self) -> bool {
        self.children().is_empty()
    }

    /// Whether the status marks this taxon as extinct
    #[must_use]
    pub fn is_extinct(&self) -> bool {
        self.status.as_deref() == Some(EXTINCT)
    }
}
