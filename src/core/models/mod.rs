//! Data models for `taxon-tree`

pub mod taxon;
pub mod tree;

pub use taxon::TaxonNode;
pub use tree::{NodeId, NodeKind, TaxonTree, TreeNode};
