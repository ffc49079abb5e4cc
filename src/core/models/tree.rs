//! Arena-backed taxonomy tree with per-node expand/collapse state
//!
//! Nodes live in a flat `Vec` and refer to each other by [`NodeId`]. Ids are
//! assigned once, in pre-order, when the tree is built; they never change and
//! are never reused, so they double as the join key for re-rendering.
//!
//! Collapsing a family does not remove anything: its children simply stop
//! being *visible* and are kept as *hidden* children until it is expanded.

use super::taxon::{TaxonNode, EXTINCT};
use crate::core::geometry::Point;
use logger::debug;
use std::fmt;

/// Default depth at which families start out collapsed
pub const DEFAULT_COLLAPSE_DEPTH: usize = 3;

/// Stable identity of a node for the lifetime of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Arena index of this node
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Leaf vs internal, decided once from the dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// A language
    Leaf,
    /// A family or sub-family
    Family {
        /// All children in dataset order
        children: Vec<NodeId>,
        /// Whether the children are currently shown
        expanded: bool,
    },
}

/// One node of the arena
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Stable identity
    pub id: NodeId,
    /// Parent, `None` for the root
    pub parent: Option<NodeId>,
    /// Distance from the root (root = 0)
    pub depth: usize,
    /// Display name
    pub name: String,
    /// Proto-language, if any
    pub proto: Option<String>,
    /// Status string, if any
    pub status: Option<String>,
    /// Free-text note, if any
    pub note: Option<String>,
    /// Leaf or family
    pub kind: NodeKind,
    /// Current layout position; `None` while hidden under a collapsed ancestor
    pub position: Option<Point>,
    /// Last rendered position, the start point for enter/exit animations
    pub previous: Point,
}

impl TreeNode {
    /// Whether this node is a language
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf)
    }

    /// Whether the status marks this taxon as extinct
    #[must_use]
    pub fn is_extinct(&self) -> bool {
        self.status.as_deref() == Some(EXTINCT)
    }

    /// Whether this is a family whose children are shown
    #[must_use]
    pub const fn is_expanded(&self) -> bool {
        matches!(self.kind, NodeKind::Family { expanded: true, .. })
    }

    /// Every child, shown or not
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Leaf => &[],
            NodeKind::Family { children, .. } => children,
        }
    }

    /// Children currently shown
    #[must_use]
    pub fn visible_children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Family {
                children,
                expanded: true,
            } => children,
            _ => &[],
        }
    }

    /// Children retained while collapsed
    #[must_use]
    pub fn hidden_children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Family {
                children,
                expanded: false,
            } => children,
            _ => &[],
        }
    }
}

/// The whole taxonomy as an arena
#[derive(Debug, Clone)]
pub struct TaxonTree {
    nodes: Vec<TreeNode>,
}

impl TaxonTree {
    /// Build the arena from a dataset root
    ///
    /// Every family at `depth >= collapse_depth` starts collapsed, which also
    /// hides everything below it. The root is always expanded.
    #[must_use]
    pub fn build(root: &TaxonNode, collapse_depth: usize) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        tree.insert(root, None, 0, collapse_depth);
        debug!(
            "Built taxonomy tree with {} nodes (collapse depth {collapse_depth})",
            tree.nodes.len()
        );
        tree
    }

    fn insert(
        &mut self,
        taxon: &TaxonNode,
        parent: Option<NodeId>,
        depth: usize,
        collapse_depth: usize,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        let kind = if taxon.is_language() {
            NodeKind::Leaf
        } else {
            NodeKind::Family {
                children: Vec::with_capacity(taxon.children().len()),
                expanded: depth == 0 || depth < collapse_depth,
            }
        };
        self.nodes.push(TreeNode {
            id,
            parent,
            depth,
            name: taxon.name.clone(),
            proto: taxon.proto.clone(),
            status: taxon.status.clone(),
            note: taxon.note.clone(),
            kind,
            position: None,
            previous: Point::ZERO,
        });

        for child in taxon.children() {
            let child_id = self.insert(child, Some(id), depth + 1, collapse_depth);
            if let NodeKind::Family { children, .. } = &mut self.nodes[id.0].kind {
                children.push(child_id);
            }
        }
        id
    }

    /// The root id
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes, shown or not
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena is empty (never true for a built tree)
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id.0)
    }

    /// Iterate over every node in pre-order
    pub fn iter(&self) -> impl Iterator<Item = &TreeNode> {
        self.nodes.iter()
    }

    /// Whether `id` is a language; unknown ids read as `false`
    #[must_use]
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(TreeNode::is_leaf)
    }

    /// Depth-first search by name over shown *and* hidden nodes
    ///
    /// Returns the first match in pre-order.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        // Arena order is pre-order, so a linear scan is a depth-first search.
        self.nodes.iter().find(|n| n.name == name).map(|n| n.id)
    }

    /// Flip a family between expanded and collapsed
    ///
    /// Returns `true` when the state changed. Leaves, unknown ids and the root
    /// are left untouched.
    pub fn toggle_expand(&mut self, id: NodeId) -> bool {
        match self.node(id) {
            Some(node) if node.is_expanded() => self.collapse(id),
            Some(_) => self.expand(id),
            None => false,
        }
    }

    /// Show a family's children. Returns `true` when the state changed.
    pub fn expand(&mut self, id: NodeId) -> bool {
        self.set_expanded(id, true)
    }

    /// Hide a family's children. The root cannot be collapsed.
    pub fn collapse(&mut self, id: NodeId) -> bool {
        if id == self.root() {
            return false;
        }
        self.set_expanded(id, false)
    }

    fn set_expanded(&mut self, id: NodeId, value: bool) -> bool {
        let Some(node) = self.nodes.get_mut(id.0) else {
            return false;
        };
        match &mut node.kind {
            NodeKind::Family { expanded, .. } if *expanded != value => {
                *expanded = value;
                debug!(
                    "{} '{}' ({id})",
                    if value { "Expanded" } else { "Collapsed" },
                    node.name
                );
                true
            }
            _ => false,
        }
    }

    /// Expand every ancestor of `id` and `id` itself
    ///
    /// Returns `true` when any node changed state.
    pub fn ensure_visible(&mut self, id: NodeId) -> bool {
        if self.node(id).is_none() {
            return false;
        }
        let mut changed = false;
        for ancestor in self.ancestors(id) {
            changed |= self.expand(ancestor);
        }
        changed | self.expand(id)
    }

    /// Ancestors of `id`, nearest first, ending at the root
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = self.node(id).and_then(|n| n.parent);
        while let Some(parent) = current {
            out.push(parent);
            current = self.nodes[parent.0].parent;
        }
        out
    }

    /// Ids reachable from the root through expanded families, in pre-order
    #[must_use]
    pub fn visible_ids(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        if self.nodes.is_empty() {
            return out;
        }
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.nodes[id.0].visible_children().iter().rev());
        }
        out
    }

    /// Whether `id` is reachable from the root through expanded families
    #[must_use]
    pub fn is_visible(&self, id: NodeId) -> bool {
        self.node(id).is_some()
            && self
                .ancestors(id)
                .iter()
                .all(|&a| self.nodes[a.0].is_expanded())
    }

    /// Parent → child pairs between visible nodes, in pre-order of the child
    #[must_use]
    pub fn visible_links(&self) -> Vec<(NodeId, NodeId)> {
        self.visible_ids()
            .into_iter()
            .flat_map(|id| {
                self.nodes[id.0]
                    .visible_children()
                    .iter()
                    .map(move |&child| (id, child))
            })
            .collect()
    }

    pub(crate) fn set_position(&mut self, id: NodeId, position: Option<Point>) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.position = position;
        }
    }

    /// Record each visible node's current position as its last rendered one
    pub fn commit_positions(&mut self) {
        for node in &mut self.nodes {
            if let Some(pos) = node.position {
                node.previous = pos;
            }
        }
    }
}

impl fmt::Display for TaxonTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for id in self.visible_ids() {
            let node = &self.nodes[id.0];
            let marker = match &node.kind {
                NodeKind::Leaf => " ",
                NodeKind::Family { expanded: true, .. } => "-",
                NodeKind::Family { .. } => "+",
            };
            let status = if node.is_extinct() { " †" } else { "" };
            writeln!(
                f,
                "{:indent$}{marker} {}{status}",
                "",
                node.name,
                indent = node.depth * 2
            )?;
        }
        Ok(())
    }
}
