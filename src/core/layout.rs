//! Dendrogram (cluster) layout of the visible part of a taxonomy tree
//!
//! Coordinates follow the tree's own axes: `x` runs along the siblings and `y`
//! along the depth. The renderer draws the tree left-to-right, so on screen
//! `y` becomes horizontal and `x` vertical.

use crate::core::geometry::Point;
use crate::core::models::tree::{NodeId, TaxonTree, DEFAULT_COLLAPSE_DEPTH};
use crate::core::statistics::DEFAULT_FAMILY_DEPTH;
use logger::debug;
use serde::{Deserialize, Serialize};

/// Layout tuning, stored under `[layout]` in the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Distance between neighbouring leaves along the sibling axis
    pub node_spacing: f64,
    /// Distance between tree levels along the depth axis
    pub level_spacing: f64,
    /// Families at this depth or deeper start collapsed
    pub collapse_depth: usize,
    /// Depth of the nodes counted as top-level families in statistics
    pub family_depth: usize,
    /// Margin above the drawing
    pub margin_top: f64,
    /// Margin below the drawing
    pub margin_bottom: f64,
    /// Extra room added to the required canvas height
    pub canvas_padding: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_spacing: 25.0,
            level_spacing: 180.0,
            collapse_depth: DEFAULT_COLLAPSE_DEPTH,
            family_depth: DEFAULT_FAMILY_DEPTH,
            margin_top: 40.0,
            margin_bottom: 40.0,
            canvas_padding: 100.0,
        }
    }
}

/// Outcome of one layout pass
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    /// Positioned nodes in pre-order
    pub visible: Vec<NodeId>,
    /// Parent → child links between positioned nodes
    pub links: Vec<(NodeId, NodeId)>,
    /// Smallest sibling-axis coordinate
    pub left: f64,
    /// Largest sibling-axis coordinate
    pub right: f64,
    /// Canvas height needed to show every node without clipping
    pub required_height: f64,
}

impl LayoutResult {
    /// Spread along the sibling axis
    #[must_use]
    pub fn breadth(&self) -> f64 {
        self.right - self.left
    }

    /// Canvas height for a viewport: never shrinks below the viewport itself
    #[must_use]
    pub fn canvas_height(&self, viewport_height: f64) -> f64 {
        viewport_height.max(self.required_height)
    }
}

/// Position every visible node and clear positions of hidden ones.
///
/// Visible leaves are placed in pre-order, `node_spacing` apart. A family sits
/// at the mean of its visible children, and the whole drawing is shifted so
/// the root is at `x = 0`. Depth maps to `y = depth * level_spacing`.
pub fn layout(tree: &mut TaxonTree, config: &LayoutConfig) -> LayoutResult {
    let visible = tree.visible_ids();
    let links = tree.visible_links();
    let mut xs: Vec<Option<f64>> = vec![None; tree.len()];

    let mut next_leaf = 0.0_f64;
    for &id in &visible {
        let Some(node) = tree.node(id) else { continue };
        if node.visible_children().is_empty() {
            xs[id.index()] = Some(next_leaf * config.node_spacing);
            next_leaf += 1.0;
        }
    }

    // Reverse pre-order visits children before their parent.
    for &id in visible.iter().rev() {
        let Some(node) = tree.node(id) else { continue };
        let children = node.visible_children();
        if children.is_empty() {
            continue;
        }
        let sum: f64 = children.iter().filter_map(|c| xs[c.index()]).sum();
        #[allow(clippy::cast_precision_loss)]
        let mean = sum / children.len() as f64;
        xs[id.index()] = Some(mean);
    }

    let root_x = xs[tree.root().index()].unwrap_or(0.0);
    let mut left = f64::INFINITY;
    let mut right = f64::NEG_INFINITY;

    let ids: Vec<NodeId> = tree.iter().map(|n| n.id).collect();
    for id in ids {
        let position = xs[id.index()].and_then(|x| {
            let depth = tree.node(id)?.depth;
            #[allow(clippy::cast_precision_loss)]
            let y = depth as f64 * config.level_spacing;
            Some(Point::new(x - root_x, y))
        });
        if let Some(p) = position {
            left = left.min(p.x);
            right = right.max(p.x);
        }
        tree.set_position(id, position);
    }

    if visible.is_empty() {
        left = 0.0;
        right = 0.0;
    }
    let required_height =
        (right - left) + config.margin_top + config.margin_bottom + config.canvas_padding;

    debug!(
        "Laid out {} visible nodes (x range {left:.1}..{right:.1}, height {required_height:.1})",
        visible.len()
    );

    LayoutResult {
        visible,
        links,
        left,
        right,
        required_height,
    }
}
