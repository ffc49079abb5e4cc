//! Render/transition controller
//!
//! Keeps the set of visual elements currently on screen and reconciles it
//! against each new layout. Nodes are keyed by [`NodeId`], links by the
//! `(source, target)` id pair, so a re-layout always finds the element it
//! animated last time and simply retargets it.
//!
//! Positions here are in *drawing space*: the tree is drawn left to right, so
//! a layout point `(x, y)` is drawn at `(y, x)`.

pub mod style;
pub mod svg;
pub mod transition;

use crate::core::geometry::{Point, Rect};
use crate::core::layout::LayoutResult;
use crate::core::models::{NodeId, TaxonTree};
use logger::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use style::{node_style, LabelStyle, NodeStyle, TextAnchor};
pub use transition::{Clock, Easing, Lerp, ManualClock, SystemClock, Transition};

/// Animation timings, stored under `[animation]` in the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Node/link movement after a re-layout
    pub relayout_ms: u64,
    /// Camera move when focusing a node
    pub camera_ms: u64,
    /// Camera move when fitting the content
    pub fit_ms: u64,
    /// Cosmetic marker change on hover
    pub hover_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            relayout_ms: 500,
            camera_ms: 750,
            fit_ms: 250,
            hover_ms: 200,
        }
    }
}

/// Draw a layout point: the depth axis runs horizontally
#[must_use]
pub const fn to_drawing(layout_point: Point) -> Point {
    Point::new(layout_point.y, layout_point.x)
}

/// Straight segment between a link's two ends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Parent end
    pub source: Point,
    /// Child end
    pub target: Point,
}

impl Segment {
    /// A zero-length segment at `p`
    #[must_use]
    pub const fn collapsed(p: Point) -> Self {
        Self {
            source: p,
            target: p,
        }
    }
}

impl Lerp for Segment {
    fn lerp(self, to: Self, t: f64) -> Self {
        Self {
            source: self.source.lerp(to.source, t),
            target: self.target.lerp(to.target, t),
        }
    }
}

/// Join key of a link
pub type LinkKey = (NodeId, NodeId);

/// One drawn node
#[derive(Debug, Clone)]
pub struct VisualNode {
    /// Node identity
    pub id: NodeId,
    /// Label text
    pub label: String,
    /// Whether the node is a language
    pub leaf: bool,
    /// Marker and label appearance
    pub style: NodeStyle,
    /// Position animation
    pub motion: Transition<Point>,
    /// Cosmetic hover state
    pub hovered: bool,
    /// Hover emphasis, `0` at rest and `1` fully hovered
    pub emphasis: Transition<f64>,
    /// Set while animating out; removed once the motion finishes
    pub exiting: bool,
}

impl VisualNode {
    /// Marker radius at `now_ms`, part-way between rest and hover sizes
    #[must_use]
    pub fn radius_at(&self, now_ms: u64) -> f64 {
        let e = self.emphasis.value_at(now_ms);
        self.style.radius(false).lerp(self.style.radius(true), e)
    }

    /// Marker stroke width at `now_ms`
    #[must_use]
    pub fn stroke_width_at(&self, now_ms: u64) -> f64 {
        let e = self.emphasis.value_at(now_ms);
        NodeStyle::stroke_width(false).lerp(NodeStyle::stroke_width(true), e)
    }
}

/// One drawn link
#[derive(Debug, Clone)]
pub struct VisualLink {
    /// `(parent, child)`
    pub key: LinkKey,
    /// Endpoint animation
    pub motion: Transition<Segment>,
    /// Stroke width, thinner for deeper links
    pub stroke_width: f64,
    /// Set while animating out
    pub exiting: bool,
}

/// What happened to an element during a reconcile
#[derive(Debug, Clone, PartialEq)]
pub enum VisualOp {
    /// A node became visible
    EnterNode {
        /// Node identity
        id: NodeId,
        /// Start position (the source node's previous position)
        from: Point,
        /// Computed position
        to: Point,
    },
    /// A visible node moves
    UpdateNode {
        /// Node identity
        id: NodeId,
        /// Current position
        from: Point,
        /// Computed position
        to: Point,
    },
    /// A node became hidden
    ExitNode {
        /// Node identity
        id: NodeId,
        /// Current position
        from: Point,
        /// The source node's new position
        to: Point,
    },
    /// A link became visible
    EnterLink {
        /// Link identity
        key: LinkKey,
        /// Start geometry
        from: Segment,
        /// Computed geometry
        to: Segment,
    },
    /// A visible link moves
    UpdateLink {
        /// Link identity
        key: LinkKey,
        /// Current geometry
        from: Segment,
        /// Computed geometry
        to: Segment,
    },
    /// A link became hidden
    ExitLink {
        /// Link identity
        key: LinkKey,
        /// Current geometry
        from: Segment,
        /// Collapsed onto the source node's new position
        to: Segment,
    },
}

/// Element removed from the visual set once its exit finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removed {
    /// A node
    Node(NodeId),
    /// A link
    Link(LinkKey),
}

/// The visual set plus the logic that moves it between layouts
#[derive(Debug, Clone, Default)]
pub struct RenderController {
    nodes: BTreeMap<NodeId, VisualNode>,
    links: BTreeMap<LinkKey, VisualLink>,
}

impl RenderController {
    /// An empty visual set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile the visual set with a fresh layout.
    ///
    /// `source` is the node whose interaction triggered the re-layout:
    /// entering elements grow out of its *previous* position, exiting ones
    /// shrink into its *new* position. Must run before
    /// [`TaxonTree::commit_positions`] so the previous position is still intact.
    pub fn reconcile(
        &mut self,
        tree: &TaxonTree,
        layout: &LayoutResult,
        source: NodeId,
        now_ms: u64,
        duration_ms: u64,
    ) -> Vec<VisualOp> {
        let Some(source_node) = tree.node(source) else {
            return Vec::new();
        };
        let source_prev = to_drawing(source_node.previous);
        let source_now = source_node.position.map_or(source_prev, to_drawing);

        let mut ops = Vec::new();
        self.reconcile_nodes(tree, layout, source_prev, source_now, now_ms, duration_ms, &mut ops);
        self.reconcile_links(tree, layout, source_prev, source_now, now_ms, duration_ms, &mut ops);

        debug!(
            "Reconciled {} visual ops from source {source} ({} nodes, {} links on screen)",
            ops.len(),
            self.nodes.len(),
            self.links.len()
        );
        ops
    }

    #[allow(clippy::too_many_arguments)]
    fn reconcile_nodes(
        &mut self,
        tree: &TaxonTree,
        layout: &LayoutResult,
        source_prev: Point,
        source_now: Point,
        now_ms: u64,
        duration_ms: u64,
        ops: &mut Vec<VisualOp>,
    ) {
        for &id in &layout.visible {
            let Some(node) = tree.node(id) else { continue };
            let Some(target) = node.position.map(to_drawing) else {
                continue;
            };
            if let Some(visual) = self.nodes.get_mut(&id) {
                let from = visual.motion.value_at(now_ms);
                visual.motion = visual.motion.retarget(target, now_ms, duration_ms);
                visual.exiting = false;
                visual.style = node_style(node);
                ops.push(VisualOp::UpdateNode {
                    id,
                    from,
                    to: target,
                });
            } else {
                self.nodes.insert(
                    id,
                    VisualNode {
                        id,
                        label: node.name.clone(),
                        leaf: node.is_leaf(),
                        style: node_style(node),
                        motion: Transition::new(source_prev, target, now_ms, duration_ms),
                        hovered: false,
                        emphasis: Transition::settled(0.0),
                        exiting: false,
                    },
                );
                ops.push(VisualOp::EnterNode {
                    id,
                    from: source_prev,
                    to: target,
                });
            }
        }

        for (&id, visual) in &mut self.nodes {
            if layout.visible.contains(&id) {
                continue;
            }
            let from = visual.motion.value_at(now_ms);
            visual.motion = visual.motion.retarget(source_now, now_ms, duration_ms);
            visual.exiting = true;
            visual.hovered = false;
            visual.emphasis = visual.emphasis.retarget(0.0, now_ms, duration_ms);
            ops.push(VisualOp::ExitNode {
                id,
                from,
                to: source_now,
            });
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn reconcile_links(
        &mut self,
        tree: &TaxonTree,
        layout: &LayoutResult,
        source_prev: Point,
        source_now: Point,
        now_ms: u64,
        duration_ms: u64,
        ops: &mut Vec<VisualOp>,
    ) {
        for &key in &layout.links {
            let (Some(parent), Some(child)) = (tree.node(key.0), tree.node(key.1)) else {
                continue;
            };
            let (Some(a), Some(b)) = (parent.position, child.position) else {
                continue;
            };
            let target = Segment {
                source: to_drawing(a),
                target: to_drawing(b),
            };
            let stroke_width = style::link_stroke_width(child.depth);

            if let Some(visual) = self.links.get_mut(&key) {
                let from = visual.motion.value_at(now_ms);
                visual.motion = visual.motion.retarget(target, now_ms, duration_ms);
                visual.exiting = false;
                visual.stroke_width = stroke_width;
                ops.push(VisualOp::UpdateLink {
                    key,
                    from,
                    to: target,
                });
            } else {
                let from = Segment::collapsed(source_prev);
                self.links.insert(
                    key,
                    VisualLink {
                        key,
                        motion: Transition::new(from, target, now_ms, duration_ms),
                        stroke_width,
                        exiting: false,
                    },
                );
                ops.push(VisualOp::EnterLink {
                    key,
                    from,
                    to: target,
                });
            }
        }

        let to = Segment::collapsed(source_now);
        for (&key, visual) in &mut self.links {
            if layout.links.contains(&key) {
                continue;
            }
            let from = visual.motion.value_at(now_ms);
            visual.motion = visual.motion.retarget(to, now_ms, duration_ms);
            visual.exiting = true;
            ops.push(VisualOp::ExitLink { key, from, to });
        }
    }

    /// Drop exiting elements whose animation has finished
    pub fn advance(&mut self, now_ms: u64) -> Vec<Removed> {
        let mut removed = Vec::new();
        self.nodes.retain(|&id, v| {
            let done = v.exiting && v.motion.is_finished(now_ms);
            if done {
                removed.push(Removed::Node(id));
            }
            !done
        });
        self.links.retain(|&key, v| {
            let done = v.exiting && v.motion.is_finished(now_ms);
            if done {
                removed.push(Removed::Link(key));
            }
            !done
        });
        if !removed.is_empty() {
            debug!("Removed {} exited visual elements", removed.len());
        }
        removed
    }

    /// Whether any element is still moving at `now_ms`
    #[must_use]
    pub fn is_animating(&self, now_ms: u64) -> bool {
        self.nodes
            .values()
            .any(|v| !v.motion.is_finished(now_ms) || !v.emphasis.is_finished(now_ms))
            || self.links.values().any(|v| !v.motion.is_finished(now_ms))
    }

    /// Drawn position of a node at `now_ms`
    #[must_use]
    pub fn node_position(&self, id: NodeId, now_ms: u64) -> Option<Point> {
        self.nodes.get(&id).map(|v| v.motion.value_at(now_ms))
    }

    /// A drawn node
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&VisualNode> {
        self.nodes.get(&id)
    }

    /// Every drawn node, ordered by id
    pub fn nodes(&self) -> impl Iterator<Item = &VisualNode> {
        self.nodes.values()
    }

    /// Every drawn link, ordered by key
    pub fn links(&self) -> impl Iterator<Item = &VisualLink> {
        self.links.values()
    }

    /// Ids of drawn nodes that are not on their way out
    #[must_use]
    pub fn settled_ids(&self) -> Vec<NodeId> {
        self.nodes
            .values()
            .filter(|v| !v.exiting)
            .map(|v| v.id)
            .collect()
    }

    /// Flip the cosmetic hover flag and ease the marker towards its new size
    /// over `duration_ms`. Returns `true` when it changed; exiting nodes are
    /// never hovered.
    pub fn set_hovered(
        &mut self,
        id: NodeId,
        hovered: bool,
        now_ms: u64,
        duration_ms: u64,
    ) -> bool {
        match self.nodes.get_mut(&id) {
            Some(v) if v.hovered != hovered && !v.exiting => {
                v.hovered = hovered;
                let target = if hovered { 1.0 } else { 0.0 };
                v.emphasis = v.emphasis.retarget(target, now_ms, duration_ms);
                true
            }
            _ => false,
        }
    }

    /// Bounding box of everything drawn at `now_ms`, labels included
    #[must_use]
    pub fn content_bounds(&self, now_ms: u64) -> Option<Rect> {
        let marker_boxes = self.nodes.values().map(|v| {
            let p = v.motion.value_at(now_ms);
            let r = v.radius_at(now_ms);
            let half_text = v.style.label.font_size / 2.0;
            let text_width = v.style.label.estimated_width(&v.label);
            let anchor_x = p.x + v.style.label.dx;
            let (text_min, text_max) = match v.style.label.anchor {
                TextAnchor::Start => (anchor_x, anchor_x + text_width),
                TextAnchor::End => (anchor_x - text_width, anchor_x),
            };
            Rect {
                min: Point::new((p.x - r).min(text_min), p.y - r.max(half_text)),
                max: Point::new((p.x + r).max(text_max), p.y + r.max(half_text)),
            }
        });
        marker_boxes.reduce(Rect::union)
    }
}
