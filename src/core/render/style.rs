//! Visual encoding of nodes and links

use crate::core::models::TreeNode;

/// Marker fill colours, indexed by `min(depth, 4)`
pub const FILL_PALETTE: [&str; 5] = ["#10b981", "#06b6d4", "#8b5cf6", "#f59e0b", "#ec4899"];
/// Marker stroke colours, indexed by `min(depth, 4)`
pub const STROKE_PALETTE: [&str; 5] = ["#059669", "#0891b2", "#7c3aed", "#d97706", "#db2777"];
/// Fill for extinct taxa, whatever their depth
pub const EXTINCT_FILL: &str = "#ef4444";
/// Stroke for extinct taxa
pub const EXTINCT_STROKE: &str = "#dc2626";
/// Label colour for living taxa
pub const LABEL_COLOR: &str = "#ffffff";
/// Label colour for extinct taxa
pub const EXTINCT_LABEL_COLOR: &str = "#fca5a5";
/// Link stroke colour
pub const LINK_COLOR: &str = "#10b981";
/// Distance between a marker and its label
pub const LABEL_OFFSET: f64 = 12.0;

/// Which end of the label sits at the anchor point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    /// Text grows rightwards from the anchor
    Start,
    /// Text ends at the anchor
    End,
}

impl TextAnchor {
    /// SVG `text-anchor` value
    #[must_use]
    pub const fn as_svg(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
        }
    }
}

/// Label appearance
#[derive(Debug, Clone, PartialEq)]
pub struct LabelStyle {
    /// Font size in px: `max(10, 14 - depth)`
    pub font_size: f64,
    /// Bold for the two top levels
    pub bold: bool,
    /// Underlined for languages (they link out)
    pub underline: bool,
    /// Anchor side
    pub anchor: TextAnchor,
    /// Horizontal offset from the marker centre
    pub dx: f64,
    /// Text colour
    pub color: &'static str,
}

impl LabelStyle {
    /// CSS font weight
    #[must_use]
    pub const fn font_weight(&self) -> u16 {
        if self.bold {
            600
        } else {
            400
        }
    }

    /// Rough rendered width of `text`, used to size the content box
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn estimated_width(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.font_size * 0.6
    }
}

/// Marker and label appearance of one node
#[derive(Debug, Clone, PartialEq)]
pub struct NodeStyle {
    /// Marker radius at rest
    pub radius: f64,
    /// Marker radius while hovered
    pub hover_radius: f64,
    /// Marker fill
    pub fill: &'static str,
    /// Marker stroke
    pub stroke: &'static str,
    /// Label appearance
    pub label: LabelStyle,
}

impl NodeStyle {
    /// Radius for the given hover state
    #[must_use]
    pub const fn radius(&self, hovered: bool) -> f64 {
        if hovered {
            self.hover_radius
        } else {
            self.radius
        }
    }

    /// Stroke width for the given hover state
    #[must_use]
    pub const fn stroke_width(hovered: bool) -> f64 {
        if hovered {
            3.0
        } else {
            2.0
        }
    }
}

/// Style for a tree node
#[must_use]
pub fn node_style(node: &TreeNode) -> NodeStyle {
    let leaf = node.is_leaf();
    let extinct = node.is_extinct();
    let tier = node.depth.min(FILL_PALETTE.len() - 1);
    let (radius, hover_radius) = if leaf { (4.0, 6.0) } else { (6.0, 8.0) };

    NodeStyle {
        radius,
        hover_radius,
        fill: if extinct { EXTINCT_FILL } else { FILL_PALETTE[tier] },
        stroke: if extinct {
            EXTINCT_STROKE
        } else {
            STROKE_PALETTE[tier]
        },
        label: LabelStyle {
            font_size: font_size(node.depth),
            bold: node.depth <= 1,
            underline: leaf,
            anchor: if leaf { TextAnchor::Start } else { TextAnchor::End },
            dx: if leaf { LABEL_OFFSET } else { -LABEL_OFFSET },
            color: if extinct {
                EXTINCT_LABEL_COLOR
            } else {
                LABEL_COLOR
            },
        },
    }
}

/// Label font size for a depth: `max(10, 14 - depth)`
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn font_size(depth: usize) -> f64 {
    14_usize.saturating_sub(depth).max(10) as f64
}

/// Link stroke width for the depth of its child end: `max(1, 3 - depth)`
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn link_stroke_width(target_depth: usize) -> f64 {
    3_usize.saturating_sub(target_depth).max(1) as f64
}
