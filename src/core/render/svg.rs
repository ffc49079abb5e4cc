//! Static SVG snapshot of the drawn tree
//!
//! Renders the visual set as it stands at a given instant through the askama
//! template `templates/tree.svg`.

use super::style::LINK_COLOR;
use super::{RenderController, Segment, VisualNode};
use crate::core::camera::Transform;
use crate::core::geometry::Size;
use askama::Template;

/// Background colour of the snapshot
pub const BACKGROUND: &str = "#0f172a";

/// One link, ready for the template
#[derive(Debug, Clone)]
pub struct SvgLink {
    /// Path data
    pub d: String,
    /// Stroke width
    pub width: f64,
}

/// One node, ready for the template
#[derive(Debug, Clone)]
pub struct SvgNode {
    /// Drawing-space x
    pub x: String,
    /// Drawing-space y
    pub y: String,
    /// Whether this is a language
    pub leaf: bool,
    /// Marker radius
    pub radius: f64,
    /// Marker fill
    pub fill: &'static str,
    /// Marker stroke
    pub stroke: &'static str,
    /// Marker stroke width
    pub stroke_width: f64,
    /// Label text
    pub label: String,
    /// Label offset
    pub dx: f64,
    /// `start` or `end`
    pub anchor: &'static str,
    /// Label size
    pub font_size: f64,
    /// Label weight
    pub font_weight: u16,
    /// Label colour
    pub color: &'static str,
    /// Underlined label
    pub underline: bool,
}

#[derive(Template)]
#[template(path = "tree.svg", escape = "html")]
struct TreeSvg<'a> {
    title: &'a str,
    width: f64,
    height: f64,
    background: &'a str,
    link_color: &'a str,
    transform: String,
    links: Vec<SvgLink>,
    nodes: Vec<SvgNode>,
}

/// Horizontal cubic Bézier between a link's ends
#[must_use]
pub fn link_path(segment: Segment) -> String {
    let Segment { source, target } = segment;
    let mid = (source.x + target.x) / 2.0;
    format!(
        "M{:.2},{:.2}C{mid:.2},{:.2} {mid:.2},{:.2} {:.2},{:.2}",
        source.x, source.y, source.y, target.y, target.x, target.y
    )
}

fn svg_node(node: &VisualNode, now_ms: u64) -> SvgNode {
    let p = node.motion.value_at(now_ms);
    let style = &node.style;
    SvgNode {
        x: format!("{:.2}", p.x),
        y: format!("{:.2}", p.y),
        leaf: node.leaf,
        radius: node.radius_at(now_ms),
        fill: style.fill,
        stroke: style.stroke,
        stroke_width: node.stroke_width_at(now_ms),
        label: node.label.clone(),
        dx: style.label.dx,
        anchor: style.label.anchor.as_svg(),
        font_size: style.label.font_size,
        font_weight: style.label.font_weight(),
        color: style.label.color,
        underline: style.label.underline,
    }
}

/// Render the visual set at `now_ms` under the given camera transform.
///
/// # Errors
///
/// Returns an error if template rendering fails.
pub fn render_svg(
    controller: &RenderController,
    transform: Transform,
    canvas: Size,
    title: &str,
    now_ms: u64,
) -> Result<String, askama::Error> {
    let links = controller
        .links()
        .map(|link| SvgLink {
            d: link_path(link.motion.value_at(now_ms)),
            width: link.stroke_width,
        })
        .collect();
    let nodes = controller
        .nodes()
        .map(|node| svg_node(node, now_ms))
        .collect();

    TreeSvg {
        title,
        width: canvas.width,
        height: canvas.height,
        background: BACKGROUND,
        link_color: LINK_COLOR,
        transform: transform.to_svg(),
        links,
        nodes,
    }
    .render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Point;
    use crate::core::layout::{layout, LayoutConfig};
    use crate::core::models::{TaxonNode, TaxonTree};

    #[test]
    fn test_link_path_shape() {
        let d = link_path(Segment {
            source: Point::new(0.0, 0.0),
            target: Point::new(180.0, -25.0),
        });
        assert_eq!(d, "M0.00,0.00C90.00,0.00 90.00,-25.00 180.00,-25.00");
    }

    #[test]
    fn test_render_contains_nodes_and_escapes_labels() {
        let root = TaxonNode::family(
            "Root",
            vec![
                TaxonNode::language("Tok <Pisin>"),
                TaxonNode::language("Gothic").with_status("extinct"),
            ],
        );
        let mut tree = TaxonTree::build(&root, 3);
        let result = layout(&mut tree, &LayoutConfig::default());
        let mut controller = RenderController::new();
        controller.reconcile(&tree, &result, tree.root(), 0, 0);

        let svg = render_svg(
            &controller,
            Transform::IDENTITY,
            Size::new(800.0, 600.0),
            "Languages",
            0,
        )
        .unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("Tok &lt;Pisin&gt;"));
        assert!(svg.contains("#ef4444"));
        assert_eq!(svg.matches("<circle").count(), 3);
        assert_eq!(svg.matches("<path").count(), 2);
        assert!(svg.contains("text-decoration=\"underline\""));
    }
}
