//! Interaction session
//!
//! A [`Session`] owns everything one interactive view needs: the tree, its
//! last layout, the drawn elements, the camera and the clock. The host feeds
//! it [`Event`]s and acts on the returned [`Effect`]s; the session itself
//! never touches a display or a browser.

use crate::core::camera::{Camera, CameraConfig, Transform};
use crate::core::geometry::{Point, Rect, Size, Vector};
use crate::core::layout::{layout, LayoutConfig, LayoutResult};
use crate::core::models::{NodeId, TaxonNode, TaxonTree};
use crate::core::navigation::{lookup_identifier, reference_url, NavigationConfig};
use crate::core::render::{to_drawing, AnimationConfig, Clock, RenderController};
use logger::{debug, info};

/// Offset of the detail panel from the pointer
pub const DETAIL_OFFSET: Vector = Point::new(12.0, 12.0);

/// Every tunable the engine reads
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineSettings {
    /// Layout spacing and collapse policy
    pub layout: LayoutConfig,
    /// Transition durations
    pub animation: AnimationConfig,
    /// Scale extent, fit margin, viewport
    pub camera: CameraConfig,
    /// Reference links
    pub navigation: NavigationConfig,
}

/// Input from the host
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Primary click on a node
    Click(NodeId),
    /// Pointer moved onto a node
    PointerEnter {
        /// Hovered node
        node: NodeId,
        /// Pointer position in screen space
        pointer: Point,
    },
    /// Pointer left a node
    PointerLeave(NodeId),
    /// Reveal and centre a node by name
    Focus(String),
    /// Drag by a screen-space delta
    Pan(Vector),
    /// Wheel zoom around a screen point
    Zoom {
        /// Fixed screen point
        point: Point,
        /// Scale multiplier
        factor: f64,
    },
    /// Fit the drawn content into the viewport
    FitToContent,
    /// Animation tick
    Frame,
}

/// Hover details of a node
#[derive(Debug, Clone, PartialEq)]
pub struct DetailPanel {
    /// Node name
    pub name: String,
    /// Proto-language
    pub proto: Option<String>,
    /// Status
    pub status: Option<String>,
    /// Note
    pub note: Option<String>,
    /// Call-to-action, languages only
    pub call_to_action: Option<String>,
    /// Top-left corner in screen space
    pub anchor: Point,
}

/// Output for the host
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Open an external reference for a language
    OpenReference {
        /// Display name
        name: String,
        /// Article identifier
        identifier: String,
        /// Full URL
        url: String,
    },
    /// Show the hover panel
    ShowDetail(DetailPanel),
    /// Hide the hover panel
    HideDetail,
    /// The drawing needs a different canvas height
    ResizeCanvas {
        /// New height in px
        height: f64,
    },
}

/// One interactive view over a taxonomy
#[derive(Debug)]
pub struct Session<C: Clock> {
    tree: TaxonTree,
    layout: LayoutResult,
    render: RenderController,
    camera: Camera,
    settings: EngineSettings,
    canvas_height: f64,
    clock: C,
}

impl<C: Clock> Session<C> {
    /// Build the tree and run the initial layout from the root
    pub fn new(root: &TaxonNode, settings: EngineSettings, clock: C) -> Self {
        let mut tree = TaxonTree::build(root, settings.layout.collapse_depth);
        let result = layout(&mut tree, &settings.layout);
        let mut render = RenderController::new();
        let source = tree.root();
        render.reconcile(
            &tree,
            &result,
            source,
            clock.now_ms(),
            settings.animation.relayout_ms,
        );
        tree.commit_positions();

        let camera = Camera::new(settings.camera.clone());
        let canvas_height = result.canvas_height(camera.viewport().height);
        info!(
            "Session started with {} nodes ({} visible)",
            tree.len(),
            result.visible.len()
        );
        Self {
            tree,
            layout: result,
            render,
            camera,
            settings,
            canvas_height,
            clock,
        }
    }

    /// Apply one event
    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        let now = self.clock.now_ms();
        match event {
            Event::Click(id) => self.click(id),
            Event::PointerEnter { node, pointer } => self.pointer_enter(node, pointer),
            Event::PointerLeave(id) => {
                self.render
                    .set_hovered(id, false, now, self.settings.animation.hover_ms);
                vec![Effect::HideDetail]
            }
            Event::Focus(name) => self.focus(&name),
            Event::Pan(delta) => {
                self.camera.pan(delta, now);
                Vec::new()
            }
            Event::Zoom { point, factor } => {
                self.camera.zoom_at(point, factor, now);
                Vec::new()
            }
            Event::FitToContent => {
                if let Some(bounds) = self.content_bounds() {
                    self.camera
                        .fit_to_content(bounds, now, self.settings.animation.fit_ms);
                }
                Vec::new()
            }
            Event::Frame => {
                self.render.advance(now);
                Vec::new()
            }
        }
    }

    fn click(&mut self, id: NodeId) -> Vec<Effect> {
        let Some(node) = self.tree.node(id) else {
            return Vec::new();
        };
        if node.is_leaf() {
            let name = node.name.clone();
            info!("Opening reference for '{name}'");
            return vec![Effect::OpenReference {
                identifier: lookup_identifier(&name),
                url: reference_url(&name, &self.settings.navigation),
                name,
            }];
        }
        if self.tree.toggle_expand(id) {
            self.relayout(id)
        } else {
            Vec::new()
        }
    }

    fn pointer_enter(&mut self, id: NodeId, pointer: Point) -> Vec<Effect> {
        let Some(node) = self.tree.node(id) else {
            return Vec::new();
        };
        let hoverable = self.render.node(id).is_some_and(|v| !v.exiting);
        if !hoverable {
            debug!("Ignoring hover on {id}, which is not on screen");
            return Vec::new();
        }
        let panel = DetailPanel {
            name: node.name.clone(),
            proto: node.proto.clone(),
            status: node.status.clone(),
            note: node.note.clone(),
            call_to_action: node
                .is_leaf()
                .then(|| self.settings.navigation.hint.clone()),
            anchor: pointer + DETAIL_OFFSET,
        };
        self.render.set_hovered(
            id,
            true,
            self.clock.now_ms(),
            self.settings.animation.hover_ms,
        );
        vec![Effect::ShowDetail(panel)]
    }

    fn focus(&mut self, name: &str) -> Vec<Effect> {
        let Some(id) = self.tree.find_by_name(name) else {
            debug!("Focus request for unknown taxon '{name}'");
            return Vec::new();
        };
        let effects = if self.tree.ensure_visible(id) {
            self.relayout(id)
        } else {
            Vec::new()
        };
        if let Some(target) = self.tree.node(id).and_then(|n| n.position) {
            let point = to_drawing(target);
            debug!("Focusing '{name}' ({id}) at {:.1},{:.1}", point.x, point.y);
            self.camera.focus_on(
                point,
                self.clock.now_ms(),
                self.settings.animation.camera_ms,
            );
        }
        effects
    }

    /// Lay out again and animate from `source`
    fn relayout(&mut self, source: NodeId) -> Vec<Effect> {
        let now = self.clock.now_ms();
        let result = layout(&mut self.tree, &self.settings.layout);
        self.render.reconcile(
            &self.tree,
            &result,
            source,
            now,
            self.settings.animation.relayout_ms,
        );
        self.tree.commit_positions();
        self.layout = result;

        let height = self.layout.canvas_height(self.camera.viewport().height);
        if (height - self.canvas_height).abs() > f64::EPSILON {
            self.canvas_height = height;
            vec![Effect::ResizeCanvas { height }]
        } else {
            Vec::new()
        }
    }

    /// Bounding box of the drawn content right now
    #[must_use]
    pub fn content_bounds(&self) -> Option<Rect> {
        self.render.content_bounds(self.clock.now_ms())
    }

    /// Screen position of a drawn node right now
    #[must_use]
    pub fn screen_position(&self, id: NodeId) -> Option<Point> {
        let now = self.clock.now_ms();
        self.render
            .node_position(id, now)
            .map(|p| self.camera.screen_point(p, now))
    }

    /// Current camera transform
    #[must_use]
    pub fn transform(&self) -> Transform {
        self.camera.transform_at(self.clock.now_ms())
    }

    /// Whether any element or the camera is still moving
    #[must_use]
    pub fn is_animating(&self) -> bool {
        let now = self.clock.now_ms();
        self.render.is_animating(now) || self.camera.is_animating(now)
    }

    /// Canvas size: viewport width, grown height
    #[must_use]
    pub fn canvas(&self) -> Size {
        Size::new(self.camera.viewport().width, self.canvas_height)
    }

    /// The tree
    #[must_use]
    pub const fn tree(&self) -> &TaxonTree {
        &self.tree
    }

    /// Last layout
    #[must_use]
    pub const fn layout(&self) -> &LayoutResult {
        &self.layout
    }

    /// Drawn elements
    #[must_use]
    pub const fn render(&self) -> &RenderController {
        &self.render
    }

    /// Camera
    #[must_use]
    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Settings in use
    #[must_use]
    pub const fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// The clock driving transitions
    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::ManualClock;

    fn dataset() -> TaxonNode {
        TaxonNode::family(
            "Languages",
            vec![
                TaxonNode::family(
                    "Indo-European",
                    vec![TaxonNode::family(
                        "Germanic",
                        vec![
                            TaxonNode::family(
                                "West Germanic",
                                vec![
                                    TaxonNode::language("English"),
                                    TaxonNode::language("German"),
                                ],
                            ),
                            TaxonNode::language("Gothic")
                                .with_status("extinct")
                                .with_note("Attested in the Codex Argenteus"),
                        ],
                    )
                    .with_proto("Proto-Germanic")],
                ),
                TaxonNode::language("Basque"),
            ],
        )
    }

    fn session() -> Session<ManualClock> {
        Session::new(&dataset(), EngineSettings::default(), ManualClock::default())
    }

    #[test]
    fn test_initial_collapse_policy() {
        let s = session();
        let west = s.tree().find_by_name("West Germanic").unwrap();
        let germanic = s.tree().find_by_name("Germanic").unwrap();
        assert!(!s.tree().node(west).unwrap().is_expanded());
        assert!(s.tree().node(germanic).unwrap().is_expanded());
        assert!(s.render().node(west).is_some());
        assert!(s.render().node(s.tree().find_by_name("English").unwrap()).is_none());
    }

    #[test]
    fn test_click_family_toggles_and_relayouts() {
        let mut s = session();
        let germanic = s.tree().find_by_name("Germanic").unwrap();
        let before = s.tree().visible_ids();
        let effects = s.handle(Event::Click(germanic));
        assert!(effects
            .iter()
            .all(|e| matches!(e, Effect::ResizeCanvas { .. })));
        assert!(!s.tree().node(germanic).unwrap().is_expanded());
        assert_ne!(s.tree().visible_ids(), before);
        s.handle(Event::Click(germanic));
        assert_eq!(s.tree().visible_ids(), before);
    }

    #[test]
    fn test_click_root_is_noop() {
        let mut s = session();
        let root = s.tree().root();
        assert!(s.handle(Event::Click(root)).is_empty());
        assert!(s.tree().node(root).unwrap().is_expanded());
    }

    #[test]
    fn test_pointer_enter_and_leave() {
        let mut s = session();
        let gothic = s.tree().find_by_name("Gothic").unwrap();
        let effects = s.handle(Event::PointerEnter {
            node: gothic,
            pointer: Point::new(100.0, 50.0),
        });
        let Some(Effect::ShowDetail(panel)) = effects.first() else {
            panic!("expected a detail panel, got {effects:?}");
        };
        assert_eq!(panel.anchor, Point::new(112.0, 62.0));
        assert_eq!(panel.status.as_deref(), Some("extinct"));
        assert_eq!(panel.note.as_deref(), Some("Attested in the Codex Argenteus"));
        assert!(panel.call_to_action.is_some());
        assert!(s.render().node(gothic).unwrap().hovered);

        assert_eq!(s.handle(Event::PointerLeave(gothic)), vec![Effect::HideDetail]);
        assert!(!s.render().node(gothic).unwrap().hovered);
    }

    #[test]
    fn test_family_panel_has_no_call_to_action() {
        let mut s = session();
        let germanic = s.tree().find_by_name("Germanic").unwrap();
        let effects = s.handle(Event::PointerEnter {
            node: germanic,
            pointer: Point::ZERO,
        });
        let Some(Effect::ShowDetail(panel)) = effects.first() else {
            panic!("expected a detail panel, got {effects:?}");
        };
        assert!(panel.call_to_action.is_none());
        assert_eq!(panel.proto.as_deref(), Some("Proto-Germanic"));
    }

    #[test]
    fn test_hover_animates_over_hover_duration() {
        let mut s = session();
        let basque = s.tree().find_by_name("Basque").unwrap();
        s.clock().advance(1_000);
        s.handle(Event::PointerEnter {
            node: basque,
            pointer: Point::ZERO,
        });
        assert!(s.is_animating());
        s.clock().advance(100);
        let mid = s.render().node(basque).unwrap().radius_at(s.clock().now_ms());
        assert!((mid - 5.0).abs() < 1e-9, "{mid}");
        s.clock().advance(100);
        assert!(!s.is_animating());
    }

    #[test]
    fn test_pointer_enter_on_exiting_node_shows_nothing() {
        let mut s = session();
        let germanic = s.tree().find_by_name("Germanic").unwrap();
        let gothic = s.tree().find_by_name("Gothic").unwrap();
        s.clock().advance(1_000);
        s.handle(Event::Click(germanic));
        assert!(s.render().node(gothic).unwrap().exiting);

        let effects = s.handle(Event::PointerEnter {
            node: gothic,
            pointer: Point::ZERO,
        });
        assert!(effects.is_empty());
        assert!(!s.render().node(gothic).unwrap().hovered);
    }

    #[test]
    fn test_zoom_and_pan_events() {
        let mut s = session();
        s.handle(Event::Zoom {
            point: Point::new(600.0, 400.0),
            factor: 50.0,
        });
        assert!((s.transform().k - 5.0).abs() < f64::EPSILON);
        let before = s.transform();
        s.handle(Event::Pan(Point::new(10.0, 0.0)));
        assert!((s.transform().x - before.x - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_frame_drops_finished_exits() {
        let mut s = session();
        let germanic = s.tree().find_by_name("Germanic").unwrap();
        let gothic = s.tree().find_by_name("Gothic").unwrap();
        s.clock().advance(1_000);
        s.handle(Event::Click(germanic));
        assert!(s.render().node(gothic).unwrap().exiting);
        s.clock().advance(500);
        s.handle(Event::Frame);
        assert!(s.render().node(gothic).is_none());
        assert!(!s.is_animating());
    }
}
