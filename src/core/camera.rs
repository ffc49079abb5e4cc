//! Camera (pan/zoom) over the drawing
//!
//! The camera holds a single affine [`Transform`] (uniform scale plus
//! translation) from drawing space to screen space. Direct manipulation (pan,
//! wheel zoom) applies immediately; programmatic moves (fit, focus) animate
//! through a [`Transition`] evaluated against the clock.

use crate::core::geometry::{Point, Rect, Size, Vector};
use crate::core::render::transition::{Lerp, Transition};
use logger::debug;
use serde::{Deserialize, Serialize};

/// Camera tuning, stored under `[camera]` in the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Smallest allowed scale
    pub min_scale: f64,
    /// Largest allowed scale
    pub max_scale: f64,
    /// Scale used when focusing a node
    pub focus_scale: f64,
    /// Fraction of the viewport left empty by fit-to-content
    pub fit_margin: f64,
    /// Viewport width in px
    pub viewport_width: f64,
    /// Viewport height in px
    pub viewport_height: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.1,
            max_scale: 5.0,
            focus_scale: 1.5,
            fit_margin: 0.1,
            viewport_width: 1200.0,
            viewport_height: 800.0,
        }
    }
}

impl CameraConfig {
    /// Viewport size
    #[must_use]
    pub const fn viewport(&self) -> Size {
        Size::new(self.viewport_width, self.viewport_height)
    }
}

/// `screen = k * world + (x, y)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Uniform scale
    pub k: f64,
    /// Horizontal translation
    pub x: f64,
    /// Vertical translation
    pub y: f64,
}

impl Transform {
    /// The identity transform
    pub const IDENTITY: Self = Self {
        k: 1.0,
        x: 0.0,
        y: 0.0,
    };

    /// Map a drawing-space point to the screen
    #[must_use]
    pub fn apply(&self, p: Point) -> Point {
        Point::new(self.k.mul_add(p.x, self.x), self.k.mul_add(p.y, self.y))
    }

    /// Map a screen point back to drawing space
    #[must_use]
    pub fn invert(&self, p: Point) -> Point {
        Point::new((p.x - self.x) / self.k, (p.y - self.y) / self.k)
    }

    /// SVG `transform` attribute value
    #[must_use]
    pub fn to_svg(&self) -> String {
        format!("translate({:.2},{:.2}) scale({:.4})", self.x, self.y, self.k)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Lerp for Transform {
    fn lerp(self, to: Self, t: f64) -> Self {
        Self {
            k: self.k.lerp(to.k, t),
            x: self.x.lerp(to.x, t),
            y: self.y.lerp(to.y, t),
        }
    }
}

/// Pan/zoom state of the view
#[derive(Debug, Clone)]
pub struct Camera {
    config: CameraConfig,
    motion: Transition<Transform>,
}

impl Camera {
    /// A camera at the identity transform
    #[must_use]
    pub fn new(config: CameraConfig) -> Self {
        Self {
            config,
            motion: Transition::settled(Transform::IDENTITY),
        }
    }

    /// Camera settings
    #[must_use]
    pub const fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Viewport size
    #[must_use]
    pub const fn viewport(&self) -> Size {
        self.config.viewport()
    }

    /// Transform at `now_ms`, mid-animation if one is running
    #[must_use]
    pub fn transform_at(&self, now_ms: u64) -> Transform {
        self.motion.value_at(now_ms)
    }

    /// Transform the camera is heading to
    #[must_use]
    pub const fn target(&self) -> Transform {
        self.motion.to
    }

    /// Whether a programmatic move is still running
    #[must_use]
    pub fn is_animating(&self, now_ms: u64) -> bool {
        !self.motion.is_finished(now_ms)
    }

    /// Screen position of a drawing-space point at `now_ms`
    #[must_use]
    pub fn screen_point(&self, p: Point, now_ms: u64) -> Point {
        self.transform_at(now_ms).apply(p)
    }

    fn clamp_scale(&self, k: f64) -> f64 {
        k.clamp(self.config.min_scale, self.config.max_scale)
    }

    fn jump(&mut self, to: Transform) {
        self.motion = Transition::settled(to);
    }

    /// Translate by a screen-space delta, immediately
    pub fn pan(&mut self, delta: Vector, now_ms: u64) {
        let t = self.transform_at(now_ms);
        self.jump(Transform {
            x: t.x + delta.x,
            y: t.y + delta.y,
            ..t
        });
    }

    /// Scale by `factor` around a screen point, immediately.
    ///
    /// The drawing point under `point` stays under it unless the scale hits
    /// the extent, in which case the clamped scale is used.
    pub fn zoom_at(&mut self, point: Point, factor: f64, now_ms: u64) {
        let t = self.transform_at(now_ms);
        let anchor = t.invert(point);
        let k = self.clamp_scale(t.k * factor);
        self.jump(Transform {
            k,
            x: k.mul_add(-anchor.x, point.x),
            y: k.mul_add(-anchor.y, point.y),
        });
    }

    /// Animate so that `bounds` fills the viewport minus the fit margin.
    ///
    /// Only the upper end of the scale extent applies: content of any size
    /// fits, however far that zooms out.
    pub fn fit_to_content(&mut self, bounds: Rect, now_ms: u64, duration_ms: u64) -> Transform {
        let viewport = self.viewport();
        let bw = bounds.width().max(1.0);
        let bh = bounds.height().max(1.0);
        let raw = (viewport.width / bw).min(viewport.height / bh) * (1.0 - self.config.fit_margin);
        let k = raw.min(self.config.max_scale);
        let center = bounds.center();
        let target = Transform {
            k,
            x: k.mul_add(-center.x, viewport.width / 2.0),
            y: k.mul_add(-center.y, viewport.height / 2.0),
        };
        debug!(
            "Fitting {:.1}x{:.1} content at scale {k:.3}",
            bounds.width(),
            bounds.height()
        );
        self.motion = self.motion.retarget(target, now_ms, duration_ms);
        target
    }

    /// Animate so that `point` sits at the viewport centre at the focus scale
    pub fn focus_on(&mut self, point: Point, now_ms: u64, duration_ms: u64) -> Transform {
        let viewport = self.viewport().center();
        let k = self.clamp_scale(self.config.focus_scale);
        let target = Transform {
            k,
            x: k.mul_add(-point.x, viewport.x),
            y: k.mul_add(-point.y, viewport.y),
        };
        self.motion = self.motion.retarget(target, now_ms, duration_ms);
        target
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point) -> bool {
        a.distance(b) < 1e-6
    }

    #[test]
    fn test_apply_invert() {
        let t = Transform {
            k: 2.0,
            x: 10.0,
            y: -5.0,
        };
        let p = Point::new(3.0, 4.0);
        assert_eq!(t.apply(p), Point::new(16.0, 3.0));
        assert!(close(t.invert(t.apply(p)), p));
    }

    #[test]
    fn test_pan_is_immediate() {
        let mut camera = Camera::default();
        camera.pan(Point::new(30.0, -10.0), 0);
        assert_eq!(
            camera.transform_at(0),
            Transform {
                k: 1.0,
                x: 30.0,
                y: -10.0
            }
        );
        assert!(!camera.is_animating(0));
    }

    #[test]
    fn test_zoom_keeps_anchor_fixed() {
        let mut camera = Camera::default();
        let anchor = Point::new(400.0, 300.0);
        let world = camera.transform_at(0).invert(anchor);
        camera.zoom_at(anchor, 2.0, 0);
        assert!((camera.transform_at(0).k - 2.0).abs() < f64::EPSILON);
        assert!(close(camera.screen_point(world, 0), anchor));
    }

    #[test]
    fn test_zoom_clamps_to_extent() {
        let mut camera = Camera::default();
        camera.zoom_at(Point::ZERO, 100.0, 0);
        assert!((camera.transform_at(0).k - 5.0).abs() < f64::EPSILON);
        camera.zoom_at(Point::ZERO, 1e-6, 0);
        assert!((camera.transform_at(0).k - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fit_to_content_contains_bounds() {
        let mut camera = Camera::default();
        let bounds = Rect {
            min: Point::new(-50.0, -400.0),
            max: Point::new(700.0, 600.0),
        };
        let target = camera.fit_to_content(bounds, 0, 250);
        assert!(camera.is_animating(100));
        assert_eq!(camera.transform_at(250), target);

        let viewport = camera.viewport();
        for corner in [bounds.min, bounds.max] {
            let s = target.apply(corner);
            assert!(s.x >= 0.0 && s.x <= viewport.width);
            assert!(s.y >= 0.0 && s.y <= viewport.height);
        }
        // The limiting axis keeps exactly the margin.
        let used = bounds.height() * target.k;
        assert!((used - viewport.height * 0.9).abs() < 1e-6);
        assert!(close(target.apply(bounds.center()), viewport.center()));
    }

    #[test]
    fn test_fit_tiny_content_clamps_scale() {
        let mut camera = Camera::default();
        let target = camera.fit_to_content(Rect::from_point(Point::new(5.0, 5.0)), 0, 0);
        assert!((target.k - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fit_huge_content_goes_below_min_scale() {
        let mut camera = Camera::default();
        let bounds = Rect {
            min: Point::new(0.0, -10_000.0),
            max: Point::new(900.0, 10_000.0),
        };
        let target = camera.fit_to_content(bounds, 0, 0);
        assert!(target.k < camera.config().min_scale);
        for corner in [bounds.min, bounds.max] {
            let s = target.apply(corner);
            assert!(s.y >= 0.0 && s.y <= camera.viewport().height, "{s:?}");
        }
    }

    #[test]
    fn test_focus_centres_point() {
        let mut camera = Camera::default();
        let p = Point::new(360.0, -50.0);
        camera.focus_on(p, 1_000, 750);
        assert!(camera.is_animating(1_500));
        assert!(close(camera.screen_point(p, 1_750), camera.viewport().center()));
        assert!((camera.target().k - 1.5).abs() < f64::EPSILON);
    }
}
