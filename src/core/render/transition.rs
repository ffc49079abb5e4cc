//! Time-based interpolation, decoupled from any display
//!
//! A [`Transition`] is a pure description (from, to, start, duration, easing)
//! evaluated on demand against a [`Clock`] reading.

use crate::core::geometry::Point;
use std::cell::Cell;
use std::time::Instant;

/// Source of the current time in milliseconds
pub trait Clock {
    /// Milliseconds since an arbitrary, fixed origin
    fn now_ms(&self) -> u64;
}

/// Wall clock measured from construction
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Start a clock at zero
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Clock advanced by hand, for tests and offline rendering
#[derive(Debug, Default, Clone)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    /// Start at `start_ms`
    #[must_use]
    pub const fn starting_at(start_ms: u64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    /// Move forward by `ms`
    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().saturating_add(ms));
    }

    /// Jump to an absolute time
    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Timing curve applied to transition progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant speed
    Linear,
    /// Slow start, fast middle, slow finish
    #[default]
    CubicInOut,
}

impl Easing {
    /// Map linear progress in `[0, 1]` to eased progress
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Self::Linear => t.clamp(0.0, 1.0),
            Self::CubicInOut => ease_in_out_cubic(t),
        }
    }
}

/// Cubic ease-in-out; `t` is clamped to `[0, 1]`
#[must_use]
pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Values that can be blended linearly
pub trait Lerp: Copy {
    /// Blend `self` towards `to`; `t = 0` is `self`, `t = 1` is `to`
    #[must_use]
    fn lerp(self, to: Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(self, to: Self, t: f64) -> Self {
        (to - self).mul_add(t, self)
    }
}

impl Lerp for Point {
    fn lerp(self, to: Self, t: f64) -> Self {
        Self::new(self.x.lerp(to.x, t), self.y.lerp(to.y, t))
    }
}

/// Position between `from` and `to` at progress `t`
#[must_use]
pub fn interpolate(from: Point, to: Point, t: f64) -> Point {
    from.lerp(to, t)
}

/// A value animating from `from` to `to` over a fixed time window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition<T> {
    /// Value at `start_ms`
    pub from: T,
    /// Value from `start_ms + duration_ms` onward
    pub to: T,
    /// Start time
    pub start_ms: u64,
    /// Length of the window; zero jumps straight to `to`
    pub duration_ms: u64,
    /// Timing curve
    pub easing: Easing,
}

impl<T: Lerp> Transition<T> {
    /// Animate between two values with the default ease-in-out curve
    #[must_use]
    pub fn new(from: T, to: T, start_ms: u64, duration_ms: u64) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms,
            easing: Easing::default(),
        }
    }

    /// A value that is already at rest
    #[must_use]
    pub fn settled(value: T) -> Self {
        Self::new(value, value, 0, 0)
    }

    /// Linear progress in `[0, 1]` at `now_ms`
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self, now_ms: u64) -> f64 {
        if self.duration_ms == 0 || now_ms >= self.start_ms.saturating_add(self.duration_ms) {
            return 1.0;
        }
        let elapsed = now_ms.saturating_sub(self.start_ms);
        elapsed as f64 / self.duration_ms as f64
    }

    /// Value at `now_ms`
    #[must_use]
    pub fn value_at(&self, now_ms: u64) -> T {
        let t = self.progress(now_ms);
        if t >= 1.0 {
            return self.to;
        }
        self.from.lerp(self.to, self.easing.apply(t))
    }

    /// Whether the window has elapsed
    #[must_use]
    pub fn is_finished(&self, now_ms: u64) -> bool {
        self.progress(now_ms) >= 1.0
    }

    /// Start a new transition towards `to` from wherever this one is at `now_ms`
    #[must_use]
    pub fn retarget(&self, to: T, now_ms: u64, duration_ms: u64) -> Self {
        Self::new(self.value_at(now_ms), to, now_ms, duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_in_out_cubic_shape() {
        assert!(ease_in_out_cubic(0.0).abs() < f64::EPSILON);
        assert!((ease_in_out_cubic(1.0) - 1.0).abs() < f64::EPSILON);
        assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1e-12);
        assert!(ease_in_out_cubic(0.25) < 0.25);
        assert!(ease_in_out_cubic(0.75) > 0.75);
        assert!((ease_in_out_cubic(-3.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_interpolate_endpoints() {
        let a = Point::new(0.0, 10.0);
        let b = Point::new(100.0, -10.0);
        assert_eq!(interpolate(a, b, 0.0), a);
        assert_eq!(interpolate(a, b, 1.0), b);
        assert_eq!(interpolate(a, b, 0.5), Point::new(50.0, 0.0));
    }

    #[test]
    fn test_transition_timeline() {
        let tr = Transition::new(Point::ZERO, Point::new(100.0, 0.0), 1_000, 500);
        assert_eq!(tr.value_at(0), Point::ZERO);
        assert_eq!(tr.value_at(1_000), Point::ZERO);
        assert!((tr.value_at(1_250).x - 50.0).abs() < 1e-9);
        assert_eq!(tr.value_at(1_500), Point::new(100.0, 0.0));
        assert!(!tr.is_finished(1_499));
        assert!(tr.is_finished(1_500));
    }

    #[test]
    fn test_retarget_starts_from_current_value() {
        let tr = Transition::new(Point::ZERO, Point::new(100.0, 0.0), 0, 500);
        let mid = tr.value_at(250);
        let next = tr.retarget(Point::new(0.0, 40.0), 250, 500);
        assert_eq!(next.from, mid);
        assert_eq!(next.value_at(750), Point::new(0.0, 40.0));
    }

    #[test]
    fn test_huge_duration_does_not_overflow() {
        let tr = Transition::new(Point::ZERO, Point::new(1.0, 0.0), 10, u64::MAX);
        assert!(tr.value_at(20).x < 1e-9);
        assert!(!tr.is_finished(1_000_000));
        assert!(tr.is_finished(u64::MAX));
    }

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::starting_at(10);
        clock.advance(490);
        assert_eq!(clock.now_ms(), 500);
        clock.set(5);
        assert_eq!(clock.now_ms(), 5);
    }
}
