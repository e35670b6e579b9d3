//! Handle animation for click-to-place.
//!
//! A click on the image glides the handle to the click point instead of
//! jumping there. Time comes from the animation-frame callback, so the tween
//! pins its start to the first frame it is sampled on.

#[cfg(test)]
#[path = "animation_test.rs"]
mod animation_test;

use std::f64::consts::PI;

use crate::geometry::Point;

/// Position of an in-flight tween at one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenSample {
    pub position: Point,
    pub done: bool,
}

/// Linear path from `from` to `to`, eased with [`swing`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: Point,
    pub to: Point,
    pub duration_ms: f64,
    started_ms: Option<f64>,
}

impl Tween {
    #[must_use]
    pub fn new(from: Point, to: Point, duration_ms: f64) -> Self {
        Self { from, to, duration_ms, started_ms: None }
    }

    /// Whether a frame has been sampled yet.
    #[must_use]
    pub fn started(&self) -> bool {
        self.started_ms.is_some()
    }

    /// Sample the tween at `now_ms`.
    pub fn sample(&mut self, now_ms: f64) -> TweenSample {
        let started = *self.started_ms.get_or_insert(now_ms);
        if self.duration_ms <= 0.0 {
            return TweenSample { position: self.to, done: true };
        }
        let progress = ((now_ms - started) / self.duration_ms).clamp(0.0, 1.0);
        if progress >= 1.0 {
            return TweenSample { position: self.to, done: true };
        }
        let eased = swing(progress);
        let position = Point {
            x: self.from.x + (self.to.x - self.from.x) * eased,
            y: self.from.y + (self.to.y - self.from.y) * eased,
        };
        TweenSample { position, done: false }
    }
}

/// Ease-in-out curve: slow at both ends, `swing(0) = 0`, `swing(1) = 1`.
#[must_use]
pub fn swing(progress: f64) -> f64 {
    0.5 - (progress * PI).cos() / 2.0
}
