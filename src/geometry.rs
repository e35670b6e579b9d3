//! Pixel geometry of the image and handle.
//!
//! All positions are CSS pixels in the image wrapper's layout space: the
//! handle's `left`/`top` style values and the image's offset box share it.
//! Pointer positions are moved into this space by the DOM layer before they
//! reach the controller.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use std::ops::{Add, Sub};

use focal::FocalPoint;

/// A position in wrapper layout space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

/// The image's layout box relative to its wrapper.
///
/// `left` / `top` are the image's offset within the wrapper,
/// `width` / `height` its rendered size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Whether the box is large enough to map coordinates onto.
    #[must_use]
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Constrain `p` to the box, edges included.
    ///
    /// Uses `max`/`min` rather than `clamp` so a degenerate box collapses to
    /// its origin instead of panicking.
    #[must_use]
    pub fn contain(&self, p: Point) -> Point {
        Point {
            x: p.x.min(self.right()).max(self.left),
            y: p.y.min(self.bottom()).max(self.top),
        }
    }

    /// Pixel position of a focal point: `offset + size * coordinate`.
    #[must_use]
    pub fn point_at(&self, focal: FocalPoint) -> Point {
        Point {
            x: self.left + self.width * focal.x,
            y: self.top + self.height * focal.y,
        }
    }

    /// Map a position in this box to the same relative position in `onto`.
    /// A box without area has no relative positions, so `p` is only
    /// contained in `onto`.
    #[must_use]
    pub fn reproject(&self, p: Point, onto: &Rect) -> Point {
        if !self.has_area() {
            return onto.contain(p);
        }
        Point {
            x: onto.left + (p.x - self.left) / self.width * onto.width,
            y: onto.top + (p.y - self.top) / self.height * onto.height,
        }
    }

    /// Focal point under a pixel position, rounded and clamped.
    ///
    /// Returns `None` for a box without area.
    #[must_use]
    pub fn focal_at(&self, p: Point) -> Option<FocalPoint> {
        if !self.has_area() {
            return None;
        }
        let focal = FocalPoint::new((p.x - self.left) / self.width, (p.y - self.top) / self.height);
        Some(focal.round().clamp())
    }
}
