//! Axis-aligned rectangle geometry
//!
//! Every entity occupies a top-left-origin rectangle in playfield space:
//! - pos: top-left corner
//! - size: width and height
//!
//! Overlap tests are strict, so rectangles that only share an edge never collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Rectangle of the given size centered on a point
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            pos: center - size / 2.0,
            size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Center point
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Midpoint of the bottom edge
    pub fn bottom_center(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x / 2.0, self.bottom())
    }

    /// Strict overlap test on all four half-planes
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// Free-function form of [`Rect::overlaps`]
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.overlaps(b)
}
