//! Integer rectangle geometry for hitboxes and tile shapes
//!
//! Rects live in pixel space with the origin at the top-left corner. The
//! right and bottom edges are exclusive, so two rects that merely touch do
//! not overlap.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned integer rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Rect anchored at a sub-pixel position (fractional part is truncated)
    pub fn at(pos: Vec2, size: (i32, i32)) -> Self {
        Self::new(pos.x as i32, pos.y as i32, size.0, size.1)
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    #[inline]
    pub fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    #[inline]
    pub fn center_y(&self) -> i32 {
        self.y + self.h / 2
    }

    /// Centre point (integer, rounded toward the top-left)
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.center_x() as f32, self.center_y() as f32)
    }

    /// Move so the right edge sits at `edge`
    pub fn set_right(&mut self, edge: i32) {
        self.x = edge - self.w;
    }

    /// Move so the left edge sits at `edge`
    pub fn set_left(&mut self, edge: i32) {
        self.x = edge;
    }

    /// Move so the bottom edge sits at `edge`
    pub fn set_bottom(&mut self, edge: i32) {
        self.y = edge - self.h;
    }

    /// Move so the top edge sits at `edge`
    pub fn set_top(&mut self, edge: i32) {
        self.y = edge;
    }

    /// Strict overlap test (touching edges do not count)
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Point containment (left/top inclusive, right/bottom exclusive)
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.x as f32
            && point.x < self.right() as f32
            && point.y >= self.y as f32
            && point.y < self.bottom() as f32
    }

    /// Area in square pixels
    pub fn area(&self) -> i32 {
        self.w * self.h
    }
}
