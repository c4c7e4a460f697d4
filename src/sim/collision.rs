//! Axis-aligned collision geometry
//!
//! Every entity reports a hitbox as a [`Rect`]; collisions are plain AABB
//! overlap tests with strict inequalities, so boxes that merely touch do not
//! collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in surface space (top-left origin, y down)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Shrink by `pad_x` on both sides and `pad_top`/`pad_bottom` vertically
    pub fn inset(&self, pad_x: f32, pad_top: f32, pad_bottom: f32) -> Self {
        Self::new(
            self.x + pad_x,
            self.y + pad_top,
            self.w - 2.0 * pad_x,
            self.h - pad_top - pad_bottom,
        )
    }

    /// Strict overlap test
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Inclusive point containment (used for on-screen buttons)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    pub fn translated(&self, offset: Vec2) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.w, self.h)
    }
}

/// Check whether two hitboxes collide
#[inline]
pub fn check_collision(a: &Rect, b: &Rect) -> bool {
    a.overlaps(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_boxes_collide() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(check_collision(&a, &b));
        assert!(check_collision(&b, &a));
    }

    #[test]
    fn touching_edges_do_not_collide() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!check_collision(&a, &right));
        assert!(!check_collision(&a, &below));
    }

    #[test]
    fn contained_box_collides() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 5.0, 5.0);
        assert!(check_collision(&outer, &inner));
    }

    #[test]
    fn contains_is_inclusive() {
        let r = Rect::new(10.0, 5.0, 60.0, 30.0);
        assert!(r.contains(Vec2::new(10.0, 5.0)));
        assert!(r.contains(Vec2::new(70.0, 35.0)));
        assert!(!r.contains(Vec2::new(70.1, 20.0)));
    }

    #[test]
    fn inset_shrinks_symmetrically() {
        let r = Rect::new(0.0, 0.0, 40.0, 40.0).inset(2.0, 3.0, 3.0);
        assert_eq!(r, Rect::new(2.0, 3.0, 36.0, 34.0));
    }
}
