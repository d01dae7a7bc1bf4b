//! Axis-aligned bounding boxes
//!
//! Every entity carries a cached `Aabb` as its collision proxy, refreshed
//! whenever its position changes. Coordinates are screen-style: y grows
//! downward, so `top < bottom`.

use glam::Vec2;

/// An axis-aligned bounding box with precomputed edges
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Aabb {
    /// Box from a top-left corner and a size
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            left: pos.x,
            right: pos.x + size.x,
            top: pos.y,
            bottom: pos.y + size.y,
        }
    }

    /// Degenerate box at a single point, usable as a grid query
    pub fn point(p: Vec2) -> Self {
        Self {
            left: p.x,
            right: p.x,
            top: p.y,
            bottom: p.y,
        }
    }

    /// Strict overlap test: rectangles sharing only an edge do not collide
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.top < other.bottom
            && self.bottom > other.top
    }

    /// Whether a point lies strictly inside the box
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x > self.left && p.x < self.right && p.y > self.top && p.y < self.bottom
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left + self.right) * 0.5,
            (self.top + self.bottom) * 0.5,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap_one_unit() {
        // Overlap by one unit on each axis must register
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(40.0, 50.0));
        let b = Aabb::new(Vec2::new(39.0, 40.0), Vec2::new(35.0, 35.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_edge_touch_is_not_overlap() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let right = Aabb::new(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        let below = Aabb::new(Vec2::new(0.0, 10.0), Vec2::new(10.0, 10.0));
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn test_contained_box_overlaps() {
        let outer = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 100.0));
        let inner = Aabb::new(Vec2::new(40.0, 40.0), Vec2::new(10.0, 10.0));
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_contains_point() {
        let a = Aabb::new(Vec2::new(10.0, 10.0), Vec2::new(20.0, 20.0));
        assert!(a.contains_point(Vec2::new(15.0, 15.0)));
        // Boundary is outside under the strict rule
        assert!(!a.contains_point(Vec2::new(10.0, 15.0)));
        assert!(!a.contains_point(Vec2::new(5.0, 15.0)));
    }

    #[test]
    fn test_center() {
        let a = Aabb::new(Vec2::new(100.0, 100.0), Vec2::new(35.0, 35.0));
        assert_eq!(a.center(), Vec2::new(117.5, 117.5));
    }

    proptest! {
        #[test]
        fn prop_overlap_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            aw in 1.0f32..100.0, ah in 1.0f32..100.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            bw in 1.0f32..100.0, bh in 1.0f32..100.0,
        ) {
            let a = Aabb::new(Vec2::new(ax, ay), Vec2::new(aw, ah));
            let b = Aabb::new(Vec2::new(bx, by), Vec2::new(bw, bh));
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn prop_separated_never_overlap(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            aw in 1.0f32..100.0, ah in 1.0f32..100.0,
            gap in 0.0f32..100.0,
        ) {
            let a = Aabb::new(Vec2::new(ax, ay), Vec2::new(aw, ah));
            // Translate past the right edge; even gap == 0 only touches
            let b = Aabb::new(Vec2::new(ax + aw + gap, ay), Vec2::new(aw, ah));
            prop_assert!(!a.overlaps(&b));
        }

        #[test]
        fn prop_interior_point_means_overlap(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            aw in 2.0f32..100.0, ah in 2.0f32..100.0,
            fx in 0.1f32..0.9, fy in 0.1f32..0.9,
        ) {
            let a = Aabb::new(Vec2::new(ax, ay), Vec2::new(aw, ah));
            let p = Vec2::new(ax + aw * fx, ay + ah * fy);
            let probe = Aabb::new(p, Vec2::new(1.0, 1.0));
            prop_assert!(a.contains_point(p));
            prop_assert!(a.overlaps(&probe));
        }
    }
}
