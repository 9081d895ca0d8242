//! Axis-aligned rectangles in world space

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (y grows downhill)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        debug_assert!(left <= right && top <= bottom, "inverted rect");
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle of `size` centered on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self::new(
            center.x - half.x,
            center.y - half.y,
            center.x + half.x,
            center.y + half.y,
        )
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    #[inline]
    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }

    /// Overlap on both axes; shared edges do not count
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        intersects(self, other)
    }
}

/// Standard AABB overlap test
#[inline]
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.left < b.right && a.right > b.left && a.top < b.bottom && a.bottom > b.top
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlapping_rects_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 15.0, 15.0);
        assert!(intersects(&a, &b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!intersects(&a, &Rect::new(10.0, 0.0, 20.0, 10.0)));
        assert!(!intersects(&a, &Rect::new(0.0, 10.0, 10.0, 20.0)));
        assert!(!intersects(&a, &Rect::new(10.0, 10.0, 20.0, 20.0)));
    }

    #[test]
    fn test_separate_rects_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!intersects(&a, &Rect::new(20.0, 0.0, 30.0, 10.0)));
        assert!(!intersects(&a, &Rect::new(0.0, -30.0, 10.0, -20.0)));
    }

    #[test]
    fn test_contained_rect_intersects() {
        let outer = Rect::new(-50.0, -50.0, 50.0, 50.0);
        let inner = Rect::new(-1.0, -1.0, 1.0, 1.0);
        assert!(intersects(&outer, &inner));
        assert!(intersects(&inner, &outer));
    }

    #[test]
    fn test_centered() {
        let r = Rect::centered(Vec2::new(10.0, 20.0), Vec2::new(4.0, 6.0));
        assert_eq!(r, Rect::new(8.0, 17.0, 12.0, 23.0));
        assert_eq!(r.width(), 4.0);
        assert_eq!(r.height(), 6.0);
        assert_eq!(r.top_left(), Vec2::new(8.0, 17.0));
    }

    fn arb_rect() -> impl Strategy<Value = Rect> {
        (-500.0f32..500.0, -500.0f32..500.0, 0.0f32..200.0, 0.0f32..200.0)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, x + w, y + h))
    }

    proptest! {
        #[test]
        fn prop_intersects_is_symmetric(a in arb_rect(), b in arb_rect()) {
            prop_assert_eq!(intersects(&a, &b), intersects(&b, &a));
        }

        #[test]
        fn prop_rect_right_of_bounds_never_intersects(a in arb_rect(), gap in 0.0f32..100.0, w in 0.0f32..100.0) {
            let b = Rect::new(a.right + gap, a.top, a.right + gap + w, a.bottom);
            prop_assert!(!intersects(&a, &b));
        }

        #[test]
        fn prop_rect_below_bounds_never_intersects(a in arb_rect(), gap in 0.0f32..100.0, h in 0.0f32..100.0) {
            let b = Rect::new(a.left, a.bottom + gap, a.right, a.bottom + gap + h);
            prop_assert!(!intersects(&a, &b));
        }
    }
}
