//! Axis-aligned box collision
//!
//! Every entity in the runner is a rectangle, so a single strict overlap
//! test covers player/obstacle and player/item contact.

use glam::Vec2;

/// Axis-aligned rectangle in screen space (top-left origin, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    #[inline]
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Strict overlap: boxes that only share an edge do not collide
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f32, y: f32, size: f32) -> Aabb {
        Aabb::from_pos_size(Vec2::new(x, y), Vec2::splat(size))
    }

    #[test]
    fn test_overlap() {
        let a = square(0.0, 0.0, 10.0);
        assert!(a.overlaps(&square(5.0, 5.0, 10.0)));
        assert!(square(5.0, 5.0, 10.0).overlaps(&a));
        // Fully contained
        assert!(a.overlaps(&square(2.0, 2.0, 2.0)));
    }

    #[test]
    fn test_separated_on_one_axis() {
        let a = square(0.0, 0.0, 10.0);
        assert!(!a.overlaps(&square(20.0, 0.0, 10.0)));
        assert!(!a.overlaps(&square(0.0, 20.0, 10.0)));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = square(0.0, 0.0, 10.0);
        assert!(!a.overlaps(&square(10.0, 0.0, 10.0)));
        assert!(!a.overlaps(&square(0.0, 10.0, 10.0)));
    }
}
