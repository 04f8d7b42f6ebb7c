use crate::coords::Vec2;
use crate::scene::Topology;

use super::Drawable;

/// Two triangles covering the unit square `[0, 1] × [0, 1]`.
///
/// The origin is the bottom-left corner, so a parent's translation of `(1, 0)`
/// lands a child on the parent's right edge.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rectangle;

impl Rectangle {
    pub const VERTICES: [Vec2; 6] = [
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(0.0, 1.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(0.0, 1.0),
        Vec2::new(1.0, 0.0),
    ];
}

impl Drawable for Rectangle {
    #[inline]
    fn topology(&self) -> Topology {
        Topology::TriangleList
    }

    #[inline]
    fn vertices(&self) -> &[Vec2] {
        &Self::VERTICES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_unit_square_corners() {
        for corner in [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
        ] {
            assert!(Rectangle.vertices().contains(&corner), "missing {corner:?}");
        }
    }

    #[test]
    fn six_vertices_two_triangles() {
        assert_eq!(Rectangle.vertices().len(), 6);
        assert_eq!(Rectangle.topology().triangle_count(6), 2);
    }
}
