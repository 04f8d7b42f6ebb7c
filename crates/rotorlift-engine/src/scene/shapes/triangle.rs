use crate::coords::Vec2;
use crate::scene::Topology;

use super::Drawable;

/// Unit triangle with its base on the y axis and apex at `(1, 0.5)`.
///
/// Points along +X, so it reads as an arrow head when appended to a bar, and
/// mirrors cleanly with a negative x scale.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Triangle;

impl Triangle {
    pub const VERTICES: [Vec2; 3] = [
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 0.5),
        Vec2::new(0.0, 1.0),
    ];
}

impl Drawable for Triangle {
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
    fn winding_is_counter_clockwise() {
        let [a, b, c] = Triangle::VERTICES;
        let cross = (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);
        assert!(cross > 0.0);
    }

    #[test]
    fn fits_unit_square() {
        for v in Triangle.vertices() {
            assert!((0.0..=1.0).contains(&v.x) && (0.0..=1.0).contains(&v.y));
        }
    }
}
