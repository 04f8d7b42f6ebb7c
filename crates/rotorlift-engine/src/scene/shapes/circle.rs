use core::f32::consts::TAU;

use crate::coords::Vec2;
use crate::scene::Topology;

use super::Drawable;

/// Regular polygon inscribed in the unit circle, centred on the origin.
///
/// Vertex `i` sits at angle `2πi / sides`. The polygon is drawn as a triangle
/// fan anchored at vertex 0, not around a centre point.
///
/// `sides < 3` is accepted and produces a degenerate polygon that draws nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    sides: u32,
    points: Vec<Vec2>,
}

impl Circle {
    pub fn new(sides: u32) -> Self {
        let points = (0..sides)
            .map(|i| {
                let angle = i as f32 * TAU / sides as f32;
                Vec2::new(angle.cos(), angle.sin())
            })
            .collect();

        Self { sides, points }
    }

    #[inline]
    pub fn sides(&self) -> u32 {
        self.sides
    }
}

impl Drawable for Circle {
    #[inline]
    fn topology(&self) -> Topology {
        Topology::TriangleFan
    }

    #[inline]
    fn vertices(&self) -> &[Vec2] {
        &self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_count_matches_sides() {
        assert_eq!(Circle::new(8).vertices().len(), 8);
        assert_eq!(Circle::new(32).vertices().len(), 32);
    }

    #[test]
    fn first_vertex_is_on_positive_x_axis() {
        assert_eq!(Circle::new(12).vertices()[0], Vec2::new(1.0, 0.0));
    }

    #[test]
    fn vertices_lie_on_unit_circle() {
        for v in Circle::new(8).vertices() {
            assert!((v.x.hypot(v.y) - 1.0).abs() < 1e-6, "{v:?}");
        }
    }

    #[test]
    fn quarter_turn_vertex_of_octagon() {
        let v = Circle::new(8).vertices()[2];
        assert!(v.x.abs() < 1e-6 && (v.y - 1.0).abs() < 1e-6, "{v:?}");
    }

    #[test]
    fn too_few_sides_degenerates_silently() {
        assert!(Circle::new(0).vertices().is_empty());
        assert_eq!(Circle::new(2).vertices().len(), 2);
    }
}
