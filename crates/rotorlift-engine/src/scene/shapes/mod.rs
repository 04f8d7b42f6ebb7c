//! Shape payloads attached to entities.
//!
//! Each variant owns a fixed unit-space vertex set built at construction and
//! knows which primitive mode assembles it. Extending the set:
//! - add a shape module here implementing `Drawable`
//! - add a variant to `Shape` and route it in the `Drawable` impl

mod circle;
mod rectangle;
mod triangle;

pub use circle::Circle;
pub use rectangle::Rectangle;
pub use triangle::Triangle;

use crate::coords::Vec2;
use crate::paint::Colour;

use super::{DrawTarget, Topology};

/// Flat-filled geometry that can issue its own draw call.
///
/// The caller sets the world matrix on the target before calling `draw`.
pub trait Drawable {
    fn topology(&self) -> Topology;

    /// Local-space vertices, fixed for the lifetime of the shape.
    fn vertices(&self) -> &[Vec2];

    fn draw(&self, target: &mut dyn DrawTarget, colour: Colour) {
        target.set_colour(colour);
        target.draw_arrays(self.topology(), self.vertices());
    }
}

/// Visual payload of an entity.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rectangle(Rectangle),
    Circle(Circle),
    Triangle(Triangle),
}

impl Shape {
    #[inline]
    pub fn rectangle() -> Self {
        Shape::Rectangle(Rectangle)
    }

    #[inline]
    pub fn circle(sides: u32) -> Self {
        Shape::Circle(Circle::new(sides))
    }

    #[inline]
    pub fn triangle() -> Self {
        Shape::Triangle(Triangle)
    }
}

impl Drawable for Shape {
    fn topology(&self) -> Topology {
        match self {
            Shape::Rectangle(s) => s.topology(),
            Shape::Circle(s) => s.topology(),
            Shape::Triangle(s) => s.topology(),
        }
    }

    fn vertices(&self) -> &[Vec2] {
        match self {
            Shape::Rectangle(s) => s.vertices(),
            Shape::Circle(s) => s.vertices(),
            Shape::Triangle(s) => s.vertices(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::DrawList;

    #[test]
    fn shape_draw_issues_one_call_with_colour() {
        let blue = Colour::rgb(0.0, 0.0, 1.0);
        let mut list = DrawList::new();

        Shape::rectangle().draw(&mut list, blue);

        assert_eq!(list.len(), 1);
        let cmd = &list.cmds()[0];
        assert_eq!(cmd.colour, blue);
        assert_eq!(cmd.topology, Topology::TriangleList);
        assert_eq!(cmd.vertex_count, 6);
    }

    #[test]
    fn circle_draws_as_fan_of_all_sides() {
        let mut list = DrawList::new();
        Shape::circle(8).draw(&mut list, Colour::black());

        let cmd = &list.cmds()[0];
        assert_eq!(cmd.topology, Topology::TriangleFan);
        assert_eq!(cmd.vertex_count, 8);
        assert_eq!(cmd.triangle_count(), 6);
    }

    #[test]
    fn triangle_draws_three_vertices() {
        let mut list = DrawList::new();
        Shape::triangle().draw(&mut list, Colour::white());

        let cmd = &list.cmds()[0];
        assert_eq!(cmd.topology, Topology::TriangleList);
        assert_eq!(cmd.vertex_count, 3);
    }
}
