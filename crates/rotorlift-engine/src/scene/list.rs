use crate::coords::{Rect, Vec2};
use crate::math::Mat3;
use crate::paint::Colour;

use super::{DrawCmd, Topology};

/// Render context capability used by the scene graph.
///
/// Mirrors an immediate-mode shader pipeline: uniforms are set as state, and
/// each `draw_arrays` call is issued under whatever state is current.
pub trait DrawTarget {
    /// Sets the view matrix applied after every world matrix.
    fn set_view_matrix(&mut self, view: Mat3);

    /// Restricts subsequent draws to a sub-rectangle of the surface (logical px).
    fn set_viewport(&mut self, viewport: Option<Rect>);

    fn set_world_matrix(&mut self, world: Mat3);

    fn set_colour(&mut self, colour: Colour);

    /// Issues one draw call over `vertices` in local (unit-shape) coordinates.
    fn draw_arrays(&mut self, topology: Topology, vertices: &[Vec2]);
}

#[derive(Debug, Clone, PartialEq)]
struct DrawState {
    view: Mat3,
    world: Mat3,
    colour: Colour,
    viewport: Option<Rect>,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            view: Mat3::IDENTITY,
            world: Mat3::IDENTITY,
            colour: Colour::black(),
            viewport: None,
        }
    }
}

/// Recorded draw stream for a frame.
///
/// Commands are kept in issue order, which is also paint order: later draws
/// land on top. Vertex data is copied into one shared buffer so the renderer
/// can upload it with a single write.
///
/// `clear()` keeps allocated capacity, so a warmed list does not allocate.
#[derive(Debug, Default)]
pub struct DrawList {
    cmds: Vec<DrawCmd>,
    vertices: Vec<Vec2>,
    state: DrawState,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops recorded commands and resets uniform state to its defaults.
    #[inline]
    pub fn clear(&mut self) {
        self.cmds.clear();
        self.vertices.clear();
        self.state = DrawState::default();
    }

    #[inline]
    pub fn cmds(&self) -> &[DrawCmd] {
        &self.cmds
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    /// All recorded vertices, in command order.
    #[inline]
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// Vertices belonging to `cmd`.
    #[inline]
    pub fn vertices_of(&self, cmd: &DrawCmd) -> &[Vec2] {
        let start = cmd.first_vertex as usize;
        &self.vertices[start..start + cmd.vertex_count as usize]
    }
}

impl DrawTarget for DrawList {
    fn set_view_matrix(&mut self, view: Mat3) {
        self.state.view = view;
    }

    fn set_viewport(&mut self, viewport: Option<Rect>) {
        self.state.viewport = viewport;
    }

    fn set_world_matrix(&mut self, world: Mat3) {
        self.state.world = world;
    }

    fn set_colour(&mut self, colour: Colour) {
        self.state.colour = colour;
    }

    fn draw_arrays(&mut self, topology: Topology, vertices: &[Vec2]) {
        let first_vertex = self.vertices.len() as u32;
        self.vertices.extend_from_slice(vertices);

        self.cmds.push(DrawCmd {
            view: self.state.view,
            world: self.state.world,
            colour: self.state.colour,
            viewport: self.state.viewport,
            topology,
            first_vertex,
            vertex_count: vertices.len() as u32,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRI: [Vec2; 3] = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)];

    #[test]
    fn draw_captures_current_state() {
        let mut list = DrawList::new();
        let inset = Rect::new(600.0, 20.0, 200.0, 200.0);

        list.set_view_matrix(Mat3::scale(0.1, 0.2));
        list.set_viewport(Some(inset));
        list.set_world_matrix(Mat3::translate(3.0, 4.0));
        list.set_colour(Colour::rgb(1.0, 1.0, 0.0));
        list.draw_arrays(Topology::TriangleList, &TRI);

        let cmd = &list.cmds()[0];
        assert_eq!(cmd.view, Mat3::scale(0.1, 0.2));
        assert_eq!(cmd.world, Mat3::translate(3.0, 4.0));
        assert_eq!(cmd.colour, Colour::rgb(1.0, 1.0, 0.0));
        assert_eq!(cmd.viewport, Some(inset));
        assert_eq!(list.vertices_of(cmd), &TRI);
    }

    #[test]
    fn later_state_changes_do_not_touch_recorded_cmds() {
        let mut list = DrawList::new();
        list.set_colour(Colour::white());
        list.draw_arrays(Topology::TriangleList, &TRI);
        list.set_colour(Colour::black());
        list.draw_arrays(Topology::TriangleFan, &TRI[..2]);

        assert_eq!(list.len(), 2);
        assert_eq!(list.cmds()[0].colour, Colour::white());
        assert_eq!(list.cmds()[1].colour, Colour::black());
        assert_eq!(list.cmds()[1].first_vertex, 3);
        assert_eq!(list.vertices().len(), 5);
    }

    #[test]
    fn clear_resets_commands_and_state() {
        let mut list = DrawList::new();
        list.set_world_matrix(Mat3::scale(2.0, 2.0));
        list.draw_arrays(Topology::TriangleList, &TRI);
        list.clear();

        assert!(list.is_empty());
        assert!(list.vertices().is_empty());

        list.draw_arrays(Topology::TriangleList, &TRI);
        assert_eq!(list.cmds()[0].world, Mat3::IDENTITY);
        assert_eq!(list.cmds()[0].first_vertex, 0);
    }
}
