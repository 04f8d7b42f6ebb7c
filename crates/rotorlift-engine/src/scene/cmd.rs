use crate::coords::Rect;
use crate::math::Mat3;
use crate::paint::Colour;

/// Primitive assembly mode for a draw call.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Topology {
    /// Every three vertices form an independent triangle.
    TriangleList,
    /// Vertex 0 is shared; triangle `i` is `(0, i + 1, i + 2)`.
    TriangleFan,
}

impl Topology {
    /// Number of triangles assembled from `vertex_count` vertices.
    #[inline]
    pub fn triangle_count(self, vertex_count: u32) -> u32 {
        match self {
            Topology::TriangleList => vertex_count / 3,
            Topology::TriangleFan => vertex_count.saturating_sub(2),
        }
    }
}

/// One recorded draw call with the uniform state it was issued under.
///
/// Vertices live in the owning `DrawList`'s shared vertex buffer at
/// `first_vertex..first_vertex + vertex_count`.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCmd {
    pub view: Mat3,
    pub world: Mat3,
    pub colour: Colour,
    /// Viewport inset in logical pixels. `None` = whole surface.
    pub viewport: Option<Rect>,
    pub topology: Topology,
    pub first_vertex: u32,
    pub vertex_count: u32,
}

impl DrawCmd {
    #[inline]
    pub fn triangle_count(&self) -> u32 {
        self.topology.triangle_count(self.vertex_count)
    }
}
