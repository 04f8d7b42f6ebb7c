//! Fill colours for scene shapes.
//!
//! Shapes are flat-filled: one colour per entity, applied to every vertex.

mod colour;

pub use colour::Colour;
