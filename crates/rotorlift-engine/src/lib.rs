//! Rotorlift engine crate.
//!
//! Owns the platform + GPU runtime, the 2D affine math, and the scene graph
//! that games build their entities in.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod math;
pub mod paint;
pub mod render;
pub mod scene;
