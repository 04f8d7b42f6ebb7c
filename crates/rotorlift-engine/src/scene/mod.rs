//! Scene graph and draw stream types.
//!
//! Responsibilities:
//! - own every entity in a flat arena, linked parent/child by `EntityId`
//! - compose local TRS matrices into world matrices, fresh on every call
//! - let each shape variant turn a world matrix + colour into a draw call
//! - record draw calls renderer-agnostically in a `DrawList`

mod cmd;
mod entity;
mod error;
mod graph;
mod list;

pub mod shapes;

pub use cmd::{DrawCmd, Topology};
pub use entity::{Entity, EntityId, Visual};
pub use error::SceneError;
pub use graph::Scene;
pub use list::{DrawList, DrawTarget};
