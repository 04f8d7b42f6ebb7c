//! GPU rendering subsystem.
//!
//! The scene graph records into a `scene::DrawList`; `SceneRenderer` replays
//! that list with wgpu. The renderer owns its own GPU resources (pipeline,
//! buffers) and uploads all geometry fresh every frame.
//!
//! Convention:
//! - vertices are in each shape's local unit space
//! - the vertex shader maps them through `view · world` straight to clip space

mod ctx;
mod error;
mod scene_renderer;
mod view;

pub use ctx::{RenderCtx, RenderTarget};
pub use error::RenderError;
pub use scene_renderer::SceneRenderer;
pub use view::ViewConfig;
