//! Coordinate and geometry types shared across the scene graph and renderers.
//!
//! Two spaces are in play:
//! - world units (scene geometry, +Y up, mapped to NDC by the view matrix)
//! - logical pixels (window size, viewport insets; origin top-left, +Y down)

mod rect;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
