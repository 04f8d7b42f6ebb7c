/// Canvas size in logical pixels.
///
/// The view matrix is derived from this every frame so the scene keeps a fixed
/// number of world units per pixel regardless of window size.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}
