use crate::coords::Viewport;
use crate::math::Mat3;

/// View configuration.
///
/// `resolution` fixes how many logical pixels one world unit covers; the view
/// matrix is rebuilt from the canvas size each frame so that stays true when
/// the window is resized.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewConfig {
    pub resolution: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self { resolution: 50.0 }
    }
}

impl ViewConfig {
    /// `scale(2·resolution / width, 2·resolution / height)`.
    ///
    /// Degenerate canvas sizes are treated as one pixel to keep the matrix finite.
    pub fn view_matrix(&self, canvas: Viewport) -> Mat3 {
        let w = canvas.width.max(1.0);
        let h = canvas.height.max(1.0);
        Mat3::scale(2.0 * self.resolution / w, 2.0 * self.resolution / h)
    }
}
