//! Affine math for 2D scene transforms.
//!
//! Matrices are 3×3 homogeneous, column-major, and immutable: every operation
//! returns a new value.

mod mat3;

pub use mat3::Mat3;
