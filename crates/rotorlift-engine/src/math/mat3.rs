use core::ops::Mul;

use crate::coords::Vec2;

/// 2D affine transform as a 3×3 homogeneous matrix.
///
/// Storage is column-major (`cols[column][row]`), matching the layout the
/// shader consumes. Every constructor produces a last row of `[0, 0, 1]`.
///
/// `Mat3::multiply(a, b)` applied to a point equals `a` applied to `b` applied to
/// the point: the right operand acts first.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat3 {
    cols: [[f32; 3]; 3],
}

impl Mat3 {
    pub const IDENTITY: Mat3 = Mat3 {
        cols: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    #[inline]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Builds a matrix from three columns.
    #[inline]
    pub const fn from_cols(c0: [f32; 3], c1: [f32; 3], c2: [f32; 3]) -> Self {
        Self { cols: [c0, c1, c2] }
    }

    #[inline]
    pub const fn cols(&self) -> [[f32; 3]; 3] {
        self.cols
    }

    #[inline]
    pub const fn scale(sx: f32, sy: f32) -> Self {
        Self::from_cols([sx, 0.0, 0.0], [0.0, sy, 0.0], [0.0, 0.0, 1.0])
    }

    #[inline]
    pub const fn translate(x: f32, y: f32) -> Self {
        Self::from_cols([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [x, y, 1.0])
    }

    /// Counter-clockwise rotation about the origin, in degrees.
    #[inline]
    pub fn rotate(degrees: f32) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        Self::from_cols([c, s, 0.0], [-s, c, 0.0], [0.0, 0.0, 1.0])
    }

    /// `translate(x, y) · rotate(degrees) · scale(sx, sy)` in one step.
    ///
    /// Scale acts first, then rotation, then translation.
    #[inline]
    pub fn trs(x: f32, y: f32, degrees: f32, sx: f32, sy: f32) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        Self::from_cols([c * sx, s * sx, 0.0], [-s * sy, c * sy, 0.0], [x, y, 1.0])
    }

    /// Standard matrix product `a · b`.
    pub fn multiply(a: Mat3, b: Mat3) -> Mat3 {
        let mut cols = [[0.0f32; 3]; 3];
        for (j, col) in cols.iter_mut().enumerate() {
            for (i, out) in col.iter_mut().enumerate() {
                *out = a.cols[0][i] * b.cols[j][0]
                    + a.cols[1][i] * b.cols[j][1]
                    + a.cols[2][i] * b.cols[j][2];
            }
        }
        Mat3 { cols }
    }

    /// Applies the transform to a point (`w = 1`).
    #[inline]
    pub fn transform_point(&self, p: Vec2) -> Vec2 {
        let [c0, c1, c2] = self.cols;
        Vec2::new(
            c0[0] * p.x + c1[0] * p.y + c2[0],
            c0[1] * p.x + c1[1] * p.y + c2[1],
        )
    }

    /// Column layout for a WGSL `mat3x3<f32>` uniform: each column padded to 16 bytes.
    #[inline]
    pub fn to_gpu_columns(&self) -> [[f32; 4]; 3] {
        let [c0, c1, c2] = self.cols;
        [
            [c0[0], c0[1], c0[2], 0.0],
            [c1[0], c1[1], c1[2], 0.0],
            [c2[0], c2[1], c2[2], 0.0],
        ]
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Mat3 {
    type Output = Mat3;
    #[inline]
    fn mul(self, rhs: Mat3) -> Mat3 {
        Mat3::multiply(self, rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn assert_mat_eq(a: Mat3, b: Mat3, eps: f32) {
        for c in 0..3 {
            for r in 0..3 {
                let (x, y) = (a.cols[c][r], b.cols[c][r]);
                assert!((x - y).abs() <= eps, "[{c}][{r}]: {x} != {y}\n{a:?}\n{b:?}");
            }
        }
    }

    fn assert_point_eq(p: Vec2, x: f32, y: f32) {
        assert!((p.x - x).abs() <= EPS && (p.y - y).abs() <= EPS, "{p:?} != ({x}, {y})");
    }

    fn sample() -> Mat3 {
        Mat3::trs(3.0, -2.0, 33.0, 1.5, -0.25)
    }

    // ── identity ──────────────────────────────────────────────────────────

    #[test]
    fn identity_is_neutral_on_both_sides() {
        let m = sample();
        assert_eq!(Mat3::multiply(Mat3::identity(), m), m);
        assert_eq!(Mat3::multiply(m, Mat3::identity()), m);
    }

    #[test]
    fn constructors_keep_last_row_affine() {
        for m in [
            Mat3::identity(),
            Mat3::scale(2.0, -3.0),
            Mat3::translate(4.0, 5.0),
            Mat3::rotate(71.0),
            sample(),
        ] {
            let cols = m.cols();
            assert_eq!([cols[0][2], cols[1][2], cols[2][2]], [0.0, 0.0, 1.0]);
        }
    }

    // ── trs ───────────────────────────────────────────────────────────────

    #[test]
    fn trs_with_neutral_rotation_and_scale_is_translate() {
        assert_mat_eq(Mat3::trs(7.0, 3.0, 0.0, 1.0, 1.0), Mat3::translate(7.0, 3.0), 0.0);
    }

    #[test]
    fn trs_with_only_rotation_is_rotate() {
        assert_mat_eq(Mat3::trs(0.0, 0.0, 135.0, 1.0, 1.0), Mat3::rotate(135.0), 0.0);
    }

    #[test]
    fn trs_with_only_scale_is_scale() {
        assert_mat_eq(Mat3::trs(0.0, 0.0, 0.0, 0.02, -0.6), Mat3::scale(0.02, -0.6), 0.0);
    }

    #[test]
    fn trs_matches_translate_rotate_scale_product() {
        let composed = Mat3::translate(-8.0, -6.0) * Mat3::rotate(45.0) * Mat3::scale(2.5, 2.0);
        assert_mat_eq(Mat3::trs(-8.0, -6.0, 45.0, 2.5, 2.0), composed, EPS);
    }

    #[test]
    fn trs_scales_before_rotating() {
        // Non-uniform scale then 90° turn: unit x becomes (0, 2), not (0, 3).
        let m = Mat3::trs(0.0, 0.0, 90.0, 2.0, 3.0);
        assert_point_eq(m.transform_point(Vec2::new(1.0, 0.0)), 0.0, 2.0);
        assert_point_eq(m.transform_point(Vec2::new(0.0, 1.0)), -3.0, 0.0);
    }

    // ── rotate ────────────────────────────────────────────────────────────

    #[test]
    fn rotate_is_counter_clockwise() {
        assert_point_eq(Mat3::rotate(90.0).transform_point(Vec2::new(1.0, 0.0)), 0.0, 1.0);
    }

    #[test]
    fn rotate_is_periodic() {
        for theta in [-225.0f32, -45.0, 0.0, 12.0, 90.0, 135.0, 180.0, 300.0] {
            assert_mat_eq(Mat3::rotate(theta), Mat3::rotate(theta + 360.0), 1e-4);
        }
    }

    // ── multiply ──────────────────────────────────────────────────────────

    #[test]
    fn multiply_applies_right_operand_first() {
        let t = Mat3::translate(1.0, 0.0);
        let s = Mat3::scale(2.0, 2.0);
        let p = Vec2::new(1.0, 1.0);

        assert_point_eq((t * s).transform_point(p), 3.0, 2.0);
        assert_point_eq((s * t).transform_point(p), 4.0, 2.0);
    }

    #[test]
    fn multiply_is_associative() {
        let a = Mat3::rotate(30.0);
        let b = Mat3::translate(2.0, -1.0);
        let c = Mat3::scale(0.5, 4.0);
        assert_mat_eq((a * b) * c, a * (b * c), EPS);
    }

    #[test]
    fn multiply_matches_nested_application() {
        let a = sample();
        let b = Mat3::trs(-1.0, 0.5, -80.0, 0.3, 2.0);
        let p = Vec2::new(0.7, -1.3);
        let nested = a.transform_point(b.transform_point(p));
        let composed = Mat3::multiply(a, b).transform_point(p);
        assert_point_eq(composed, nested.x, nested.y);
    }

    // ── gpu layout ────────────────────────────────────────────────────────

    #[test]
    fn gpu_columns_are_padded() {
        let cols = Mat3::translate(4.0, 5.0).to_gpu_columns();
        assert_eq!(cols[2], [4.0, 5.0, 1.0, 0.0]);
        assert_eq!(cols[0], [1.0, 0.0, 0.0, 0.0]);
    }
}
