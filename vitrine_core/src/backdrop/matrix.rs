// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal column-major 4×4 matrix for the backdrop camera.
//!
//! Covers what the backdrop needs (perspective projection, translation,
//! rotation about X and Y, multiply) without a linear-algebra crate.

use core::ops::Mul;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// A column-major 4×4 matrix stored as `[[f64; 4]; 4]`.
///
/// Each inner array is one *column*, matching the layout WebGL expects for
/// `uniformMatrix4fv` with `transpose = false`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat4 {
    /// Four columns, each `[x, y, z, w]`.
    pub cols: [[f64; 4]; 4],
}

impl Mat4 {
    /// The identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// A pure translation.
    #[inline]
    #[must_use]
    pub const fn from_translation(x: f64, y: f64, z: f64) -> Self {
        Self {
            cols: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [x, y, z, 1.0],
            ],
        }
    }

    /// Rotation around the X axis (radians).
    #[inline]
    #[must_use]
    pub fn from_rotation_x(radians: f64) -> Self {
        let (s, c) = (radians.sin(), radians.cos());
        Self {
            cols: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, c, s, 0.0],
                [0.0, -s, c, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Rotation around the Y axis (radians).
    #[inline]
    #[must_use]
    pub fn from_rotation_y(radians: f64) -> Self {
        let (s, c) = (radians.sin(), radians.cos());
        Self {
            cols: [
                [c, 0.0, -s, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [s, 0.0, c, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Right-handed perspective projection into WebGL clip space (z in
    /// −1..1).
    ///
    /// `fov_y_degrees` is the full vertical field of view. A non-positive
    /// aspect is treated as 1.
    #[must_use]
    pub fn perspective(fov_y_degrees: f64, aspect: f64, near: f64, far: f64) -> Self {
        let half = fov_y_degrees.to_radians() / 2.0;
        let f = half.cos() / half.sin();
        let aspect = if aspect > 0.0 && aspect.is_finite() { aspect } else { 1.0 };
        let range = near - far;
        Self {
            cols: [
                [f / aspect, 0.0, 0.0, 0.0],
                [0.0, f, 0.0, 0.0],
                [0.0, 0.0, (far + near) / range, -1.0],
                [0.0, 0.0, 2.0 * far * near / range, 0.0],
            ],
        }
    }

    /// Transforms a point (w = 1) and divides by w.
    #[must_use]
    pub fn project_point(&self, p: [f64; 3]) -> [f64; 3] {
        let c = &self.cols;
        let mut out = [0.0; 4];
        for (i, o) in out.iter_mut().enumerate() {
            *o = c[0][i] * p[0] + c[1][i] * p[1] + c[2][i] * p[2] + c[3][i];
        }
        let w = if out[3] == 0.0 { 1.0 } else { out[3] };
        [out[0] / w, out[1] / w, out[2] / w]
    }

    /// Flattens to 16 `f32`s in column order, ready for a uniform upload.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "GPU uniforms are single precision"
    )]
    pub fn to_cols_f32(&self) -> [f32; 16] {
        let mut out = [0.0_f32; 16];
        for (j, col) in self.cols.iter().enumerate() {
            for (i, v) in col.iter().enumerate() {
                out[j * 4 + i] = *v as f32;
            }
        }
        out
    }
}

impl Default for Mat4 {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Mat4 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let a = &self.cols;
        let b = &rhs.cols;
        let mut out = [[0.0_f64; 4]; 4];
        for (j, col) in out.iter_mut().enumerate() {
            for (i, v) in col.iter_mut().enumerate() {
                *v = a[0][i] * b[j][0] + a[1][i] * b[j][1] + a[2][i] * b[j][2] + a[3][i] * b[j][3];
            }
        }
        Self { cols: out }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: [f64; 3], b: [f64; 3]) -> bool {
        a.iter().zip(b).all(|(x, y)| (x - y).abs() < EPS)
    }

    #[test]
    fn identity_multiply() {
        let t = Mat4::from_translation(1.0, 2.0, 3.0);
        assert_eq!(Mat4::IDENTITY * t, t);
        assert_eq!(t * Mat4::default(), t);
    }

    #[test]
    fn rotation_y_quarter_turn_maps_x_to_minus_z() {
        let r = Mat4::from_rotation_y(core::f64::consts::FRAC_PI_2);
        assert!(close(r.project_point([1.0, 0.0, 0.0]), [0.0, 0.0, -1.0]));
    }

    #[test]
    fn rotation_x_quarter_turn_maps_y_to_z() {
        let r = Mat4::from_rotation_x(core::f64::consts::FRAC_PI_2);
        assert!(close(r.project_point([0.0, 1.0, 0.0]), [0.0, 0.0, 1.0]));
    }

    #[test]
    fn perspective_maps_near_and_far_planes() {
        let p = Mat4::perspective(90.0, 1.0, 0.1, 1000.0);
        let near = p.project_point([0.0, 0.0, -0.1]);
        let far = p.project_point([0.0, 0.0, -1000.0]);
        assert!((near[2] + 1.0).abs() < 1e-6, "near plane at -1: {near:?}");
        assert!((far[2] - 1.0).abs() < 1e-6, "far plane at +1: {far:?}");
        // 90° fov: a point at 45° up lands on the top edge.
        let edge = p.project_point([0.0, 1.0, -1.0]);
        assert!((edge[1] - 1.0).abs() < 1e-6, "top edge: {edge:?}");
    }

    #[test]
    fn perspective_guards_bad_aspect() {
        assert_eq!(
            Mat4::perspective(75.0, 0.0, 0.1, 1000.0),
            Mat4::perspective(75.0, 1.0, 0.1, 1000.0)
        );
    }

    #[test]
    fn flatten_is_column_major() {
        let t = Mat4::from_translation(5.0, 6.0, 7.0).to_cols_f32();
        assert_eq!(&t[12..], &[5.0, 6.0, 7.0, 1.0]);
    }
}
