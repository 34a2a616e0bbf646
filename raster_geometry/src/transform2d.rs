// raster_geometry/src/transform2d.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! 2D affine transforms.

use crate::line_segment::LineSegment2F;
use crate::rect::RectF;
use crate::vector::Vector2F;
use std::ops::Sub;

/// A 2x2 matrix, in row-major order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix2x2F {
    pub m11: f32,
    pub m12: f32,
    pub m21: f32,
    pub m22: f32,
}

impl Default for Matrix2x2F {
    #[inline]
    fn default() -> Matrix2x2F {
        Self::from_scale(Vector2F::splat(1.0))
    }
}

impl Matrix2x2F {
    #[inline]
    pub fn from_scale(scale: Vector2F) -> Matrix2x2F {
        Matrix2x2F { m11: scale.x(), m12: 0.0, m21: 0.0, m22: scale.y() }
    }

    #[inline]
    pub fn from_rotation(theta: f32) -> Matrix2x2F {
        let (sin, cos) = (theta.sin(), theta.cos());
        Matrix2x2F { m11: cos, m12: -sin, m21: sin, m22: cos }
    }

    #[inline]
    pub fn row_major(m11: f32, m12: f32, m21: f32, m22: f32) -> Matrix2x2F {
        Matrix2x2F { m11, m12, m21, m22 }
    }

    #[inline]
    pub fn post_mul(&self, other: &Matrix2x2F) -> Matrix2x2F {
        Matrix2x2F {
            m11: self.m11 * other.m11 + self.m12 * other.m21,
            m12: self.m11 * other.m12 + self.m12 * other.m22,
            m21: self.m21 * other.m11 + self.m22 * other.m21,
            m22: self.m21 * other.m12 + self.m22 * other.m22,
        }
    }

    #[inline]
    pub fn pre_mul(&self, other: &Matrix2x2F) -> Matrix2x2F {
        other.post_mul(self)
    }

    #[inline]
    pub fn entrywise_mul(&self, other: &Matrix2x2F) -> Matrix2x2F {
        Matrix2x2F {
            m11: self.m11 * other.m11,
            m12: self.m12 * other.m12,
            m21: self.m21 * other.m21,
            m22: self.m22 * other.m22,
        }
    }

    #[inline]
    pub fn adjugate(&self) -> Matrix2x2F {
        Matrix2x2F { m11: self.m22, m12: -self.m12, m21: -self.m21, m22: self.m11 }
    }

    #[inline]
    pub fn transform_point(&self, point: Vector2F) -> Vector2F {
        Vector2F::new(
            self.m11 * point.x + self.m12 * point.y,
            self.m21 * point.x + self.m22 * point.y,
        )
    }

    #[inline]
    pub fn det(&self) -> f32 {
        self.m11 * self.m22 - self.m12 * self.m21
    }

    #[inline]
    pub fn inverse(&self) -> Matrix2x2F {
        let adjugate = self.adjugate();
        let inv_det = 1.0 / self.det();
        Matrix2x2F {
            m11: adjugate.m11 * inv_det,
            m12: adjugate.m12 * inv_det,
            m21: adjugate.m21 * inv_det,
            m22: adjugate.m22 * inv_det,
        }
    }

    #[inline]
    pub fn m11(&self) -> f32 {
        self.m11
    }
    #[inline]
    pub fn m21(&self) -> f32 {
        self.m21
    }
    #[inline]
    pub fn m12(&self) -> f32 {
        self.m12
    }
    #[inline]
    pub fn m22(&self) -> f32 {
        self.m22
    }
}

impl Sub<Matrix2x2F> for Matrix2x2F {
    type Output = Matrix2x2F;
    #[inline]
    fn sub(self, other: Matrix2x2F) -> Matrix2x2F {
        Matrix2x2F {
            m11: self.m11 - other.m11,
            m12: self.m12 - other.m12,
            m21: self.m21 - other.m21,
            m22: self.m22 - other.m22,
        }
    }
}

/// An affine transform: a 2x2 matrix plus a translation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform2F {
    pub matrix: Matrix2x2F,
    pub vector: Vector2F,
}

impl Default for Transform2F {
    #[inline]
    fn default() -> Transform2F {
        Self::from_scale(Vector2F::splat(1.0))
    }
}

impl Transform2F {
    #[inline]
    pub fn from_scale(scale: Vector2F) -> Transform2F {
        Transform2F { matrix: Matrix2x2F::from_scale(scale), vector: Vector2F::default() }
    }

    #[inline]
    pub fn from_rotation(theta: f32) -> Transform2F {
        Transform2F { matrix: Matrix2x2F::from_rotation(theta), vector: Vector2F::default() }
    }

    #[inline]
    pub fn from_translation(vector: Vector2F) -> Transform2F {
        Transform2F { matrix: Matrix2x2F::default(), vector }
    }

    #[inline]
    pub fn from_scale_rotation_translation(
        scale: Vector2F,
        theta: f32,
        translation: Vector2F,
    ) -> Transform2F {
        let rotation = Transform2F::from_rotation(theta);
        let translation = Transform2F::from_translation(translation);
        Transform2F::from_scale(scale).post_mul(&rotation).post_mul(&translation)
    }

    #[inline]
    pub fn row_major(m11: f32, m12: f32, m21: f32, m22: f32, m31: f32, m32: f32) -> Transform2F {
        Transform2F {
            matrix: Matrix2x2F::row_major(m11, m12, m21, m22),
            vector: Vector2F::new(m31, m32),
        }
    }

    #[inline]
    pub fn transform_point(&self, point: Vector2F) -> Vector2F {
        self.matrix.transform_point(point) + self.vector
    }

    #[inline]
    pub fn transform_line_segment(&self, line_segment: &LineSegment2F) -> LineSegment2F {
        LineSegment2F::new(
            self.transform_point(line_segment.from()),
            self.transform_point(line_segment.to()),
        )
    }

    #[inline]
    pub fn transform_rect(&self, rect: &RectF) -> RectF {
        let upper_left = self.transform_point(rect.origin());
        let upper_right = self.transform_point(rect.upper_right());
        let lower_left = self.transform_point(rect.lower_left());
        let lower_right = self.transform_point(rect.lower_right());
        let min_point = upper_left.min(upper_right).min(lower_left).min(lower_right);
        let max_point = upper_left.max(upper_right).max(lower_left).max(lower_right);
        RectF::from_points(min_point, max_point)
    }

    #[inline]
    pub fn post_mul(&self, other: &Transform2F) -> Transform2F {
        let matrix = self.matrix.post_mul(&other.matrix);
        let vector = other.transform_point(self.vector);
        Transform2F { matrix, vector }
    }

    #[inline]
    pub fn pre_mul(&self, other: &Transform2F) -> Transform2F {
        other.post_mul(self)
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Transform2F::default()
    }

    #[inline]
    pub fn m11(&self) -> f32 {
        self.matrix.m11()
    }
    #[inline]
    pub fn m21(&self) -> f32 {
        self.matrix.m21()
    }
    #[inline]
    pub fn m12(&self) -> f32 {
        self.matrix.m12()
    }
    #[inline]
    pub fn m22(&self) -> f32 {
        self.matrix.m22()
    }

    #[inline]
    pub fn post_translate(&self, vector: Vector2F) -> Transform2F {
        self.post_mul(&Transform2F::from_translation(vector))
    }

    #[inline]
    pub fn post_rotate(&self, theta: f32) -> Transform2F {
        self.post_mul(&Transform2F::from_rotation(theta))
    }

    #[inline]
    pub fn post_scale(&self, scale: Vector2F) -> Transform2F {
        self.post_mul(&Transform2F::from_scale(scale))
    }

    /// Returns the translation part of this matrix.
    ///
    /// This decomposition assumes that scale, rotation, and translation are applied in that order.
    #[inline]
    pub fn translation(&self) -> Vector2F {
        self.vector
    }

    /// Returns the rotation angle of this matrix.
    ///
    /// This decomposition assumes that scale, rotation, and translation are applied in that order.
    #[inline]
    pub fn rotation(&self) -> f32 {
        f32::atan2(self.m21(), self.m11())
    }

    /// Returns the scale factor of this matrix.
    ///
    /// This decomposition assumes that scale, rotation, and translation are applied in that order.
    #[inline]
    pub fn scale_factor(&self) -> f32 {
        Vector2F::new(self.matrix.m22, self.matrix.m21).length()
    }
}

#[cfg(test)]
mod test {
    use super::{Matrix2x2F, Transform2F};
    use crate::vector::Vector2F;

    #[test]
    fn identity_transform_is_noop() {
        let t = Transform2F::default();
        let p = Vector2F::new(3.0, 7.0);
        assert_eq!(t.transform_point(p), p);
    }

    #[test]
    fn inverse_undoes_matrix() {
        let m = Matrix2x2F::row_major(2.0, 0.0, 0.0, 4.0);
        let inv = m.inverse();
        let p = Vector2F::new(1.0, 1.0);
        let round_trip = inv.transform_point(m.transform_point(p));
        assert!((round_trip.x - p.x).abs() < 1e-5);
        assert!((round_trip.y - p.y).abs() < 1e-5);
    }

    #[test]
    fn translation_then_scale_composes_via_post_mul() {
        let translate = Transform2F::from_translation(Vector2F::new(10.0, 0.0));
        let scale = Transform2F::from_scale(Vector2F::splat(2.0));
        let combined = translate.post_mul(&scale);
        assert_eq!(combined.transform_point(Vector2F::zero()), Vector2F::new(20.0, 0.0));
    }
}
