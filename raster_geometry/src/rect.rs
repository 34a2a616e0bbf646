// raster_geometry/src/rect.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! 2D axis-aligned rectangles.

use crate::vector::{Vector2F, Vector2I};

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct RectF {
    origin: Vector2F,
    lower_right: Vector2F,
}

impl RectF {
    #[inline]
    pub fn new(origin: Vector2F, size: Vector2F) -> RectF {
        RectF { origin, lower_right: origin + size }
    }

    #[inline]
    pub fn from_points(origin: Vector2F, lower_right: Vector2F) -> RectF {
        RectF { origin, lower_right }
    }

    #[inline]
    pub fn origin(&self) -> Vector2F {
        self.origin
    }

    #[inline]
    pub fn size(&self) -> Vector2F {
        self.lower_right - self.origin
    }

    #[inline]
    pub fn upper_right(&self) -> Vector2F {
        Vector2F::new(self.lower_right.x, self.origin.y)
    }

    #[inline]
    pub fn lower_left(&self) -> Vector2F {
        Vector2F::new(self.origin.x, self.lower_right.y)
    }

    #[inline]
    pub fn lower_right(&self) -> Vector2F {
        self.lower_right
    }

    #[inline]
    pub fn contains_point(&self, point: Vector2F) -> bool {
        self.origin.x <= point.x
            && self.origin.y <= point.y
            && point.x <= self.lower_right.x
            && point.y <= self.lower_right.y
    }

    #[inline]
    pub fn contains_rect(&self, other: RectF) -> bool {
        self.origin.x <= other.origin.x
            && self.origin.y <= other.origin.y
            && other.lower_right.x <= self.lower_right.x
            && other.lower_right.y <= self.lower_right.y
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.origin() == self.lower_right()
    }

    #[inline]
    pub fn union_point(&self, point: Vector2F) -> RectF {
        RectF::from_points(self.origin().min(point), self.lower_right().max(point))
    }

    #[inline]
    pub fn union_rect(&self, other: RectF) -> RectF {
        RectF::from_points(
            self.origin().min(other.origin()),
            self.lower_right().max(other.lower_right()),
        )
    }

    #[inline]
    pub fn intersects(&self, other: RectF) -> bool {
        self.origin.x < other.lower_right.x
            && self.origin.y < other.lower_right.y
            && other.origin.x < self.lower_right.x
            && other.origin.y < self.lower_right.y
    }

    #[inline]
    pub fn intersection(&self, other: RectF) -> Option<RectF> {
        if !self.intersects(other) {
            None
        } else {
            Some(RectF::from_points(
                self.origin().max(other.origin()),
                self.lower_right().min(other.lower_right()),
            ))
        }
    }

    #[inline]
    pub fn min_x(self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn min_y(self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn max_x(self) -> f32 {
        self.lower_right.x
    }

    #[inline]
    pub fn max_y(self) -> f32 {
        self.lower_right.y
    }

    #[inline]
    pub fn scale(self, factor: f32) -> RectF {
        RectF::from_points(self.origin.scale(factor), self.lower_right.scale(factor))
    }

    #[inline]
    pub fn scale_xy(self, factors: Vector2F) -> RectF {
        RectF::from_points(self.origin.scale_xy(factors), self.lower_right.scale_xy(factors))
    }

    #[inline]
    pub fn round_out(self) -> RectF {
        RectF::from_points(self.origin().floor(), self.lower_right().ceil())
    }

    #[inline]
    pub fn dilate(self, amount: Vector2F) -> RectF {
        RectF::from_points(self.origin() - amount, self.lower_right() + amount)
    }

    #[inline]
    pub fn to_i32(&self) -> RectI {
        RectI::from_points(self.origin.to_i32(), self.lower_right.to_i32())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct RectI {
    origin: Vector2I,
    lower_right: Vector2I,
}

impl RectI {
    #[inline]
    pub fn new(origin: Vector2I, size: Vector2I) -> RectI {
        RectI { origin, lower_right: origin + size }
    }

    #[inline]
    pub fn from_points(origin: Vector2I, lower_right: Vector2I) -> RectI {
        RectI { origin, lower_right }
    }

    #[inline]
    pub fn origin(&self) -> Vector2I {
        self.origin
    }

    #[inline]
    pub fn size(&self) -> Vector2I {
        self.lower_right - self.origin
    }

    #[inline]
    pub fn upper_right(&self) -> Vector2I {
        Vector2I::new(self.lower_right.x, self.origin.y)
    }

    #[inline]
    pub fn lower_left(&self) -> Vector2I {
        Vector2I::new(self.origin.x, self.lower_right.y)
    }

    #[inline]
    pub fn lower_right(&self) -> Vector2I {
        self.lower_right
    }

    #[inline]
    pub fn min_x(self) -> i32 {
        self.origin.x
    }

    #[inline]
    pub fn min_y(self) -> i32 {
        self.origin.y
    }

    #[inline]
    pub fn max_x(self) -> i32 {
        self.lower_right.x
    }

    #[inline]
    pub fn max_y(self) -> i32 {
        self.lower_right.y
    }

    #[inline]
    pub fn contains_point(&self, point: Vector2I) -> bool {
        let lower_right = self.lower_right() - Vector2I::splat(1);
        self.origin.x <= point.x
            && self.origin.y <= point.y
            && point.x <= lower_right.x
            && point.y <= lower_right.y
    }

    #[inline]
    pub fn contains_rect(&self, other: RectI) -> bool {
        self.origin.x <= other.origin.x
            && self.origin.y <= other.origin.y
            && other.lower_right.x <= self.lower_right.x
            && other.lower_right.y <= self.lower_right.y
    }

    #[inline]
    pub fn intersects(&self, other: RectI) -> bool {
        self.origin.x < other.lower_right.x
            && self.origin.y < other.lower_right.y
            && other.origin.x < self.lower_right.x
            && other.origin.y < self.lower_right.y
    }

    #[inline]
    pub fn intersection(&self, other: RectI) -> Option<RectI> {
        if !self.intersects(other) {
            None
        } else {
            Some(RectI::from_points(
                self.origin().max(other.origin()),
                self.lower_right().min(other.lower_right()),
            ))
        }
    }

    #[inline]
    pub fn to_f32(&self) -> RectF {
        RectF::from_points(self.origin.to_f32(), self.lower_right.to_f32())
    }
}
