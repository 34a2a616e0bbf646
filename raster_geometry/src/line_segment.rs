// raster_geometry/src/line_segment.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Line segment types.

use crate::util;
use crate::vector::Vector2F;
use std::ops::Sub;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LineSegment2F {
    pub from: Vector2F,
    pub to: Vector2F,
}

impl LineSegment2F {
    #[inline]
    pub fn new(from: Vector2F, to: Vector2F) -> LineSegment2F {
        LineSegment2F { from, to }
    }

    #[inline]
    pub fn from(&self) -> Vector2F {
        self.from
    }

    #[inline]
    pub fn to(&self) -> Vector2F {
        self.to
    }

    #[inline]
    pub fn set_from(&mut self, point: Vector2F) {
        self.from = point;
    }

    #[inline]
    pub fn set_to(&mut self, point: Vector2F) {
        self.to = point;
    }

    #[allow(clippy::wrong_self_convention)]
    #[inline]
    pub fn from_x(&self) -> f32 {
        self.from.x
    }

    #[allow(clippy::wrong_self_convention)]
    #[inline]
    pub fn from_y(&self) -> f32 {
        self.from.y
    }

    #[inline]
    pub fn to_x(&self) -> f32 {
        self.to.x
    }

    #[inline]
    pub fn to_y(&self) -> f32 {
        self.to.y
    }

    #[inline]
    pub fn scale(&self, factor: f32) -> LineSegment2F {
        LineSegment2F::new(self.from.scale(factor), self.to.scale(factor))
    }

    #[inline]
    pub fn min_x(&self) -> f32 {
        self.from_x().min(self.to_x())
    }

    #[inline]
    pub fn max_x(&self) -> f32 {
        self.from_x().max(self.to_x())
    }

    #[inline]
    pub fn square_length(&self) -> f32 {
        self.vector().square_length()
    }

    #[inline]
    pub fn sample(&self, t: f32) -> Vector2F {
        self.from.lerp(self.to, t)
    }

    #[inline]
    pub fn vector(&self) -> Vector2F {
        self.to - self.from
    }

    #[inline]
    pub fn split(&self, t: f32) -> (LineSegment2F, LineSegment2F) {
        debug_assert!((0.0..=1.0).contains(&t));
        let mid = self.from.lerp(self.to, t);
        (LineSegment2F::new(self.from, mid), LineSegment2F::new(mid, self.to))
    }

    /// Returns the upper segment first, followed by the lower segment.
    #[inline]
    pub fn split_at_y(&self, y: f32) -> (LineSegment2F, LineSegment2F) {
        let (min_part, max_part) = self.split(self.solve_t_for_y(y));
        if min_part.from_y() < max_part.from_y() {
            (min_part, max_part)
        } else {
            (max_part, min_part)
        }
    }

    #[inline]
    pub fn solve_t_for_x(&self, x: f32) -> f32 {
        (x - self.from_x()) / (self.to_x() - self.from_x())
    }

    #[inline]
    pub fn solve_t_for_y(&self, y: f32) -> f32 {
        (y - self.from_y()) / (self.to_y() - self.from_y())
    }

    #[inline]
    pub fn solve_y_for_x(&self, x: f32) -> f32 {
        util::lerp(self.from_y(), self.to_y(), self.solve_t_for_x(x))
    }

    #[inline]
    pub fn reversed(&self) -> LineSegment2F {
        LineSegment2F::new(self.to, self.from)
    }

    #[inline]
    pub fn upper_point(&self) -> Vector2F {
        if self.from_y() < self.to_y() {
            self.from()
        } else {
            self.to()
        }
    }

    #[inline]
    pub fn min_y(&self) -> f32 {
        f32::min(self.from_y(), self.to_y())
    }

    #[inline]
    pub fn max_y(&self) -> f32 {
        f32::max(self.from_y(), self.to_y())
    }

    #[inline]
    pub fn y_winding(&self) -> i32 {
        if self.from_y() < self.to_y() {
            1
        } else {
            -1
        }
    }

    /// Reverses if necessary so that the from point is above the to point. Calling this method
    /// again will undo the transformation.
    #[inline]
    pub fn orient(&self, y_winding: i32) -> LineSegment2F {
        if y_winding >= 0 {
            *self
        } else {
            self.reversed()
        }
    }
}

impl Sub<Vector2F> for LineSegment2F {
    type Output = LineSegment2F;
    #[inline]
    fn sub(self, point: Vector2F) -> LineSegment2F {
        LineSegment2F::new(self.from - point, self.to - point)
    }
}

#[cfg(test)]
mod test {
    use super::LineSegment2F;
    use crate::vector::Vector2F;

    #[test]
    fn split_at_midpoint() {
        let seg = LineSegment2F::new(Vector2F::new(0.0, 0.0), Vector2F::new(10.0, 0.0));
        let (a, b) = seg.split(0.5);
        assert_eq!(a.to(), Vector2F::new(5.0, 0.0));
        assert_eq!(b.from(), Vector2F::new(5.0, 0.0));
    }

    #[test]
    fn split_at_y_orders_upper_first() {
        let seg = LineSegment2F::new(Vector2F::new(0.0, 10.0), Vector2F::new(10.0, 0.0));
        let (upper, lower) = seg.split_at_y(5.0);
        assert!(upper.from_y() <= lower.from_y());
    }

    #[test]
    fn orient_reverses_descending_segment() {
        let seg = LineSegment2F::new(Vector2F::new(0.0, 10.0), Vector2F::new(0.0, 0.0));
        assert_eq!(seg.y_winding(), -1);
        let oriented = seg.orient(seg.y_winding());
        assert!(oriented.from_y() < oriented.to_y());
    }
}
