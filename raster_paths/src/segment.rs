// raster_paths/src/segment.rs
//
// Copyright © 2020 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Single line or Bézier curve segments.
//!
//! This is the curve representation used by the reference active-edge filler: it dispatches
//! on `SegmentKind` and subdivides recursively, independently of the tile pipeline's closed-form
//! flattener.

use raster_geometry::line_segment::LineSegment2F;
use raster_geometry::transform2d::Transform2F;
use raster_geometry::vector::Vector2F;

/// A single line or Bézier curve segment, with explicit start and end points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    /// The start and end points of the curve.
    pub baseline: LineSegment2F,
    /// The control point or points.
    ///
    /// If this is a line (which can be determined by examining the segment kind), this field is
    /// ignored. If this is a quadratic Bézier curve, the start point of this line represents the
    /// control point, and the endpoint of this line is ignored. Otherwise, if this is a cubic
    /// Bézier curve, both the start and endpoints are used.
    pub ctrl: LineSegment2F,
    /// The type of segment this is: invalid, line, quadratic, or cubic Bézier curve.
    pub kind: SegmentKind,
    /// Various flags that describe information about this segment in a path.
    pub flags: SegmentFlags,
}

impl Segment {
    /// Returns an invalid segment.
    #[inline]
    pub fn none() -> Segment {
        Segment {
            baseline: LineSegment2F::default(),
            ctrl: LineSegment2F::default(),
            kind: SegmentKind::None,
            flags: SegmentFlags::empty(),
        }
    }

    /// Returns a segment representing a straight line.
    #[inline]
    pub fn line(line: LineSegment2F) -> Segment {
        Segment {
            baseline: line,
            ctrl: LineSegment2F::default(),
            kind: SegmentKind::Line,
            flags: SegmentFlags::empty(),
        }
    }

    /// Returns a segment representing a quadratic Bézier curve.
    #[inline]
    pub fn quadratic(baseline: LineSegment2F, ctrl: Vector2F) -> Segment {
        Segment {
            baseline,
            ctrl: LineSegment2F::new(ctrl, Vector2F::zero()),
            kind: SegmentKind::Quadratic,
            flags: SegmentFlags::empty(),
        }
    }

    /// Returns a segment representing a cubic Bézier curve.
    #[inline]
    pub fn cubic(baseline: LineSegment2F, ctrl: LineSegment2F) -> Segment {
        Segment { baseline, ctrl, kind: SegmentKind::Cubic, flags: SegmentFlags::empty() }
    }

    /// If this segment is a line, returns it. In debug builds, panics otherwise.
    #[inline]
    pub fn as_line_segment(&self) -> LineSegment2F {
        debug_assert!(self.is_line());
        self.baseline
    }

    /// Returns true if this segment is invalid.
    #[inline]
    pub fn is_none(&self) -> bool {
        self.kind == SegmentKind::None
    }

    /// Returns true if this segment represents a straight line.
    #[inline]
    pub fn is_line(&self) -> bool {
        self.kind == SegmentKind::Line
    }

    /// Returns true if this segment represents a quadratic Bézier curve.
    #[inline]
    pub fn is_quadratic(&self) -> bool {
        self.kind == SegmentKind::Quadratic
    }

    /// Returns true if this segment represents a cubic Bézier curve.
    #[inline]
    pub fn is_cubic(&self) -> bool {
        self.kind == SegmentKind::Cubic
    }

    /// If this segment is a cubic Bézier curve, returns it. In debug builds, panics otherwise.
    #[inline]
    pub fn as_cubic_segment(&self) -> CubicSegment {
        debug_assert!(self.is_cubic());
        CubicSegment(self)
    }

    /// If this segment is a quadratic Bézier curve, elevates it to a cubic Bézier curve and
    /// returns it. If this segment is a cubic Bézier curve, this method simply returns it.
    #[inline]
    pub fn to_cubic(&self) -> Segment {
        if self.is_cubic() {
            return *self;
        }

        let mut new_segment = *self;
        let p1_2 = self.ctrl.from() + self.ctrl.from();
        new_segment.ctrl =
            LineSegment2F::new(self.baseline.from() + p1_2, p1_2 + self.baseline.to())
                .scale(1.0 / 3.0);
        new_segment.kind = SegmentKind::Cubic;
        new_segment
    }

    /// Returns this segment with endpoints and control points reversed.
    #[inline]
    pub fn reversed(&self) -> Segment {
        Segment {
            baseline: self.baseline.reversed(),
            ctrl: if self.is_quadratic() { self.ctrl } else { self.ctrl.reversed() },
            kind: self.kind,
            flags: self.flags,
        }
    }

    /// Returns true if this segment is smaller than an implementation-defined epsilon value.
    #[inline]
    pub fn is_tiny(&self) -> bool {
        const EPSILON: f32 = 0.0001;
        self.baseline.square_length() < EPSILON
    }

    /// Divides this segment into two at the given parametric t value, which must range from 0.0
    /// to 1.0.
    ///
    /// This uses de Casteljau subdivision.
    #[inline]
    pub fn split(&self, t: f32) -> (Segment, Segment) {
        if self.is_line() {
            let (before, after) = self.as_line_segment().split(t);
            (Segment::line(before), Segment::line(after))
        } else {
            self.to_cubic().as_cubic_segment().split(t)
        }
    }

    /// Returns the position of the point on this line or curve with the given parametric t
    /// value, which must range from 0.0 to 1.0.
    #[inline]
    pub fn sample(self, t: f32) -> Vector2F {
        if self.is_line() {
            self.as_line_segment().sample(t)
        } else {
            self.to_cubic().as_cubic_segment().sample(t)
        }
    }

    /// Applies the given affine transform to this segment and returns it.
    #[inline]
    pub fn transform(self, transform: &Transform2F) -> Segment {
        Segment {
            baseline: transform.transform_line_segment(&self.baseline),
            ctrl: transform.transform_line_segment(&self.ctrl),
            kind: self.kind,
            flags: self.flags,
        }
    }
}

/// The type of segment this is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum SegmentKind {
    /// An invalid segment.
    None,
    /// A line segment.
    Line,
    /// A quadratic Bézier curve.
    Quadratic,
    /// A cubic Bézier curve.
    Cubic,
}

bitflags! {
    /// Various flags that specify the relation of this segment to other segments in a contour.
    pub struct SegmentFlags: u8 {
        /// This segment is the first one in the contour.
        const FIRST_IN_SUBPATH = 0x01;
        /// This segment is the closing segment of the contour (i.e. it returns back to the
        /// starting point).
        const CLOSES_SUBPATH = 0x02;
    }
}

/// A wrapper for a `Segment` that contains methods specific to cubic Bézier curves.
#[derive(Clone, Copy, Debug)]
pub struct CubicSegment<'s>(pub &'s Segment);

impl<'s> CubicSegment<'s> {
    /// Returns true if the maximum deviation of this curve from the straight line connecting its
    /// endpoints is less than `tolerance`.
    ///
    /// See Kaspar Fischer, "Piecewise Linear Approximation of Bézier Curves", 2000.
    #[inline]
    pub fn is_flat(self, tolerance: f32) -> bool {
        let baseline = self.0.baseline;
        let ctrl = self.0.ctrl;
        let v0 = ctrl.from.scale(3.0) - baseline.from - baseline.from - baseline.to;
        let v1 = ctrl.to.scale(3.0) - baseline.to - baseline.to - baseline.from;
        let uv0 = v0 * v0;
        let uv1 = v1 * v1;
        let u = uv0.x.max(uv1.x);
        let v = uv0.y.max(uv1.y);
        u + v <= 16.0 * tolerance * tolerance
    }

    /// Splits this cubic Bézier curve into two at the given parametric t value, which will be
    /// clamped to the range 0.0 to 1.0.
    ///
    /// This uses de Casteljau subdivision.
    #[inline]
    pub fn split(self, t: f32) -> (Segment, Segment) {
        let t = t.clamp(0.0, 1.0);
        let (p0, p1, p2, p3) =
            (self.0.baseline.from, self.0.ctrl.from, self.0.ctrl.to, self.0.baseline.to);

        let p01 = p0.lerp(p1, t);
        let p12 = p1.lerp(p2, t);
        let p23 = p2.lerp(p3, t);
        let p012 = p01.lerp(p12, t);
        let p123 = p12.lerp(p23, t);
        let p0123 = p012.lerp(p123, t);

        (
            Segment {
                baseline: LineSegment2F::new(p0, p0123),
                ctrl: LineSegment2F::new(p01, p012),
                kind: SegmentKind::Cubic,
                flags: self.0.flags & SegmentFlags::FIRST_IN_SUBPATH,
            },
            Segment {
                baseline: LineSegment2F::new(p0123, p3),
                ctrl: LineSegment2F::new(p123, p23),
                kind: SegmentKind::Cubic,
                flags: self.0.flags & SegmentFlags::CLOSES_SUBPATH,
            },
        )
    }

    /// A convenience method equivalent to `segment.split(t).0`.
    #[inline]
    pub fn split_before(self, t: f32) -> Segment {
        self.split(t).0
    }

    /// A convenience method equivalent to `segment.split(t).1`.
    #[inline]
    pub fn split_after(self, t: f32) -> Segment {
        self.split(t).1
    }

    /// Returns the position of the point on this curve at parametric time `t`, which will be
    /// clamped between 0.0 and 1.0.
    #[inline]
    pub fn sample(self, t: f32) -> Vector2F {
        self.split(t).0.baseline.to()
    }

    /// Returns the left extent of this curve's axis-aligned bounding box.
    #[inline]
    pub fn min_x(&self) -> f32 {
        f32::min(self.0.baseline.min_x(), self.0.ctrl.min_x())
    }
    /// Returns the right extent of this curve's axis-aligned bounding box.
    #[inline]
    pub fn max_x(&self) -> f32 {
        f32::max(self.0.baseline.max_x(), self.0.ctrl.max_x())
    }
}

#[cfg(test)]
mod test {
    use super::{Segment, SegmentKind};
    use raster_geometry::line_segment::LineSegment2F;
    use raster_geometry::vector::Vector2F;

    #[test]
    fn quadratic_elevates_to_cubic_with_same_endpoints() {
        let quad = Segment::quadratic(
            LineSegment2F::new(Vector2F::new(0.0, 0.0), Vector2F::new(10.0, 0.0)),
            Vector2F::new(5.0, 10.0),
        );
        let cubic = quad.to_cubic();
        assert_eq!(cubic.kind, SegmentKind::Cubic);
        assert_eq!(cubic.baseline, quad.baseline);
    }

    #[test]
    fn split_cubic_reassembles_endpoints() {
        let cubic = Segment::cubic(
            LineSegment2F::new(Vector2F::new(0.0, 0.0), Vector2F::new(10.0, 0.0)),
            LineSegment2F::new(Vector2F::new(3.0, 5.0), Vector2F::new(7.0, 5.0)),
        );
        let (before, after) = cubic.split(0.5);
        assert_eq!(before.baseline.from(), cubic.baseline.from());
        assert_eq!(after.baseline.to(), cubic.baseline.to());
        assert_eq!(before.baseline.to(), after.baseline.from());
    }

    #[test]
    fn is_flat_true_for_straight_control_polygon() {
        let cubic = Segment::cubic(
            LineSegment2F::new(Vector2F::new(0.0, 0.0), Vector2F::new(30.0, 0.0)),
            LineSegment2F::new(Vector2F::new(10.0, 0.0), Vector2F::new(20.0, 0.0)),
        );
        assert!(cubic.as_cubic_segment().is_flat(0.25));
    }
}
