// raster_paths/src/path.rs
//
// Copyright © 2020 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A path: a flat verb array plus a flat point array.
//!
//! This is the on-the-wire representation the tile pipeline's flattener consumes directly.
//! `PathBuilder` is ergonomic sugar on top of it; the flat arrays remain the crate's actual
//! storage.

use raster_geometry::rect::RectF;
use raster_geometry::vector::Vector2F;
use smallvec::SmallVec;

/// A single path command. Each variant consumes a fixed number of points from the path's point
/// array: `MoveTo` and `LineTo` consume one, `QuadTo` two, `CubicTo` three, `Close` none.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathVerb {
    MoveTo,
    LineTo,
    QuadTo,
    CubicTo,
    Close,
}

impl PathVerb {
    /// The number of points this verb consumes from the path's flat point array.
    #[inline]
    pub fn point_count(self) -> usize {
        match self {
            PathVerb::MoveTo | PathVerb::LineTo => 1,
            PathVerb::QuadTo => 2,
            PathVerb::CubicTo => 3,
            PathVerb::Close => 0,
        }
    }
}

/// A single event produced while walking a `Path`: a move, a line, a curve, or a subpath close.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathEvent {
    MoveTo(Vector2F),
    LineTo(Vector2F),
    QuadTo(Vector2F, Vector2F),
    CubicTo(Vector2F, Vector2F, Vector2F),
    Close,
}

/// A path: a sequence of verbs and the flat array of points they consume.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    verbs: Vec<PathVerb>,
    points: Vec<Vector2F>,
}

impl Path {
    #[inline]
    pub fn new() -> Path {
        Path { verbs: Vec::new(), points: Vec::new() }
    }

    #[inline]
    pub fn with_capacity(verb_capacity: usize, point_capacity: usize) -> Path {
        Path { verbs: Vec::with_capacity(verb_capacity), points: Vec::with_capacity(point_capacity) }
    }

    #[inline]
    pub fn verbs(&self) -> &[PathVerb] {
        &self.verbs
    }

    #[inline]
    pub fn points(&self) -> &[Vector2F] {
        &self.points
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.verbs.clear();
        self.points.clear();
    }

    /// Iterates over this path's verbs, yielding one `PathEvent` per verb.
    pub fn iter(&self) -> PathIter {
        PathIter { path: self, verb_index: 0, point_index: 0 }
    }

    /// Returns the tight axis-aligned bounding box of this path's points. Returns `None` for an
    /// empty path.
    pub fn bounds(&self) -> Option<RectF> {
        let mut iter = self.points.iter();
        let first = *iter.next()?;
        let mut min = first;
        let mut max = first;
        for &point in iter {
            min = min.min(point);
            max = max.max(point);
        }
        Some(RectF::from_points(min, max))
    }

    #[inline]
    pub fn move_to(&mut self, point: Vector2F) {
        self.verbs.push(PathVerb::MoveTo);
        self.points.push(point);
    }

    #[inline]
    pub fn line_to(&mut self, point: Vector2F) {
        self.verbs.push(PathVerb::LineTo);
        self.points.push(point);
    }

    #[inline]
    pub fn quad_to(&mut self, ctrl: Vector2F, to: Vector2F) {
        self.verbs.push(PathVerb::QuadTo);
        self.points.push(ctrl);
        self.points.push(to);
    }

    #[inline]
    pub fn cubic_to(&mut self, ctrl0: Vector2F, ctrl1: Vector2F, to: Vector2F) {
        self.verbs.push(PathVerb::CubicTo);
        self.points.push(ctrl0);
        self.points.push(ctrl1);
        self.points.push(to);
    }

    #[inline]
    pub fn close(&mut self) {
        self.verbs.push(PathVerb::Close);
    }

    /// Appends an axis-aligned rectangle as a closed subpath, wound clockwise in a y-down
    /// coordinate space (matching the other four corner-walking builders in this crate).
    pub fn add_rect(&mut self, rect: RectF) {
        self.move_to(rect.origin());
        self.line_to(rect.upper_right());
        self.line_to(rect.lower_right());
        self.line_to(rect.lower_left());
        self.close();
    }
}

/// Iterator over the events of a `Path`.
pub struct PathIter<'a> {
    path: &'a Path,
    verb_index: usize,
    point_index: usize,
}

impl<'a> Iterator for PathIter<'a> {
    type Item = PathEvent;

    fn next(&mut self) -> Option<PathEvent> {
        let verb = *self.path.verbs.get(self.verb_index)?;
        self.verb_index += 1;

        let points: SmallVec<[Vector2F; 3]> = self.path.points
            [self.point_index..self.point_index + verb.point_count()]
            .iter()
            .copied()
            .collect();
        self.point_index += verb.point_count();

        Some(match verb {
            PathVerb::MoveTo => PathEvent::MoveTo(points[0]),
            PathVerb::LineTo => PathEvent::LineTo(points[0]),
            PathVerb::QuadTo => PathEvent::QuadTo(points[0], points[1]),
            PathVerb::CubicTo => PathEvent::CubicTo(points[0], points[1], points[2]),
            PathVerb::Close => PathEvent::Close,
        })
    }
}

#[cfg(test)]
mod test {
    use super::{Path, PathEvent, PathVerb};
    use raster_geometry::rect::RectF;
    use raster_geometry::vector::Vector2F;

    #[test]
    fn empty_path_has_no_events() {
        let path = Path::new();
        assert!(path.is_empty());
        assert!(path.iter().next().is_none());
    }

    #[test]
    fn add_rect_emits_four_corners_and_closes() {
        let mut path = Path::new();
        path.add_rect(RectF::new(Vector2F::new(0.0, 0.0), Vector2F::new(10.0, 20.0)));
        let events: Vec<_> = path.iter().collect();
        assert_eq!(events.len(), 5);
        assert_eq!(events[0], PathEvent::MoveTo(Vector2F::new(0.0, 0.0)));
        assert_eq!(events[4], PathEvent::Close);
    }

    #[test]
    fn verb_point_counts_match_arities() {
        assert_eq!(PathVerb::MoveTo.point_count(), 1);
        assert_eq!(PathVerb::LineTo.point_count(), 1);
        assert_eq!(PathVerb::QuadTo.point_count(), 2);
        assert_eq!(PathVerb::CubicTo.point_count(), 3);
        assert_eq!(PathVerb::Close.point_count(), 0);
    }

    #[test]
    fn cubic_to_consumes_three_points_in_order() {
        let mut path = Path::new();
        path.move_to(Vector2F::new(0.0, 0.0));
        path.cubic_to(
            Vector2F::new(1.0, 1.0),
            Vector2F::new(2.0, 2.0),
            Vector2F::new(3.0, 3.0),
        );
        let events: Vec<_> = path.iter().collect();
        assert_eq!(
            events[1],
            PathEvent::CubicTo(
                Vector2F::new(1.0, 1.0),
                Vector2F::new(2.0, 2.0),
                Vector2F::new(3.0, 3.0)
            )
        );
    }

    #[test]
    fn bounds_of_rect_path() {
        let mut path = Path::new();
        path.add_rect(RectF::new(Vector2F::new(-5.0, 2.0), Vector2F::new(10.0, 3.0)));
        let bounds = path.bounds().unwrap();
        assert_eq!(bounds.origin(), Vector2F::new(-5.0, 2.0));
        assert_eq!(bounds.lower_right(), Vector2F::new(5.0, 5.0));
    }
}
