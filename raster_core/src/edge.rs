// raster_core/src/edge.rs
//
// Copyright © 2020 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Flattens path verbs into monotonic line segments under an affine transform.
//!
//! Quadratic and cubic chord counts follow a Wang's-formula-style closed form rather than
//! recursive flatness testing, so `N` is known up front and the binner never revisits a curve.
//! The reference active-edge filler (`reference.rs`) flattens independently, by recursive
//! subdivision, so the two pipelines do not share a flattening bug.

use raster_geometry::rect::RectF;
use raster_geometry::transform2d::Transform2F;
use raster_geometry::vector::Vector2F;
use raster_paths::path::{Path, PathEvent};

/// Edges with `|dy|` below this are treated as exactly horizontal and dropped: they never cross
/// a scanline and contribute nothing to winding.
const Y_EPSILON: f32 = 1e-6;

/// The maximum number of chords a single quadratic or cubic curve may be flattened into,
/// regardless of what the closed-form estimate computes. Caps pathological control points.
const MAX_CHORDS: u32 = 64;

/// A monotonic line segment: `p0.y <= p1.y`, plus the winding sign of the original curve
/// direction (`+1` if the original direction was downward, `-1` if upward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonotonicEdge {
    pub p0: Vector2F,
    pub p1: Vector2F,
    pub sign: i32,
}

impl MonotonicEdge {
    #[inline]
    pub fn min_x(&self) -> f32 {
        self.p0.x.min(self.p1.x)
    }

    #[inline]
    pub fn max_x(&self) -> f32 {
        self.p0.x.max(self.p1.x)
    }
}

/// The output of flattening a path: a set of monotonic edges in pixel coordinates plus their
/// bounding box.
#[derive(Clone, Debug, Default)]
pub struct FlattenedPath {
    pub edges: Vec<MonotonicEdge>,
    pub bbox: RectF,
}

/// Scales `tolerance` down as the AA sub-pixel shift `k` grows (spec §4.1, `k ∈ {0,1,2}`): a
/// higher shift means the downstream fixed-point store (`fixed::fractional_bits`) tracks the
/// curve at a finer sub-pixel grid, so the flattener must track it at least as tightly or the
/// extra bits of precision go to waste on a chord that was never a good approximation to begin
/// with. `k=0` leaves `tolerance` untouched.
#[inline]
pub fn scaled_tolerance(tolerance: f32, aa_shift: u8) -> f32 {
    tolerance / (1u32 << aa_shift.min(2)) as f32
}

/// Flattens `path` under `transform`, subdividing curves so the maximum chordal deviation is at
/// most `tolerance` device pixels once scaled by `aa_shift` (spec §4.1). Returns an empty edge
/// list (and a zero-size bbox) for an empty path; never emits an error.
pub fn flatten(path: &Path, transform: &Transform2F, tolerance: f32, aa_shift: u8) -> FlattenedPath {
    let tolerance = scaled_tolerance(tolerance, aa_shift);
    let mut edges = Vec::new();
    let mut bbox: Option<RectF> = None;

    let mut cursor = Vector2F::zero();
    let mut subpath_start = Vector2F::zero();

    fn touch(point: Vector2F, bbox: &mut Option<RectF>) {
        *bbox = Some(match bbox.take() {
            Some(existing) => existing.union_point(point),
            None => RectF::from_points(point, point),
        });
    }

    for event in path.iter() {
        match event {
            PathEvent::MoveTo(p) => {
                let p = transform.transform_point(p);
                cursor = p;
                subpath_start = p;
                touch(p, &mut bbox);
            }
            PathEvent::LineTo(p) => {
                let p = transform.transform_point(p);
                touch(p, &mut bbox);
                emit_edge(&mut edges, cursor, p);
                cursor = p;
            }
            PathEvent::QuadTo(c, p) => {
                let c = transform.transform_point(c);
                let p = transform.transform_point(p);
                touch(c, &mut bbox);
                touch(p, &mut bbox);
                flatten_quadratic(&mut edges, cursor, c, p, tolerance);
                cursor = p;
            }
            PathEvent::CubicTo(c1, c2, p) => {
                let c1 = transform.transform_point(c1);
                let c2 = transform.transform_point(c2);
                let p = transform.transform_point(p);
                touch(c1, &mut bbox);
                touch(c2, &mut bbox);
                touch(p, &mut bbox);
                flatten_cubic(&mut edges, cursor, c1, c2, p, tolerance);
                cursor = p;
            }
            PathEvent::Close => {
                if cursor != subpath_start {
                    emit_edge(&mut edges, cursor, subpath_start);
                }
                cursor = subpath_start;
            }
        }
    }

    FlattenedPath { edges, bbox: bbox.unwrap_or_else(|| RectF::from_points(Vector2F::zero(), Vector2F::zero())) }
}

fn emit_edge(edges: &mut Vec<MonotonicEdge>, from: Vector2F, to: Vector2F) {
    let dy = to.y - from.y;
    if dy.abs() < Y_EPSILON {
        return;
    }
    if dy > 0.0 {
        edges.push(MonotonicEdge { p0: from, p1: to, sign: 1 });
    } else {
        edges.push(MonotonicEdge { p0: to, p1: from, sign: -1 });
    }
}

fn quadratic_chord_count(p0: Vector2F, c: Vector2F, p1: Vector2F, tolerance: f32) -> u32 {
    let second_difference = p0 - c.scale(2.0) + p1;
    let n = (second_difference.length() * 6.0 / (8.0 * tolerance)).sqrt().ceil();
    (n as u32).clamp(1, MAX_CHORDS)
}

fn cubic_chord_count(
    p0: Vector2F,
    c1: Vector2F,
    c2: Vector2F,
    p1: Vector2F,
    tolerance: f32,
) -> u32 {
    let d1 = (p0 - c1.scale(2.0) + c2).length();
    let d2 = (c1 - c2.scale(2.0) + p1).length();
    let n = ((d1 + d2).sqrt() * 6.0 / (8.0 * tolerance) * 3.0f32.sqrt()).ceil();
    (n as u32).clamp(1, MAX_CHORDS)
}

fn flatten_quadratic(
    edges: &mut Vec<MonotonicEdge>,
    p0: Vector2F,
    c: Vector2F,
    p1: Vector2F,
    tolerance: f32,
) {
    let n = quadratic_chord_count(p0, c, p1, tolerance);
    let mut prev = p0;
    for i in 1..=n {
        let t = i as f32 / n as f32;
        let mt = 1.0 - t;
        let point = p0.scale(mt * mt) + c.scale(2.0 * mt * t) + p1.scale(t * t);
        emit_edge(edges, prev, point);
        prev = point;
    }
}

fn flatten_cubic(
    edges: &mut Vec<MonotonicEdge>,
    p0: Vector2F,
    c1: Vector2F,
    c2: Vector2F,
    p1: Vector2F,
    tolerance: f32,
) {
    let n = cubic_chord_count(p0, c1, c2, p1, tolerance);
    let mut prev = p0;
    for i in 1..=n {
        let t = i as f32 / n as f32;
        let mt = 1.0 - t;
        let point = p0.scale(mt * mt * mt)
            + c1.scale(3.0 * mt * mt * t)
            + c2.scale(3.0 * mt * t * t)
            + p1.scale(t * t * t);
        emit_edge(edges, prev, point);
        prev = point;
    }
}

#[cfg(test)]
mod test {
    use super::flatten;
    use raster_geometry::transform2d::Transform2F;
    use raster_geometry::vector::Vector2F;
    use raster_paths::path::Path;

    #[test]
    fn empty_path_flattens_to_nothing() {
        let path = Path::new();
        let result = flatten(&path, &Transform2F::default(), 0.25, 0);
        assert!(result.edges.is_empty());
    }

    #[test]
    fn horizontal_line_is_dropped() {
        let mut path = Path::new();
        path.move_to(Vector2F::new(0.0, 5.0));
        path.line_to(Vector2F::new(10.0, 5.0));
        let result = flatten(&path, &Transform2F::default(), 0.25, 0);
        assert!(result.edges.is_empty());
    }

    #[test]
    fn closing_unclosed_path_does_not_inject_edge() {
        let mut path = Path::new();
        path.move_to(Vector2F::new(0.0, 0.0));
        path.line_to(Vector2F::new(10.0, 10.0));
        // No explicit close.
        let result = flatten(&path, &Transform2F::default(), 0.25, 0);
        assert_eq!(result.edges.len(), 1);
    }

    #[test]
    fn rectangle_produces_four_monotonic_edges_with_p0_above_p1() {
        let mut path = Path::new();
        path.move_to(Vector2F::new(16.0, 16.0));
        path.line_to(Vector2F::new(48.0, 16.0));
        path.line_to(Vector2F::new(48.0, 48.0));
        path.line_to(Vector2F::new(16.0, 48.0));
        path.close();
        let result = flatten(&path, &Transform2F::default(), 0.25, 0);
        // Two horizontal edges are dropped; two verticals survive.
        assert_eq!(result.edges.len(), 2);
        for edge in &result.edges {
            assert!(edge.p0.y <= edge.p1.y);
        }
    }

    #[test]
    fn quadratic_chord_count_is_bounded_and_nonzero() {
        let mut path = Path::new();
        path.move_to(Vector2F::new(0.0, 0.0));
        path.quad_to(Vector2F::new(1000.0, 0.0), Vector2F::new(0.0, 1000.0));
        let result = flatten(&path, &Transform2F::default(), 0.25, 0);
        assert!(!result.edges.is_empty());
        assert!(result.edges.len() as u32 <= super::MAX_CHORDS);
    }
}
