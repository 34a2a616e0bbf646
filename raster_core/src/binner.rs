// raster_core/src/binner.rs
//
// Copyright © 2020 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The tile binner: walks each flattened edge tile row by tile row, clipping it into one
//! `PathSegment` per touched tile and accumulating the backdrop deltas that let tiles the
//! segment never visits still inherit the correct winding number.
//!
//! A segment can, within a single tile row, span more than one tile column (a shallow edge can
//! cross several tile widths over one tile height). Each row is therefore walked independently:
//! the edge is clipped to the row's `y` extent first, then clipped again column by column against
//! that row's vertical grid lines. This keeps the edge cases (segments that start or end off the
//! left/right of the path's bbox) to two small, independently testable rules rather than one
//! combined closed-form DDA step function.

use crate::edge::MonotonicEdge;
use crate::tile::{PathSegment, Tile, TileBBox, TILE_HEIGHT, TILE_WIDTH, YEDGE_NONE};
use crate::tile_map::DenseTileMap;
use raster_geometry::vector::Vector2F;

/// Nudges x-coordinates that land exactly on a tile boundary so the `yEdge` test (`p0.x == 0`)
/// never misfires on an edge that merely touches a column line without crossing it.
const X_EPSILON: f32 = 1e-4;

/// Bins `edges` into `tiles` (sized to `bbox`), clipping each into per-tile `PathSegment`s and
/// accumulating backdrop deltas. `tiles` must already be zeroed (a freshly built or `reset()`
/// `DenseTileMap`).
pub fn bin_edges(edges: &[MonotonicEdge], bbox: TileBBox, tiles: &mut DenseTileMap<Tile>) {
    for edge in edges {
        bin_edge(edge, bbox, tiles);
    }
}

fn bin_edge(edge: &MonotonicEdge, bbox: TileBBox, tiles: &mut DenseTileMap<Tile>) {
    let is_down = edge.sign > 0;
    let delta = -edge.sign;

    let y0 = edge.p0.y;
    let y1 = edge.p1.y;
    debug_assert!(y0 <= y1);

    let row_start = (y0 / TILE_HEIGHT as f32).floor() as i32;
    let row_end_inclusive = ((y1 - 1e-6) / TILE_HEIGHT as f32).floor() as i32;

    let ty_lo = row_start.max(bbox.y_min);
    let ty_hi = row_end_inclusive.min(bbox.y_max - 1);
    if ty_lo > ty_hi {
        return;
    }

    let dy_edge = y1 - y0;

    for ty in ty_lo..=ty_hi {
        let row_top = (ty * TILE_HEIGHT) as f32;
        let row_bottom = row_top + TILE_HEIGHT as f32;

        let y_row_top = y0.max(row_top);
        let y_row_bottom = y1.min(row_bottom);
        if y_row_bottom <= y_row_top {
            continue;
        }

        let x_at = |y: f32| -> f32 {
            let t = ((y - y0) / dy_edge).clamp(0.0, 1.0);
            edge.p0.x + (edge.p1.x - edge.p0.x) * t
        };
        let rp0 = Vector2F::new(x_at(y_row_top), y_row_top);
        let rp1 = Vector2F::new(x_at(y_row_bottom), y_row_bottom);

        bin_row(rp0, rp1, ty, bbox, delta, is_down, tiles);
    }
}

/// Bins one edge's sub-segment for a single tile row, handling the case where the row's x-extent
/// spans multiple tile columns.
#[allow(clippy::too_many_arguments)]
fn bin_row(
    rp0: Vector2F,
    rp1: Vector2F,
    ty: i32,
    bbox: TileBBox,
    delta: i32,
    is_down: bool,
    tiles: &mut DenseTileMap<Tile>,
) {
    let x_lo = rp0.x.min(rp1.x);
    let x_hi = rp0.x.max(rp1.x);

    let tx_start = (x_lo / TILE_WIDTH as f32).floor() as i32;
    let tx_end = if x_hi > x_lo {
        (((x_hi - 1e-6) / TILE_WIDTH as f32).floor() as i32).max(tx_start)
    } else {
        tx_start
    };

    // Rule A: the edge (or its continuation) lies to the left of the tracked grid for this row;
    // every tile to the right inherits its winding via the row's prefix sum starting at `x_min`.
    if tx_start < bbox.x_min {
        add_backdrop(tiles, bbox.x_min, ty, delta);
    }

    if tx_end < bbox.x_min || tx_start >= bbox.x_max {
        return;
    }

    // Rule B: immediately to the right of the edge's rightmost touched tile in this row, the
    // edge acts as a wall every further-right tile in the bbox must inherit.
    let tx_end_clamped = tx_end.min(bbox.x_max - 1);
    if tx_end_clamped + 1 < bbox.x_max {
        add_backdrop(tiles, tx_end_clamped + 1, ty, delta);
    }

    let dx_row = rp1.x - rp0.x;
    let col_lo = tx_start.max(bbox.x_min);
    let col_hi = tx_end.min(bbox.x_max - 1);

    for tx in col_lo..=col_hi {
        let left_x = (tx * TILE_WIDTH) as f32;
        let right_x = left_x + TILE_WIDTH as f32;

        let (cp0, cp1) = if dx_row == 0.0 {
            (rp0, rp1)
        } else {
            let t_at = |x: f32| ((x - rp0.x) / dx_row).clamp(0.0, 1.0);
            let t_left = t_at(left_x);
            let t_right = t_at(right_x);
            let (t_a, t_b) = if t_left <= t_right { (t_left, t_right) } else { (t_right, t_left) };
            let point_at = |t: f32| Vector2F::new(rp0.x + dx_row * t, rp0.y + (rp1.y - rp0.y) * t);
            (point_at(t_a), point_at(t_b))
        };

        let tile_origin = Vector2F::new(left_x, (ty * TILE_HEIGHT) as f32);
        let local_p0 = clamp_local(cp0 - tile_origin);
        let local_p1 = clamp_local(cp1 - tile_origin);

        let y_edge = compute_y_edge(local_p0, local_p1);

        let (final_p0, final_p1) =
            if is_down { (local_p0, local_p1) } else { (local_p1, local_p0) };

        trace!(
            "bin_row: tile=({tx},{ty}) local=({final_p0:?} -> {final_p1:?}) y_edge={y_edge}"
        );
        push_segment(tiles, tx, ty, PathSegment { p0: final_p0, p1: final_p1, y_edge });
    }
}

/// Clamps a tile-local point into `[0, TILE_WIDTH] x [0, TILE_HEIGHT]`: the row/column clipping
/// above can leave values a ULP outside this range due to floating-point rounding.
#[inline]
fn clamp_local(p: Vector2F) -> Vector2F {
    Vector2F::new(p.x.clamp(0.0, TILE_WIDTH as f32), p.y.clamp(0.0, TILE_HEIGHT as f32))
}

/// Implements spec §4.3.1's `yEdge` computation from a tile-local clipped segment, before the
/// final upward-edge endpoint swap.
///
/// When only one endpoint sits on the tile's left edge, `yEdge` is that endpoint's y: the
/// x-integration in the fine rasterizer already handles everything else about this segment, and
/// `yEdgeTerm` exists purely to carry the coverage of the (now absent) portion of the edge above
/// or below the crossing. When *both* endpoints land on the left edge the segment is a degenerate
/// vertical running exactly along a tile's left boundary (the common case for axis-aligned shapes
/// whose edges land on a multiple of the tile size); its `sign(Δx) == 0` already zeroes out any
/// `yEdgeTerm`, and the `-1e-6` epsilon baked into the x-integration's `xmin` (§4.5) gives it the
/// correct constant-area contribution on its own, so no `yEdge` is needed here.
fn compute_y_edge(p0: Vector2F, p1: Vector2F) -> f32 {
    let p0_on_left = p0.x.abs() < X_EPSILON;
    let p1_on_left = p1.x.abs() < X_EPSILON;
    match (p0_on_left, p1_on_left) {
        (true, true) => YEDGE_NONE,
        (true, false) => p0.y,
        (false, true) => p1.y,
        (false, false) => YEDGE_NONE,
    }
}

fn add_backdrop(tiles: &mut DenseTileMap<Tile>, tx: i32, ty: i32, delta: i32) {
    if let Some(index) = tiles.coords_to_index(raster_geometry::vector::Vector2I::new(tx, ty)) {
        tiles.data[index].backdrop += delta;
    }
}

fn push_segment(tiles: &mut DenseTileMap<Tile>, tx: i32, ty: i32, segment: PathSegment) {
    if let Some(index) = tiles.coords_to_index(raster_geometry::vector::Vector2I::new(tx, ty)) {
        tiles.data[index].segments.push(segment);
    }
}
