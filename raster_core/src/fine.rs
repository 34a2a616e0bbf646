// raster_core/src/fine.rs
//
// Copyright © 2020 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The fine rasterizer: converts one tile's segments, for one local scanline, into a per-pixel
//! coverage buffer by exact trapezoidal area integration.
//!
//! This is a CPU-side port of the analytic step a Vello-style fine shader performs per tile per
//! row; the `yEdgeTerm` addition at the end of `accumulate_row` must stay unconditional (applied
//! whether or not the segment's `dy` for this row is zero) or top-right-corner and bottom-edge
//! coverage artifacts reappear.

use crate::tile::{Tile, TILE_WIDTH, YEDGE_NONE};
use raster_paths::fill::FillRule;

/// Computes coverage for local scanline `yi` of `tile`, writing `TILE_WIDTH` values into `area`.
/// `area` must have length `TILE_WIDTH as usize`.
pub fn rasterize_tile_row(tile: &Tile, yi: i32, fill_rule: FillRule, area: &mut [f32]) {
    debug_assert_eq!(area.len(), TILE_WIDTH as usize);

    for slot in area.iter_mut() {
        *slot = tile.backdrop as f32;
    }

    for segment in &tile.segments {
        accumulate_row(segment.p0.x, segment.p0.y, segment.p1.x, segment.p1.y, segment.y_edge, yi, area);
    }

    for slot in area.iter_mut() {
        *slot = fill_rule.resolve(*slot);
    }
}

#[inline]
fn sign(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Accumulates one segment's trapezoidal contribution (plus its `yEdgeTerm`, pass
/// `crate::tile::YEDGE_NONE` to suppress it) into `area`, whose length is the row width being
/// evaluated against. Used only by the tiled fine rasterizer (`rasterize_tile_row`, width
/// `TILE_WIDTH`); the non-tiled reference filler (`reference::rasterize`) deliberately does not
/// call this, so the two pipelines never share this formula's bugs (spec §4.2, §4.8).
#[allow(clippy::too_many_arguments)]
pub(crate) fn accumulate_row(p0x: f32, p0y: f32, p1x: f32, p1y: f32, y_edge: f32, yi: i32, area: &mut [f32]) {
    let dx = p1x - p0x;
    let dy_full = p1y - p0y;

    let y = p0y - yi as f32;
    let y0 = y.clamp(0.0, 1.0);
    let y1 = (y + dy_full).clamp(0.0, 1.0);
    let dy = y0 - y1;

    let y_edge_term = if y_edge >= YEDGE_NONE {
        0.0
    } else {
        sign(dx) * (yi as f32 - y_edge + 1.0).clamp(0.0, 1.0)
    };

    if dy != 0.0 {
        let t0 = (y0 - y) / dy_full;
        let t1 = (y1 - y) / dy_full;
        let x_at = |t: f32| p0x + dx * t;
        let x0 = x_at(t0);
        let x1 = x_at(t1);
        let xmin0 = x0.min(x1);
        let xmax0 = x1.max(x0);

        for (i, slot) in area.iter_mut().enumerate() {
            let i = i as f32;
            let xmin = (xmin0 - i).min(1.0) - 1e-6;
            let xmax = xmax0 - i;
            let b = xmax.min(1.0);
            let c = b.max(0.0);
            let d = xmin.max(0.0);
            let denom = xmax - xmin;
            let a = if denom == 0.0 { 0.0 } else { (b + 0.5 * (d * d - c * c) - xmin) / denom };
            *slot += a * dy;
        }
    }

    for slot in area.iter_mut() {
        *slot += y_edge_term;
    }
}
