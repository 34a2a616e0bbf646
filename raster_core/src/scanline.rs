// raster_core/src/scanline.rs
//
// Copyright © 2020 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Assembles one full-width pixel row from the fine rasterizer's per-tile coverage, then converts
//! it into an alpha-run sequence for the caller's scanline callback.

use crate::alpha::AlphaRuns;
use crate::fine::rasterize_tile_row;
use crate::tile::{Tile, TileBBox, TILE_HEIGHT, TILE_WIDTH};
use crate::tile_map::DenseTileMap;
use raster_paths::fill::FillRule;

/// Scratch buffers reused across every row of one `Fill()` call.
pub struct ScanlineAssembler {
    tile_area: Vec<f32>,
    coverage: Vec<f32>,
}

impl ScanlineAssembler {
    pub fn new(width: usize) -> ScanlineAssembler {
        ScanlineAssembler { tile_area: vec![0.0; TILE_WIDTH as usize], coverage: vec![0.0; width] }
    }

    /// Renders pixel row `py` into `runs`, reading tiles from `tiles`/`bbox`. `runs` is reset
    /// first; the caller is responsible for invoking its scanline callback afterward.
    pub fn assemble_row(
        &mut self,
        py: i32,
        tiles: &DenseTileMap<Tile>,
        bbox: TileBBox,
        fill_rule: FillRule,
        runs: &mut AlphaRuns,
    ) {
        runs.reset();

        let ty = py.div_euclid(TILE_HEIGHT);
        let yi = py.rem_euclid(TILE_HEIGHT);
        if ty < bbox.y_min || ty >= bbox.y_max {
            return;
        }

        for value in &mut self.coverage {
            *value = 0.0;
        }

        for tx in bbox.x_min..bbox.x_max {
            let index = match tiles.coords_to_index(raster_geometry::vector::Vector2I::new(tx, ty)) {
                Some(index) => index,
                None => continue,
            };
            rasterize_tile_row(&tiles.data[index], yi, fill_rule, &mut self.tile_area);

            let dst_start = (tx * TILE_WIDTH) as usize;
            if dst_start >= self.coverage.len() {
                continue;
            }
            let dst_end = (dst_start + TILE_WIDTH as usize).min(self.coverage.len());
            let copy_len = dst_end - dst_start;
            self.coverage[dst_start..dst_end].copy_from_slice(&self.tile_area[..copy_len]);
        }

        emit_runs(&self.coverage, runs);
    }
}

fn emit_runs(coverage: &[f32], runs: &mut AlphaRuns) {
    let mut i = 0;
    while i < coverage.len() {
        let alpha = coverage_to_alpha(coverage[i]);
        let mut j = i + 1;
        while j < coverage.len() && coverage_to_alpha(coverage[j]) == alpha {
            j += 1;
        }
        if alpha != 0 {
            let run_len = (j - i - 1) as i32;
            runs.add_with_coverage(i as i32, alpha, run_len, alpha, alpha);
        }
        i = j;
    }
}

#[inline]
fn coverage_to_alpha(coverage: f32) -> u8 {
    (coverage.clamp(0.0, 1.0) * 255.0).round() as u8
}
