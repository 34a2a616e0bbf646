// raster_core/src/rasterizer.rs
//
// Copyright © 2020 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The top-level entry point: wires the flattener, binner, backdrop summer, fine rasterizer and
//! scanline assembler into one `Fill()` call.

use crate::alpha::AlphaRuns;
use crate::backdrop::prefix_sum_backdrops;
use crate::binner::bin_edges;
use crate::edge::flatten;
use crate::options::{FillOptions, ScanlineListener};
use crate::scanline::ScanlineAssembler;
use crate::tile::{canvas_tile_dimensions, Tile, TileBBox};
use crate::tile_map::DenseTileMap;
use raster_paths::path::Path;

/// Owns every scratch buffer a `Fill()` call touches. Reused across calls: after the first call
/// against a given canvas size, steady-state fills of similarly sized paths allocate nothing
/// beyond the tile grid resize that a changed bounding box forces.
pub struct Rasterizer {
    width: i32,
    height: i32,
    tiles: DenseTileMap<Tile>,
    assembler: ScanlineAssembler,
    runs: AlphaRuns,
}

impl Rasterizer {
    /// Creates a rasterizer targeting a `width x height` canvas.
    pub fn new(width: i32, height: i32) -> Rasterizer {
        let empty_bbox = TileBBox { x_min: 0, y_min: 0, x_max: 0, y_max: 0 };
        Rasterizer {
            width,
            height,
            tiles: DenseTileMap::new(empty_bbox.to_rect_i()),
            assembler: ScanlineAssembler::new(width.max(0) as usize),
            runs: AlphaRuns::new(width.max(0) as usize),
        }
    }

    /// Fills `path` under `options`, invoking `listener` once per touched scanline in ascending
    /// `y` order. Scanlines the path's bbox never reaches are not delivered at all.
    pub fn fill(&mut self, path: &Path, options: &FillOptions, listener: &mut ScanlineListener) {
        let flattened = flatten(path, &options.transform, options.tolerance, options.aa_shift);
        if flattened.edges.is_empty() {
            debug!("fill: flattened path produced no edges, nothing to rasterize");
            return;
        }

        let canvas_tiles = canvas_tile_dimensions(self.width.max(0), self.height.max(0));
        let bbox = TileBBox::from_pixel_bbox(flattened.bbox, canvas_tiles);
        if bbox.is_empty() {
            trace!("fill: path bbox does not intersect the canvas");
            return;
        }

        self.tiles = DenseTileMap::new(bbox.to_rect_i());
        bin_edges(&flattened.edges, bbox, &mut self.tiles);
        prefix_sum_backdrops(&mut self.tiles);

        debug!(
            "fill: bbox={:?} tile_grid={}x{} edges={} segments={} backdrop_tiles={}",
            bbox,
            bbox.width(),
            bbox.height(),
            flattened.edges.len(),
            self.tiles.data.iter().map(|t| t.segments.len()).sum::<usize>(),
            self.tiles.data.iter().filter(|t| t.backdrop != 0).count(),
        );

        let y_start = bbox.y_min * crate::tile::TILE_HEIGHT;
        let y_end = (bbox.y_max * crate::tile::TILE_HEIGHT).min(self.height.max(0));
        for py in y_start.max(0)..y_end {
            self.assembler.assemble_row(py, &self.tiles, bbox, options.fill_rule, &mut self.runs);
            if !self.runs.is_empty() {
                listener.send(py, &self.runs);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::alpha::AlphaRuns;
    use raster_geometry::vector::Vector2F;
    use raster_paths::fill::FillRule;

    fn rectangle_path() -> Path {
        let mut path = Path::new();
        path.move_to(Vector2F::new(16.0, 16.0));
        path.line_to(Vector2F::new(48.0, 16.0));
        path.line_to(Vector2F::new(48.0, 48.0));
        path.line_to(Vector2F::new(16.0, 48.0));
        path.close();
        path
    }

    #[test]
    fn rectangle_fill_covers_exactly_its_interior() {
        let mut rasterizer = Rasterizer::new(64, 64);
        let path = rectangle_path();
        let options = FillOptions { fill_rule: FillRule::NonZero, ..FillOptions::default() };

        let mut rows_seen = Vec::new();
        let mut alpha_at_32 = Vec::new();
        {
            let mut listener = ScanlineListener::new(Box::new(|y: i32, runs: &AlphaRuns| {
                rows_seen.push(y);
                alpha_at_32.push((y, runs.get_alpha(32)));
            }));
            rasterizer.fill(&path, &options, &mut listener);
        }

        assert_eq!(rows_seen, (16..48).collect::<Vec<_>>());
        for (_, alpha) in alpha_at_32 {
            assert_eq!(alpha, 255);
        }
    }

    #[test]
    fn empty_path_produces_no_callbacks() {
        let mut rasterizer = Rasterizer::new(64, 64);
        let path = Path::new();
        let options = FillOptions::default();
        let mut callback_count = 0;
        {
            let mut listener =
                ScanlineListener::new(Box::new(|_y: i32, _runs: &AlphaRuns| callback_count += 1));
            rasterizer.fill(&path, &options, &mut listener);
        }
        assert_eq!(callback_count, 0);
    }

    #[test]
    fn scanlines_are_delivered_in_ascending_order() {
        let mut rasterizer = Rasterizer::new(100, 100);
        let mut path = Path::new();
        path.move_to(Vector2F::new(5.0, 5.0));
        path.line_to(Vector2F::new(95.0, 50.0));
        path.line_to(Vector2F::new(5.0, 95.0));
        path.close();
        let options = FillOptions::default();

        let mut rows_seen = Vec::new();
        {
            let mut listener =
                ScanlineListener::new(Box::new(|y: i32, _runs: &AlphaRuns| rows_seen.push(y)));
            rasterizer.fill(&path, &options, &mut listener);
        }
        for window in rows_seen.windows(2) {
            assert!(window[0] < window[1]);
        }
    }
}
