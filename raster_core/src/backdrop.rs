// raster_core/src/backdrop.rs
//
// Copyright © 2020 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Turns the per-tile backdrop deltas the binner wrote into the running winding number each
//! tile's left edge starts at, by a left-to-right prefix sum over each tile row.

use crate::tile::Tile;
use crate::tile_map::DenseTileMap;

/// Replaces each tile's `backdrop` (currently a signed delta) with the running sum of deltas from
/// every tile to its left in the same row, inclusive. Must run after binning and before the fine
/// rasterizer reads `tile.backdrop`.
pub fn prefix_sum_backdrops(tiles: &mut DenseTileMap<Tile>) {
    let width = tiles.rect.size().x();
    if width <= 0 {
        return;
    }
    let height = tiles.rect.size().y();
    for row in 0..height {
        let row_start = row as usize * width as usize;
        let mut running = 0;
        for tx in 0..width as usize {
            running += tiles.data[row_start + tx].backdrop;
            tiles.data[row_start + tx].backdrop = running;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use raster_geometry::rect::RectI;
    use raster_geometry::vector::Vector2I;

    fn tiles_with_deltas(width: i32, height: i32, deltas: &[((i32, i32), i32)]) -> DenseTileMap<Tile> {
        let rect = RectI::new(Vector2I::new(0, 0), Vector2I::new(width, height));
        let mut tiles: DenseTileMap<Tile> = DenseTileMap::new(rect);
        for &((x, y), delta) in deltas {
            let index = tiles.coords_to_index(Vector2I::new(x, y)).unwrap();
            tiles.data[index].backdrop = delta;
        }
        tiles
    }

    #[test]
    fn single_delta_propagates_rightward_only() {
        let mut tiles = tiles_with_deltas(4, 1, &[((1, 0), 1)]);
        prefix_sum_backdrops(&mut tiles);
        let backdrops: Vec<i32> = tiles.data.iter().map(|t| t.backdrop).collect();
        assert_eq!(backdrops, vec![0, 1, 1, 1]);
    }

    #[test]
    fn matched_delta_pair_cancels_out_to_the_right() {
        let mut tiles = tiles_with_deltas(5, 1, &[((1, 0), 1), ((3, 0), -1)]);
        prefix_sum_backdrops(&mut tiles);
        let backdrops: Vec<i32> = tiles.data.iter().map(|t| t.backdrop).collect();
        assert_eq!(backdrops, vec![0, 1, 1, 0, 0]);
    }

    #[test]
    fn rows_are_independent() {
        let mut tiles = tiles_with_deltas(3, 2, &[((0, 0), 1), ((2, 1), 1)]);
        prefix_sum_backdrops(&mut tiles);
        let index0 = tiles.coords_to_index(Vector2I::new(2, 0)).unwrap();
        let index1 = tiles.coords_to_index(Vector2I::new(0, 1)).unwrap();
        assert_eq!(tiles.data[index0].backdrop, 1);
        assert_eq!(tiles.data[index1].backdrop, 0);
    }
}
