// raster_core/src/tile.rs
//
// Copyright © 2020 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tile grid geometry: dimensions, the per-tile backdrop/segment state the binner fills in, and
//! the clipped per-tile segment record the fine rasterizer consumes.

use raster_geometry::rect::{RectF, RectI};
use raster_geometry::vector::{Vector2F, Vector2I};

/// Tile width in pixels. The 4x4 path mentioned alongside this in the source is not implemented
/// here (spec open question: no evidence any test exercises it).
pub const TILE_WIDTH: i32 = 16;
/// Tile height in pixels.
pub const TILE_HEIGHT: i32 = 16;

/// Sentinel `yEdge` value meaning "this segment never crosses the tile's left edge".
pub const YEDGE_NONE: f32 = 1e9;

/// A segment clipped to one tile, in tile-local coordinates (`p0`/`p1` each lie in
/// `[0, TILE_WIDTH] x [0, TILE_HEIGHT]`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathSegment {
    pub p0: Vector2F,
    pub p1: Vector2F,
    /// The y-coordinate at which this segment crosses the tile's left edge (`x = 0`), or
    /// `YEDGE_NONE` if it never does.
    pub y_edge: f32,
}

/// Per-tile state. `backdrop` starts as a signed winding delta and is replaced in place by its
/// running row-prefix-sum (see `backdrop::prefix_sum_backdrops`).
#[derive(Clone, Debug, Default)]
pub struct Tile {
    pub backdrop: i32,
    pub segments: Vec<PathSegment>,
}

/// A path's pixel bounding box, expressed in tile coordinates and clamped to the canvas's tile
/// grid. `backdrop` writes and segment emission only ever touch tiles inside this box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileBBox {
    pub x_min: i32,
    pub y_min: i32,
    pub x_max: i32,
    pub y_max: i32,
}

impl TileBBox {
    /// Converts a pixel-space bbox into tile coordinates, clamped to `[0, canvas_tiles)`.
    pub fn from_pixel_bbox(bbox: RectF, canvas_tiles: Vector2I) -> TileBBox {
        let x_min = (bbox.min_x() / TILE_WIDTH as f32).floor() as i32;
        let y_min = (bbox.min_y() / TILE_HEIGHT as f32).floor() as i32;
        let x_max = (bbox.max_x() / TILE_WIDTH as f32).ceil() as i32;
        let y_max = (bbox.max_y() / TILE_HEIGHT as f32).ceil() as i32;
        TileBBox {
            x_min: x_min.clamp(0, canvas_tiles.x()),
            y_min: y_min.clamp(0, canvas_tiles.y()),
            x_max: x_max.clamp(0, canvas_tiles.x()),
            y_max: y_max.clamp(0, canvas_tiles.y()),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x_min >= self.x_max || self.y_min >= self.y_max
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.x_max - self.x_min
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.y_max - self.y_min
    }

    #[inline]
    pub fn to_rect_i(self) -> RectI {
        RectI::new(Vector2I::new(self.x_min, self.y_min), Vector2I::new(self.width(), self.height()))
    }
}

/// Tile grid dimensions for a `width x height` pixel canvas: `ceil(W/16) x ceil(H/16)`.
#[inline]
pub fn canvas_tile_dimensions(width: i32, height: i32) -> Vector2I {
    Vector2I::new(
        (width + TILE_WIDTH - 1) / TILE_WIDTH,
        (height + TILE_HEIGHT - 1) / TILE_HEIGHT,
    )
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn canvas_dimensions_round_up() {
        assert_eq!(canvas_tile_dimensions(64, 64), Vector2I::new(4, 4));
        assert_eq!(canvas_tile_dimensions(17, 1), Vector2I::new(2, 1));
    }

    #[test]
    fn bbox_clamps_to_canvas_tiles() {
        let bbox = RectF::from_points(Vector2F::new(-50.0, -50.0), Vector2F::new(1000.0, 1000.0));
        let tile_bbox = TileBBox::from_pixel_bbox(bbox, Vector2I::new(4, 4));
        assert_eq!(tile_bbox, TileBBox { x_min: 0, y_min: 0, x_max: 4, y_max: 4 });
    }

    #[test]
    fn tight_bbox_maps_to_expected_tiles() {
        let bbox = RectF::from_points(Vector2F::new(16.0, 16.0), Vector2F::new(48.0, 48.0));
        let tile_bbox = TileBBox::from_pixel_bbox(bbox, Vector2I::new(4, 4));
        assert_eq!(tile_bbox, TileBBox { x_min: 1, y_min: 1, x_max: 3, y_max: 3 });
    }
}
