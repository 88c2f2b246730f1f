// Copyright 2025 the Waymark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Square render tiles over the world plane.

use kurbo::Rect;

/// A square bin of the world plane that is rendered into its own raster.
///
/// Tile `(x_index, y_index)` with side `length` covers
/// `[x_index * length, (x_index + 1) * length]` horizontally and likewise vertically.
/// Every tile is rasterized at [`Tile::RESOLUTION`] pixels per side.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tile {
    /// Column of the tile.
    pub x_index: i64,
    /// Row of the tile.
    pub y_index: i64,
    /// Side length in world units.
    pub length: f64,
}

impl Tile {
    /// Pixels per tile side.
    pub const RESOLUTION: f64 = 256.0;

    /// Create a tile.
    pub const fn new(x_index: i64, y_index: i64, length: f64) -> Self {
        Self {
            x_index,
            y_index,
            length,
        }
    }

    /// The world area covered by the tile.
    pub fn world_rect(&self) -> Rect {
        let x = self.x_index as f64 * self.length;
        let y = self.y_index as f64 * self.length;
        Rect::new(x, y, x + self.length, y + self.length)
    }

    /// Pixels per world unit when the tile is rasterized.
    pub fn pixel_scale(&self) -> f64 {
        Self::RESOLUTION / self.length
    }

    /// Rectangle to search for content drawn into this tile.
    ///
    /// The world rectangle is grown by `line_width` times the tile's pixel scale,
    /// so strokes that straddle the tile border are still drawn on both sides.
    pub fn query_rect(&self, line_width: f64) -> Rect {
        let pad = line_width * self.pixel_scale();
        self.world_rect().inflate(pad, pad)
    }

    /// Tiles of side `length` overlapping `rect`, row by row.
    ///
    /// Tiles that only touch `rect` along their border are excluded, except that a
    /// zero-width or zero-height `rect` still yields the tiles containing it.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Outward-rounded tile coordinates are whole numbers."
    )]
    pub fn tiles_covering(rect: Rect, length: f64) -> impl Iterator<Item = Self> {
        let r = rect.abs();
        let snapped = Rect::new(
            r.x0 / length,
            r.y0 / length,
            r.x1 / length,
            r.y1 / length,
        )
        .expand();
        let x0 = snapped.x0 as i64;
        let y0 = snapped.y0 as i64;
        let x1 = (snapped.x1 as i64).max(x0 + 1);
        let y1 = (snapped.y1 as i64).max(y0 + 1);
        (y0..y1).flat_map(move |y| (x0..x1).map(move |x| Self::new(x, y, length)))
    }
}
