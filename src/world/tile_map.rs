//! Floor tile grid
//!
//! Tiles are square, `tile_size` on a side, stored row-major. Row indices grow
//! with y and column indices with x. A blocking tile acts as a static
//! collider; its box is synthesized when needed rather than stored.

use serde::{Deserialize, Serialize};

use crate::geometry::{OrientedBox, Point};
use crate::physics::sat::{Collider, ColliderId};

/// A single floor tile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    /// Position of the texture on the tile sheet
    #[serde(rename = "textureIndex")]
    pub texture_index: Point,
    #[serde(default)]
    pub blocking: bool,
}

impl Default for Tile {
    fn default() -> Self {
        Self {
            texture_index: Point::ORIGIN,
            blocking: false,
        }
    }
}

/// A blocking tile turned into a collider for one query
#[derive(Debug, Clone)]
pub struct TileCollider {
    pub row: usize,
    pub column: usize,
    pub bbox: OrientedBox,
}

impl Collider for TileCollider {
    fn collider_id(&self) -> ColliderId {
        ColliderId::Tile {
            row: self.row,
            column: self.column,
        }
    }

    fn anchor(&self) -> Point {
        self.bbox.position()
    }

    fn collider_box(&self) -> Option<&OrientedBox> {
        Some(&self.bbox)
    }
}

/// The level's tile grid
#[derive(Debug, Clone)]
pub struct TileMap {
    rows: usize,
    columns: usize,
    tile_size: f64,
    tiles: Vec<Tile>,
}

impl TileMap {
    /// Create a map of default, non-blocking tiles
    pub fn new(rows: usize, columns: usize, tile_size: f64) -> Self {
        Self {
            rows,
            columns,
            tile_size,
            tiles: vec![Tile::default(); rows * columns],
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    pub fn tile_size(&self) -> f64 {
        self.tile_size
    }

    pub fn tile_by_index(&self, row: usize, column: usize) -> Option<&Tile> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        self.tiles.get(row * self.columns + column)
    }

    pub fn tile_by_index_mut(&mut self, row: usize, column: usize) -> Option<&mut Tile> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        self.tiles.get_mut(row * self.columns + column)
    }

    /// Grid cell containing a world position, possibly outside the map
    pub fn cell_of(&self, position: Point) -> (i64, i64) {
        (
            (position.y() / self.tile_size).floor() as i64,
            (position.x() / self.tile_size).floor() as i64,
        )
    }

    /// The tile under a world position, `None` outside the map
    pub fn tile_by_position(&self, position: Point) -> Option<&Tile> {
        let (row, column) = self.cell_of(position);
        if row < 0 || column < 0 {
            return None;
        }
        self.tile_by_index(row as usize, column as usize)
    }

    /// Overwrite tiles from level data, indexed `[row][column]`
    ///
    /// Entries outside the map are ignored.
    pub fn apply_tile_data(&mut self, data: &[Vec<Tile>]) {
        for (row, tiles) in data.iter().enumerate() {
            for (column, tile) in tiles.iter().enumerate() {
                if let Some(target) = self.tile_by_index_mut(row, column) {
                    *target = *tile;
                }
            }
        }
    }

    /// World-space box of the tile at (row, column)
    pub fn tile_box(&self, row: usize, column: usize) -> OrientedBox {
        let center = Point::new_unchecked(
            (column as f64 + 0.5) * self.tile_size,
            (row as f64 + 0.5) * self.tile_size,
        );
        OrientedBox::new(center, self.tile_size, self.tile_size, 0.0)
    }

    /// Colliders for every blocking tile whose cell lies within `radius` of `position`
    pub fn blocking_tiles_near(&self, position: Point, radius: f64) -> Vec<TileCollider> {
        if self.rows == 0 || self.columns == 0 {
            return Vec::new();
        }
        let to_index = |v: f64, len: usize| -> Option<usize> {
            let i = (v / self.tile_size).floor();
            if i < 0.0 {
                Some(0)
            } else if i >= len as f64 {
                None
            } else {
                Some(i as usize)
            }
        };
        let clamp_max = |v: f64, len: usize| -> Option<usize> {
            let i = (v / self.tile_size).floor();
            if i < 0.0 {
                None
            } else {
                Some((i as usize).min(len - 1))
            }
        };

        let (Some(row_min), Some(row_max)) = (
            to_index(position.y() - radius, self.rows),
            clamp_max(position.y() + radius, self.rows),
        ) else {
            return Vec::new();
        };
        let (Some(col_min), Some(col_max)) = (
            to_index(position.x() - radius, self.columns),
            clamp_max(position.x() + radius, self.columns),
        ) else {
            return Vec::new();
        };

        let mut result = Vec::new();
        for row in row_min..=row_max {
            for column in col_min..=col_max {
                if self.tile_by_index(row, column).is_some_and(|t| t.blocking) {
                    result.push(TileCollider {
                        row,
                        column,
                        bbox: self.tile_box(row, column),
                    });
                }
            }
        }
        result
    }
}
