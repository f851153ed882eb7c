//! Flat square board of tiles.
//!
//! Tiles live in one dense `Vec` indexed `y * size + x`; there are no
//! per-cell allocations and no aliasing, the board owns every tile.

use serde::Serialize;

use crate::error::FloodError;
use crate::tile::{Tile, TileType};

/// A cell coordinate on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TilePos {
    pub x: usize,
    pub y: usize,
}

pub struct Grid {
    size: usize,
    tiles: Vec<Tile>,
    water_count: usize,
}

impl Grid {
    /// Wraps a freshly generated tile vector. The water counter starts
    /// unsynchronized; generation calls [`Grid::recount_water`] once the
    /// batch of writes is done.
    pub(crate) fn from_tiles(size: usize, tiles: Vec<Tile>) -> Self {
        assert_eq!(tiles.len(), size * size, "tile vector does not fill the board");
        Self {
            size,
            tiles,
            water_count: 0,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn total_tiles(&self) -> usize {
        self.size * self.size
    }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size
    }

    /// Maps a coordinate to its flat index, or fails with `OutOfRange`.
    pub(crate) fn index(&self, x: usize, y: usize) -> Result<usize, FloodError> {
        if self.in_bounds(x, y) {
            Ok(y * self.size + x)
        } else {
            Err(FloodError::OutOfRange {
                x,
                y,
                size: self.size,
            })
        }
    }

    pub fn tile(&self, x: usize, y: usize) -> Result<&Tile, FloodError> {
        let idx = self.index(x, y)?;
        Ok(&self.tiles[idx])
    }

    pub(crate) fn tile_mut(&mut self, x: usize, y: usize) -> Result<&mut Tile, FloodError> {
        let idx = self.index(x, y)?;
        Ok(&mut self.tiles[idx])
    }

    pub fn tile_type(&self, x: usize, y: usize) -> Result<TileType, FloodError> {
        Ok(self.tile(x, y)?.tile_type())
    }

    /// Replaces the tile at (x, y) wholesale. Used when generation or
    /// overwrite-mode classification rebuilds a cell from scratch.
    pub(crate) fn set(&mut self, x: usize, y: usize, tile: Tile) -> Result<(), FloodError> {
        let idx = self.index(x, y)?;
        self.tiles[idx] = tile;
        Ok(())
    }

    /// Cached count of water tiles. Callers that mutate the board in a batch
    /// must call [`Grid::recount_water`] afterwards.
    pub fn water_count(&self) -> usize {
        self.water_count
    }

    pub(crate) fn recount_water(&mut self) {
        self.water_count = self.tiles.iter().filter(|tile| tile.is_water()).count();
    }

    /// Sum of every tile's inhabitants. Recomputed on demand.
    pub fn total_population(&self) -> u64 {
        self.tiles
            .iter()
            .map(|tile| u64::from(tile.population().total()))
            .sum()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// In-bounds 4-connected neighbors of (x, y).
    pub fn neighbors4(&self, x: usize, y: usize) -> Vec<TilePos> {
        let mut neighbors = Vec::with_capacity(4);
        if y > 0 {
            neighbors.push(TilePos { x, y: y - 1 });
        }
        if y < self.size - 1 {
            neighbors.push(TilePos { x, y: y + 1 });
        }
        if x > 0 {
            neighbors.push(TilePos { x: x - 1, y });
        }
        if x < self.size - 1 {
            neighbors.push(TilePos { x: x + 1, y });
        }
        neighbors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::GameRng;

    fn land_grid(size: usize) -> Grid {
        let mut rng = GameRng::seeded(0);
        let tiles = (0..size * size)
            .map(|_| Tile::new(TileType::Land, &mut rng))
            .collect();
        Grid::from_tiles(size, tiles)
    }

    #[test]
    fn bounds_checking() {
        let grid = land_grid(3);
        assert!(grid.tile_type(2, 2).is_ok());
        let err = grid.tile_type(3, 0).unwrap_err();
        assert_eq!(err, FloodError::OutOfRange { x: 3, y: 0, size: 3 });
        assert!(grid.tile_type(0, 3).is_err());
    }

    #[test]
    fn water_count_is_cached_and_recomputed() {
        let mut grid = land_grid(3);
        assert_eq!(grid.water_count(), 0);
        grid.tile_mut(1, 1).unwrap().set_type(TileType::Water).unwrap();
        // Stale until the batch is closed.
        assert_eq!(grid.water_count(), 0);
        grid.recount_water();
        assert_eq!(grid.water_count(), 1);
    }

    #[test]
    fn total_population_sums_all_tiles() {
        let grid = land_grid(3);
        assert_eq!(grid.total_population(), 9 * 4);
    }

    #[test]
    fn corner_and_center_neighbors() {
        let grid = land_grid(3);
        assert_eq!(grid.neighbors4(0, 0).len(), 2);
        assert_eq!(grid.neighbors4(1, 1).len(), 4);
        assert_eq!(grid.neighbors4(2, 1).len(), 3);
    }
}
