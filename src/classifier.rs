//! Shoreline classification.
//!
//! After any batch of mutations, every land tile touching water (in the
//! 8-connected sense) must be a shore tile. Generation uses overwrite mode,
//! which rebuilds the cell so its population is seeded for a shore; floods
//! use in-place mode, which only mutates the type.

use crate::error::FloodError;
use crate::grid::Grid;
use crate::rng::GameRng;
use crate::tile::{Tile, TileType};

/// How a newly discovered shore cell is written back.
pub enum ShoreMode<'r> {
    /// Replace the cell with a freshly constructed shore tile. Used right
    /// after generation, where the cell starts its life as a shore rather
    /// than becoming one.
    Overwrite(&'r mut GameRng),
    /// Mutate the existing tile's type, keeping its population. Used after
    /// a flood event.
    InPlace,
}

/// Scans the whole board and turns every land tile with a water neighbor
/// into a shore tile. Water and existing shore tiles are skipped.
pub fn classify_shores(grid: &mut Grid, mut mode: ShoreMode<'_>) -> Result<(), FloodError> {
    for y in 0..grid.size() {
        for x in 0..grid.size() {
            let tile_type = grid.tile_type(x, y)?;
            if tile_type.is_water() || tile_type.is_shore() {
                continue;
            }
            shore_if_water_neighbor(grid, x, y, &mut mode)?;
        }
    }
    Ok(())
}

/// Turns (x, y) into a shore tile if any of its 8 neighbors is water.
/// The scan stops at the first water hit. Calling this for a water cell is
/// a contract violation.
fn shore_if_water_neighbor(
    grid: &mut Grid,
    x: usize,
    y: usize,
    mode: &mut ShoreMode<'_>,
) -> Result<bool, FloodError> {
    if grid.tile_type(x, y)?.is_water() {
        return Err(FloodError::InvariantViolation(format!(
            "asked to reclassify the water tile at ({x}, {y})"
        )));
    }
    if !has_water_neighbor(grid, x, y) {
        return Ok(false);
    }
    match mode {
        ShoreMode::Overwrite(rng) => grid.set(x, y, Tile::new(TileType::Shore, &mut **rng))?,
        ShoreMode::InPlace => grid.tile_mut(x, y)?.set_type(TileType::Shore)?,
    }
    Ok(true)
}

fn has_water_neighbor(grid: &Grid, x: usize, y: usize) -> bool {
    let size = grid.size() as i64;
    for b in -1_i64..=1 {
        let ny = y as i64 + b;
        if ny < 0 || ny >= size {
            continue;
        }
        for a in -1_i64..=1 {
            let nx = x as i64 + a;
            if nx < 0 || nx >= size || (a == 0 && b == 0) {
                continue;
            }
            if let Ok(tile_type) = grid.tile_type(nx as usize, ny as usize) {
                if tile_type.is_water() {
                    return true;
                }
            }
        }
    }
    false
}
