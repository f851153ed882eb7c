//! Tiles, tile types, and the per-tile population overlay.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::FloodError;

/// The three states a board cell can be in.
///
/// `Water` is terminal within one round: once a tile turns to water it stays
/// water until the whole board is rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileType {
    Land,
    Shore,
    Water,
}

impl TileType {
    /// Inhabitants a freshly built tile of this type starts with.
    ///
    /// Product constants, not engine invariants; the engine only relies on
    /// water tiles being empty.
    pub fn suggested_population(self) -> u32 {
        match self {
            TileType::Land => 4,
            TileType::Shore => 2,
            TileType::Water => 0,
        }
    }

    pub fn is_water(self) -> bool {
        self == TileType::Water
    }

    pub fn is_shore(self) -> bool {
        self == TileType::Shore
    }
}

/// Fractional offset inside a tile where one inhabitant is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Marker {
    pub fx: f32,
    pub fy: f32,
}

/// Inhabitants of a single tile.
///
/// Seeded once at tile construction from the tile's original type and only
/// ever decreases, to zero, when the tile floods. Markers are never cleared;
/// renderers skip them once `total` hits zero.
#[derive(Debug, Clone, Serialize)]
pub struct Population {
    total: u32,
    markers: Vec<Marker>,
}

impl Population {
    pub fn seeded(tile_type: TileType, rng: &mut impl Rng) -> Self {
        let total = tile_type.suggested_population();
        let markers = (0..total)
            .map(|_| Marker {
                fx: rng.gen::<f32>(),
                fy: rng.gen::<f32>(),
            })
            .collect();
        Self { total, markers }
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    fn drown(&mut self) {
        self.total = 0;
    }
}

/// One board cell: its current type plus the population overlay.
#[derive(Debug, Clone, Serialize)]
pub struct Tile {
    #[serde(rename = "type")]
    tile_type: TileType,
    population: Population,
}

impl Tile {
    pub fn new(tile_type: TileType, rng: &mut impl Rng) -> Self {
        Self {
            tile_type,
            population: Population::seeded(tile_type, rng),
        }
    }

    pub fn tile_type(&self) -> TileType {
        self.tile_type
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn is_water(&self) -> bool {
        self.tile_type.is_water()
    }

    pub fn is_shore(&self) -> bool {
        self.tile_type.is_shore()
    }

    /// Mutates the tile's type in place. Turning to water empties the
    /// population. Setting a tile to the type it already has signals a logic
    /// defect upstream and is rejected.
    pub fn set_type(&mut self, tile_type: TileType) -> Result<(), FloodError> {
        if tile_type == self.tile_type {
            return Err(FloodError::InvariantViolation(format!(
                "tile is already {tile_type:?}"
            )));
        }
        self.tile_type = tile_type;
        if tile_type.is_water() {
            self.population.drown();
        }
        Ok(())
    }
}
