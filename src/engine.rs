//! The game engine: owns the board, the random source, and the flood logic.

use rand::Rng;
use tracing::{debug, info};

use crate::classifier::{classify_shores, ShoreMode};
use crate::error::FloodError;
use crate::generator::{generate, GeneratorKind, GeneratorSettings};
use crate::grid::{Grid, TilePos};
use crate::rng::GameRng;
use crate::tile::{Tile, TileType};

#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// Tiles per row and per column. Must be at least 2.
    pub size: usize,
    pub generator: GeneratorKind,
    pub water_rate: f64,
    /// Reproduce the historical always-water Simple fill.
    pub simple_always_water: bool,
    /// Fixed seed for reproducible boards; a random seed when absent.
    pub seed: Option<u64>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            size: 20,
            generator: GeneratorKind::Complex,
            water_rate: 0.2,
            simple_always_water: false,
            seed: None,
        }
    }
}

pub struct Engine {
    grid: Grid,
    rng: GameRng,
    generator: GeneratorSettings,
    floods: u64,
}

impl Engine {
    pub fn new(settings: EngineSettings) -> Result<Self, FloodError> {
        if settings.size < 2 {
            return Err(FloodError::InvariantViolation(format!(
                "board size must be at least 2, got {}",
                settings.size
            )));
        }
        if !(0.0..=1.0).contains(&settings.water_rate) {
            return Err(FloodError::InvariantViolation(format!(
                "water rate must lie in [0, 1], got {}",
                settings.water_rate
            )));
        }
        let mut rng = match settings.seed {
            Some(seed) => GameRng::seeded(seed),
            None => GameRng::from_entropy(),
        };
        let generator = GeneratorSettings {
            kind: settings.generator,
            water_rate: settings.water_rate,
            simple_always_water: settings.simple_always_water,
        };
        let grid = Self::build_board(&generator, settings.size, &mut rng)?;
        info!(
            size = settings.size,
            generator = %settings.generator,
            water = grid.water_count(),
            "board generated"
        );
        Ok(Self {
            grid,
            rng,
            generator,
            floods: 0,
        })
    }

    /// Generation, minimum-water repair, and shoreline classification, in
    /// that order.
    fn build_board(
        generator: &GeneratorSettings,
        size: usize,
        rng: &mut GameRng,
    ) -> Result<Grid, FloodError> {
        let mut grid = generate(generator, size, rng);
        ensure_minimum_water(&mut grid, rng)?;
        classify_shores(&mut grid, ShoreMode::Overwrite(rng))?;
        Ok(grid)
    }

    /// Floods the connected shore region containing (x, y) and returns it.
    ///
    /// A click on a water or landlocked land tile is a normal no-op that
    /// still counts as a move. Fails only for out-of-range coordinates.
    pub fn start_flood(&mut self, x: usize, y: usize) -> Result<Vec<TilePos>, FloodError> {
        self.grid.index(x, y)?;
        let region = self.collect_region(x, y);
        if !region.is_empty() {
            for pos in &region {
                self.grid.tile_mut(pos.x, pos.y)?.set_type(TileType::Water)?;
            }
            classify_shores(&mut self.grid, ShoreMode::InPlace)?;
            self.grid.recount_water();
        }
        self.floods += 1;
        info!(
            x,
            y,
            flooded = region.len(),
            water = self.grid.water_count(),
            "flood"
        );
        Ok(region)
    }

    /// The region a flood at (x, y) would convert, without converting it.
    ///
    /// Safe to call on every hover frame: it takes `&self`, so it cannot
    /// touch the board, the counters, or the random stream.
    pub fn selection(&self, x: usize, y: usize) -> Result<Vec<TilePos>, FloodError> {
        self.grid.index(x, y)?;
        Ok(self.collect_region(x, y))
    }

    /// Iterative traversal over the connected shore region containing the
    /// start cell. Returns an empty region when the start is not a shore.
    fn collect_region(&self, x: usize, y: usize) -> Vec<TilePos> {
        let size = self.grid.size();
        let mut visited = vec![false; size * size];
        let mut region = Vec::new();
        let mut stack = vec![TilePos { x, y }];
        while let Some(pos) = stack.pop() {
            let idx = pos.y * size + pos.x;
            if visited[idx] {
                continue;
            }
            visited[idx] = true;
            let is_shore = self
                .grid
                .tile_type(pos.x, pos.y)
                .map(TileType::is_shore)
                .unwrap_or(false);
            if !is_shore {
                continue;
            }
            region.push(pos);
            for neighbor in self.grid.neighbors4(pos.x, pos.y) {
                if !visited[neighbor.y * size + neighbor.x] {
                    stack.push(neighbor);
                }
            }
        }
        region
    }

    /// Rebuilds the board from scratch at the current size and resets the
    /// flood counter.
    pub fn reinitialize(&mut self) -> Result<(), FloodError> {
        let size = self.grid.size();
        self.grid = Self::build_board(&self.generator, size, &mut self.rng)?;
        self.floods = 0;
        info!(size, water = self.grid.water_count(), "board reinitialized");
        Ok(())
    }

    /// Rebuilds the board at a new dimension.
    pub fn resize(&mut self, size: usize) -> Result<(), FloodError> {
        if size < 2 {
            return Err(FloodError::InvariantViolation(format!(
                "board size must be at least 2, got {size}"
            )));
        }
        self.grid = Self::build_board(&self.generator, size, &mut self.rng)?;
        self.floods = 0;
        info!(size, water = self.grid.water_count(), "board resized");
        Ok(())
    }

    pub fn tile_type(&self, x: usize, y: usize) -> Result<TileType, FloodError> {
        self.grid.tile_type(x, y)
    }

    pub fn tile(&self, x: usize, y: usize) -> Result<&Tile, FloodError> {
        self.grid.tile(x, y)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    pub fn water_count(&self) -> usize {
        self.grid.water_count()
    }

    pub fn total_tiles(&self) -> usize {
        self.grid.total_tiles()
    }

    pub fn total_population(&self) -> u64 {
        self.grid.total_population()
    }

    /// Floods performed since the last (re)initialization.
    pub fn floods(&self) -> u64 {
        self.floods
    }

    /// The round is over once every tile is water.
    pub fn is_complete(&self) -> bool {
        self.grid.water_count() == self.grid.total_tiles()
    }
}

/// A dry board is unplayable: force one uniformly random cell to water so
/// the game always has a starting shoreline.
fn ensure_minimum_water(grid: &mut Grid, rng: &mut GameRng) -> Result<(), FloodError> {
    if grid.water_count() > 0 {
        return Ok(());
    }
    let x = rng.gen_range(0..grid.size());
    let y = rng.gen_range(0..grid.size());
    grid.tile_mut(x, y)?.set_type(TileType::Water)?;
    grid.recount_water();
    debug!(x, y, "dry board repaired with a forced water tile");
    Ok(())
}
