//! Procedural terrain generation.
//!
//! The three generators write the initial land/water distribution for a
//! fresh board. They work on a flat buffer of tile types first and only
//! materialize tiles (with their population overlays) at the end, so the
//! block-copying generators can read back cells they already decided.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::rng::GameRng;
use crate::tile::{Tile, TileType};

/// The closed family of terrain generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorKind {
    /// Independent per-cell Bernoulli draw.
    Simple,
    /// 2x2 blocks sharing one Bernoulli draw; produces blocky lakes.
    Squares,
    /// Squares plus a probabilistic water spread around each water block.
    Complex,
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GeneratorKind::Simple => "simple",
            GeneratorKind::Squares => "squares",
            GeneratorKind::Complex => "complex",
        };
        f.write_str(name)
    }
}

impl FromStr for GeneratorKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "simple" => Ok(GeneratorKind::Simple),
            "squares" => Ok(GeneratorKind::Squares),
            "complex" => Ok(GeneratorKind::Complex),
            other => Err(format!(
                "unknown generator '{other}' (expected simple, squares or complex)"
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    pub kind: GeneratorKind,
    /// Probability in [0, 1] that a Bernoulli draw produces water.
    pub water_rate: f64,
    /// Compatibility switch: early releases of the Simple generator turned
    /// every cell to water no matter what the draw said. Off by default.
    pub simple_always_water: bool,
}

/// Fills a fresh board of `size * size` tiles.
///
/// The result has not been shore-classified yet and may contain zero water
/// tiles; the engine repairs and classifies it afterwards.
pub fn generate(settings: &GeneratorSettings, size: usize, rng: &mut GameRng) -> Grid {
    let types = match settings.kind {
        GeneratorKind::Simple => simple(settings, size, rng),
        GeneratorKind::Squares => squares(settings, size, rng),
        GeneratorKind::Complex => complex(settings, size, rng),
    };
    let tiles: Vec<Tile> = types
        .into_iter()
        .map(|tile_type| Tile::new(tile_type, rng))
        .collect();
    let mut grid = Grid::from_tiles(size, tiles);
    grid.recount_water();
    grid
}

fn draw(water_rate: f64, rng: &mut GameRng) -> TileType {
    if rng.gen::<f64>() < water_rate {
        TileType::Water
    } else {
        TileType::Land
    }
}

fn simple(settings: &GeneratorSettings, size: usize, rng: &mut GameRng) -> Vec<TileType> {
    (0..size * size)
        .map(|_| {
            let drawn = draw(settings.water_rate, rng);
            if settings.simple_always_water {
                TileType::Water
            } else {
                drawn
            }
        })
        .collect()
}

fn squares(settings: &GeneratorSettings, size: usize, rng: &mut GameRng) -> Vec<TileType> {
    let mut types = vec![TileType::Land; size * size];
    for y in 0..size {
        for x in 0..size {
            types[y * size + x] = if y % 2 == 0 {
                if x % 2 == 0 {
                    draw(settings.water_rate, rng)
                } else {
                    types[y * size + x - 1]
                }
            } else {
                types[(y - 1) * size + x]
            };
        }
    }
    types
}

/// Preferred heading for the second cell of a double spread.
#[derive(Debug, Clone, Copy)]
enum Direction {
    North,
    South,
    East,
    West,
}

fn complex(settings: &GeneratorSettings, size: usize, rng: &mut GameRng) -> Vec<TileType> {
    let mut types = vec![TileType::Land; size * size];
    for j in (0..size).step_by(2) {
        for i in (0..size).step_by(2) {
            if rng.gen::<f64>() >= settings.water_rate {
                // Land block. Written explicitly rather than skipped: an
                // earlier water block may have spread into these cells, and
                // a land draw takes them back.
                for y in j..(j + 2).min(size) {
                    for x in i..(i + 2).min(size) {
                        types[y * size + x] = TileType::Land;
                    }
                }
                continue;
            }

            // 20% chance of spreading water over two extra cells, another
            // 20% of spreading over one.
            let spread_draw = rng.gen::<f64>();
            let mut spreading = if spread_draw < 0.2 {
                2
            } else if spread_draw < 0.4 {
                1
            } else {
                0
            };

            // Non-diagonal neighbor count of the 2x2 block: 4 in a corner,
            // 6 along one edge, 8 in the interior. Used as the fairness
            // denominator when picking which marginal cell gets the spread.
            let on_row_edge = j == 0 || j == size - 1;
            let on_col_edge = i == 0 || i == size - 1;
            let not_diagonal_neighbors: u32 = match (on_row_edge, on_col_edge) {
                (true, true) => 4,
                (true, false) | (false, true) => 6,
                (false, false) => 8,
            };
            let mut remaining_neighbors = not_diagonal_neighbors;

            // Scan the 4x4 neighborhood around the block. The inner 2x2 is
            // flooded unconditionally; the non-diagonal margin cells compete
            // for at most one spread event.
            for b in -1_i64..3 {
                let y = j as i64 + b;
                if y < 0 || y >= size as i64 {
                    continue;
                }
                for a in -1_i64..3 {
                    let x = i as i64 + a;
                    if x < 0 || x >= size as i64 {
                        continue;
                    }
                    let (x, y) = (x as usize, y as usize);
                    let inside_block = (a == 0 || a == 1) && (b == 0 || b == 1);
                    let diagonal_corner = (a == -1 || a == 2) && (b == -1 || b == 2);
                    if inside_block {
                        types[y * size + x] = TileType::Water;
                    } else if spreading != 0 && !diagonal_corner {
                        if remaining_neighbors == 1
                            || rng.gen_range(0..not_diagonal_neighbors) == 0
                        {
                            types[y * size + x] = TileType::Water;
                            if spreading == 2 {
                                let direction = if a == -1 {
                                    Direction::West
                                } else if a == 2 {
                                    Direction::East
                                } else if b == -1 {
                                    Direction::North
                                } else {
                                    Direction::South
                                };
                                spread_water(&mut types, size, x, y, direction);
                            }
                            spreading = 0;
                        } else {
                            remaining_neighbors -= 1;
                        }
                    }
                }
            }
        }
    }
    types
}

/// Waters one cell adjacent to (x, y), preferring `direction` and falling
/// back to a perpendicular neighbor (then the opposite perpendicular) when
/// the preferred heading runs off the board.
fn spread_water(types: &mut [TileType], size: usize, x: usize, y: usize, direction: Direction) {
    let (tx, ty) = match direction {
        Direction::West => {
            if x > 0 {
                (x - 1, y)
            } else if y > 0 {
                (x, y - 1)
            } else {
                (x, y + 1)
            }
        }
        Direction::East => {
            if x < size - 1 {
                (x + 1, y)
            } else if y > 0 {
                (x, y - 1)
            } else {
                (x, y + 1)
            }
        }
        Direction::North => {
            if y > 0 {
                (x, y - 1)
            } else if x > 0 {
                (x - 1, y)
            } else {
                (x + 1, y)
            }
        }
        Direction::South => {
            if y < size - 1 {
                (x, y + 1)
            } else if x > 0 {
                (x - 1, y)
            } else {
                (x + 1, y)
            }
        }
    };
    types[ty * size + tx] = TileType::Water;
}
