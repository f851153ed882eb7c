pub mod classifier;
pub mod config;
pub mod engine;
pub mod error;
pub mod generator;
pub mod grid;
pub mod rng;
pub mod tile;
pub mod web;

pub use config::{GameConfig, GameSize};
pub use engine::{Engine, EngineSettings};
pub use error::FloodError;
pub use generator::GeneratorKind;
pub use tile::TileType;
