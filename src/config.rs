//! Game configuration, loadable from YAML.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::engine::EngineSettings;
use crate::generator::GeneratorKind;

/// Named board presets: tiles per row and the pixel side the front end
/// draws each tile with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameSize {
    Small,
    Medium,
    Big,
    Huge,
    Overkill,
}

impl GameSize {
    pub fn tiles_per_row(self) -> usize {
        match self {
            GameSize::Small => 10,
            GameSize::Medium => 20,
            GameSize::Big => 30,
            GameSize::Huge => 50,
            GameSize::Overkill => 100,
        }
    }

    pub fn tile_side(self) -> u32 {
        match self {
            GameSize::Small => 40,
            GameSize::Medium => 35,
            GameSize::Big => 30,
            GameSize::Huge => 18,
            GameSize::Overkill => 9,
        }
    }

    pub const ALL: [GameSize; 5] = [
        GameSize::Small,
        GameSize::Medium,
        GameSize::Big,
        GameSize::Huge,
        GameSize::Overkill,
    ];
}

impl fmt::Display for GameSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameSize::Small => "small",
            GameSize::Medium => "medium",
            GameSize::Big => "big",
            GameSize::Huge => "huge",
            GameSize::Overkill => "overkill",
        };
        f.write_str(name)
    }
}

impl FromStr for GameSize {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "small" => Ok(GameSize::Small),
            "medium" => Ok(GameSize::Medium),
            "big" => Ok(GameSize::Big),
            "huge" => Ok(GameSize::Huge),
            "overkill" => Ok(GameSize::Overkill),
            other => Err(format!(
                "unknown size '{other}' (expected small, medium, big, huge or overkill)"
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub compat: CompatConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default = "default_size")]
    pub size: GameSize,
    #[serde(default = "default_generator")]
    pub generator: GeneratorKind,
    #[serde(default = "default_water_rate")]
    pub water_rate: f64,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_size() -> GameSize {
    GameSize::Medium
}

fn default_generator() -> GeneratorKind {
    GeneratorKind::Complex
}

fn default_water_rate() -> f64 {
    0.2
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            generator: default_generator(),
            water_rate: default_water_rate(),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8788
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompatConfig {
    /// Early releases of the Simple generator filled every cell with water
    /// no matter what the draw said; flip this on to get that behavior back.
    #[serde(default)]
    pub simple_always_water: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
            server: ServerConfig::default(),
            compat: CompatConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: GameConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(config)
    }

    pub fn to_yaml<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            size: self.board.size.tiles_per_row(),
            generator: self.board.generator,
            water_rate: self.board.water_rate,
            simple_always_water: self.compat.simple_always_water,
            seed: self.board.seed,
        }
    }
}
