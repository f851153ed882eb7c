use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use floodgame::{
    config::GameConfig, engine::Engine, generator::GeneratorKind, tile::TileType, web,
    GameSize,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Flood! grid puzzle")]
struct Cli {
    /// Path to a YAML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board size preset (small, medium, big, huge, overkill)
    #[arg(long)]
    size: Option<GameSize>,

    /// Terrain generator (simple, squares, complex)
    #[arg(long)]
    generator: Option<GeneratorKind>,

    /// Water probability in [0, 1]
    #[arg(long)]
    water_rate: Option<f64>,

    /// Fixed seed for a reproducible board
    #[arg(long)]
    seed: Option<u64>,

    /// Play a headless game in the terminal instead of serving the UI
    #[arg(long)]
    demo: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => GameConfig::from_yaml(path)?,
        None => GameConfig::default(),
    };
    if let Some(size) = cli.size {
        config.board.size = size;
    }
    if let Some(generator) = cli.generator {
        config.board.generator = generator;
    }
    if let Some(water_rate) = cli.water_rate {
        config.board.water_rate = water_rate;
    }
    if let Some(seed) = cli.seed {
        config.board.seed = Some(seed);
    }

    if cli.demo {
        run_demo(&config)
    } else {
        web::run(config).await
    }
}

/// Generates a board and floods the first shore tile found until the round
/// completes, printing the board after every move.
fn run_demo(config: &GameConfig) -> Result<()> {
    let mut engine = Engine::new(config.engine_settings())?;
    print_board(&engine);
    while !engine.is_complete() {
        let Some((x, y)) = first_shore(&engine) else {
            break;
        };
        engine.start_flood(x, y)?;
        print_board(&engine);
    }
    println!(
        "Everything was flooded after {} moves ({} tiles).",
        engine.floods(),
        engine.total_tiles()
    );
    Ok(())
}

fn first_shore(engine: &Engine) -> Option<(usize, usize)> {
    for y in 0..engine.size() {
        for x in 0..engine.size() {
            if engine.tile_type(x, y).ok()?.is_shore() {
                return Some((x, y));
            }
        }
    }
    None
}

fn print_board(engine: &Engine) {
    let mut out = String::new();
    for y in 0..engine.size() {
        for x in 0..engine.size() {
            let glyph = match engine.tile_type(x, y).unwrap_or(TileType::Land) {
                TileType::Water => '~',
                TileType::Shore => '*',
                TileType::Land => '^',
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    println!("{out}");
}
