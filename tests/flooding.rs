//! Gameplay invariants: floods, previews, population, and completion.

use floodgame::{Engine, EngineSettings, FloodError, GeneratorKind, TileType};

fn engine(size: usize, generator: GeneratorKind, water_rate: f64, seed: u64) -> Engine {
    Engine::new(EngineSettings {
        size,
        generator,
        water_rate,
        simple_always_water: false,
        seed: Some(seed),
    })
    .unwrap()
}

fn find(game: &Engine, wanted: TileType) -> Option<(usize, usize)> {
    for y in 0..game.size() {
        for x in 0..game.size() {
            if game.tile_type(x, y).unwrap() == wanted {
                return Some((x, y));
            }
        }
    }
    None
}

fn snapshot(game: &Engine) -> Vec<TileType> {
    let size = game.size();
    (0..size * size)
        .map(|i| game.tile_type(i % size, i / size).unwrap())
        .collect()
}

#[test]
fn selection_is_pure() {
    let game = engine(20, GeneratorKind::Complex, 0.25, 31);
    let before = snapshot(&game);
    let water = game.water_count();
    let population = game.total_population();
    for y in 0..20 {
        for x in 0..20 {
            game.selection(x, y).unwrap();
            game.selection(x, y).unwrap();
        }
    }
    assert_eq!(snapshot(&game), before);
    assert_eq!(game.water_count(), water);
    assert_eq!(game.total_population(), population);
}

#[test]
fn selection_of_water_or_land_is_empty() {
    let game = engine(20, GeneratorKind::Complex, 0.25, 31);
    if let Some((x, y)) = find(&game, TileType::Water) {
        assert!(game.selection(x, y).unwrap().is_empty());
    }
    if let Some((x, y)) = find(&game, TileType::Land) {
        assert!(game.selection(x, y).unwrap().is_empty());
    }
}

#[test]
fn flood_converts_exactly_the_previewed_region() {
    let mut game = engine(20, GeneratorKind::Squares, 0.3, 17);
    let (x, y) = find(&game, TileType::Shore).expect("fresh board has a shore");
    let preview = game.selection(x, y).unwrap();
    let water_before = game.water_count();
    let region = game.start_flood(x, y).unwrap();

    let mut preview_sorted: Vec<_> = preview.iter().map(|p| (p.x, p.y)).collect();
    let mut region_sorted: Vec<_> = region.iter().map(|p| (p.x, p.y)).collect();
    preview_sorted.sort_unstable();
    region_sorted.sort_unstable();
    assert_eq!(preview_sorted, region_sorted);

    assert_eq!(game.water_count(), water_before + region.len());
    for (px, py) in region_sorted {
        assert!(game.tile_type(px, py).unwrap().is_water());
    }
}

#[test]
fn flooded_regions_are_4_connected() {
    let mut game = engine(20, GeneratorKind::Complex, 0.25, 23);
    let (x, y) = find(&game, TileType::Shore).expect("fresh board has a shore");
    let region = game.start_flood(x, y).unwrap();
    if region.len() < 2 {
        return;
    }
    // Every region member other than the start must touch another member.
    for pos in &region {
        let connected = region.iter().any(|other| {
            pos.x.abs_diff(other.x) + pos.y.abs_diff(other.y) == 1
        });
        assert!(connected, "({}, {}) is isolated in its region", pos.x, pos.y);
    }
}

#[test]
fn flooding_water_changes_nothing() {
    let mut game = engine(15, GeneratorKind::Simple, 0.3, 11);
    let (x, y) = find(&game, TileType::Water).expect("board has water");
    let before = snapshot(&game);
    let water = game.water_count();
    let region = game.start_flood(x, y).unwrap();
    assert!(region.is_empty());
    assert_eq!(snapshot(&game), before);
    assert_eq!(game.water_count(), water);
}

#[test]
fn out_of_range_coordinates_are_rejected() {
    let mut game = engine(10, GeneratorKind::Simple, 0.3, 1);
    for (x, y) in [(10, 0), (0, 10), (100, 100)] {
        assert!(matches!(
            game.start_flood(x, y),
            Err(FloodError::OutOfRange { .. })
        ));
        assert!(matches!(
            game.selection(x, y),
            Err(FloodError::OutOfRange { .. })
        ));
        assert!(matches!(
            game.tile_type(x, y),
            Err(FloodError::OutOfRange { .. })
        ));
    }
}

#[test]
fn games_always_finish_and_population_drains_to_zero() {
    for generator in [
        GeneratorKind::Simple,
        GeneratorKind::Squares,
        GeneratorKind::Complex,
    ] {
        let mut game = engine(12, generator, 0.2, 3);
        let mut population = game.total_population();
        let mut moves = 0;
        while !game.is_complete() {
            let (x, y) = find(&game, TileType::Shore).expect("incomplete board has a shore");
            game.start_flood(x, y).unwrap();
            let now = game.total_population();
            assert!(now <= population, "population grew during a flood");
            population = now;
            moves += 1;
            assert!(moves <= 144, "game failed to terminate");
        }
        assert_eq!(game.water_count(), game.total_tiles());
        assert_eq!(game.total_population(), 0);
        assert_eq!(game.floods(), moves);
    }
}

#[test]
fn center_lake_floods_ring_in_one_move() {
    // A rate-zero 3x3 board gets exactly one forced water tile at a seeded
    // random position; scan seeds until that tile lands in the center.
    let mut found = None;
    for seed in 0..500 {
        let game = engine(3, GeneratorKind::Simple, 0.0, seed);
        if game.tile_type(1, 1).unwrap().is_water() {
            found = Some(game);
            break;
        }
    }
    let mut game = found.expect("some seed forces the center tile");
    // All eight ring tiles touch the center water, so they are all shores
    // and form one 4-connected region around the board edge.
    for (x, y) in [(0, 0), (1, 0), (2, 0), (0, 1), (2, 1), (0, 2), (1, 2), (2, 2)] {
        assert!(game.tile_type(x, y).unwrap().is_shore());
    }
    let region = game.start_flood(0, 1).unwrap();
    assert_eq!(region.len(), 8);
    assert!(game.is_complete());
    assert_eq!(game.water_count(), 9);
}
