//! Integration tests for world generation
//!
//! These tests check generated worlds through the public API:
//! - Determinism per seed
//! - Sky, surface and rock layering
//! - Depth bands for ores and lava
//! - Generation settings loaded from TOML

use delve::core::config::SimulationConfig;
use delve::world::{generate_world, TerrainGenerator, Tile, WorldGrid};

// ============================================================================
// Layout
// ============================================================================

/// Seed 42 at 150x80: the top row is open sky and rock reaches the floor
#[test]
fn test_seed_42_sky_and_floor() {
    let grid = generate_world(42, 150, 80);
    assert_eq!(grid.width(), 150);
    assert_eq!(grid.height(), 80);

    for x in 0..150 {
        assert_eq!(grid.get_tile(x, 0), Tile::Air, "column {} row 0 should be sky", x);
    }
    assert!((0..150).any(|x| grid.get_tile(x, 79) == Tile::Stone));
}

#[test]
fn test_generation_repeats_exactly() {
    for seed in [0, 1, 42, u64::MAX] {
        assert_eq!(generate_world(seed, 120, 70), generate_world(seed, 120, 70));
    }
}

/// Every column has a grass or sand cap with open air above it
#[test]
fn test_every_column_has_a_surface() {
    let grid = generate_world(99, 150, 80);
    for x in 0..150 {
        let top = grid.surface_row(x).expect("column has ground");
        assert!((20..=35).contains(&top), "surface row {} at column {}", top, x);
        assert!(matches!(grid.get_tile(x, top), Tile::Grass | Tile::Sand));
        assert!((0..top).all(|y| grid.get_tile(x, y) == Tile::Air));
    }
}

/// Desert sand only appears on the outer 30% of the map
#[test]
fn test_sand_only_on_desert_edges() {
    let grid = generate_world(5, 200, 80);
    for x in 0..200 {
        let top = grid.surface_row(x).unwrap_or(0);
        if grid.get_tile(x, top) == Tile::Sand {
            assert!(x < 60 || x > 140, "sand at column {}", x);
        }
    }
}

/// Ores, lava and torches never appear above their bands, across seeds
#[test]
fn test_depth_bands_hold_across_seeds() {
    for seed in 0..10 {
        let grid = generate_world(seed, 150, 80);
        for x in 0..150 {
            let surface = grid.surface_row(x).unwrap_or(80);
            for y in 0..80 {
                match grid.get_tile(x, y) {
                    Tile::GoldOre => assert!(y > 55),
                    Tile::IronOre => assert!(y > 40),
                    Tile::CoalOre => assert!(y > 30),
                    Tile::Lava => assert!(y >= 70 && y > surface),
                    Tile::Torch => assert!(y >= 25 && y < 70 && y > surface),
                    _ => {}
                }
            }
        }
    }
}

#[test]
fn test_boundary_reads_as_stone() {
    let grid: WorldGrid = generate_world(3, 50, 40);
    for (x, y) in [(-1, 0), (50, 10), (10, -5), (10, 40), (-100, -100)] {
        assert_eq!(grid.get_tile(x, y), Tile::Stone);
        assert!(grid.is_solid(x, y));
    }
}

// ============================================================================
// Configured generation
// ============================================================================

/// A TOML override flows through to the generator
#[test]
fn test_generation_from_toml_config() {
    let config = SimulationConfig::from_toml_str(
        r#"
        [generation]
        surface_base = 10
        surface_range = 0
        place_torches = false
        lava_chance = 0.0
        "#,
    )
    .unwrap();

    let grid = TerrainGenerator::new(config.generation).generate(8, 60, 50);
    for x in 0..60 {
        assert_eq!(grid.surface_row(x), Some(10));
    }
    assert_eq!(grid.count(Tile::Torch), 0);
    assert_eq!(grid.count(Tile::Lava), 0);
}
