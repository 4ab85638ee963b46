//! Property tests for the world invariants
//!
//! Generated worlds are kept small so each case stays cheap.

use proptest::prelude::*;

use delve::core::config::{LightingConfig, PlayerConfig, SimulationConfig};
use delve::entity::{DamageOutcome, Player};
use delve::lighting::{LightLevel, LightingEngine};
use delve::simulation::{Intent, Simulation};
use delve::world::{generate_world, Tile, WorldGrid};

/// Tiles the starter kit can place
fn placeable() -> impl Strategy<Value = Tile> {
    prop_oneof![Just(Tile::Dirt), Just(Tile::Stone), Just(Tile::Torch), Just(Tile::Lamp)]
}

/// Movement mixed with digging and building in a 100x45 world
fn player_input() -> impl Strategy<Value = Vec<Intent>> {
    prop::collection::vec(
        prop_oneof![
            3 => Just(Intent::MoveLeft),
            3 => Just(Intent::MoveRight),
            2 => Just(Intent::Jump),
            1 => (0i32..100, 0i32..45).prop_map(|(x, y)| Intent::Break { x, y }),
            2 => (0i32..100, 0i32..45, placeable())
                .prop_map(|(x, y, tile)| Intent::Place { x, y, tile }),
            // Around the player's spawn tile at (75, 10)
            2 => (72i32..79, 8i32..13, placeable())
                .prop_map(|(x, y, tile)| Intent::Place { x, y, tile }),
        ],
        0..3,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Same seed and size, same world
    #[test]
    fn prop_generation_deterministic(seed in any::<u64>(), width in 1u32..80, height in 1u32..60) {
        prop_assert_eq!(generate_world(seed, width, height), generate_world(seed, width, height));
    }

    /// Everything outside the grid reads as solid Stone
    #[test]
    fn prop_outside_is_stone(
        seed in any::<u64>(),
        x in -200i32..200,
        y in -200i32..200,
    ) {
        let grid = generate_world(seed, 40, 40);
        prop_assume!(!grid.in_bounds(x, y));
        prop_assert_eq!(grid.get_tile(x, y), Tile::Stone);
        prop_assert!(grid.is_solid(x, y));
    }

    /// Light stays within 0..=15 for any world and ambient level
    #[test]
    fn prop_light_bounded(seed in any::<u64>(), ambient in -1.0f32..2.0, passes in 0u32..=15) {
        let grid = generate_world(seed, 60, 50);
        let engine = LightingEngine::new(LightingConfig {
            propagation_passes: passes,
            ..LightingConfig::default()
        });
        let light = engine.compute(&grid, ambient);
        prop_assert_eq!(light.levels().len(), 60 * 50);
        prop_assert!(light.levels().iter().all(|l| *l <= LightLevel::MAX));
    }

    /// Light on a random hand-placed grid stays bounded too
    #[test]
    fn prop_light_bounded_random_tiles(tiles in prop::collection::vec(0usize..11, 100)) {
        let mut grid = WorldGrid::new(10, 10);
        for (i, t) in tiles.iter().enumerate() {
            grid.set_tile((i % 10) as i32, (i / 10) as i32, Tile::ALL[*t]);
        }
        let light = LightingEngine::default().compute(&grid, 1.0);
        prop_assert!(light.levels().iter().all(|l| l.value() <= 15));
    }

    /// No body ever finishes a tick inside solid tiles
    #[test]
    fn prop_bodies_never_end_in_walls(
        seed in 0u64..1_000,
        script in prop::collection::vec(player_input(), 1..120),
    ) {
        let mut sim = Simulation::new(seed, 100, 45, SimulationConfig::default()).unwrap();
        for intents in &script {
            sim.tick(16, intents);
            prop_assert!(!sim.player().body.collides(sim.grid()));
            for enemy in sim.enemies() {
                prop_assert!(!enemy.body.collides(sim.grid()));
            }
        }
    }

    /// A second hit inside the cooldown window never lands
    #[test]
    fn prop_invulnerability_window(
        first in 1u32..99,
        second in 1u32..200,
        at in 0u64..100_000,
        gap in 0u64..=1_000,
    ) {
        let grid = WorldGrid::new(100, 40);
        let mut player = Player::new(PlayerConfig::default(), &grid);

        prop_assert_eq!(player.take_damage(first, at), DamageOutcome::Damaged);
        let health = player.health();
        prop_assert_eq!(player.take_damage(second, at + gap), DamageOutcome::Ignored);
        prop_assert_eq!(player.health(), health);
    }
}
