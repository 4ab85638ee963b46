//! Enemy spawn policy

use rand::Rng;

use crate::core::clock::TimeClock;
use crate::core::config::{EnemyConfig, SpawnConfig};
use crate::core::types::Vec2;
use crate::physics::body::PhysicsBody;
use crate::world::grid::{WorldGrid, TILE_SIZE};

/// Draws before a spawn is given up for this roll
const SPAWN_ATTEMPTS: usize = 8;

/// Random whole-pixel x across the world on the fixed near-surface row.
///
/// The body's hitbox must fit inside the world and clear of solid tiles;
/// `None` when no draw found such a spot.
pub fn spawn_point<R: Rng>(
    grid: &WorldGrid,
    rng: &mut R,
    config: &SpawnConfig,
    enemy: &EnemyConfig,
) -> Option<Vec2> {
    // Corners sample the right edge inclusively, so x + width stays below
    // the world's pixel width
    let width_px = grid.width() as f32 * TILE_SIZE;
    let span = (width_px - enemy.width).ceil();
    if span < 1.0 {
        return None;
    }

    let y = config.spawn_row as f32 * TILE_SIZE;
    let body = PhysicsBody::new(Vec2::ZERO, enemy.width, enemy.height, 0.0);
    (0..SPAWN_ATTEMPTS)
        .map(|_| Vec2::new(rng.gen_range(0..span as u32) as f32, y))
        .find(|position| !body.collides_at(grid, *position))
}

/// Per-tick night spawn roll. The random draw only happens while it is
/// night and below the cap.
pub fn should_spawn_at_night<R: Rng>(
    clock: &TimeClock,
    alive: usize,
    rng: &mut R,
    config: &SpawnConfig,
) -> bool {
    clock.is_night() && alive < config.night_cap && rng.gen_bool(config.night_chance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::world::tile::Tile;

    const DAY_MS: f64 = 120_000.0;

    fn certain() -> SpawnConfig {
        SpawnConfig { night_chance: 1.0, ..SpawnConfig::default() }
    }

    #[test]
    fn test_no_spawns_by_day() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let noon = TimeClock::at_phase(0.5, DAY_MS);
        assert!(!should_spawn_at_night(&noon, 0, &mut rng, &certain()));
    }

    #[test]
    fn test_night_spawns_stop_at_cap() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let midnight = TimeClock::at_phase(0.0, DAY_MS);
        assert!(should_spawn_at_night(&midnight, 7, &mut rng, &certain()));
        assert!(!should_spawn_at_night(&midnight, 8, &mut rng, &certain()));
    }

    #[test]
    fn test_spawn_point_inside_world() {
        let grid = WorldGrid::new(150, 80);
        let enemy = EnemyConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..200 {
            let p = spawn_point(&grid, &mut rng, &SpawnConfig::default(), &enemy).unwrap();
            assert!(p.x >= 0.0 && p.x + enemy.width < 150.0 * TILE_SIZE);
            assert_eq!(p.y, 15.0 * TILE_SIZE);
        }
    }

    #[test]
    fn test_spawn_point_keeps_body_off_right_edge() {
        // Two columns: only x in 0..16 leaves the right corners in the world
        let grid = WorldGrid::new(2, 40);
        let enemy = EnemyConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..500 {
            let p = spawn_point(&grid, &mut rng, &SpawnConfig::default(), &enemy).unwrap();
            assert!(p.x < TILE_SIZE);
            let body = PhysicsBody::new(p, enemy.width, enemy.height, 0.0);
            assert!(!body.collides(&grid));
        }
    }

    #[test]
    fn test_spawn_point_rejects_rock() {
        let grid = WorldGrid::filled(30, 40, Tile::Stone);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let p = spawn_point(&grid, &mut rng, &SpawnConfig::default(), &EnemyConfig::default());
        assert_eq!(p, None);
    }

    #[test]
    fn test_spawn_point_skips_blocked_columns() {
        // Rock over the left half of the spawn rows
        let mut grid = WorldGrid::new(20, 40);
        for x in 0..10 {
            for y in 14..18 {
                grid.set_tile(x, y, Tile::Stone);
            }
        }
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..100 {
            if let Some(p) =
                spawn_point(&grid, &mut rng, &SpawnConfig::default(), &EnemyConfig::default())
            {
                assert!(p.x >= 10.0 * TILE_SIZE);
            }
        }
    }

    #[test]
    fn test_spawn_point_in_world_narrower_than_body() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let config = SpawnConfig::default();
        let enemy = EnemyConfig::default();
        assert_eq!(spawn_point(&WorldGrid::new(0, 0), &mut rng, &config, &enemy), None);
        assert_eq!(spawn_point(&WorldGrid::new(1, 40), &mut rng, &config, &enemy), None);
    }
}
