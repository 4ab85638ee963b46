//! Procedural terrain generation
//!
//! Generation runs as ordered passes over one grid; each pass reads what
//! the previous ones wrote:
//! 1. Height: surface line, soil and rock layers, desert edges
//! 2. Caves: noise carves open pockets in the rock
//! 3. Ores: per-cell rolls turn rock into coal/iron/gold by depth
//! 4. Hazards: open cells near the floor may fill with lava
//! 5. Light sources: sparse torches on cave walls and floors
//!
//! Every per-cell random decision comes from `hash_unit(seed, x, y, salt)`,
//! so the result depends only on the seed and dimensions, never on the
//! order cells are visited in.

use tracing::info;

use crate::core::config::GenerationConfig;
use crate::world::grid::WorldGrid;
use crate::world::noise::{hash_unit, NoiseField};
use crate::world::tile::Tile;

const ORE_SALT: u64 = 0x4f52_45;
const LAVA_SALT: u64 = 0x4c41_5641;
const TORCH_SALT: u64 = 0x544f_5243;

/// Deterministic `seed -> WorldGrid` generator
#[derive(Debug, Clone, Default)]
pub struct TerrainGenerator {
    config: GenerationConfig,
}

impl TerrainGenerator {
    pub fn new(config: GenerationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Build a fully populated world. Total: any dimensions produce a grid.
    pub fn generate(&self, seed: u64, width: u32, height: u32) -> WorldGrid {
        let mut grid = WorldGrid::new(width, height);

        let surface = self.height_pass(&mut grid, seed);
        self.cave_pass(&mut grid, seed);
        self.ore_pass(&mut grid, seed);
        self.hazard_pass(&mut grid, seed, &surface);
        if self.config.place_torches {
            self.light_source_pass(&mut grid, seed, &surface);
        }

        info!(
            seed,
            width,
            height,
            lava = grid.count(Tile::Lava),
            torches = grid.count(Tile::Torch),
            ores = grid.count(Tile::CoalOre) + grid.count(Tile::IronOre) + grid.count(Tile::GoldOre),
            "Generated world"
        );

        grid
    }

    /// Surface row for a column, in `[surface_base, surface_base + surface_range]`
    pub fn surface_height(&self, noise: &NoiseField, x: i32) -> i32 {
        let cfg = &self.config;
        let value = (noise.sample(x as f64 * cfg.horizontal_scale, 0.0) * 0.5 + 0.5).clamp(0.0, 1.0);
        cfg.surface_base as i32 + (value * cfg.surface_range as f64) as i32
    }

    fn is_desert(&self, x: i32, width: u32) -> bool {
        let x = x as f64;
        let width = width as f64;
        x < width * self.config.desert_left || x > width * self.config.desert_right
    }

    fn height_pass(&self, grid: &mut WorldGrid, seed: u64) -> Vec<i32> {
        let noise = NoiseField::new(seed);
        let dirt_depth = self.config.dirt_depth as i32;
        let (width, height) = (grid.width() as i32, grid.height() as i32);

        let mut surface = Vec::with_capacity(width as usize);
        for x in 0..width {
            let h = self.surface_height(&noise, x);
            let top = if self.is_desert(x, grid.width()) { Tile::Sand } else { Tile::Grass };

            for y in h.max(0)..height {
                let tile = if y == h {
                    top
                } else if y <= h + dirt_depth {
                    Tile::Dirt
                } else {
                    Tile::Stone
                };
                grid.set_tile(x, y, tile);
            }
            surface.push(h);
        }
        surface
    }

    fn cave_pass(&self, grid: &mut WorldGrid, seed: u64) {
        let cfg = &self.config;
        let noise = NoiseField::new(seed.wrapping_add(cfg.cave_seed_offset));
        let bottom = grid.height() as i32 - cfg.cave_bottom_margin as i32;

        for x in 0..grid.width() as i32 {
            for y in cfg.cave_top_row as i32..bottom {
                // Only rock is carved, so soil and surface stay intact
                if grid.get_tile(x, y) != Tile::Stone {
                    continue;
                }
                let value = noise.sample(x as f64 * cfg.cave_scale, y as f64 * cfg.cave_scale);
                if value > cfg.cave_threshold {
                    grid.set_tile(x, y, Tile::Air);
                }
            }
        }
    }

    /// Ore for a rock cell at row `y`, given its roll
    fn ore_for_roll(&self, roll: f64, y: u32) -> Option<Tile> {
        let cfg = &self.config;
        if roll < cfg.gold.chance && y > cfg.gold.min_row {
            Some(Tile::GoldOre)
        } else if roll < cfg.iron.chance && y > cfg.iron.min_row {
            Some(Tile::IronOre)
        } else if roll < cfg.coal.chance && y > cfg.coal.min_row {
            Some(Tile::CoalOre)
        } else {
            None
        }
    }

    fn ore_pass(&self, grid: &mut WorldGrid, seed: u64) {
        for x in 0..grid.width() as i32 {
            for y in self.config.ore_top_row as i32..grid.height() as i32 {
                if grid.get_tile(x, y) != Tile::Stone {
                    continue;
                }
                let roll = hash_unit(seed, x as i64, y as i64, ORE_SALT);
                if let Some(ore) = self.ore_for_roll(roll, y as u32) {
                    grid.set_tile(x, y, ore);
                }
            }
        }
    }

    fn hazard_pass(&self, grid: &mut WorldGrid, seed: u64, surface: &[i32]) {
        let height = grid.height() as i32;
        let top = (height - self.config.lava_depth as i32).max(0);

        for x in 0..grid.width() as i32 {
            // Open sky never fills with lava, even in very shallow worlds
            for y in top.max(surface[x as usize] + 1)..height {
                if grid.get_tile(x, y) == Tile::Air
                    && hash_unit(seed, x as i64, y as i64, LAVA_SALT) < self.config.lava_chance
                {
                    grid.set_tile(x, y, Tile::Lava);
                }
            }
        }
    }

    fn light_source_pass(&self, grid: &mut WorldGrid, seed: u64, surface: &[i32]) {
        let cfg = &self.config;
        let bottom = grid.height() as i32 - cfg.torch_bottom_margin as i32;
        let last_column = grid.width() as i32 - 1;

        for x in (1..last_column).step_by(cfg.torch_column_step.max(1) as usize) {
            for y in (cfg.torch_top_row as i32..bottom).step_by(cfg.torch_row_step.max(1) as usize) {
                // Underground only
                if y <= surface[x as usize] || grid.get_tile(x, y) != Tile::Air {
                    continue;
                }
                let against_wall =
                    grid.is_solid(x, y + 1) || grid.is_solid(x - 1, y) || grid.is_solid(x + 1, y);
                if against_wall && hash_unit(seed, x as i64, y as i64, TORCH_SALT) < cfg.torch_chance {
                    grid.set_tile(x, y, Tile::Torch);
                }
            }
        }
    }
}

/// Generate a world with the default generation settings
pub fn generate_world(seed: u64, width: u32, height: u32) -> WorldGrid {
    TerrainGenerator::default().generate(seed, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_is_deterministic() {
        let a = generate_world(42, 150, 80);
        let b = generate_world(42, 150, 80);
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_differ() {
        assert_ne!(generate_world(1, 150, 80), generate_world(2, 150, 80));
    }

    #[test]
    fn test_sky_row_is_air_and_floor_has_stone() {
        let grid = generate_world(42, 150, 80);
        for x in 0..150 {
            assert_eq!(grid.get_tile(x, 0), Tile::Air);
        }
        assert!((0..150).any(|x| grid.get_tile(x, 79) == Tile::Stone));
    }

    #[test]
    fn test_surface_height_in_band() {
        let gen = TerrainGenerator::default();
        let noise = NoiseField::new(1234);
        for x in 0..500 {
            let h = gen.surface_height(&noise, x);
            assert!((20..=35).contains(&h), "surface {} out of band", h);
        }
    }

    #[test]
    fn test_surface_layers() {
        let gen = TerrainGenerator::default();
        let noise = NoiseField::new(42);
        let grid = gen.generate(42, 150, 80);

        // Middle column is grass, edges are desert sand
        let mid = 75;
        let h = gen.surface_height(&noise, mid);
        assert_eq!(grid.get_tile(mid, h), Tile::Grass);
        assert_eq!(grid.get_tile(mid, h - 1), Tile::Air);
        for y in h + 1..=h + 3 {
            assert_eq!(grid.get_tile(mid, y), Tile::Dirt);
        }

        let edge_h = gen.surface_height(&noise, 5);
        assert_eq!(grid.get_tile(5, edge_h), Tile::Sand);
    }

    #[test]
    fn test_ore_bands_respect_depth() {
        let gen = TerrainGenerator::default();
        assert_eq!(gen.ore_for_roll(0.001, 60), Some(Tile::GoldOre));
        // Too shallow for gold falls through to iron
        assert_eq!(gen.ore_for_roll(0.001, 50), Some(Tile::IronOre));
        assert_eq!(gen.ore_for_roll(0.001, 35), Some(Tile::CoalOre));
        assert_eq!(gen.ore_for_roll(0.05, 70), Some(Tile::CoalOre));
        assert_eq!(gen.ore_for_roll(0.5, 70), None);
    }

    #[test]
    fn test_ores_and_lava_only_deep() {
        let grid = generate_world(7, 150, 80);
        for x in 0..150 {
            for y in 0..80 {
                match grid.get_tile(x, y) {
                    Tile::GoldOre => assert!(y > 55),
                    Tile::IronOre => assert!(y > 40),
                    Tile::CoalOre => assert!(y > 30),
                    Tile::Lava => assert!(y >= 70),
                    _ => {}
                }
            }
        }
    }

    #[test]
    fn test_torches_sit_against_solid_tiles() {
        for seed in 0..20 {
            let grid = generate_world(seed, 150, 80);
            for x in 0..150 {
                for y in 0..80 {
                    if grid.get_tile(x, y) == Tile::Torch {
                        assert!(
                            grid.is_solid(x, y + 1) || grid.is_solid(x - 1, y) || grid.is_solid(x + 1, y)
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_degenerate_sizes_are_total() {
        let empty = generate_world(5, 0, 0);
        assert_eq!(empty.tiles().len(), 0);

        let shallow = generate_world(5, 10, 4);
        // Shallower than the surface band: all sky
        assert!(shallow.tiles().iter().all(|t| *t == Tile::Air));
    }

    #[test]
    fn test_torches_can_be_disabled() {
        let config = GenerationConfig { place_torches: false, ..GenerationConfig::default() };
        for seed in 0..5 {
            let grid = TerrainGenerator::new(config.clone()).generate(seed, 150, 80);
            assert_eq!(grid.count(Tile::Torch), 0);
        }
    }
}
