//! Per-tick light computation
//!
//! Order of operations:
//! 1. Clear
//! 2. Sunlight falls down each column from the sky, dimming by one per
//!    cell and stopping dead at the first solid tile (hard shadows, no
//!    scattering under overhangs)
//! 3. Emissive tiles raise their own cell to their emission
//! 4. A fixed number of neighbour passes spread light into open air
//!
//! The spread radius is bounded by the pass count, not by emitter strength.

use rayon::prelude::*;

use crate::core::config::LightingConfig;
use crate::lighting::light_grid::{LightGrid, LightLevel};
use crate::world::grid::WorldGrid;

#[derive(Debug, Clone, Default)]
pub struct LightingEngine {
    config: LightingConfig,
}

impl LightingEngine {
    pub fn new(config: LightingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LightingConfig {
        &self.config
    }

    /// Compute a fresh light grid for `grid` under `ambient_light` (0..=1)
    pub fn compute(&self, grid: &WorldGrid, ambient_light: f32) -> LightGrid {
        let mut light = LightGrid::new(grid.width(), grid.height());
        self.compute_into(grid, ambient_light, &mut light);
        light
    }

    /// Same as `compute`, reusing an existing buffer
    pub fn compute_into(&self, grid: &WorldGrid, ambient_light: f32, light: &mut LightGrid) {
        light.reset(grid.width(), grid.height());

        if ambient_light > self.config.sunlight_threshold {
            add_sunlight(grid, LightLevel::from_fraction(ambient_light), light);
        }
        add_block_light(grid, light);
        self.propagate(grid, light);
    }

    fn propagate(&self, grid: &WorldGrid, light: &mut LightGrid) {
        let width = grid.width() as usize;
        let height = grid.height() as usize;
        if width == 0 || height == 0 || self.config.propagation_passes == 0 {
            return;
        }

        let open: Vec<bool> = grid.tiles().iter().map(|t| t.is_air()).collect();
        let mut previous = light.levels().to_vec();
        let parallel = open.len() >= self.config.parallel_threshold;

        for _ in 0..self.config.propagation_passes {
            // Every pass reads only the previous pass's levels
            let spread = |(y, row): (usize, &mut [LightLevel])| {
                spread_row(y, row, &previous, &open, width, height)
            };
            if parallel {
                light.levels_mut().par_chunks_mut(width).enumerate().for_each(spread);
            } else {
                light.levels_mut().chunks_mut(width).enumerate().for_each(spread);
            }
            previous.copy_from_slice(light.levels());
        }
    }
}

fn add_sunlight(grid: &WorldGrid, sun: LightLevel, light: &mut LightGrid) {
    for x in 0..grid.width() as i32 {
        let mut level = sun;
        for y in 0..grid.height() as i32 {
            if grid.is_solid(x, y) {
                break;
            }
            light.raise(x, y, level);
            level = level.dimmed();
        }
    }
}

fn add_block_light(grid: &WorldGrid, light: &mut LightGrid) {
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            let emission = grid.get_tile(x, y).light_emission();
            if emission > 0 {
                light.raise(x, y, LightLevel::new(emission));
            }
        }
    }
}

fn spread_row(
    y: usize,
    row: &mut [LightLevel],
    previous: &[LightLevel],
    open: &[bool],
    width: usize,
    height: usize,
) {
    for x in 0..width {
        let index = y * width + x;
        if !open[index] {
            continue;
        }

        let mut best = previous[index];
        for ny in y.saturating_sub(1)..=(y + 1).min(height - 1) {
            for nx in x.saturating_sub(1)..=(x + 1).min(width - 1) {
                if nx == x && ny == y {
                    continue;
                }
                best = best.max(previous[ny * width + nx].dimmed());
            }
        }
        row[x] = best;
    }
}
