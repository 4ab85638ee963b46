//! Simulation configuration with documented constants
//!
//! All tunable numbers live here. The defaults give the intended game
//! feel; a TOML file may override any subset of them.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{DelveError, Result};

/// Root configuration for a simulation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub generation: GenerationConfig,
    pub lighting: LightingConfig,
    pub physics: PhysicsConfig,
    pub clock: ClockConfig,
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub spawn: SpawnConfig,
    pub combat: CombatConfig,
}

// === TERRAIN GENERATION ===

/// Ore placement band: a roll below `chance` on a Stone cell deeper than
/// `min_row` becomes the ore
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OreBand {
    pub chance: f64,
    pub min_row: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Shallowest surface row
    pub surface_base: u32,

    /// Surface rows span `surface_base..surface_base + surface_range`
    pub surface_range: u32,

    /// Dirt rows beneath the surface tile
    pub dirt_depth: u32,

    /// Horizontal sampling scale for the height noise
    ///
    /// Small values give long rolling hills. At 0.01 a 150 column world
    /// covers 1.5 noise cells, so the surface rarely has more than two bumps.
    pub horizontal_scale: f64,

    /// Columns left of `desert_left * width` or right of
    /// `desert_right * width` get Sand instead of Grass on the surface
    pub desert_left: f64,
    pub desert_right: f64,

    /// Seed offset for the cave noise field (keeps it uncorrelated with height)
    pub cave_seed_offset: u64,
    pub cave_scale: f64,

    /// Cave noise above this value carves Stone to Air
    pub cave_threshold: f64,

    /// First row caves may open in
    pub cave_top_row: u32,

    /// Rows at the bottom of the world that caves never reach
    pub cave_bottom_margin: u32,

    /// Ores are only rolled on rows at or below this one
    pub ore_top_row: u32,
    pub gold: OreBand,
    pub iron: OreBand,
    pub coal: OreBand,

    /// Rows above the floor where open Air may become Lava
    pub lava_depth: u32,
    pub lava_chance: f64,

    pub place_torches: bool,
    pub torch_column_step: u32,
    pub torch_row_step: u32,
    pub torch_top_row: u32,

    /// Torches stop this many rows above the floor
    pub torch_bottom_margin: u32,
    pub torch_chance: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            surface_base: 20,
            surface_range: 15,
            dirt_depth: 3,
            horizontal_scale: 0.01,
            desert_left: 0.3,
            desert_right: 0.7,

            cave_seed_offset: 1000,
            cave_scale: 0.05,
            cave_threshold: 0.2,
            cave_top_row: 25,
            cave_bottom_margin: 5,

            // Nested bands: gold is rarest and deepest
            ore_top_row: 30,
            gold: OreBand { chance: 0.008, min_row: 55 },
            iron: OreBand { chance: 0.025, min_row: 40 },
            coal: OreBand { chance: 0.06, min_row: 30 },

            lava_depth: 10,
            lava_chance: 0.3,

            place_torches: true,
            torch_column_step: 20,
            torch_row_step: 15,
            torch_top_row: 25,
            torch_bottom_margin: 10,
            torch_chance: 0.3,
        }
    }
}

// === LIGHTING ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Sunlight is only injected when ambient light exceeds this
    pub sunlight_threshold: f32,

    /// Number of neighbour propagation passes
    ///
    /// This bounds how far light spreads from an emitter, independent of
    /// the emitter's strength. Three passes means a torch lights at most a
    /// 7x7 patch of open air around it.
    pub propagation_passes: u32,

    /// Minimum cell count before propagation passes run on rayon
    pub parallel_threshold: usize,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            sunlight_threshold: 0.3,
            propagation_passes: 3,
            parallel_threshold: 16_384,
        }
    }
}

// === PHYSICS ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// When a body has no vertical velocity, refresh `on_ground` by testing
    /// one gravity step below it instead of clearing the flag
    pub ground_probe: bool,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self { ground_probe: true }
    }
}

// === TIME ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Milliseconds for one full day/night cycle
    pub day_length_ms: f64,

    /// Phase at world creation (0.0 = midnight, 0.5 = noon)
    pub start_phase: f64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            day_length_ms: 120_000.0,
            start_phase: 0.5,
        }
    }
}

// === PLAYER ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: f32,
    pub height: f32,
    pub max_health: u32,
    pub move_speed: f32,

    /// Upward velocity applied on jump (negative is up)
    pub jump_velocity: f32,
    pub gravity: f32,

    /// Invulnerability window after any damage
    pub damage_cooldown_ms: u64,
    pub regen_interval_ms: u64,
    pub regen_amount: u32,

    /// Damage per hit while standing in a damaging tile
    pub hazard_damage: u32,

    /// Respawn tile, clamped into the world
    pub spawn_tile: (u32, u32),
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 12.0,
            height: 24.0,
            max_health: 100,
            move_speed: 3.0,
            jump_velocity: -12.0,
            gravity: 0.5,
            damage_cooldown_ms: 1000,
            regen_interval_ms: 5000,
            regen_amount: 5,
            hazard_damage: 10,
            spawn_tile: (75, 10),
        }
    }
}

// === ENEMIES ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub width: f32,
    pub height: f32,
    pub max_health: i32,
    pub move_speed: f32,
    pub jump_velocity: f32,
    pub gravity: f32,
    pub attack_damage: u32,

    /// Wander -> Chase below this distance; Chase -> Wander above 1.5x
    pub chase_range: f32,
    pub attack_range: f32,
    pub attack_cooldown_ms: u64,

    /// Per-tick chance a wandering enemy picks a direction
    pub wander_start_chance: f64,

    /// Per-tick chance a wandering enemy stops
    pub wander_stop_chance: f64,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            width: 16.0,
            height: 20.0,
            max_health: 50,
            move_speed: 1.5,
            jump_velocity: -8.0,
            gravity: 0.3,
            attack_damage: 20,
            chase_range: 80.0,
            attack_range: 25.0,
            attack_cooldown_ms: 2000,
            wander_start_chance: 0.01,
            wander_stop_chance: 0.005,
        }
    }
}

// === SPAWNING ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub initial_enemies: usize,

    /// Night spawns stop once this many enemies are alive
    pub night_cap: usize,

    /// Per-tick chance of one night spawn
    ///
    /// At 0.001 and 60 ticks per second, roughly one enemy every 17 seconds
    /// of night.
    pub night_chance: f64,
    pub spawn_row: u32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            initial_enemies: 3,
            night_cap: 8,
            night_chance: 0.001,
            spawn_row: 15,
        }
    }
}

// === COMBAT ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Damage dealt to an enemy standing within a tile of a broken cell
    pub break_damage: i32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self { break_damage: 25 }
    }
}

fn check_probability(name: &str, p: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&p) {
        return Err(DelveError::Config(format!("{name} ({p}) must be within [0, 1]")));
    }
    Ok(())
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) TOML document and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let gen = &self.generation;

        if gen.desert_left > gen.desert_right {
            return Err(DelveError::Config(format!(
                "desert_left ({}) should be <= desert_right ({})",
                gen.desert_left, gen.desert_right
            )));
        }

        // Nested ore bands must widen as they get shallower
        if !(gen.gold.chance <= gen.iron.chance && gen.iron.chance <= gen.coal.chance) {
            return Err(DelveError::Config(
                "ore chances should be ordered gold <= iron <= coal".into(),
            ));
        }

        for (name, p) in [
            ("gold.chance", gen.gold.chance),
            ("iron.chance", gen.iron.chance),
            ("coal.chance", gen.coal.chance),
            ("lava_chance", gen.lava_chance),
            ("torch_chance", gen.torch_chance),
            ("wander_start_chance", self.enemy.wander_start_chance),
            ("wander_stop_chance", self.enemy.wander_stop_chance),
            ("night_chance", self.spawn.night_chance),
        ] {
            check_probability(name, p)?;
        }

        if gen.torch_column_step == 0 || gen.torch_row_step == 0 {
            return Err(DelveError::Config("torch steps must be positive".into()));
        }

        if self.lighting.propagation_passes > 15 {
            return Err(DelveError::Config(format!(
                "propagation_passes ({}) cannot exceed the 15 light levels",
                self.lighting.propagation_passes
            )));
        }

        let day = self.clock.day_length_ms;
        if day.is_nan() || day <= 0.0 {
            return Err(DelveError::Config("day_length_ms must be positive".into()));
        }

        if self.player.width <= 0.0
            || self.player.height <= 0.0
            || self.enemy.width <= 0.0
            || self.enemy.height <= 0.0
        {
            return Err(DelveError::Config("body sizes must be positive".into()));
        }

        if self.player.max_health == 0 || self.enemy.max_health <= 0 {
            return Err(DelveError::Config("max health must be positive".into()));
        }

        if self.combat.break_damage <= 0 {
            return Err(DelveError::Config(format!(
                "break_damage ({}) must be positive",
                self.combat.break_damage
            )));
        }

        if self.enemy.attack_range >= self.enemy.chase_range {
            return Err(DelveError::Config(format!(
                "attack_range ({}) should be < chase_range ({})",
                self.enemy.attack_range, self.enemy.chase_range
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SimulationConfig::from_toml_str(
            r#"
            [lighting]
            propagation_passes = 5

            [enemy]
            chase_range = 120.0
            "#,
        )
        .unwrap();

        assert_eq!(config.lighting.propagation_passes, 5);
        assert_eq!(config.enemy.chase_range, 120.0);
        assert_eq!(config.enemy.attack_range, 25.0);
        assert_eq!(config.generation, GenerationConfig::default());
    }

    #[test]
    fn test_attack_range_must_be_inside_chase_range() {
        let mut config = SimulationConfig::default();
        config.enemy.attack_range = 100.0;
        assert!(matches!(config.validate(), Err(DelveError::Config(_))));
    }

    #[test]
    fn test_day_length_must_be_a_positive_number() {
        let result = SimulationConfig::from_toml_str("[clock]\nday_length_ms = nan\n");
        assert!(matches!(result, Err(DelveError::Config(_))));

        let mut config = SimulationConfig::default();
        config.clock.day_length_ms = -5.0;
        assert!(matches!(config.validate(), Err(DelveError::Config(_))));
    }

    #[test]
    fn test_break_damage_must_be_positive() {
        let result = SimulationConfig::from_toml_str("[combat]\nbreak_damage = -10\n");
        assert!(matches!(result, Err(DelveError::Config(_))));

        let mut config = SimulationConfig::default();
        config.combat.break_damage = 0;
        assert!(matches!(config.validate(), Err(DelveError::Config(_))));
    }

    #[test]
    fn test_probability_out_of_range_rejected() {
        let result = SimulationConfig::from_toml_str("[spawn]\nnight_chance = 1.5\n");
        assert!(matches!(result, Err(DelveError::Config(_))));
    }

    #[test]
    fn test_malformed_toml_is_error() {
        let result = SimulationConfig::from_toml_str("[lighting\npropagation_passes = 3");
        assert!(matches!(result, Err(DelveError::Toml(_))));
    }

    #[test]
    fn test_too_many_passes_rejected() {
        let mut config = SimulationConfig::default();
        config.lighting.propagation_passes = 16;
        assert!(config.validate().is_err());
    }
}
