//! Tick system - owns the world and advances it one step at a time
//!
//! A tick runs these phases strictly in order:
//! clock -> grid edits -> lighting -> movement -> player -> enemies -> spawns
//!
//! Every enemy reads the player pose from before the enemy phase, and no
//! enemy sees another enemy's post-step position from the same tick.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::core::clock::{DayPhase, TimeClock};
use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::core::types::{EnemyId, Millis, Vec2};
use crate::entity::enemy::Enemy;
use crate::entity::player::{DamageOutcome, Player};
use crate::lighting::color::{is_shadow_caster, shade_tile, Color};
use crate::lighting::engine::LightingEngine;
use crate::lighting::light_grid::LightGrid;
use crate::simulation::events::{DamageSource, SimulationEvent};
use crate::simulation::input::Intent;
use crate::simulation::spawn::{should_spawn_at_night, spawn_point};
use crate::world::generation::TerrainGenerator;
use crate::world::grid::{WorldGrid, TILE_SIZE};
use crate::world::tile::Tile;

/// Simulation root: owns the grid and every entity
pub struct Simulation {
    config: SimulationConfig,
    grid: WorldGrid,
    light: LightGrid,
    lighting: LightingEngine,
    clock: TimeClock,
    player: Player,
    enemies: Vec<Enemy>,
    rng: ChaCha8Rng,
    elapsed_ms: Millis,
    tick_count: u64,
    next_enemy_id: u32,
}

/// Snapshot used by the headless runner
#[derive(Debug, Clone, Serialize)]
pub struct SimulationSummary {
    pub ticks: u64,
    pub elapsed_ms: Millis,
    pub clock: String,
    pub day_phase: DayPhase,
    pub ambient_light: f32,
    pub player_health: u32,
    pub player_position: Vec2,
    pub enemies: usize,
    pub lava_tiles: usize,
    pub torches: usize,
    pub lamps: usize,
}

impl Simulation {
    /// Generate a world from `seed` and populate it
    pub fn new(seed: u64, width: u32, height: u32, config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let grid = TerrainGenerator::new(config.generation.clone()).generate(seed, width, height);
        Ok(Self::build(grid, seed, config))
    }

    /// Run an existing grid (hand-built or loaded)
    pub fn from_grid(grid: WorldGrid, seed: u64, config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(grid, seed, config))
    }

    fn build(grid: WorldGrid, seed: u64, config: SimulationConfig) -> Self {
        let lighting = LightingEngine::new(config.lighting.clone());
        let clock = TimeClock::new(&config.clock);
        let light = lighting.compute(&grid, clock.ambient_light());
        let player = Player::new(config.player.clone(), &grid);

        let mut sim = Self {
            grid,
            light,
            lighting,
            clock,
            player,
            enemies: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            elapsed_ms: 0,
            tick_count: 0,
            next_enemy_id: 0,
            config,
        };

        for _ in 0..sim.config.spawn.initial_enemies {
            if let Some(position) =
                spawn_point(&sim.grid, &mut sim.rng, &sim.config.spawn, &sim.config.enemy)
            {
                sim.spawn_enemy_at(position);
            }
        }

        info!(
            seed,
            width = sim.grid.width(),
            height = sim.grid.height(),
            enemies = sim.enemies.len(),
            "Simulation ready"
        );
        sim
    }

    /// Advance one tick by `delta_ms` simulated milliseconds
    pub fn tick(&mut self, delta_ms: Millis, intents: &[Intent]) -> Vec<SimulationEvent> {
        let mut events = Vec::new();
        self.elapsed_ms += delta_ms;
        self.tick_count += 1;
        let now = self.elapsed_ms;

        self.advance_clock(delta_ms, &mut events);

        // Edits land before lighting so the light grid matches the tiles
        for intent in intents.iter().filter(|i| i.is_edit()) {
            self.apply_edit(*intent, &mut events);
        }
        self.reap_dead_enemies(&mut events);

        self.lighting
            .compute_into(&self.grid, self.clock.ambient_light(), &mut self.light);

        for intent in intents {
            match intent {
                Intent::MoveLeft => self.player.move_left(),
                Intent::MoveRight => self.player.move_right(),
                Intent::Jump => {
                    self.player.jump();
                }
                _ => {}
            }
        }

        let probe = self.config.physics.ground_probe;
        let hazard = self.player.update(&self.grid, now, probe);
        Self::record_player_hit(
            &self.player,
            hazard,
            DamageSource::Hazard,
            self.config.player.hazard_damage,
            &mut events,
        );

        self.update_enemies(now, &mut events);

        if should_spawn_at_night(&self.clock, self.enemies.len(), &mut self.rng, &self.config.spawn) {
            if let Some(position) =
                spawn_point(&self.grid, &mut self.rng, &self.config.spawn, &self.config.enemy)
            {
                let id = self.spawn_enemy_at(position);
                events.push(SimulationEvent::EnemySpawned { id, position });
            }
        }

        events
    }

    fn advance_clock(&mut self, delta_ms: Millis, events: &mut Vec<SimulationEvent>) {
        let was_night = self.clock.is_night();
        self.clock.advance(delta_ms as f64);
        match (was_night, self.clock.is_night()) {
            (false, true) => {
                info!(clock = %self.clock.clock_string(), "Night falls");
                events.push(SimulationEvent::Nightfall);
            }
            (true, false) => {
                info!(clock = %self.clock.clock_string(), "Day breaks");
                events.push(SimulationEvent::Daybreak);
            }
            _ => {}
        }
    }

    fn apply_edit(&mut self, intent: Intent, events: &mut Vec<SimulationEvent>) {
        match intent {
            Intent::Break { x, y } => self.break_tile(x, y, events),
            Intent::Place { x, y, tile } => self.place_tile(x, y, tile, events),
            Intent::SelectSlot(slot) => self.player.inventory.select_slot(slot),
            _ => {}
        }
    }

    fn break_tile(&mut self, x: i32, y: i32, events: &mut Vec<SimulationEvent>) {
        let Some(tile) = self.grid.break_tile(x, y) else {
            return;
        };
        self.player.inventory.collect(tile, 1);
        events.push(SimulationEvent::TileBroken { x, y, tile });

        // Digging next to an enemy hits the first one within a tile
        let origin = WorldGrid::tile_origin(x, y);
        let damage = self.config.combat.break_damage;
        if let Some(enemy) = self.enemies.iter_mut().find(|e| {
            (e.body.position.x - origin.x).abs() < TILE_SIZE
                && (e.body.position.y - origin.y).abs() < TILE_SIZE
        }) {
            enemy.take_damage(damage);
            debug!(id = enemy.id.0, health = enemy.health, "Enemy hit by digging");
            events.push(SimulationEvent::EnemyDamaged {
                id: enemy.id,
                amount: damage,
                health: enemy.health,
            });
        }
    }

    fn place_tile(&mut self, x: i32, y: i32, tile: Tile, events: &mut Vec<SimulationEvent>) {
        if self.player.inventory.count(tile) == 0 {
            return;
        }
        // A solid tile may not close over a body
        if tile.is_solid()
            && (self.player.body.occupies_tile(x, y)
                || self.enemies.iter().any(|e| e.body.occupies_tile(x, y)))
        {
            return;
        }
        if self.grid.place_tile(x, y, tile) {
            self.player.inventory.take(tile);
            events.push(SimulationEvent::TilePlaced { x, y, tile });
        }
    }

    fn update_enemies(&mut self, now: Millis, events: &mut Vec<SimulationEvent>) {
        let player_box = self.player.aabb();
        let probe = self.config.physics.ground_probe;

        let mut hits = Vec::new();
        for enemy in self.enemies.iter_mut() {
            if let Some(damage) =
                enemy.update(&player_box, &self.grid, &mut self.rng, now, &self.config.enemy, probe)
            {
                hits.push((enemy.id, damage));
            }
        }

        for (id, damage) in hits {
            let outcome = self.player.take_damage(damage, now);
            Self::record_player_hit(&self.player, outcome, DamageSource::Enemy(id), damage, events);
        }

        self.reap_dead_enemies(events);
    }

    fn record_player_hit(
        player: &Player,
        outcome: DamageOutcome,
        source: DamageSource,
        amount: u32,
        events: &mut Vec<SimulationEvent>,
    ) {
        match outcome {
            DamageOutcome::Ignored => {}
            DamageOutcome::Damaged => events.push(SimulationEvent::PlayerDamaged {
                source,
                amount,
                health: player.health(),
            }),
            DamageOutcome::Respawned => events.push(SimulationEvent::PlayerRespawned { source }),
        }
    }

    fn reap_dead_enemies(&mut self, events: &mut Vec<SimulationEvent>) {
        self.enemies.retain(|enemy| {
            if enemy.is_dead() {
                info!(id = enemy.id.0, "Enemy killed");
                events.push(SimulationEvent::EnemyKilled { id: enemy.id });
                false
            } else {
                true
            }
        });
    }

    /// Add an enemy at a world position, returning its id
    pub fn spawn_enemy_at(&mut self, position: Vec2) -> EnemyId {
        let id = EnemyId::new(self.next_enemy_id);
        self.next_enemy_id += 1;
        self.enemies.push(Enemy::new(id, position, &self.config.enemy));
        debug!(id = id.0, x = position.x, y = position.y, "Enemy spawned");
        id
    }

    // === QUERIES ===

    /// Tile at grid coordinates; Stone outside the world
    pub fn get_tile(&self, x: i32, y: i32) -> Tile {
        self.grid.get_tile(x, y)
    }

    /// Light level 0-15 at grid coordinates; 0 outside the world
    pub fn get_light(&self, x: i32, y: i32) -> u8 {
        self.light.get(x, y).value()
    }

    /// Tile colour as a renderer should draw it right now
    pub fn tile_color(&self, x: i32, y: i32) -> Color {
        shade_tile(
            self.get_tile(x, y),
            self.light.get(x, y),
            self.clock.ambient_light(),
            self.clock.is_night(),
        )
    }

    /// Whether the tile at grid coordinates should cast a drop shadow
    pub fn casts_shadow(&self, x: i32, y: i32) -> bool {
        is_shadow_caster(&self.grid, x, y)
    }

    pub fn grid(&self) -> &WorldGrid {
        &self.grid
    }

    /// Direct grid access for tools. Lighting catches up on the next tick.
    pub fn grid_mut(&mut self) -> &mut WorldGrid {
        &mut self.grid
    }

    pub fn light_grid(&self) -> &LightGrid {
        &self.light
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut [Enemy] {
        &mut self.enemies
    }

    pub fn clock(&self) -> &TimeClock {
        &self.clock
    }

    pub fn ambient_light(&self) -> f32 {
        self.clock.ambient_light()
    }

    pub fn sky_color(&self) -> Color {
        self.clock.sky_color()
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn elapsed_ms(&self) -> Millis {
        self.elapsed_ms
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn summary(&self) -> SimulationSummary {
        SimulationSummary {
            ticks: self.tick_count,
            elapsed_ms: self.elapsed_ms,
            clock: self.clock.clock_string(),
            day_phase: self.clock.day_phase(),
            ambient_light: self.clock.ambient_light(),
            player_health: self.player.health(),
            player_position: self.player.position(),
            enemies: self.enemies.len(),
            lava_tiles: self.grid.count(Tile::Lava),
            torches: self.grid.count(Tile::Torch),
            lamps: self.grid.count(Tile::Lamp),
        }
    }
}
