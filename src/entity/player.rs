//! The player: a physics body with health, invulnerability and regen
//!
//! There is no formal state machine here; "alive", "invulnerable" and
//! "respawning" all fall out of the health and timer fields.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::config::PlayerConfig;
use crate::core::types::{Aabb, Millis, Vec2};
use crate::entity::inventory::Inventory;
use crate::physics::body::PhysicsBody;
use crate::world::grid::WorldGrid;

/// What a damage attempt did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageOutcome {
    /// Still inside the invulnerability window
    Ignored,
    Damaged,
    /// Health hit zero; the player was respawned
    Respawned,
}

impl DamageOutcome {
    pub fn landed(self) -> bool {
        !matches!(self, DamageOutcome::Ignored)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: PhysicsBody,
    pub inventory: Inventory,
    health: u32,
    config: PlayerConfig,
    spawn_point: Vec2,
    /// Last instant of the current invulnerability window
    invulnerable_until: Option<Millis>,
    last_damage: Option<Millis>,
    last_regen: Millis,
}

impl Player {
    /// New player at the configured spawn tile, clamped into `grid`
    pub fn new(config: PlayerConfig, grid: &WorldGrid) -> Self {
        let (tx, ty) = config.spawn_tile;
        let spawn_point = WorldGrid::tile_origin(
            tx.min(grid.width().saturating_sub(1)) as i32,
            ty.min(grid.height().saturating_sub(1)) as i32,
        );
        let body = PhysicsBody::new(spawn_point, config.width, config.height, config.gravity);

        Self {
            body,
            inventory: Inventory::starter(),
            health: config.max_health,
            config,
            spawn_point,
            invulnerable_until: None,
            last_damage: None,
            last_regen: 0,
        }
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.config.max_health
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn aabb(&self) -> Aabb {
        self.body.aabb()
    }

    pub fn spawn_point(&self) -> Vec2 {
        self.spawn_point
    }

    pub fn is_invulnerable(&self, now: Millis) -> bool {
        self.invulnerable_until.is_some_and(|until| now <= until)
    }

    pub fn move_left(&mut self) {
        self.body.velocity.x = -self.config.move_speed;
    }

    pub fn move_right(&mut self) {
        self.body.velocity.x = self.config.move_speed;
    }

    pub fn jump(&mut self) -> bool {
        self.body.jump(self.config.jump_velocity)
    }

    /// Apply damage unless invulnerable. Any landed hit opens a new
    /// invulnerability window; reaching zero health respawns.
    pub fn take_damage(&mut self, amount: u32, now: Millis) -> DamageOutcome {
        if self.is_invulnerable(now) {
            return DamageOutcome::Ignored;
        }

        self.health = self.health.saturating_sub(amount);
        self.last_damage = Some(now);
        self.invulnerable_until = Some(now + self.config.damage_cooldown_ms);

        if self.health == 0 {
            self.die();
            DamageOutcome::Respawned
        } else {
            DamageOutcome::Damaged
        }
    }

    /// Respawn: full health back at the spawn point
    pub fn die(&mut self) {
        self.health = self.config.max_health;
        self.body.teleport(self.spawn_point);
        info!(x = self.spawn_point.x, y = self.spawn_point.y, "Player died and respawned");
    }

    pub fn heal(&mut self, amount: u32) {
        self.health = self.health.saturating_add(amount).min(self.config.max_health);
    }

    /// One tick: physics, regen, invulnerability expiry, then the hazard
    /// check at the body center. Returns the hazard outcome.
    pub fn update(&mut self, grid: &WorldGrid, now: Millis, ground_probe: bool) -> DamageOutcome {
        self.body.step(grid, ground_probe);

        let interval = self.config.regen_interval_ms;
        let rested = self.last_damage.map_or(true, |t| now.saturating_sub(t) >= interval);
        if self.health < self.config.max_health && now.saturating_sub(self.last_regen) >= interval && rested {
            self.heal(self.config.regen_amount);
            self.last_regen = now;
        }

        if self.invulnerable_until.is_some_and(|until| now > until) {
            self.invulnerable_until = None;
        }

        let (cx, cy) = self.body.center_tile();
        if grid.is_damaging(cx, cy) {
            self.take_damage(self.config.hazard_damage, now)
        } else {
            DamageOutcome::Ignored
        }
    }
}
