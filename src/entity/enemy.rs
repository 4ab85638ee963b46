//! Hostile mobs and their Wander/Chase/Attack state machine

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::config::EnemyConfig;
use crate::core::types::{Aabb, EnemyId, Millis, Vec2};
use crate::physics::body::PhysicsBody;
use crate::world::grid::{WorldGrid, TILE_SIZE};

/// AI state; transitions depend on the distance to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AiState {
    /// Idle drifting; random starts and stops
    #[default]
    Wander,
    /// Walk straight at the player, hopping over walls
    Chase,
    /// Hold position and hit on contact
    Attack,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EnemyId,
    pub body: PhysicsBody,
    pub health: i32,
    pub state: AiState,
    /// Horizontal velocity re-issued to the body every tick
    pub desired_vx: f32,
    pub last_attack: Option<Millis>,
}

impl Enemy {
    pub fn new(id: EnemyId, position: Vec2, config: &EnemyConfig) -> Self {
        Self {
            id,
            body: PhysicsBody::new(position, config.width, config.height, config.gravity),
            health: config.max_health,
            state: AiState::Wander,
            desired_vx: 0.0,
            last_attack: None,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn aabb(&self) -> Aabb {
        self.body.aabb()
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Health floors at 0; negative amounts are ignored
    pub fn take_damage(&mut self, amount: i32) {
        self.health = self.health.saturating_sub(amount.max(0)).max(0);
    }

    /// Re-evaluate the AI state against the player's position
    pub fn think<R: Rng>(
        &mut self,
        player_pos: Vec2,
        grid: &WorldGrid,
        rng: &mut R,
        config: &EnemyConfig,
    ) {
        let distance = self.body.position.distance(&player_pos);
        let previous = self.state;

        match self.state {
            AiState::Wander => {
                if distance < config.chase_range {
                    self.state = AiState::Chase;
                } else {
                    if rng.gen_bool(config.wander_start_chance) {
                        let dir = if rng.gen_bool(0.5) { -1.0 } else { 1.0 };
                        self.desired_vx = dir * config.move_speed;
                    }
                    if rng.gen_bool(config.wander_stop_chance) {
                        self.desired_vx = 0.0;
                    }
                }
            }
            AiState::Chase => {
                if distance > config.chase_range * 1.5 {
                    self.state = AiState::Wander;
                    self.desired_vx = 0.0;
                } else if distance < config.attack_range {
                    self.state = AiState::Attack;
                    self.desired_vx = 0.0;
                } else {
                    let dir = if player_pos.x < self.body.position.x { -1.0 } else { 1.0 };
                    self.desired_vx = dir * config.move_speed;
                    if self.wall_ahead(grid, dir) && self.body.on_ground {
                        self.body.jump(config.jump_velocity);
                    }
                }
            }
            AiState::Attack => {
                if distance > config.attack_range {
                    self.state = AiState::Chase;
                } else {
                    self.desired_vx = 0.0;
                }
            }
        }

        if self.state != previous {
            debug!(id = self.id.0, from = ?previous, to = ?self.state, distance, "Enemy state change");
        }
    }

    /// Probe one body width ahead at head height
    fn wall_ahead(&self, grid: &WorldGrid, dir: f32) -> bool {
        let x = ((self.body.position.x + self.body.width * dir) / TILE_SIZE).floor() as i32;
        let y = (self.body.position.y / TILE_SIZE).floor() as i32;
        grid.is_solid(x, y)
    }

    /// Whether an attack on `player` lands now: Attack state, AABB overlap
    /// and the attack cooldown elapsed
    pub fn can_strike(&self, player: &Aabb, now: Millis, config: &EnemyConfig) -> bool {
        self.state == AiState::Attack
            && self.aabb().overlaps(player)
            && self
                .last_attack
                .map_or(true, |t| now.saturating_sub(t) > config.attack_cooldown_ms)
    }

    /// Full per-tick update. Returns the damage dealt to the player, if any.
    pub fn update<R: Rng>(
        &mut self,
        player: &Aabb,
        grid: &WorldGrid,
        rng: &mut R,
        now: Millis,
        config: &EnemyConfig,
        ground_probe: bool,
    ) -> Option<u32> {
        self.think(player.min, grid, rng, config);

        self.body.velocity.x = self.desired_vx;
        self.body.step(grid, ground_probe);

        if self.can_strike(player, now, config) {
            self.last_attack = Some(now);
            Some(config.attack_damage)
        } else {
            None
        }
    }
}
