//! Events reported by a tick
//!
//! Returned from `Simulation::tick` for damage indicators and logs. Nothing
//! in the core depends on them being consumed.

use serde::{Deserialize, Serialize};

use crate::core::types::{EnemyId, Vec2};
use crate::world::tile::Tile;

/// Where player damage came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageSource {
    Enemy(EnemyId),
    /// Standing in a damaging tile
    Hazard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimulationEvent {
    TileBroken { x: i32, y: i32, tile: Tile },
    TilePlaced { x: i32, y: i32, tile: Tile },
    PlayerDamaged {
        source: DamageSource,
        amount: u32,
        /// Health after the hit
        health: u32,
    },
    /// Health reached zero; the player is back at spawn with full health
    PlayerRespawned { source: DamageSource },
    EnemySpawned { id: EnemyId, position: Vec2 },
    EnemyDamaged { id: EnemyId, amount: i32, health: i32 },
    EnemyKilled { id: EnemyId },
    Nightfall,
    Daybreak,
}
