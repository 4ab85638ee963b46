//! AABB body integrated against the tile grid
//!
//! Separate-axis integration: x first, then y. A move that would put any
//! hitbox corner inside a solid tile is dropped entirely for that axis; there
//! is no sliding or partial resolution.
//!
//! Known limitation: only the four corners are sampled, so a body narrower
//! than a tile can slip through a one-tile diagonal gap. This is part of the
//! game feel and is intentionally kept.

use serde::{Deserialize, Serialize};

use crate::core::types::{Aabb, Vec2};
use crate::world::grid::{WorldGrid, TILE_SIZE};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsBody {
    /// Top-left corner in world pixels
    pub position: Vec2,
    pub velocity: Vec2,
    pub width: f32,
    pub height: f32,
    /// Added to `velocity.y` each tick while airborne
    pub gravity: f32,
    pub on_ground: bool,
}

impl PhysicsBody {
    pub fn new(position: Vec2, width: f32, height: f32, gravity: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            width,
            height,
            gravity,
            on_ground: false,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.position, self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.aabb().center()
    }

    /// Tile containing the body center
    pub fn center_tile(&self) -> (i32, i32) {
        WorldGrid::world_to_tile(self.center())
    }

    /// Tile columns and rows sampled by the corners at `position`, as
    /// `(left, right, top, bottom)`. Right and bottom edges are inclusive.
    fn corner_tiles(&self, position: Vec2) -> (i32, i32, i32, i32) {
        (
            (position.x / TILE_SIZE).floor() as i32,
            ((position.x + self.width) / TILE_SIZE).floor() as i32,
            (position.y / TILE_SIZE).floor() as i32,
            ((position.y + self.height) / TILE_SIZE).floor() as i32,
        )
    }

    /// True when a solid tile at `(x, y)` would be hit by one of the corners
    pub fn occupies_tile(&self, x: i32, y: i32) -> bool {
        let (left, right, top, bottom) = self.corner_tiles(self.position);
        (left..=right).contains(&x) && (top..=bottom).contains(&y)
    }

    /// True when any hitbox corner at `position` lies in a solid tile
    pub fn collides_at(&self, grid: &WorldGrid, position: Vec2) -> bool {
        let (left, right, top, bottom) = self.corner_tiles(position);

        grid.is_solid(left, top)
            || grid.is_solid(right, top)
            || grid.is_solid(left, bottom)
            || grid.is_solid(right, bottom)
    }

    pub fn collides(&self, grid: &WorldGrid) -> bool {
        self.collides_at(grid, self.position)
    }

    /// Start a jump if standing on something
    pub fn jump(&mut self, velocity: f32) -> bool {
        if !self.on_ground {
            return false;
        }
        self.velocity.y = velocity;
        self.on_ground = false;
        true
    }

    /// Move without collision checks (spawns and respawns)
    pub fn teleport(&mut self, position: Vec2) {
        self.position = position;
        self.velocity = Vec2::ZERO;
        self.on_ground = false;
    }

    /// Advance one tick. Horizontal velocity is consumed: the controller
    /// must set it again before the next step.
    pub fn step(&mut self, grid: &WorldGrid, ground_probe: bool) -> bool {
        if !self.on_ground {
            self.velocity.y += self.gravity;
        }

        self.move_horizontal(grid, self.velocity.x);
        self.move_vertical(grid, self.velocity.y, ground_probe);
        self.velocity.x = 0.0;

        self.on_ground
    }

    fn move_horizontal(&mut self, grid: &WorldGrid, dx: f32) {
        let target = Vec2::new(self.position.x + dx, self.position.y);
        if !self.collides_at(grid, target) {
            self.position = target;
        }
    }

    fn move_vertical(&mut self, grid: &WorldGrid, dy: f32, ground_probe: bool) {
        if dy == 0.0 && ground_probe {
            // Resting: stay grounded while there is still floor one step down
            let probe = Vec2::new(self.position.x, self.position.y + self.gravity);
            self.on_ground = self.collides_at(grid, probe);
            return;
        }

        let target = Vec2::new(self.position.x, self.position.y + dy);
        if self.collides_at(grid, target) {
            if dy > 0.0 {
                self.on_ground = true;
            }
            self.velocity.y = 0.0;
        } else {
            self.position = target;
            self.on_ground = false;
        }
    }
}
