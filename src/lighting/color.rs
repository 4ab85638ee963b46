//! Colour handling and tone mapping against light levels
//!
//! Purely a presentation concern, but it is defined against `LightLevel`
//! so renderers agree on what a light value means.

use serde::{Deserialize, Serialize};

use crate::lighting::light_grid::LightLevel;
use crate::world::grid::WorldGrid;
use crate::world::tile::Tile;

/// RGBA color (0.0 to 1.0 per channel)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from 8-bit channels
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Darken color by a factor (0.0 = black, 1.0 = unchanged)
    pub fn darken(&self, factor: f32) -> Self {
        Self {
            r: self.r * factor,
            g: self.g * factor,
            b: self.b * factor,
            a: self.a,
        }
    }

    /// Linear blend toward `other`; `t` is clamped to [0, 1]
    pub fn lerp(&self, other: Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// 8-bit channels, rounding and saturating
    pub fn to_rgb8(&self) -> [u8; 3] {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [channel(self.r), channel(self.g), channel(self.b)]
    }
}

/// Share of ambient light that reaches unlit tiles
const AMBIENT_FLOOR: f32 = 0.15;

/// Maximum warm tint added at full light
const LAMP_WARMTH: f32 = 0.3;

/// Light levels above this render with lamp glow at night
pub const GLOW_LEVEL: u8 = 10;

fn total_light(light: LightLevel, ambient: f32) -> f32 {
    light.fraction().max(ambient * AMBIENT_FLOOR).min(1.0)
}

/// Scale a base color by the brighter of the local light and an ambient floor
pub fn apply_lighting(base: Color, light: LightLevel, ambient: f32) -> Color {
    base.darken(total_light(light, ambient))
}

/// Like `apply_lighting`, with a warm orange cast that grows with light level
pub fn apply_lamp_glow(base: Color, light: LightLevel, ambient: f32) -> Color {
    let total = total_light(light, ambient);
    let warmth = light.fraction() * LAMP_WARMTH;

    Color {
        r: (base.r * total * (1.0 + warmth)).min(1.0),
        g: (base.g * total * (1.0 + warmth * 0.7)).min(1.0),
        b: base.b * total,
        a: base.a,
    }
}

/// Pick the tone mapping a renderer should use for a tile
pub fn shade_tile(tile: Tile, light: LightLevel, ambient: f32, is_night: bool) -> Color {
    if tile == Tile::Lamp || (light.value() > GLOW_LEVEL && is_night) {
        apply_lamp_glow(tile.color(), light, ambient)
    } else {
        apply_lighting(tile.color(), light, ambient)
    }
}

/// Solid tiles cast shadows, except lamps. Out of bounds casts nothing.
pub fn is_shadow_caster(grid: &WorldGrid, x: i32, y: i32) -> bool {
    if !grid.in_bounds(x, y) {
        return false;
    }
    let tile = grid.get_tile(x, y);
    tile.is_solid() && tile != Tile::Lamp
}
