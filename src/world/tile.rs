//! Tile kinds and their fixed attributes

use serde::{Deserialize, Serialize};

use crate::lighting::color::Color;

/// One cell of the world grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Tile {
    #[default]
    Air = 0,
    Dirt = 1,
    Stone = 2,
    Grass = 3,
    Sand = 4,
    Lava = 5,
    CoalOre = 6,
    IronOre = 7,
    GoldOre = 8,
    Torch = 9,
    Lamp = 10,
}

/// Static attributes shared by every tile of a kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileAttributes {
    pub solid: bool,
    pub damaging: bool,
    /// 0-15
    pub light_emission: u8,
}

const fn attrs(solid: bool, damaging: bool, light_emission: u8) -> TileAttributes {
    TileAttributes { solid, damaging, light_emission }
}

/// Indexed by `Tile as usize`
const ATTRIBUTES: [TileAttributes; 11] = [
    attrs(false, false, 0), // Air
    attrs(true, false, 0),  // Dirt
    attrs(true, false, 0),  // Stone
    attrs(true, false, 0),  // Grass
    attrs(true, false, 0),  // Sand
    attrs(false, true, 12), // Lava
    attrs(true, false, 0),  // CoalOre
    attrs(true, false, 0),  // IronOre
    attrs(true, false, 0),  // GoldOre
    attrs(false, false, 14), // Torch
    attrs(true, false, 15), // Lamp
];

impl Tile {
    pub const ALL: [Tile; 11] = [
        Tile::Air,
        Tile::Dirt,
        Tile::Stone,
        Tile::Grass,
        Tile::Sand,
        Tile::Lava,
        Tile::CoalOre,
        Tile::IronOre,
        Tile::GoldOre,
        Tile::Torch,
        Tile::Lamp,
    ];

    #[inline]
    pub fn attributes(self) -> TileAttributes {
        ATTRIBUTES[self as usize]
    }

    #[inline]
    pub fn is_solid(self) -> bool {
        self.attributes().solid
    }

    #[inline]
    pub fn is_damaging(self) -> bool {
        self.attributes().damaging
    }

    #[inline]
    pub fn light_emission(self) -> u8 {
        self.attributes().light_emission
    }

    pub fn is_air(self) -> bool {
        self == Tile::Air
    }

    /// Largest stack of this tile an inventory slot holds
    pub fn max_stack(self) -> u32 {
        match self {
            Tile::Dirt | Tile::Stone | Tile::Sand => 64,
            Tile::CoalOre | Tile::IronOre | Tile::GoldOre => 32,
            Tile::Torch => 16,
            Tile::Lamp => 8,
            _ => 1,
        }
    }

    /// Unlit base color
    pub fn color(self) -> Color {
        match self {
            Tile::Air => Color::BLACK,
            Tile::Dirt => Color::rgb8(139, 69, 19),
            Tile::Stone => Color::rgb8(128, 128, 128),
            Tile::Grass => Color::rgb8(0, 255, 0),
            Tile::Sand => Color::rgb8(194, 178, 128),
            Tile::Lava => Color::rgb8(255, 100, 0),
            Tile::CoalOre => Color::rgb8(64, 64, 64),
            Tile::IronOre => Color::rgb8(205, 127, 50),
            Tile::GoldOre => Color::rgb8(255, 215, 0),
            Tile::Torch => Color::rgb8(255, 200, 100),
            Tile::Lamp => Color::rgb8(255, 220, 150),
        }
    }

    /// Single character used by text dumps of the world
    pub fn glyph(self) -> char {
        match self {
            Tile::Air => ' ',
            Tile::Dirt => '%',
            Tile::Stone => '#',
            Tile::Grass => '"',
            Tile::Sand => ':',
            Tile::Lava => '~',
            Tile::CoalOre => 'c',
            Tile::IronOre => 'i',
            Tile::GoldOre => 'g',
            Tile::Torch => '!',
            Tile::Lamp => '*',
        }
    }
}
