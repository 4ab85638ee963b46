//! The tile world: tile kinds, grid storage and procedural generation

pub mod generation;
pub mod grid;
pub mod noise;
pub mod tile;

pub use generation::{generate_world, TerrainGenerator};
pub use grid::{WorldGrid, TILE_SIZE};
pub use tile::Tile;
