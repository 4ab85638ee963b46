//! Light levels: sunlight, emissive blocks and neighbour spreading

pub mod color;
pub mod engine;
pub mod light_grid;

pub use color::{apply_lamp_glow, apply_lighting, Color};
pub use engine::LightingEngine;
pub use light_grid::{LightGrid, LightLevel};
