//! Delve - side-view tile-world simulation core
//!
//! Terrain generation, per-tile lighting, grid collision, player and enemy
//! behaviour and a fixed-order tick loop. Rendering and input devices live
//! outside this crate; they talk to [`simulation::Simulation`] through
//! intents, events and read-only queries.

pub mod core;
pub mod entity;
pub mod lighting;
pub mod physics;
pub mod simulation;
pub mod world;
