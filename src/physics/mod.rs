//! Tile-grid collision and integration

pub mod body;

pub use body::PhysicsBody;
