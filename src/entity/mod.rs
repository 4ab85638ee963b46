//! Actors living in the world: the player and hostile mobs

pub mod enemy;
pub mod inventory;
pub mod player;

pub use enemy::{AiState, Enemy};
pub use inventory::{Inventory, ItemStack};
pub use player::{DamageOutcome, Player};
