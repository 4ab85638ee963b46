pub mod events;
pub mod input;
pub mod spawn;
pub mod tick;

pub use events::{DamageSource, SimulationEvent};
pub use input::Intent;
pub use tick::{Simulation, SimulationSummary};
