//! Player intents fed into a tick

use serde::{Deserialize, Serialize};

use crate::world::tile::Tile;

/// One player command for a tick. Movement must be re-sent every tick it
/// should apply; there is no held-key state in the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    Jump,
    /// Dig out the tile at grid coordinates; ignored on Air
    Break { x: i32, y: i32 },
    /// Put one `tile` from the inventory into an Air cell
    Place { x: i32, y: i32, tile: Tile },
    /// Choose a hotbar slot (0-8)
    SelectSlot(usize),
}

impl Intent {
    /// Intents that edit the grid or inventory, applied before lighting
    pub fn is_edit(&self) -> bool {
        matches!(self, Intent::Break { .. } | Intent::Place { .. } | Intent::SelectSlot(_))
    }
}
