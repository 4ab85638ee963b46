//! Player inventory: a backpack whose first slots double as the hotbar

use serde::{Deserialize, Serialize};

use crate::world::tile::Tile;

pub const INVENTORY_SLOTS: usize = 36;
pub const HOTBAR_SLOTS: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub item: Tile,
    pub quantity: u32,
}

impl ItemStack {
    pub fn new(item: Tile, quantity: u32) -> Self {
        Self {
            item,
            quantity: quantity.min(item.max_stack()),
        }
    }

    pub fn room(&self) -> u32 {
        self.item.max_stack().saturating_sub(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    slots: Vec<Option<ItemStack>>,
    selected: usize,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

impl Inventory {
    pub fn new() -> Self {
        Self {
            slots: vec![None; INVENTORY_SLOTS],
            selected: 0,
        }
    }

    /// Starting kit for a new player
    pub fn starter() -> Self {
        let mut inventory = Self::new();
        inventory.collect(Tile::Dirt, 20);
        inventory.collect(Tile::Stone, 15);
        inventory.collect(Tile::Torch, 10);
        inventory.collect(Tile::Lamp, 5);
        inventory
    }

    /// Add items, topping up existing stacks before opening new ones.
    /// Returns how many did not fit.
    pub fn collect(&mut self, item: Tile, mut quantity: u32) -> u32 {
        if item.is_air() {
            return quantity;
        }

        for stack in self.slots.iter_mut().flatten() {
            if quantity == 0 {
                return 0;
            }
            if stack.item == item {
                let added = quantity.min(stack.room());
                stack.quantity += added;
                quantity -= added;
            }
        }

        for slot in self.slots.iter_mut() {
            if quantity == 0 {
                break;
            }
            if slot.is_none() {
                let stack = ItemStack::new(item, quantity);
                quantity -= stack.quantity;
                *slot = Some(stack);
            }
        }

        quantity
    }

    /// Remove one unit of `item`, preferring the selected slot.
    /// Returns false when none is held.
    pub fn take(&mut self, item: Tile) -> bool {
        let slot = match self.slots[self.selected] {
            Some(stack) if stack.item == item => Some(self.selected),
            _ => self
                .slots
                .iter()
                .position(|s| matches!(s, Some(stack) if stack.item == item)),
        };

        let Some(index) = slot else {
            return false;
        };
        if let Some(stack) = self.slots[index].as_mut() {
            stack.quantity -= 1;
            if stack.quantity == 0 {
                self.slots[index] = None;
            }
        }
        true
    }

    pub fn count(&self, item: Tile) -> u32 {
        self.slots
            .iter()
            .flatten()
            .filter(|s| s.item == item)
            .map(|s| s.quantity)
            .sum()
    }

    /// Select a hotbar slot; out-of-range indices are ignored
    pub fn select_slot(&mut self, slot: usize) {
        if slot < HOTBAR_SLOTS {
            self.selected = slot;
        }
    }

    pub fn selected_slot(&self) -> usize {
        self.selected
    }

    pub fn selected_item(&self) -> Option<ItemStack> {
        self.slots[self.selected]
    }

    pub fn hotbar(&self) -> &[Option<ItemStack>] {
        &self.slots[..HOTBAR_SLOTS]
    }

    pub fn slots(&self) -> &[Option<ItemStack>] {
        &self.slots
    }
}
