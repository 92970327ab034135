//! Hotbar inventory store: fixed slots, counts, and a single selection.
use std::fmt;

use bevy::prelude::*;

use super::held_item::HeldItemKind;

/// Number of hotbar slots.
pub const SLOT_COUNT: usize = 5;

pub const SOIL_SLOT: usize = 0;
pub const WATERING_CAN_SLOT: usize = 1;
pub const SEED_VIAL_SLOT: usize = 2;
/// Harvested herbs; the good traders buy.
pub const HERB_SLOT: usize = 3;
/// Cash earned from sales.
pub const CASH_SLOT: usize = 4;

/// Contents of a single hotbar slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventorySlot {
    icon: Option<String>,
    count: u32,
}

impl InventorySlot {
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn has_icon(&self) -> bool {
        self.icon.is_some()
    }
}

/// How a slot should be drawn. An empty count hides both icon and label even if an icon is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotView<'a> {
    pub icon: Option<&'a str>,
    pub count_label: Option<String>,
    pub selected: bool,
}

/// Failures reported by inventory operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryError {
    InvalidIndex { index: usize },
    NoItemDefined { index: usize },
}

impl fmt::Display for InventoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidIndex { index } => {
                write!(f, "slot index {} outside 0..{}", index, SLOT_COUNT)
            }
            Self::NoItemDefined { index } => {
                write!(f, "slot {} has no item icon defined", index)
            }
        }
    }
}

impl std::error::Error for InventoryError {}

/// The player's hotbar.
#[derive(Resource, Debug, Clone, Default)]
pub struct Inventory {
    slots: [InventorySlot; SLOT_COUNT],
    selected: Option<usize>,
}

impl Inventory {
    /// Tools in the first three slots, plus empty herb and cash slots ready to receive counts.
    pub fn with_starting_stock() -> Self {
        let mut inventory = Self::default();
        let stock = [
            (SOIL_SLOT, "icons/soil.png", 1),
            (WATERING_CAN_SLOT, "icons/wateringcan.png", 1),
            (SEED_VIAL_SLOT, "icons/vial.png", 1),
            (HERB_SLOT, "icons/herb.png", 0),
            (CASH_SLOT, "icons/cash.png", 0),
        ];
        for (index, icon, count) in stock {
            inventory.slots[index] = InventorySlot {
                icon: Some(icon.to_string()),
                count,
            };
        }
        inventory
    }

    /// Replaces a slot's icon and count outright.
    pub fn set_slot(
        &mut self,
        index: usize,
        icon: Option<&str>,
        count: u32,
    ) -> Result<(), InventoryError> {
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(InventoryError::InvalidIndex { index })?;
        *slot = InventorySlot {
            icon: icon.map(str::to_string),
            count,
        };
        Ok(())
    }

    /// Adjusts a defined slot's count, clamping at zero. Returns the new count.
    pub fn add_count(&mut self, index: usize, delta: i64) -> Result<u32, InventoryError> {
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(InventoryError::InvalidIndex { index })?;
        if !slot.has_icon() {
            return Err(InventoryError::NoItemDefined { index });
        }

        let updated = (i64::from(slot.count) + delta).clamp(0, i64::from(u32::MAX));
        slot.count = updated as u32;
        Ok(slot.count)
    }

    /// Count held in a slot; zero for indices outside the hotbar.
    pub fn count(&self, index: usize) -> u32 {
        self.slots.get(index).map_or(0, InventorySlot::count)
    }

    pub fn slot(&self, index: usize) -> Option<&InventorySlot> {
        self.slots.get(index)
    }

    /// Sets the selection. Out-of-range indices are rejected and leave the selection untouched.
    pub fn select(&mut self, index: Option<usize>) -> Result<(), InventoryError> {
        if let Some(index) = index {
            if index >= SLOT_COUNT {
                return Err(InventoryError::InvalidIndex { index });
            }
        }
        self.selected = index;
        Ok(())
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn held_item(&self) -> HeldItemKind {
        HeldItemKind::from_selection(self.selected)
    }

    pub fn slot_view(&self, index: usize) -> Option<SlotView<'_>> {
        let slot = self.slots.get(index)?;
        let visible = slot.count > 0;
        Some(SlotView {
            icon: slot.icon().filter(|_| visible),
            count_label: visible.then(|| slot.count.to_string()),
            selected: self.selected == Some(index),
        })
    }
}
