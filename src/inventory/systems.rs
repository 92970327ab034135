//! Systems applying hotbar selection input.
use bevy::prelude::*;

use super::{components::Inventory, events::SlotKeyPressed};

/// Selects the pressed slot, or clears the selection when the selected slot is pressed again.
pub fn apply_slot_selection(
    mut presses: MessageReader<SlotKeyPressed>,
    mut inventory: ResMut<Inventory>,
) {
    for press in presses.read() {
        let next = if inventory.selected() == Some(press.index) {
            None
        } else {
            Some(press.index)
        };

        match inventory.select(next) {
            Ok(()) => info!(target: "inventory", "Selected slot: {:?}", next),
            Err(err) => warn!(target: "inventory", "Ignoring slot key: {}", err),
        }
    }
}
