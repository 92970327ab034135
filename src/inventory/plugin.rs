//! Inventory plugin wiring the hotbar store and held-item synchronisation.
use bevy::prelude::*;

use crate::{core::plugin::TickSet, player::systems::read_interaction_input};

use super::{
    components::Inventory,
    events::SlotKeyPressed,
    held_item::{sync_held_item, HeldItemState, HeldItemVisuals},
    systems::apply_slot_selection,
};

pub struct InventoryPlugin;

impl Plugin for InventoryPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Inventory::with_starting_stock())
            .init_resource::<HeldItemState>()
            .init_resource::<HeldItemVisuals>()
            .add_message::<SlotKeyPressed>()
            .add_systems(
                Update,
                (apply_slot_selection, sync_held_item)
                    .chain()
                    .after(read_interaction_input)
                    .in_set(TickSet::Input),
            );
    }
}
