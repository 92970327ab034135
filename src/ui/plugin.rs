// src/ui/plugin.rs
//
// UiPlugin coordinates hotbar and prompt systems and resources.

use bevy::prelude::*;

use crate::{core::plugin::TickSet, inventory::components::Inventory};

use super::hotbar::components::HotbarIcons;
use super::hotbar::systems::{load_hotbar_icons, refresh_hotbar, spawn_hotbar};
use super::prompt::systems::{spawn_prompt_ui, update_prompt_ui};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        info!("UiPlugin registered");

        app.init_resource::<HotbarIcons>()
            .add_systems(Startup, (load_hotbar_icons, spawn_hotbar, spawn_prompt_ui))
            .add_systems(
                Update,
                (
                    refresh_hotbar.run_if(resource_changed::<Inventory>),
                    update_prompt_ui,
                )
                    .in_set(TickSet::Present),
            );
    }
}
