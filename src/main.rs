use bevy::prelude::*;

mod core;
mod feedback;
mod interaction;
mod inventory;
mod npc;
mod planter;
mod player;
mod ui;
mod world;

use crate::{
    core::CorePlugin, feedback::FeedbackPlugin, interaction::InteractionPlugin,
    inventory::InventoryPlugin, npc::NpcPlugin, planter::PlanterPlugin, player::PlayerPlugin,
    ui::UiPlugin, world::WorldPlugin,
};

fn main() {
    App::new()
        .add_plugins((
            DefaultPlugins,
            CorePlugin,
            PlayerPlugin,
            WorldPlugin,
            InventoryPlugin,
            PlanterPlugin,
            NpcPlugin,
            InteractionPlugin,
            FeedbackPlugin, // Reads ActionCommitted registered by InteractionPlugin
            UiPlugin,
        ))
        .run();
}
