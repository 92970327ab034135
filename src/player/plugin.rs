//! Player plugin wiring input handling.
use bevy::prelude::*;

use crate::{
    core::plugin::TickSet,
    player::{
        components::LookMode,
        systems::{read_interaction_input, update_look_mode},
    },
};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LookMode>().add_systems(
            Update,
            (read_interaction_input, update_look_mode)
                .chain()
                .in_set(TickSet::Input),
        );
    }
}
