//! WorldPlugin coordinates environment setup and first-person camera controls.
use bevy::prelude::*;

use crate::{
    core::plugin::TickSet,
    world::systems::{
        first_person_mouse_look, first_person_walk, spawn_houses, spawn_world_environment,
    },
};

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_world_environment, spawn_houses))
            .add_systems(
                Update,
                (first_person_mouse_look, first_person_walk).in_set(TickSet::Input),
            );
    }
}
