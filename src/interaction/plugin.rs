//! Interaction plugin: resolves the target each tick and commits use requests.
use bevy::prelude::*;

use crate::core::plugin::TickSet;

use super::{
    components::{CurrentTarget, InteractionPrompt},
    dispatcher::{dispatch_use_action, ActionCommitted, UseRequested},
    resolver::resolve_interaction_target,
};

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CurrentTarget>()
            .init_resource::<InteractionPrompt>()
            .add_message::<UseRequested>()
            .add_message::<ActionCommitted>()
            .add_systems(
                Update,
                (
                    resolve_interaction_target.in_set(TickSet::Resolve),
                    dispatch_use_action.in_set(TickSet::Dispatch),
                ),
            );
    }
}
