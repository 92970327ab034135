//! Feedback plugin wiring sound cues and sale effects.
use bevy::prelude::*;

use crate::core::{deferred::DeferredQueue, plugin::TickSet};

use super::{
    audio::{
        load_sfx_library, play_sfx, queue_action_cues, release_delayed_cues, PlaySfx, SfxCue,
        SfxLibrary,
    },
    effects::{animate_particle_bursts, fade_highlights, spawn_sale_effects, EffectAssets},
};

pub struct FeedbackPlugin;

impl Plugin for FeedbackPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SfxLibrary>()
            .init_resource::<DeferredQueue<SfxCue>>()
            .init_resource::<EffectAssets>()
            .add_message::<PlaySfx>()
            .add_systems(Startup, load_sfx_library)
            .add_systems(
                Update,
                (
                    (queue_action_cues, release_delayed_cues, play_sfx).chain(),
                    (spawn_sale_effects, animate_particle_bursts, fade_highlights).chain(),
                )
                    .in_set(TickSet::Present),
            );
    }
}
