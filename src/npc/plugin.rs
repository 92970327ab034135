//! NPC plugin wiring trader spawning and cooldown expiry.
use bevy::prelude::*;

use crate::core::{deferred::DeferredQueue, plugin::TickSet};

use super::{
    components::NpcIdGenerator,
    systems::{expire_trade_cooldowns, spawn_traders},
    trade::CooldownExpired,
};

pub struct NpcPlugin;

impl Plugin for NpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NpcIdGenerator>()
            .init_resource::<DeferredQueue<CooldownExpired>>()
            .add_systems(Startup, spawn_traders)
            .add_systems(Update, expire_trade_cooldowns.in_set(TickSet::Lifecycle));
    }
}
