//! Planter plugin wiring pot spawning, growth, and visual refresh.
use bevy::prelude::*;

use crate::core::plugin::TickSet;

use super::{
    systems::{advance_pot_growth, refresh_pot_visuals, spawn_planter_pots},
    visuals::PlanterVisuals,
};

pub struct PlanterPlugin;

impl Plugin for PlanterPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlanterVisuals>()
            .add_systems(Startup, spawn_planter_pots)
            .add_systems(Update, advance_pot_growth.in_set(TickSet::Lifecycle))
            .add_systems(Update, refresh_pot_visuals.in_set(TickSet::Present));
    }
}
