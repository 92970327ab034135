//! Systems spawning pots, advancing growth, and keeping pot visuals in step.
use bevy::prelude::*;

use crate::{
    core::{config::GameplaySettings, plugin::SimulationClock},
    interaction::components::InteractionVolume,
};

use super::{
    components::{PlanterPot, PotVisuals},
    visuals::{PlantVisual, PlanterVisuals, SoilVisual, POT_HEIGHT, POT_RADIUS_TOP},
};

const POT_POSITIONS: [Vec3; 4] = [
    Vec3::new(-2.25, 0.0, 0.0),
    Vec3::new(-0.75, 0.0, 0.0),
    Vec3::new(0.75, 0.0, 0.0),
    Vec3::new(2.25, 0.0, 0.0),
];

/// Spawns an empty row of pots in front of the player's start.
pub fn spawn_planter_pots(mut commands: Commands, visuals: Res<PlanterVisuals>) {
    for (index, position) in POT_POSITIONS.into_iter().enumerate() {
        commands.spawn((
            Mesh3d(visuals.pot_mesh.clone()),
            MeshMaterial3d(visuals.pot_material.clone()),
            Transform::from_translation(position + Vec3::Y * POT_HEIGHT * 0.5),
            PlanterPot::default(),
            PotVisuals::default(),
            InteractionVolume::cuboid(
                Vec3::ZERO,
                Vec3::new(POT_RADIUS_TOP, POT_HEIGHT * 0.5, POT_RADIUS_TOP),
            ),
            Name::new(format!("Planter Pot {}", index + 1)),
        ));
    }
    info!(target: "planter", "Spawned {} planter pots", POT_POSITIONS.len());
}

/// Moves every seeded pot to the stage its elapsed time has reached.
pub fn advance_pot_growth(
    clock: Res<SimulationClock>,
    settings: Res<GameplaySettings>,
    mut pots: Query<(Entity, &mut PlanterPot)>,
) {
    let now = clock.now();
    for (entity, mut pot) in &mut pots {
        if !pot.is_growing() {
            continue;
        }
        // Only flag the pot as changed when the stage actually moves.
        if let Some(stage) = pot.bypass_change_detection().advance(now, &settings.growth) {
            pot.set_changed();
            info!(target: "planter", "Pot {:?} reached {:?}", entity, stage);
        }
    }
}

/// Reconciles soil and plant children with each changed pot's state.
///
/// The plant mesh is replaced once per stage increase and removed with the soil on harvest.
pub fn refresh_pot_visuals(
    mut commands: Commands,
    visuals: Res<PlanterVisuals>,
    mut pots: Query<(Entity, &PlanterPot, &mut PotVisuals), Changed<PlanterPot>>,
    mut materials: Query<&mut MeshMaterial3d<StandardMaterial>, With<SoilVisual>>,
) {
    for (entity, pot, mut attached) in &mut pots {
        match (pot.has_soil(), attached.soil) {
            (true, None) => {
                let soil = commands
                    .spawn((
                        Mesh3d(visuals.soil_mesh.clone()),
                        MeshMaterial3d(visuals.soil_material(pot.is_watered())),
                        visuals.soil_transform(),
                        SoilVisual,
                    ))
                    .id();
                commands.entity(entity).add_child(soil);
                attached.soil = Some(soil);
                attached.soil_wet = pot.is_watered();
            }
            (true, Some(soil)) if attached.soil_wet != pot.is_watered() => {
                if let Ok(mut material) = materials.get_mut(soil) {
                    material.0 = visuals.soil_material(pot.is_watered());
                }
                attached.soil_wet = pot.is_watered();
            }
            (false, Some(soil)) => {
                commands.entity(soil).despawn();
                attached.soil = None;
                attached.soil_wet = false;
            }
            _ => {}
        }

        let stage = pot.growth_stage();
        if stage == attached.plant_stage {
            continue;
        }
        if let Some(plant) = attached.plant.take() {
            commands.entity(plant).despawn();
        }
        attached.plant_stage = stage;
        if let Some(stage) = stage {
            let model = visuals.stage(stage);
            let plant = commands
                .spawn((
                    Mesh3d(model.mesh.clone()),
                    MeshMaterial3d(model.material.clone()),
                    model.transform,
                    PlantVisual { stage },
                ))
                .id();
            commands.entity(entity).add_child(plant);
            attached.plant = Some(plant);
            debug!(target: "planter", "Pot {:?} now shows {:?}", entity, stage);
        }
    }
}
