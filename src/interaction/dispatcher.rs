//! Commits the resolved action when the player asks to use it.
use bevy::prelude::*;

use crate::{
    core::{config::GameplaySettings, deferred::DeferredQueue, plugin::SimulationClock},
    inventory::components::{Inventory, InventoryError, HERB_SLOT},
    npc::{
        components::{Identity, Trader},
        trade::{sell_to, CooldownExpired},
    },
    planter::components::PlanterPot,
};

use super::{
    components::{CurrentTarget, Door, HitCategory, InteractionPrompt, InteractionTarget, PotAction},
    errors::InteractionError,
    resolver::pot_action,
};

/// Which input produced a use request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UseSource {
    /// The interact key (E).
    Key,
    /// A primary click while looking around.
    Pointer,
}

impl UseSource {
    /// Doors answer to clicks; pots and traders to the interact key.
    pub fn accepts(self, target: InteractionTarget) -> bool {
        match target {
            InteractionTarget::None => false,
            InteractionTarget::Door(_) => self == Self::Pointer,
            InteractionTarget::Pot(..) | InteractionTarget::Npc(_) => self == Self::Key,
        }
    }
}

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct UseRequested {
    pub source: UseSource,
}

/// A state change the dispatcher just made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommittedAction {
    DoorToggled { open: bool },
    SoilAdded,
    Watered,
    SeedPlanted,
    Harvested,
    Sold { reward: u32 },
}

/// Broadcast after every successful use so feedback can react.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionCommitted {
    pub entity: Entity,
    pub action: CommittedAction,
}

/// Applies at most one action per tick against the resolver's current target.
///
/// Preconditions are checked again here since the world may have moved on since
/// the target was resolved. A failed use changes nothing and leaves the prompt up.
#[allow(clippy::too_many_arguments)]
pub fn dispatch_use_action(
    mut requests: MessageReader<UseRequested>,
    clock: Res<SimulationClock>,
    settings: Res<GameplaySettings>,
    mut current: ResMut<CurrentTarget>,
    mut prompt: ResMut<InteractionPrompt>,
    mut inventory: ResMut<Inventory>,
    mut cooldowns: ResMut<DeferredQueue<CooldownExpired>>,
    mut doors: Query<(&mut Door, &mut Transform)>,
    mut pots: Query<&mut PlanterPot>,
    mut traders: Query<(&mut Trader, Option<&Identity>)>,
    mut committed: MessageWriter<ActionCommitted>,
) {
    let Some(request) = requests.read().next().copied() else {
        return;
    };
    requests.clear();

    let target = current.target;
    if !request.source.accepts(target) {
        debug!(
            target: "interaction",
            "{:?} use ignored for {:?}", request.source, target
        );
        return;
    }

    let outcome = match target {
        InteractionTarget::None => Err(InteractionError::NoTarget),
        InteractionTarget::Door(entity) => doors
            .get_mut(entity)
            .map_err(|_| InteractionError::MissingEntity {
                category: HitCategory::Door,
            })
            .map(|(mut door, mut transform)| {
                let open = door.toggle();
                transform.rotation = door.hinge_rotation();
                info!(
                    target: "interaction",
                    "Door {:?} {}", entity, if open { "opened" } else { "closed" }
                );
                (entity, CommittedAction::DoorToggled { open })
            }),
        InteractionTarget::Pot(entity, action) => {
            match pots.get_mut(entity) {
                Ok(mut pot) => apply_pot_action(&mut pot, action, &mut inventory, &clock)
                    .map(|committed| (entity, committed)),
                Err(_) => Err(InteractionError::MissingEntity {
                    category: HitCategory::Pot,
                }),
            }
        }
        InteractionTarget::Npc(entity) => match traders.get_mut(entity) {
            Ok((mut trader, identity)) => sell_to(
                entity,
                &mut trader,
                &mut inventory,
                &mut cooldowns,
                &settings.trade,
                clock.now(),
            )
            .map(|receipt| {
                let name = identity.map_or_else(|| "trader".to_owned(), ToString::to_string);
                info!(
                    target: "trade",
                    "Sold a herb to {} for {} (herbs left {}, cash {}); buying again at {:.1}s",
                    name,
                    receipt.reward,
                    receipt.herbs_left,
                    receipt.cash,
                    receipt.available_at.as_secs_f32()
                );
                (
                    entity,
                    CommittedAction::Sold {
                        reward: receipt.reward,
                    },
                )
            })
            .map_err(InteractionError::from),
            Err(_) => Err(InteractionError::MissingEntity {
                category: HitCategory::Npc,
            }),
        },
    };

    match outcome {
        Ok((entity, action)) => {
            prompt.hide();
            current.target = InteractionTarget::None;
            committed.write(ActionCommitted { entity, action });
        }
        Err(err) => debug!(target: "interaction", "Use rejected: {}", err),
    }
}

fn apply_pot_action(
    pot: &mut PlanterPot,
    action: PotAction,
    inventory: &mut Inventory,
    clock: &SimulationClock,
) -> Result<CommittedAction, InteractionError> {
    if action == PotAction::ProgressOnly {
        return Err(InteractionError::NotActionable);
    }
    if pot_action(pot, inventory.held_item()) != Some(action) {
        return Err(InteractionError::StaleTarget { expected: action });
    }

    let committed = match action {
        PotAction::AddSoil => {
            pot.add_soil()?;
            CommittedAction::SoilAdded
        }
        PotAction::AddWater => {
            pot.water()?;
            CommittedAction::Watered
        }
        PotAction::AddSeed => {
            pot.add_seed(clock.now())?;
            CommittedAction::SeedPlanted
        }
        PotAction::Harvest => {
            if !inventory.slot(HERB_SLOT).is_some_and(|slot| slot.has_icon()) {
                return Err(InventoryError::NoItemDefined { index: HERB_SLOT }.into());
            }
            pot.harvest()?;
            let herbs = inventory.add_count(HERB_SLOT, 1)?;
            info!(target: "planter", "Harvested a herb ({} held)", herbs);
            CommittedAction::Harvested
        }
        PotAction::ProgressOnly => return Err(InteractionError::NotActionable),
    };
    info!(target: "planter", "Pot action committed: {:?}", committed);
    Ok(committed)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{
        inventory::components::{SEED_VIAL_SLOT, SOIL_SLOT, WATERING_CAN_SLOT},
        interaction::components::DOOR_OPEN_ANGLE,
    };

    fn dispatch_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<SimulationClock>()
            .init_resource::<GameplaySettings>()
            .init_resource::<CurrentTarget>()
            .init_resource::<InteractionPrompt>()
            .insert_resource(Inventory::with_starting_stock())
            .init_resource::<DeferredQueue<CooldownExpired>>()
            .add_message::<UseRequested>()
            .add_message::<ActionCommitted>()
            .add_systems(Update, dispatch_use_action);
        app
    }

    fn target(app: &mut App, target: InteractionTarget) {
        app.world_mut().resource_mut::<CurrentTarget>().target = target;
        let prompt = InteractionPrompt {
            text: target.prompt(),
            anchor: Some(Vec3::ZERO),
            progress: None,
        };
        *app.world_mut().resource_mut::<InteractionPrompt>() = prompt;
    }

    fn use_with(app: &mut App, source: UseSource) {
        app.world_mut().write_message(UseRequested { source });
        app.update();
    }

    fn committed(app: &mut App) -> Vec<ActionCommitted> {
        let mut messages = app.world_mut().resource_mut::<Messages<ActionCommitted>>();
        messages.drain().collect()
    }

    fn select(app: &mut App, slot: usize) {
        app.world_mut()
            .resource_mut::<Inventory>()
            .select(Some(slot))
            .expect("valid slot");
    }

    #[test]
    fn click_toggles_door_and_hides_prompt() {
        let mut app = dispatch_app();
        let door = app
            .world_mut()
            .spawn((Door::new(), Transform::default()))
            .id();
        target(&mut app, InteractionTarget::Door(door));

        use_with(&mut app, UseSource::Key);
        assert!(!app.world().get::<Door>(door).is_some_and(|door| door.open));
        assert!(app.world().resource::<InteractionPrompt>().is_visible());

        use_with(&mut app, UseSource::Pointer);
        assert!(app.world().get::<Door>(door).is_some_and(|door| door.open));
        assert_eq!(
            app.world().get::<Transform>(door).map(|t| t.rotation),
            Some(Quat::from_rotation_y(DOOR_OPEN_ANGLE))
        );
        assert!(!app.world().resource::<InteractionPrompt>().is_visible());
        assert_eq!(
            app.world().resource::<CurrentTarget>().target,
            InteractionTarget::None
        );
        assert_eq!(
            committed(&mut app),
            vec![ActionCommitted {
                entity: door,
                action: CommittedAction::DoorToggled { open: true },
            }]
        );
    }

    #[test]
    fn stale_pot_target_changes_nothing() {
        let mut app = dispatch_app();
        let pot = app.world_mut().spawn(PlanterPot::default()).id();
        // Resolved while holding soil, but the player switched to the watering can since.
        select(&mut app, WATERING_CAN_SLOT);
        target(&mut app, InteractionTarget::Pot(pot, PotAction::AddSoil));

        use_with(&mut app, UseSource::Key);
        assert_eq!(app.world().get::<PlanterPot>(pot), Some(&PlanterPot::default()));
        assert!(app.world().resource::<InteractionPrompt>().is_visible());
        assert!(committed(&mut app).is_empty());
    }

    #[test]
    fn pot_actions_commit_in_order() {
        let mut app = dispatch_app();
        let pot = app.world_mut().spawn(PlanterPot::default()).id();

        let steps = [
            (SOIL_SLOT, PotAction::AddSoil, CommittedAction::SoilAdded),
            (WATERING_CAN_SLOT, PotAction::AddWater, CommittedAction::Watered),
            (SEED_VIAL_SLOT, PotAction::AddSeed, CommittedAction::SeedPlanted),
        ];
        for (slot, action, expected) in steps {
            select(&mut app, slot);
            target(&mut app, InteractionTarget::Pot(pot, action));
            use_with(&mut app, UseSource::Key);
            assert_eq!(
                committed(&mut app),
                vec![ActionCommitted {
                    entity: pot,
                    action: expected,
                }]
            );
        }
        let planted = app.world().get::<PlanterPot>(pot).and_then(PlanterPot::growth_start);
        assert!(planted.is_some());

        // Tools stay in the hotbar.
        let inventory = app.world().resource::<Inventory>();
        assert_eq!(inventory.count(SOIL_SLOT), 1);
        assert_eq!(inventory.count(SEED_VIAL_SLOT), 1);
    }

    #[test]
    fn one_action_per_tick() {
        let mut app = dispatch_app();
        let door = app
            .world_mut()
            .spawn((Door::new(), Transform::default()))
            .id();
        target(&mut app, InteractionTarget::Door(door));

        app.world_mut().write_message(UseRequested {
            source: UseSource::Pointer,
        });
        app.world_mut().write_message(UseRequested {
            source: UseSource::Pointer,
        });
        app.update();

        assert!(app.world().get::<Door>(door).is_some_and(|door| door.open));
        assert_eq!(committed(&mut app).len(), 1);
    }

    #[test]
    fn sale_commits_and_starts_cooldown() {
        let mut app = dispatch_app();
        let npc = app.world_mut().spawn(Trader::new()).id();
        app.world_mut()
            .resource_mut::<Inventory>()
            .add_count(HERB_SLOT, 1)
            .expect("herb slot defined");
        target(&mut app, InteractionTarget::Npc(npc));

        use_with(&mut app, UseSource::Key);
        assert_eq!(
            committed(&mut app),
            vec![ActionCommitted {
                entity: npc,
                action: CommittedAction::Sold { reward: 50 },
            }]
        );
        assert!(app.world().get::<Trader>(npc).is_some_and(Trader::in_cooldown));
        assert_eq!(
            app.world()
                .resource::<DeferredQueue<CooldownExpired>>()
                .len(),
            1
        );

        // Immediate repeat against the same stale target fails.
        app.world_mut()
            .resource_mut::<Inventory>()
            .add_count(HERB_SLOT, 1)
            .expect("herb slot defined");
        target(&mut app, InteractionTarget::Npc(npc));
        app.world_mut()
            .resource_mut::<SimulationClock>()
            .tick(Duration::from_secs(1));
        use_with(&mut app, UseSource::Key);
        assert!(committed(&mut app).is_empty());
        assert_eq!(app.world().resource::<Inventory>().count(HERB_SLOT), 1);
    }
}
