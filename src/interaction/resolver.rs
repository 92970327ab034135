//! Per-tick target resolution along the viewpoint ray.
use std::time::Duration;

use bevy::prelude::*;

use crate::{
    core::{
        config::{GameplaySettings, GrowthTimings},
        plugin::SimulationClock,
    },
    inventory::{
        components::{Inventory, HERB_SLOT},
        held_item::HeldItemKind,
    },
    npc::components::Trader,
    planter::components::PlanterPot,
    player::components::{LookMode, Player},
};

use super::{
    components::{
        CurrentTarget, Door, HitCategory, InteractionPrompt, InteractionTarget, InteractionVolume,
        PotAction, RayHit,
    },
    raycast::cast_ray,
};

/// Prompt height above a pot's origin.
const POT_PROMPT_HEIGHT: f32 = 0.8;
/// Prompt height above a trader's feet.
const NPC_PROMPT_HEIGHT: f32 = 2.3;

/// Read access to the state of candidates the ray passes through.
pub trait CandidateLookup {
    fn door(&self, entity: Entity) -> Option<&Door>;
    fn pot(&self, entity: Entity) -> Option<&PlanterPot>;
    fn trader(&self, entity: Entity) -> Option<&Trader>;
}

/// Player-side facts that gate eligibility.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext {
    pub held: HeldItemKind,
    pub sellable_goods: u32,
    pub now: Duration,
    pub growth: GrowthTimings,
}

/// Outcome of one resolution pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Resolution {
    pub target: InteractionTarget,
    pub progress: Option<f32>,
}

/// First pot action the player can take, in priority order soil, water, seed, harvest.
pub fn pot_action(pot: &PlanterPot, held: HeldItemKind) -> Option<PotAction> {
    if !pot.has_soil() && held == HeldItemKind::Soil {
        Some(PotAction::AddSoil)
    } else if pot.has_soil() && !pot.is_watered() && held == HeldItemKind::WateringCan {
        Some(PotAction::AddWater)
    } else if pot.is_watered() && !pot.has_seed() && held == HeldItemKind::SeedVial {
        Some(PotAction::AddSeed)
    } else if pot.is_mature() {
        Some(PotAction::Harvest)
    } else {
        None
    }
}

pub fn trader_eligible(trader: &Trader, sellable_goods: u32) -> bool {
    trader.can_trade() && sellable_goods > 0
}

/// Walks hits nearest first and picks at most one actionable target.
///
/// Doors, actionable pots, and eligible traders stop the scan. A growing pot with nothing to
/// do is remembered for its progress value while the scan continues past it.
pub fn resolve_target(
    hits: &[RayHit],
    lookup: &impl CandidateLookup,
    context: &ResolveContext,
) -> Resolution {
    let mut progress_pot: Option<(Entity, f32)> = None;

    for hit in hits {
        match hit.category {
            HitCategory::Door => {
                if lookup.door(hit.entity).is_some_and(|door| door.interactable) {
                    return Resolution {
                        target: InteractionTarget::Door(hit.entity),
                        progress: None,
                    };
                }
            }
            HitCategory::Pot => {
                let Some(pot) = lookup.pot(hit.entity) else {
                    continue;
                };
                if let Some(action) = pot_action(pot, context.held) {
                    return Resolution {
                        target: InteractionTarget::Pot(hit.entity, action),
                        progress: None,
                    };
                }
                if progress_pot.is_none() {
                    progress_pot = pot
                        .progress_percent(context.now, &context.growth)
                        .map(|percent| (hit.entity, percent));
                }
            }
            HitCategory::Npc => {
                if lookup
                    .trader(hit.entity)
                    .is_some_and(|trader| trader_eligible(trader, context.sellable_goods))
                {
                    return Resolution {
                        target: InteractionTarget::Npc(hit.entity),
                        progress: None,
                    };
                }
            }
        }
    }

    progress_pot
        .map(|(entity, percent)| Resolution {
            target: InteractionTarget::Pot(entity, PotAction::ProgressOnly),
            progress: Some(percent),
        })
        .unwrap_or_default()
}

struct QueryLookup<'a, 'w, 's> {
    doors: &'a Query<'w, 's, &'static Door>,
    pots: &'a Query<'w, 's, &'static PlanterPot>,
    traders: &'a Query<'w, 's, &'static Trader>,
}

impl CandidateLookup for QueryLookup<'_, '_, '_> {
    fn door(&self, entity: Entity) -> Option<&Door> {
        self.doors.get(entity).ok()
    }

    fn pot(&self, entity: Entity) -> Option<&PlanterPot> {
        self.pots.get(entity).ok()
    }

    fn trader(&self, entity: Entity) -> Option<&Trader> {
        self.traders.get(entity).ok()
    }
}

type VolumeQueryData = (
    Entity,
    &'static GlobalTransform,
    &'static InteractionVolume,
    Has<Door>,
    Has<PlanterPot>,
    Has<Trader>,
);

/// Casts the viewpoint ray and publishes the current target and prompt descriptor.
#[allow(clippy::too_many_arguments)]
pub fn resolve_interaction_target(
    look: Res<LookMode>,
    clock: Res<SimulationClock>,
    settings: Res<GameplaySettings>,
    inventory: Res<Inventory>,
    viewpoint: Query<&GlobalTransform, With<Player>>,
    volumes: Query<VolumeQueryData>,
    doors: Query<&'static Door>,
    pots: Query<&'static PlanterPot>,
    traders: Query<&'static Trader>,
    transforms: Query<&GlobalTransform>,
    mut current: ResMut<CurrentTarget>,
    mut prompt: ResMut<InteractionPrompt>,
) {
    if !look.engaged {
        current.set_if_neq(CurrentTarget::default());
        prompt.set_if_neq(InteractionPrompt::default());
        return;
    }

    let Ok(eye) = viewpoint.single() else {
        current.set_if_neq(CurrentTarget::default());
        prompt.set_if_neq(InteractionPrompt::default());
        return;
    };

    let candidates = volumes
        .iter()
        .filter_map(|(entity, transform, volume, is_door, is_pot, is_trader)| {
            let category = if is_door {
                HitCategory::Door
            } else if is_pot {
                HitCategory::Pot
            } else if is_trader {
                HitCategory::Npc
            } else {
                return None;
            };
            Some((entity, category, transform, volume))
        });
    let hits = cast_ray(eye.translation(), eye.forward(), settings.reach, candidates);

    let context = ResolveContext {
        held: inventory.held_item(),
        sellable_goods: inventory.count(HERB_SLOT),
        now: clock.now(),
        growth: settings.growth,
    };
    let lookup = QueryLookup {
        doors: &doors,
        pots: &pots,
        traders: &traders,
    };
    let resolution = resolve_target(&hits, &lookup, &context);

    let anchor = match resolution.target {
        InteractionTarget::None => None,
        InteractionTarget::Door(entity) => doors
            .get(entity)
            .ok()
            .and_then(|door| door.handle)
            .and_then(|handle| transforms.get(handle).ok())
            .map(GlobalTransform::translation)
            .or_else(|| volume_center(&volumes, entity)),
        InteractionTarget::Pot(entity, _) => transforms
            .get(entity)
            .ok()
            .map(|transform| transform.translation() + Vec3::Y * POT_PROMPT_HEIGHT),
        InteractionTarget::Npc(entity) => transforms
            .get(entity)
            .ok()
            .map(|transform| transform.translation() + Vec3::Y * NPC_PROMPT_HEIGHT),
    };

    current.set_if_neq(CurrentTarget {
        target: resolution.target,
    });
    prompt.set_if_neq(InteractionPrompt {
        text: resolution.target.prompt(),
        anchor,
        progress: resolution.progress,
    });
}

fn volume_center(volumes: &Query<VolumeQueryData>, entity: Entity) -> Option<Vec3> {
    let (_, transform, volume, ..) = volumes.get(entity).ok()?;
    let offset = match *volume {
        InteractionVolume::Box { offset, .. } | InteractionVolume::Sphere { offset, .. } => offset,
    };
    Some(transform.transform_point(offset))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[derive(Default)]
    struct FakeWorld {
        doors: HashMap<Entity, Door>,
        pots: HashMap<Entity, PlanterPot>,
        traders: HashMap<Entity, Trader>,
    }

    impl CandidateLookup for FakeWorld {
        fn door(&self, entity: Entity) -> Option<&Door> {
            self.doors.get(&entity)
        }

        fn pot(&self, entity: Entity) -> Option<&PlanterPot> {
            self.pots.get(&entity)
        }

        fn trader(&self, entity: Entity) -> Option<&Trader> {
            self.traders.get(&entity)
        }
    }

    fn timings() -> GrowthTimings {
        GrowthTimings {
            sprout: Duration::from_secs(10),
            maturity: Duration::from_secs(20),
        }
    }

    fn context(held: HeldItemKind, sellable_goods: u32, now_secs: u64) -> ResolveContext {
        ResolveContext {
            held,
            sellable_goods,
            now: Duration::from_secs(now_secs),
            growth: timings(),
        }
    }

    fn hit(entity: Entity, category: HitCategory, distance: f32) -> RayHit {
        RayHit {
            entity,
            category,
            distance,
        }
    }

    fn soiled() -> PlanterPot {
        let mut pot = PlanterPot::default();
        pot.add_soil().expect("soil");
        pot
    }

    fn watered() -> PlanterPot {
        let mut pot = soiled();
        pot.water().expect("water");
        pot
    }

    fn seeded(at_secs: u64) -> PlanterPot {
        let mut pot = watered();
        pot.add_seed(Duration::from_secs(at_secs)).expect("seed");
        pot
    }

    fn mature() -> PlanterPot {
        let mut pot = seeded(0);
        pot.advance(Duration::from_secs(20), &timings());
        pot
    }

    fn entities(count: usize) -> Vec<Entity> {
        let mut world = World::new();
        (0..count).map(|_| world.spawn_empty().id()).collect()
    }

    #[test]
    fn pot_actions_follow_lifecycle_and_held_item() {
        use HeldItemKind as Held;

        assert_eq!(pot_action(&PlanterPot::default(), Held::Soil), Some(PotAction::AddSoil));
        assert_eq!(pot_action(&PlanterPot::default(), Held::WateringCan), None);
        assert_eq!(pot_action(&soiled(), Held::Soil), None);
        assert_eq!(pot_action(&soiled(), Held::WateringCan), Some(PotAction::AddWater));
        assert_eq!(pot_action(&watered(), Held::SeedVial), Some(PotAction::AddSeed));
        assert_eq!(pot_action(&watered(), Held::WateringCan), None);
        assert_eq!(pot_action(&seeded(0), Held::SeedVial), None);
        assert_eq!(pot_action(&mature(), Held::None), Some(PotAction::Harvest));
        assert_eq!(pot_action(&mature(), Held::Soil), Some(PotAction::Harvest));
    }

    #[test]
    fn nearer_door_wins_over_mature_pot() {
        let ids = entities(2);
        let (door, pot) = (ids[0], ids[1]);
        let mut world = FakeWorld::default();
        world.doors.insert(door, Door::new());
        world.pots.insert(pot, mature());

        let hits = [hit(door, HitCategory::Door, 1.0), hit(pot, HitCategory::Pot, 2.0)];
        let resolution = resolve_target(&hits, &world, &context(HeldItemKind::None, 0, 30));
        assert_eq!(resolution.target, InteractionTarget::Door(door));

        let hits = [hit(pot, HitCategory::Pot, 1.0), hit(door, HitCategory::Door, 2.0)];
        let resolution = resolve_target(&hits, &world, &context(HeldItemKind::None, 0, 30));
        assert_eq!(resolution.target, InteractionTarget::Pot(pot, PotAction::Harvest));
    }

    #[test]
    fn non_interactable_door_is_skipped() {
        let ids = entities(2);
        let (door, pot) = (ids[0], ids[1]);
        let mut world = FakeWorld::default();
        world.doors.insert(
            door,
            Door {
                interactable: false,
                ..Door::new()
            },
        );
        world.pots.insert(pot, PlanterPot::default());

        let hits = [hit(door, HitCategory::Door, 1.0), hit(pot, HitCategory::Pot, 2.0)];
        let resolution = resolve_target(&hits, &world, &context(HeldItemKind::Soil, 0, 0));
        assert_eq!(resolution.target, InteractionTarget::Pot(pot, PotAction::AddSoil));
    }

    #[test]
    fn growing_pot_reports_progress_but_does_not_block() {
        let ids = entities(3);
        let (growing, npc, far_pot) = (ids[0], ids[1], ids[2]);
        let mut world = FakeWorld::default();
        world.pots.insert(growing, seeded(0));
        world.traders.insert(npc, Trader::new());
        world.pots.insert(far_pot, seeded(0));

        let hits = [
            hit(growing, HitCategory::Pot, 1.0),
            hit(npc, HitCategory::Npc, 2.0),
        ];
        let resolution = resolve_target(&hits, &world, &context(HeldItemKind::None, 1, 5));
        assert_eq!(resolution.target, InteractionTarget::Npc(npc));
        assert_eq!(resolution.progress, None);

        let hits = [
            hit(growing, HitCategory::Pot, 1.0),
            hit(npc, HitCategory::Npc, 2.0),
            hit(far_pot, HitCategory::Pot, 3.0),
        ];
        let resolution = resolve_target(&hits, &world, &context(HeldItemKind::None, 0, 5));
        assert_eq!(
            resolution.target,
            InteractionTarget::Pot(growing, PotAction::ProgressOnly)
        );
        assert_eq!(resolution.progress, Some(25.0));
        assert!(!resolution.target.is_actionable());
    }

    #[test]
    fn trader_needs_goods_and_no_cooldown() {
        let ids = entities(1);
        let npc = ids[0];
        let mut world = FakeWorld::default();
        world.traders.insert(npc, Trader::new());
        let hits = [hit(npc, HitCategory::Npc, 1.0)];

        let none = resolve_target(&hits, &world, &context(HeldItemKind::None, 0, 0));
        assert_eq!(none, Resolution::default());

        let some = resolve_target(&hits, &world, &context(HeldItemKind::None, 2, 0));
        assert_eq!(some.target, InteractionTarget::Npc(npc));

        world
            .traders
            .get_mut(&npc)
            .expect("trader present")
            .begin_cooldown();
        let cooling = resolve_target(&hits, &world, &context(HeldItemKind::None, 2, 0));
        assert_eq!(cooling.target, InteractionTarget::None);
    }

    #[test]
    fn empty_ray_resolves_to_nothing() {
        let world = FakeWorld::default();
        let resolution = resolve_target(&[], &world, &context(HeldItemKind::Soil, 3, 0));
        assert_eq!(resolution, Resolution::default());
    }
}
