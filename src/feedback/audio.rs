//! One-shot sound cues for committed actions.
use std::collections::HashMap;

use bevy::prelude::*;

use crate::{
    core::{
        assets::load_if_present, config::GameplaySettings, deferred::DeferredQueue,
        plugin::SimulationClock,
    },
    interaction::dispatcher::{ActionCommitted, CommittedAction},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SfxCue {
    Soil,
    Water,
    Seed,
    Harvest,
    Door,
    SaleChime,
    CashRegister,
}

impl SfxCue {
    pub const ALL: [SfxCue; 7] = [
        Self::Soil,
        Self::Water,
        Self::Seed,
        Self::Harvest,
        Self::Door,
        Self::SaleChime,
        Self::CashRegister,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Self::Soil => "audio/soil.ogg",
            Self::Water => "audio/water.ogg",
            Self::Seed => "audio/seed.ogg",
            Self::Harvest => "audio/harvest.ogg",
            Self::Door => "audio/door.ogg",
            Self::SaleChime => "audio/sale_chime.ogg",
            Self::CashRegister => "audio/cash_register.ogg",
        }
    }

    /// The immediate cue and, for sales, the follow-up cue.
    pub fn for_action(action: CommittedAction) -> (Self, Option<Self>) {
        match action {
            CommittedAction::DoorToggled { .. } => (Self::Door, None),
            CommittedAction::SoilAdded => (Self::Soil, None),
            CommittedAction::Watered => (Self::Water, None),
            CommittedAction::SeedPlanted => (Self::Seed, None),
            CommittedAction::Harvested => (Self::Harvest, None),
            CommittedAction::Sold { .. } => (Self::SaleChime, Some(Self::CashRegister)),
        }
    }
}

/// Request to play a cue now.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaySfx {
    pub cue: SfxCue,
}

/// Handles for the cue files found on disk.
#[derive(Resource, Default)]
pub struct SfxLibrary {
    handles: HashMap<SfxCue, Handle<AudioSource>>,
}

impl SfxLibrary {
    pub fn get(&self, cue: SfxCue) -> Option<&Handle<AudioSource>> {
        self.handles.get(&cue)
    }
}

pub fn load_sfx_library(asset_server: Res<AssetServer>, mut library: ResMut<SfxLibrary>) {
    library.handles = SfxCue::ALL
        .into_iter()
        .filter_map(|cue| load_if_present(&asset_server, cue.path()).map(|handle| (cue, handle)))
        .collect();
    info!("Loaded {} of {} sound cues", library.handles.len(), SfxCue::ALL.len());
}

/// Plays the first cue for each committed action and schedules any follow-up.
pub fn queue_action_cues(
    mut committed: MessageReader<ActionCommitted>,
    clock: Res<SimulationClock>,
    settings: Res<GameplaySettings>,
    mut delayed: ResMut<DeferredQueue<SfxCue>>,
    mut cues: MessageWriter<PlaySfx>,
) {
    for event in committed.read() {
        let (now, later) = SfxCue::for_action(event.action);
        cues.write(PlaySfx { cue: now });
        if let Some(cue) = later {
            delayed.schedule(clock.now(), settings.feedback.second_cue_delay, cue);
        }
    }
}

pub fn release_delayed_cues(
    clock: Res<SimulationClock>,
    mut delayed: ResMut<DeferredQueue<SfxCue>>,
    mut cues: MessageWriter<PlaySfx>,
) {
    for cue in delayed.drain_due(clock.now()) {
        cues.write(PlaySfx { cue });
    }
}

/// Spawns a self-despawning player per cue; cues without a file are skipped.
pub fn play_sfx(mut commands: Commands, mut cues: MessageReader<PlaySfx>, library: Res<SfxLibrary>) {
    for PlaySfx { cue } in cues.read() {
        let Some(handle) = library.get(*cue) else {
            debug!("No audio for {:?}; skipping", cue);
            continue;
        };
        commands.spawn((AudioPlayer::new(handle.clone()), PlaybackSettings::DESPAWN));
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn cue_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<SimulationClock>()
            .init_resource::<GameplaySettings>()
            .init_resource::<DeferredQueue<SfxCue>>()
            .add_message::<ActionCommitted>()
            .add_message::<PlaySfx>()
            .add_systems(Update, (queue_action_cues, release_delayed_cues).chain());
        app
    }

    fn played(app: &mut App) -> Vec<SfxCue> {
        app.world_mut()
            .resource_mut::<Messages<PlaySfx>>()
            .drain()
            .map(|sfx| sfx.cue)
            .collect()
    }

    #[test]
    fn sale_plays_chime_then_register_after_delay() {
        let mut app = cue_app();
        let npc = app.world_mut().spawn_empty().id();
        app.world_mut().write_message(ActionCommitted {
            entity: npc,
            action: CommittedAction::Sold { reward: 50 },
        });
        app.update();
        assert_eq!(played(&mut app), vec![SfxCue::SaleChime]);

        app.world_mut()
            .resource_mut::<SimulationClock>()
            .tick(Duration::from_millis(200));
        app.update();
        assert!(played(&mut app).is_empty());

        app.world_mut()
            .resource_mut::<SimulationClock>()
            .tick(Duration::from_millis(150));
        app.update();
        assert_eq!(played(&mut app), vec![SfxCue::CashRegister]);
    }

    #[test]
    fn every_action_has_a_cue() {
        assert_eq!(
            SfxCue::for_action(CommittedAction::DoorToggled { open: false }),
            (SfxCue::Door, None)
        );
        assert_eq!(
            SfxCue::for_action(CommittedAction::Harvested),
            (SfxCue::Harvest, None)
        );
    }

    #[test]
    fn missing_audio_is_skipped() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<SfxLibrary>()
            .add_message::<PlaySfx>()
            .add_systems(Update, play_sfx);
        app.world_mut().write_message(PlaySfx { cue: SfxCue::Door });
        app.update();

        let mut players = app.world_mut().query::<&AudioPlayer>();
        assert_eq!(players.iter(app.world()).count(), 0);
    }
}
