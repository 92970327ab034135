//! CorePlugin wires the simulation clock, tick ordering, and gameplay settings.
use bevy::prelude::*;
#[cfg(feature = "core_debug")]
use bevy::time::TimerMode;
use std::time::Duration;

use super::config::GameplaySettings;

const MIN_TIME_SCALE: f32 = 0.001;
const MAX_TIME_SCALE: f32 = 100.0;

#[cfg(feature = "core_debug")]
#[derive(Resource)]
struct DebugTickTimer {
    timer: Timer,
}

#[cfg(feature = "core_debug")]
impl Default for DebugTickTimer {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(1.0, TimerMode::Repeating),
        }
    }
}

/// Ordered phases of one simulation tick.
///
/// Lifecycle updates always finish before the resolver looks at the world, and
/// the dispatcher only ever acts on the resolver's result from the same tick.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickSet {
    Clock,
    Input,
    Lifecycle,
    Resolve,
    Dispatch,
    Present,
}

/// Monotonic simulation time derived from real frame deltas.
#[derive(Resource, Debug)]
pub struct SimulationClock {
    time_scale: f32,
    last_real_delta: Duration,
    last_scaled_delta: Duration,
    elapsed: Duration,
}

impl SimulationClock {
    /// Creates a new clock with the provided time-scale multiplier.
    pub fn new(time_scale: f32) -> Self {
        Self {
            time_scale: if time_scale.is_nan() {
                1.0
            } else {
                time_scale.clamp(MIN_TIME_SCALE, MAX_TIME_SCALE)
            },
            last_real_delta: Duration::ZERO,
            last_scaled_delta: Duration::ZERO,
            elapsed: Duration::ZERO,
        }
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    #[cfg_attr(not(feature = "core_debug"), allow(dead_code))]
    pub fn last_real_delta(&self) -> Duration {
        self.last_real_delta
    }

    pub fn last_scaled_delta(&self) -> Duration {
        self.last_scaled_delta
    }

    /// Total scaled time since startup. Every timestamp in the game is measured on this axis.
    pub fn now(&self) -> Duration {
        self.elapsed
    }

    /// Applies a real delta, storing both the real and scaled durations.
    pub fn tick(&mut self, real_delta: Duration) {
        self.last_real_delta = real_delta;
        self.last_scaled_delta =
            Duration::try_from_secs_f64(real_delta.as_secs_f64() * f64::from(self.time_scale))
                .unwrap_or(Duration::MAX);
        self.elapsed = self.elapsed.saturating_add(self.last_scaled_delta);
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Loads gameplay settings and registers the clock and tick ordering.
#[derive(Debug, Default, Clone, Copy)]
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        let settings = GameplaySettings::load_or_default();
        info!(
            "Gameplay configured: sprout {:.1}s, mature {:.1}s, sale reward {}, trader cooldown {:.1}s, reach {:.1}",
            settings.growth.sprout.as_secs_f32(),
            settings.growth.maturity.as_secs_f32(),
            settings.trade.reward,
            settings.trade.cooldown.as_secs_f32(),
            settings.reach
        );

        configure_tick_sets(app);
        app.insert_resource(SimulationClock::new(settings.time_scale))
            .insert_resource(settings)
            .add_systems(Startup, log_startup_time_scale)
            .add_systems(Update, update_simulation_clock.in_set(TickSet::Clock));

        #[cfg(feature = "core_debug")]
        {
            app.insert_resource(DebugTickTimer::default())
                .add_systems(Update, log_scaled_ticks.in_set(TickSet::Clock));
        }
    }
}

/// Chains the tick phases inside `Update`.
pub fn configure_tick_sets(app: &mut App) {
    app.configure_sets(
        Update,
        (
            TickSet::Clock,
            TickSet::Input,
            TickSet::Lifecycle,
            TickSet::Resolve,
            TickSet::Dispatch,
            TickSet::Present,
        )
            .chain(),
    );
}

fn update_simulation_clock(mut clock: ResMut<SimulationClock>, time: Res<Time>) {
    clock.tick(time.delta());
}

fn log_startup_time_scale(clock: Res<SimulationClock>) {
    info!(
        "CorePlugin initialised with time scale: {:.3}",
        clock.time_scale()
    );
}

#[cfg(feature = "core_debug")]
fn log_scaled_ticks(mut timer: ResMut<DebugTickTimer>, clock: Res<SimulationClock>) {
    if timer.timer.tick(clock.last_scaled_delta()).just_finished() {
        info!(
            target: "core_debug",
            "Sim elapsed: {:.2}s | scale: {:.3} | real dt: {:.4}s | scaled dt: {:.4}s",
            clock.now().as_secs_f32(),
            clock.time_scale(),
            clock.last_real_delta().as_secs_f32(),
            clock.last_scaled_delta().as_secs_f32(),
        );
    }
}
