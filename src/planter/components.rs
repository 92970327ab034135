//! Planter pot lifecycle: soil, water, seed, timed growth, harvest.
use std::{fmt, time::Duration};

use bevy::prelude::*;

use crate::core::config::GrowthTimings;

/// Growth stage of a seeded pot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GrowthStage {
    Seedling = 0,
    Sprout = 1,
    Mature = 2,
}

impl GrowthStage {
    /// Stage reached after `elapsed` time since planting.
    pub fn for_elapsed(elapsed: Duration, timings: &GrowthTimings) -> Self {
        if elapsed >= timings.maturity {
            Self::Mature
        } else if elapsed >= timings.sprout {
            Self::Sprout
        } else {
            Self::Seedling
        }
    }

    pub fn index(self) -> u8 {
        self as u8
    }
}

/// Where a pot is in its lifecycle. Each variant implies everything before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PotState {
    #[default]
    Empty,
    Soiled,
    Watered,
    Growing {
        planted_at: Duration,
        stage: GrowthStage,
    },
}

/// Reasons a pot transition was refused. The pot is unchanged whenever one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PotError {
    AlreadySoiled,
    NeedsSoil,
    AlreadyWatered,
    NeedsWater,
    AlreadySeeded,
    NotMature,
}

impl fmt::Display for PotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::AlreadySoiled => "pot already has soil",
            Self::NeedsSoil => "pot has no soil",
            Self::AlreadyWatered => "soil is already watered",
            Self::NeedsWater => "soil must be watered first",
            Self::AlreadySeeded => "pot is already seeded",
            Self::NotMature => "plant is not ready to harvest",
        };
        f.write_str(message)
    }
}

impl std::error::Error for PotError {}

/// A planter pot placed in the world.
#[derive(Component, Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanterPot {
    state: PotState,
}

impl PlanterPot {
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn state(&self) -> PotState {
        self.state
    }

    pub fn has_soil(&self) -> bool {
        !matches!(self.state, PotState::Empty)
    }

    pub fn is_watered(&self) -> bool {
        matches!(self.state, PotState::Watered | PotState::Growing { .. })
    }

    pub fn has_seed(&self) -> bool {
        matches!(self.state, PotState::Growing { .. })
    }

    pub fn growth_start(&self) -> Option<Duration> {
        match self.state {
            PotState::Growing { planted_at, .. } => Some(planted_at),
            _ => None,
        }
    }

    pub fn growth_stage(&self) -> Option<GrowthStage> {
        match self.state {
            PotState::Growing { stage, .. } => Some(stage),
            _ => None,
        }
    }

    pub fn is_mature(&self) -> bool {
        self.growth_stage() == Some(GrowthStage::Mature)
    }

    /// Seeded and still growing.
    pub fn is_growing(&self) -> bool {
        self.has_seed() && !self.is_mature()
    }

    pub fn add_soil(&mut self) -> Result<(), PotError> {
        match self.state {
            PotState::Empty => {
                self.state = PotState::Soiled;
                Ok(())
            }
            _ => Err(PotError::AlreadySoiled),
        }
    }

    pub fn water(&mut self) -> Result<(), PotError> {
        match self.state {
            PotState::Empty => Err(PotError::NeedsSoil),
            PotState::Soiled => {
                self.state = PotState::Watered;
                Ok(())
            }
            PotState::Watered | PotState::Growing { .. } => Err(PotError::AlreadyWatered),
        }
    }

    pub fn add_seed(&mut self, now: Duration) -> Result<(), PotError> {
        match self.state {
            PotState::Empty => Err(PotError::NeedsSoil),
            PotState::Soiled => Err(PotError::NeedsWater),
            PotState::Watered => {
                self.state = PotState::Growing {
                    planted_at: now,
                    stage: GrowthStage::Seedling,
                };
                Ok(())
            }
            PotState::Growing { .. } => Err(PotError::AlreadySeeded),
        }
    }

    /// Moves the growth stage forward to match `now`. Returns the new stage only when it increased.
    pub fn advance(&mut self, now: Duration, timings: &GrowthTimings) -> Option<GrowthStage> {
        let PotState::Growing { planted_at, stage } = &mut self.state else {
            return None;
        };

        let reached = GrowthStage::for_elapsed(now.saturating_sub(*planted_at), timings);
        if reached > *stage {
            *stage = reached;
            Some(reached)
        } else {
            None
        }
    }

    /// Percentage of the way to maturity for a pot that is still growing.
    pub fn progress_percent(&self, now: Duration, timings: &GrowthTimings) -> Option<f32> {
        if !self.is_growing() {
            return None;
        }
        let planted_at = self.growth_start()?;
        let elapsed = now.saturating_sub(planted_at).as_secs_f32();
        let total = timings.maturity.as_secs_f32();
        if total <= 0.0 {
            return Some(100.0);
        }
        Some((elapsed / total * 100.0).clamp(0.0, 100.0))
    }

    /// Empties a mature pot. Granting the harvested good is up to the caller.
    pub fn harvest(&mut self) -> Result<(), PotError> {
        if !self.is_mature() {
            return Err(PotError::NotMature);
        }
        self.state = PotState::Empty;
        Ok(())
    }
}

/// Entities currently attached to a pot to show its soil and plant.
#[derive(Component, Debug, Default, Clone)]
pub struct PotVisuals {
    pub soil: Option<Entity>,
    pub soil_wet: bool,
    pub plant: Option<Entity>,
    pub plant_stage: Option<GrowthStage>,
}

impl PotVisuals {
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn has_plant_visual(&self) -> bool {
        self.plant.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timings() -> GrowthTimings {
        GrowthTimings {
            sprout: Duration::from_secs(10),
            maturity: Duration::from_secs(20),
        }
    }

    fn secs(value: u64) -> Duration {
        Duration::from_secs(value)
    }

    fn seeded_at(now: Duration) -> PlanterPot {
        let mut pot = PlanterPot::default();
        pot.add_soil().expect("empty pot accepts soil");
        pot.water().expect("soiled pot accepts water");
        pot.add_seed(now).expect("watered pot accepts seed");
        pot
    }

    #[test]
    fn second_soil_fails_without_changing_state() {
        let mut pot = PlanterPot::default();
        assert_eq!(pot.add_soil(), Ok(()));
        let before = pot.clone();
        assert_eq!(pot.add_soil(), Err(PotError::AlreadySoiled));
        assert_eq!(pot, before);
    }

    #[test]
    fn seed_requires_soil_and_water_and_no_seed() {
        let mut pot = PlanterPot::default();
        assert_eq!(pot.add_seed(secs(0)), Err(PotError::NeedsSoil));
        assert_eq!(pot.water(), Err(PotError::NeedsSoil));

        pot.add_soil().expect("soil");
        assert_eq!(pot.add_seed(secs(0)), Err(PotError::NeedsWater));

        pot.water().expect("water");
        assert_eq!(pot.water(), Err(PotError::AlreadyWatered));
        assert_eq!(pot.add_seed(secs(3)), Ok(()));
        assert_eq!(pot.growth_start(), Some(secs(3)));
        assert_eq!(pot.growth_stage(), Some(GrowthStage::Seedling));
        assert!(pot.has_soil() && pot.is_watered() && pot.has_seed());

        assert_eq!(pot.add_seed(secs(4)), Err(PotError::AlreadySeeded));
        assert_eq!(pot.growth_start(), Some(secs(3)));
    }

    #[test]
    fn stages_change_exactly_at_thresholds() {
        let timings = timings();
        let just_under = |d: Duration| d - Duration::from_millis(1);

        assert_eq!(
            GrowthStage::for_elapsed(just_under(timings.sprout), &timings),
            GrowthStage::Seedling
        );
        assert_eq!(
            GrowthStage::for_elapsed(timings.sprout, &timings),
            GrowthStage::Sprout
        );
        assert_eq!(
            GrowthStage::for_elapsed(just_under(timings.maturity), &timings),
            GrowthStage::Sprout
        );
        assert_eq!(
            GrowthStage::for_elapsed(timings.maturity, &timings),
            GrowthStage::Mature
        );
    }

    #[test]
    fn growth_is_monotonic_and_reports_each_increase_once() {
        let timings = timings();
        let mut pot = seeded_at(secs(5));

        assert_eq!(pot.advance(secs(6), &timings), None);
        assert_eq!(pot.advance(secs(15), &timings), Some(GrowthStage::Sprout));
        assert_eq!(pot.advance(secs(15), &timings), None);
        assert_eq!(pot.advance(secs(16), &timings), None);

        // A stale timestamp never regresses the stage.
        assert_eq!(pot.advance(secs(1), &timings), None);
        assert_eq!(pot.growth_stage(), Some(GrowthStage::Sprout));

        assert_eq!(pot.advance(secs(25), &timings), Some(GrowthStage::Mature));
        assert!(pot.is_mature());
        assert_eq!(pot.advance(secs(90), &timings), None);
    }

    #[test]
    fn growth_jumps_straight_to_mature_after_long_gap() {
        let timings = timings();
        let mut pot = seeded_at(secs(0));
        assert_eq!(pot.advance(secs(60), &timings), Some(GrowthStage::Mature));
    }

    #[test]
    fn harvest_requires_maturity_and_resets() {
        let timings = timings();
        let mut pot = PlanterPot::default();
        assert_eq!(pot.harvest(), Err(PotError::NotMature));

        let mut pot_growing = seeded_at(secs(0));
        pot_growing.advance(secs(12), &timings);
        assert_eq!(pot_growing.harvest(), Err(PotError::NotMature));
        assert!(pot_growing.has_seed());

        pot.add_soil().expect("soil");
        pot.water().expect("water");
        pot.add_seed(secs(0)).expect("seed");
        pot.advance(secs(20), &timings);
        assert_eq!(pot.harvest(), Ok(()));
        assert_eq!(pot, PlanterPot::default());
        assert_eq!(pot.growth_start(), None);

        // The pot goes round again from scratch.
        pot.add_soil().expect("soil again");
        pot.water().expect("water again");
        pot.add_seed(secs(30)).expect("seed again");
        pot.advance(secs(50), &timings);
        assert_eq!(pot.harvest(), Ok(()));
        assert_eq!(pot.state(), PotState::Empty);
    }

    #[test]
    fn progress_tracks_elapsed_over_maturity() {
        let timings = timings();
        let mut pot = seeded_at(secs(10));
        assert_eq!(pot.progress_percent(secs(10), &timings), Some(0.0));
        assert_eq!(pot.progress_percent(secs(15), &timings), Some(25.0));

        pot.advance(secs(30), &timings);
        assert_eq!(pot.progress_percent(secs(30), &timings), None);
        assert_eq!(PlanterPot::default().progress_percent(secs(30), &timings), None);
    }
}
