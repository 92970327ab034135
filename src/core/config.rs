//! Gameplay tuning loaded from `config/gameplay.toml`.
use std::{fs, path::Path, time::Duration};

use bevy::prelude::*;
use serde::Deserialize;

const CONFIG_PATH: &str = "config/gameplay.toml";

const DEFAULT_SPROUT_MS: u64 = 10_000;
const DEFAULT_MATURE_MS: u64 = 20_000;
const DEFAULT_COOLDOWN_MS: u64 = 10_000;
const DEFAULT_HIGHLIGHT_MS: u64 = 600;
const DEFAULT_CASH_EFFECT_MS: u64 = 1_500;
const DEFAULT_SMOKE_EFFECT_MS: u64 = 2_000;
/// Effects shorter than this would never be seen.
const MIN_EFFECT: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Deserialize, Default)]
struct RawGameplayConfig {
    #[serde(default)]
    simulation: RawSimulationSection,
    #[serde(default)]
    growth: RawGrowthSection,
    #[serde(default)]
    trade: RawTradeSection,
    #[serde(default)]
    interaction: RawInteractionSection,
    #[serde(default)]
    feedback: RawFeedbackSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawSimulationSection {
    time_scale: f32,
}

impl Default for RawSimulationSection {
    fn default() -> Self {
        Self { time_scale: 1.0 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawGrowthSection {
    sprout_seconds: f32,
    mature_seconds: f32,
}

impl Default for RawGrowthSection {
    fn default() -> Self {
        Self {
            sprout_seconds: DEFAULT_SPROUT_MS as f32 / 1000.0,
            mature_seconds: DEFAULT_MATURE_MS as f32 / 1000.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawTradeSection {
    reward: u32,
    cooldown_seconds: f32,
}

impl Default for RawTradeSection {
    fn default() -> Self {
        Self {
            reward: 50,
            cooldown_seconds: DEFAULT_COOLDOWN_MS as f32 / 1000.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawInteractionSection {
    reach: f32,
}

impl Default for RawInteractionSection {
    fn default() -> Self {
        Self { reach: 5.0 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawFeedbackSection {
    second_cue_delay_ms: u64,
    highlight_seconds: f32,
    cash_effect_seconds: f32,
    smoke_effect_seconds: f32,
}

impl Default for RawFeedbackSection {
    fn default() -> Self {
        Self {
            second_cue_delay_ms: 300,
            highlight_seconds: DEFAULT_HIGHLIGHT_MS as f32 / 1000.0,
            cash_effect_seconds: DEFAULT_CASH_EFFECT_MS as f32 / 1000.0,
            smoke_effect_seconds: DEFAULT_SMOKE_EFFECT_MS as f32 / 1000.0,
        }
    }
}

/// Seeded-to-sprout and seeded-to-mature durations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthTimings {
    pub sprout: Duration,
    pub maturity: Duration,
}

impl Default for GrowthTimings {
    fn default() -> Self {
        RawGrowthSection::default().into()
    }
}

impl From<RawGrowthSection> for GrowthTimings {
    fn from(value: RawGrowthSection) -> Self {
        let sprout = seconds(
            "growth.sprout_seconds",
            value.sprout_seconds,
            Duration::from_millis(DEFAULT_SPROUT_MS),
        );
        let maturity = seconds(
            "growth.mature_seconds",
            value.mature_seconds,
            Duration::from_millis(DEFAULT_MATURE_MS),
        )
        .max(sprout);
        Self { sprout, maturity }
    }
}

/// Terms of a single herb sale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TradeRules {
    pub reward: u32,
    pub cooldown: Duration,
}

impl Default for TradeRules {
    fn default() -> Self {
        RawTradeSection::default().into()
    }
}

impl From<RawTradeSection> for TradeRules {
    fn from(value: RawTradeSection) -> Self {
        Self {
            reward: value.reward,
            cooldown: seconds(
                "trade.cooldown_seconds",
                value.cooldown_seconds,
                Duration::from_millis(DEFAULT_COOLDOWN_MS),
            ),
        }
    }
}

/// Durations for best-effort audio-visual feedback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedbackTimings {
    pub second_cue_delay: Duration,
    pub highlight: Duration,
    pub cash_effect: Duration,
    pub smoke_effect: Duration,
}

impl Default for FeedbackTimings {
    fn default() -> Self {
        RawFeedbackSection::default().into()
    }
}

impl From<RawFeedbackSection> for FeedbackTimings {
    fn from(value: RawFeedbackSection) -> Self {
        Self {
            second_cue_delay: Duration::from_millis(value.second_cue_delay_ms),
            highlight: seconds(
                "feedback.highlight_seconds",
                value.highlight_seconds,
                Duration::from_millis(DEFAULT_HIGHLIGHT_MS),
            ),
            cash_effect: seconds(
                "feedback.cash_effect_seconds",
                value.cash_effect_seconds,
                Duration::from_millis(DEFAULT_CASH_EFFECT_MS),
            )
            .max(MIN_EFFECT),
            smoke_effect: seconds(
                "feedback.smoke_effect_seconds",
                value.smoke_effect_seconds,
                Duration::from_millis(DEFAULT_SMOKE_EFFECT_MS),
            )
            .max(MIN_EFFECT),
        }
    }
}

/// Validated gameplay settings shared by every plugin.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameplaySettings {
    pub time_scale: f32,
    pub growth: GrowthTimings,
    pub trade: TradeRules,
    /// Maximum targeting ray length in world units.
    pub reach: f32,
    pub feedback: FeedbackTimings,
}

impl Default for GameplaySettings {
    fn default() -> Self {
        RawGameplayConfig::default().into()
    }
}

impl GameplaySettings {
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_PATH);
        match fs::read_to_string(path) {
            Ok(data) => Self::from_toml_str(&data).unwrap_or_else(|err| {
                warn!(
                    "Failed to parse {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                Self::default()
            }),
            Err(err) => {
                warn!(
                    "Failed to read {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                Self::default()
            }
        }
    }

    pub fn from_toml_str(data: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<RawGameplayConfig>(data).map(Into::into)
    }
}

impl From<RawGameplayConfig> for GameplaySettings {
    fn from(value: RawGameplayConfig) -> Self {
        Self {
            time_scale: value.simulation.time_scale,
            growth: value.growth.into(),
            trade: value.trade.into(),
            reach: value.interaction.reach.max(0.1),
            feedback: value.feedback.into(),
        }
    }
}

/// Non-positive values mean "immediately". Values that are NaN or too large for a
/// `Duration` are replaced by `fallback`.
fn seconds(key: &str, value: f32, fallback: Duration) -> Duration {
    if value <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f32(value).unwrap_or_else(|err| {
        warn!(
            "Ignoring {} = {} ({}). Using {:.1}s.",
            key,
            value,
            err,
            fallback.as_secs_f32()
        );
        fallback
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipped_tuning() {
        let settings = GameplaySettings::default();
        assert_eq!(settings.growth.sprout, Duration::from_secs(10));
        assert_eq!(settings.growth.maturity, Duration::from_secs(20));
        assert_eq!(settings.trade.reward, 50);
        assert_eq!(settings.trade.cooldown, Duration::from_secs(10));
        assert_eq!(settings.feedback.second_cue_delay, Duration::from_millis(300));
        assert!((settings.reach - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let settings = GameplaySettings::from_toml_str(
            r#"
            [growth]
            mature_seconds = 60.0

            [trade]
            reward = 75
            "#,
        )
        .expect("config should parse");

        assert_eq!(settings.growth.sprout, Duration::from_secs(10));
        assert_eq!(settings.growth.maturity, Duration::from_secs(60));
        assert_eq!(settings.trade.reward, 75);
        assert_eq!(settings.trade.cooldown, Duration::from_secs(10));
    }

    #[test]
    fn maturity_never_precedes_sprouting() {
        let settings = GameplaySettings::from_toml_str(
            "[growth]\nsprout_seconds = 30.0\nmature_seconds = 5.0\n",
        )
        .expect("config should parse");
        assert_eq!(settings.growth.maturity, settings.growth.sprout);
    }

    #[test]
    fn oversized_timings_fall_back_to_defaults() {
        let settings = GameplaySettings::from_toml_str(
            "[trade]\ncooldown_seconds = 1e30\n\n[growth]\nsprout_seconds = 1e30\n\n[feedback]\nhighlight_seconds = inf\n",
        )
        .expect("config should parse");

        assert_eq!(settings.trade.cooldown, Duration::from_secs(10));
        assert_eq!(settings.growth.sprout, Duration::from_secs(10));
        assert_eq!(settings.growth.maturity, Duration::from_secs(20));
        assert_eq!(settings.feedback.highlight, Duration::from_millis(600));
    }

    #[test]
    fn rejects_malformed_sections() {
        assert!(GameplaySettings::from_toml_str("[trade]\nreward = \"lots\"").is_err());
    }
}
