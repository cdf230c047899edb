//! Tunable parameters.
//!
//! Defaults play the game as designed. A JSON object under
//! [`STORAGE_KEY`] in localStorage may override any subset of fields.

use serde::{Deserialize, Serialize};

use crate::duel::matchup::RuleSet;

pub const STORAGE_KEY: &str = "loop-duel.config";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{field} must be at least {min} seconds (got {value})")]
    PeriodTooShort { field: &'static str, value: f32, min: f32 },

    #[error("{field} must be a finite, non-negative number of seconds (got {value})")]
    InvalidDuration { field: &'static str, value: f32 },

    #[error("stall_threshold must be at least 1")]
    ZeroStallThreshold,

    #[error("player_health must be at least 1 (got {0})")]
    NonPositiveHealth(i32),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuelConfig {
    /// Seconds between turn ticks.
    pub turn_period: f32,
    /// Seconds between effect aging passes.
    pub effect_period: f32,
    /// Lifetime of a hit marker.
    pub effect_life: f32,
    /// Consecutive no-damage turns before the failsafe ends the combat.
    pub stall_threshold: u32,
    /// Queue resets per combat.
    pub reset_allowance: u32,
    pub player_health: i32,
    /// Full crossfade time between core scenes.
    pub scene_fade: f32,
    /// Full crossfade time between combat sub-states.
    pub combat_fade: f32,
    /// Crossfade from Begin into the first planning phase.
    pub begin_delay: f32,
    pub rules: RuleSet,
    /// `tracing` filter directive.
    pub log_filter: String,
}

impl DuelConfig {
    pub const DEFAULT_TURN_PERIOD: f32 = 0.5;
    pub const DEFAULT_STALL_THRESHOLD: u32 = 50;
    pub const DEFAULT_RESET_ALLOWANCE: u32 = 3;
    pub const DEFAULT_PLAYER_HEALTH: i32 = 5;
    /// Shortest accepted turn or effect period.
    pub const MIN_PERIOD: f32 = 1e-3;

    pub fn new() -> Self {
        Self {
            turn_period: Self::DEFAULT_TURN_PERIOD,
            effect_period: 0.05,
            effect_life: 0.4,
            stall_threshold: Self::DEFAULT_STALL_THRESHOLD,
            reset_allowance: Self::DEFAULT_RESET_ALLOWANCE,
            player_health: Self::DEFAULT_PLAYER_HEALTH,
            scene_fade: 1.0,
            combat_fade: 0.5,
            begin_delay: 0.25,
            rules: RuleSet::Symmetric,
            log_filter: crate::logging::DEFAULT_FILTER.into(),
        }
    }

    /// Parse a (possibly partial) JSON override and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: DuelConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("turn_period", self.turn_period),
            ("effect_period", self.effect_period),
        ] {
            if !(value.is_finite() && value >= Self::MIN_PERIOD) {
                return Err(ConfigError::PeriodTooShort {
                    field,
                    value,
                    min: Self::MIN_PERIOD,
                });
            }
        }
        for (field, value) in [
            ("effect_life", self.effect_life),
            ("scene_fade", self.scene_fade),
            ("combat_fade", self.combat_fade),
            ("begin_delay", self.begin_delay),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidDuration { field, value });
            }
        }
        if self.stall_threshold == 0 {
            return Err(ConfigError::ZeroStallThreshold);
        }
        if self.player_health < 1 {
            return Err(ConfigError::NonPositiveHealth(self.player_health));
        }
        Ok(())
    }
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Read overrides from localStorage, falling back to defaults.
#[cfg(target_arch = "wasm32")]
pub fn load() -> DuelConfig {
    let stored = web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(STORAGE_KEY).ok().flatten());

    let Some(json) = stored else {
        return DuelConfig::default();
    };

    match DuelConfig::from_json(&json) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("ignoring stored config: {e}");
            DuelConfig::default()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load() -> DuelConfig {
    DuelConfig::default()
}
