//! Experience rate rules for the weekend bonus.

use chrono::{Datelike, Weekday};
use serde::Serialize;
use weekendxp_plugins::{
    player::{PlayerGuid, XpSource},
    settings::{PlayerSettings, SettingValue},
};

use crate::{clock::Clock, config::WeekendXpConfig, MODULE_NAME};

const SETTING_RATE: u8 = 0;
const SETTING_DISABLED: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum RateError {
    #[error("invalid experience rate {requested}, must be above 0 and at most {max}")]
    InvalidRate { requested: f32, max: f32 },
}

/// A player's own settings for the bonus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PlayerOverride {
    /// Multiplier picked with the rate command.
    pub rate: Option<f32>,
    /// Opts the player out of the bonus entirely. Stored and honoured, but no
    /// command sets it.
    pub disabled: bool,
}

impl PlayerOverride {
    pub fn load(settings: &dyn PlayerSettings, player: PlayerGuid) -> Self {
        let rate = settings
            .get(player, MODULE_NAME, SETTING_RATE)
            .and_then(SettingValue::as_f32)
            .filter(|rate| *rate != 0.0);
        let disabled = settings
            .get(player, MODULE_NAME, SETTING_DISABLED)
            .and_then(SettingValue::as_bool)
            .unwrap_or(false);

        Self { rate, disabled }
    }

    pub fn store(&self, settings: &mut dyn PlayerSettings, player: PlayerGuid) {
        settings.set(
            player,
            MODULE_NAME,
            SETTING_RATE,
            SettingValue::Float(self.rate.unwrap_or(0.0)),
        );
        settings.set(
            player,
            MODULE_NAME,
            SETTING_DISABLED,
            SettingValue::Bool(self.disabled),
        );
    }
}

/// Experience about to be granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExperienceEvent {
    pub amount: u32,
    pub source: XpSource,
    pub player_level: u8,
}

/// Whether the bonus is running at `now` (host local time).
pub fn is_event_active(now: &impl Datelike, config: &WeekendXpConfig) -> bool {
    if config.always_enabled {
        return true;
    }

    if !config.enabled {
        return false;
    }

    matches!(now.weekday(), Weekday::Fri | Weekday::Sat | Weekday::Sun)
}

/// The multiplier a player gets while the bonus runs. Always positive.
pub fn effective_rate(config: &WeekendXpConfig, player: &PlayerOverride) -> f32 {
    if player.disabled {
        return 1.0;
    }

    let rate = match player.rate {
        Some(rate) if config.individual_xp_enabled && rate != 0.0 => rate,
        _ => config.xp_amount,
    };

    // NaN fails the comparison too.
    if rate > 0.0 && rate.is_finite() {
        rate
    } else {
        1.0
    }
}

pub fn validate_rate(requested: f32, config: &WeekendXpConfig) -> Result<f32, RateError> {
    if requested.is_finite() && requested > 0.0 && requested <= config.max_allowed_rate {
        Ok(requested)
    } else {
        Err(RateError::InvalidRate {
            requested,
            max: config.max_allowed_rate,
        })
    }
}

/// Diagnostic view of everything that decides a player's rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateSnapshot {
    pub effective_rate: f32,
    pub event_active: bool,
    pub config: WeekendXpConfig,
    pub player: PlayerOverride,
}

impl RateSnapshot {
    /// One `name: value` line per field, for chat output.
    pub fn lines(&self) -> Vec<String> {
        let config = &self.config;
        let custom_rate = self
            .player
            .rate
            .map_or_else(|| "none".to_owned(), |rate| rate.to_string());

        vec![
            format!("Effective rate: {}", self.effective_rate),
            format!("Event active: {}", self.event_active),
            format!("Enabled: {}", config.enabled),
            format!("Always enabled: {}", config.always_enabled),
            format!("Quest only: {}", config.quest_only),
            format!("Max level: {}", config.max_level),
            format!("Base rate: {}", config.xp_amount),
            format!("Individual rates: {}", config.individual_xp_enabled),
            format!("Max individual rate: {}", config.max_allowed_rate),
            format!("Announce: {}", config.announce),
            format!("Your rate: {custom_rate}"),
            format!("Bonus disabled for you: {}", self.player.disabled),
        ]
    }
}

/// Decides when the bonus runs and how much it gives, against an injected
/// clock.
#[derive(Debug, Clone, Default)]
pub struct RateCalculator<C> {
    clock: C,
}

impl<C: Clock> RateCalculator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn is_event_active(&self, config: &WeekendXpConfig) -> bool {
        is_event_active(&self.clock.now(), config)
    }

    pub fn effective_rate(&self, config: &WeekendXpConfig, player: &PlayerOverride) -> f32 {
        effective_rate(config, player)
    }

    /// The amount actually granted for `event`.
    pub fn apply_to_award(
        &self,
        event: &ExperienceEvent,
        config: &WeekendXpConfig,
        player: &PlayerOverride,
    ) -> u32 {
        if !self.is_event_active(config) {
            return event.amount;
        }

        if config.quest_only && !event.source.is_quest() {
            return event.amount;
        }

        if u32::from(event.player_level) >= config.max_level {
            return event.amount;
        }

        let rate = effective_rate(config, player);
        // Float to int casts truncate and saturate.
        (f64::from(event.amount) * f64::from(rate)) as u32
    }

    /// Validates and stores a player's own multiplier, returning it.
    ///
    /// The ceiling is enforced here only; a stored rate is not re-checked if
    /// the configured maximum later drops.
    pub fn set_player_rate(
        &self,
        settings: &mut dyn PlayerSettings,
        player: PlayerGuid,
        requested: f32,
        config: &WeekendXpConfig,
    ) -> Result<f32, RateError> {
        let rate = validate_rate(requested, config)?;

        let mut player_override = PlayerOverride::load(settings, player);
        player_override.rate = Some(rate);
        player_override.store(settings, player);

        log::info!("Player {player} set their weekend xp rate to {rate}");
        Ok(rate)
    }

    pub fn describe(&self, config: &WeekendXpConfig, player: &PlayerOverride) -> RateSnapshot {
        RateSnapshot {
            effective_rate: effective_rate(config, player),
            event_active: self.is_event_active(config),
            config: *config,
            player: *player,
        }
    }
}
