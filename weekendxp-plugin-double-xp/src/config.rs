use serde::Serialize;
use weekendxp_plugins::config::ConfigProvider;

pub const ENABLED: &str = "XPWeekend.Enabled";
pub const ALWAYS_ENABLED: &str = "XPWeekend.AlwaysEnabled";
pub const QUEST_ONLY: &str = "XPWeekend.QuestOnly";
pub const MAX_LEVEL: &str = "XPWeekend.MaxLevel";
pub const XP_AMOUNT: &str = "XPWeekend.xpAmount";
pub const INDIVIDUAL_XP_ENABLED: &str = "XPWeekend.IndividualXPEnabled";
pub const MAX_ALLOWED_RATE: &str = "XPWeekend.MaxAllowedRate";
pub const ANNOUNCE: &str = "XPWeekend.Announce";

/// The plugin's options, as read from the host config for one call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeekendXpConfig {
    /// Bonus runs Friday to Sunday.
    pub enabled: bool,
    /// Bonus runs every day, regardless of `enabled`.
    pub always_enabled: bool,
    /// Only quest experience is multiplied.
    pub quest_only: bool,
    /// Players at or above this level get no bonus.
    pub max_level: u32,
    pub xp_amount: f32,
    /// Players may pick their own multiplier.
    pub individual_xp_enabled: bool,
    pub max_allowed_rate: f32,
    /// Tell players about the bonus when they log in.
    pub announce: bool,
}

impl Default for WeekendXpConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            always_enabled: false,
            quest_only: false,
            max_level: 80,
            xp_amount: 2.0,
            individual_xp_enabled: false,
            max_allowed_rate: 2.0,
            announce: false,
        }
    }
}

impl WeekendXpConfig {
    pub fn read(provider: &dyn ConfigProvider) -> Self {
        let defaults = Self::default();
        Self {
            enabled: provider.get_option(ENABLED, defaults.enabled),
            always_enabled: provider.get_option(ALWAYS_ENABLED, defaults.always_enabled),
            quest_only: provider.get_option(QUEST_ONLY, defaults.quest_only),
            max_level: provider.get_option(MAX_LEVEL, defaults.max_level),
            xp_amount: provider.get_option(XP_AMOUNT, defaults.xp_amount),
            individual_xp_enabled: provider
                .get_option(INDIVIDUAL_XP_ENABLED, defaults.individual_xp_enabled),
            max_allowed_rate: provider.get_option(MAX_ALLOWED_RATE, defaults.max_allowed_rate),
            announce: provider.get_option(ANNOUNCE, defaults.announce),
        }
    }
}
