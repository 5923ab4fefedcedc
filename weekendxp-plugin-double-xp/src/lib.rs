//! Double XP Weekend.
//!
//! Multiplies experience gains from Friday to Sunday (or every day, when
//! always enabled), with optional per-player multipliers picked through the
//! `weekendxp rate` command.

use weekendxp_plugins::{
    chat::ChatHandler,
    command::{ChatCommand, CommandError},
    locale::format_message,
    player::{Player, XpSource},
    plugin::{Context, Plugin, PluginMetadata},
};

pub mod clock;
pub mod commands;
pub mod config;
pub mod messages;
pub mod rates;

use clock::{Clock, SystemClock};
use config::WeekendXpConfig;
use rates::{ExperienceEvent, PlayerOverride, RateCalculator};

/// Module name the per-player settings are stored under.
pub const MODULE_NAME: &str = "mod-double-xp-weekend";

pub struct DoubleXpWeekend<C = SystemClock> {
    calculator: RateCalculator<C>,
}

impl DoubleXpWeekend<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for DoubleXpWeekend<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> DoubleXpWeekend<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            calculator: RateCalculator::new(clock),
        }
    }

    pub fn calculator(&self) -> &RateCalculator<C> {
        &self.calculator
    }
}

impl<C: Clock> Plugin for DoubleXpWeekend<C> {
    fn metadata(&self) -> PluginMetadata {
        PluginMetadata {
            name: MODULE_NAME.to_owned(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
            description: env!("CARGO_PKG_DESCRIPTION").to_owned(),
        }
    }

    fn on_load(&self) {
        log::info!("Double XP Weekend loaded");
    }

    fn on_unload(&self) {
        log::info!("Double XP Weekend unloaded");
    }

    fn commands(&self) -> &[ChatCommand] {
        commands::COMMANDS
    }

    fn on_login(&self, ctx: &mut Context<'_>, chat: &mut dyn ChatHandler) {
        let config = WeekendXpConfig::read(ctx.config);
        if !config.announce {
            return;
        }
        let Some(player) = chat.player() else {
            return;
        };

        let message = if self.calculator.is_event_active(&config) {
            let player_override = PlayerOverride::load(&*ctx.settings, player.guid);
            let rate = self.calculator.effective_rate(&config, &player_override);
            format_message(
                ctx.locale,
                messages::LOGIN_ACTIVE,
                messages::LOGIN_ACTIVE_DEFAULT,
                &[&rate],
            )
        } else {
            format_message(
                ctx.locale,
                messages::LOGIN_INACTIVE,
                messages::LOGIN_INACTIVE_DEFAULT,
                &[],
            )
        };
        chat.send_sys_message(&message);
    }

    fn on_give_xp(
        &self,
        ctx: &mut Context<'_>,
        player: &Player,
        amount: &mut u32,
        source: XpSource,
    ) {
        let config = WeekendXpConfig::read(ctx.config);
        let player_override = PlayerOverride::load(&*ctx.settings, player.guid);
        let event = ExperienceEvent {
            amount: *amount,
            source,
            player_level: player.level,
        };

        let adjusted = self
            .calculator
            .apply_to_award(&event, &config, &player_override);
        if adjusted != *amount {
            log::debug!(
                "{} ({}): {} xp from {} scaled to {}",
                player.name,
                player.guid,
                amount,
                source,
                adjusted
            );
        }
        *amount = adjusted;
    }

    fn on_command(
        &self,
        ctx: &mut Context<'_>,
        chat: &mut dyn ChatHandler,
        command: &ChatCommand,
        args: &str,
    ) -> Result<(), CommandError> {
        match command.name {
            name if name == commands::RATE.name => {
                commands::handle_set_rate(&self.calculator, ctx, chat, args)
            }
            name if name == commands::CONFIG.name => {
                commands::handle_show_config(&self.calculator, ctx, chat, args)
            }
            _ => Err(CommandError::UnknownCommand),
        }
    }
}

#[no_mangle]
#[allow(improper_ctypes_definitions)]
pub extern "C" fn plugin_entry_point() -> Box<dyn Plugin> {
    Box::new(DoubleXpWeekend::new())
}
