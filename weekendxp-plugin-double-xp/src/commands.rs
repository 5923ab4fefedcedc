use weekendxp_plugins::{
    chat::ChatHandler,
    command::{ChatCommand, CommandError, SecurityLevel},
    locale::format_message,
    plugin::Context,
};

use crate::{
    clock::Clock,
    config::WeekendXpConfig,
    messages,
    rates::{PlayerOverride, RateCalculator, RateError},
};

pub const RATE: ChatCommand = ChatCommand {
    name: "weekendxp rate",
    usage: "weekendxp rate <multiplier>",
    security: SecurityLevel::Player,
    allow_console: false,
};

pub const CONFIG: ChatCommand = ChatCommand {
    name: "weekendxp config",
    usage: "weekendxp config",
    security: SecurityLevel::Player,
    allow_console: false,
};

pub const COMMANDS: &[ChatCommand] = &[RATE, CONFIG];

/// `weekendxp rate <multiplier>`: sets the caller's own multiplier.
pub fn handle_set_rate<C: Clock>(
    calculator: &RateCalculator<C>,
    ctx: &mut Context<'_>,
    chat: &mut dyn ChatHandler,
    args: &str,
) -> Result<(), CommandError> {
    let guid = chat.player().ok_or(CommandError::PlayerRequired)?.guid;
    let requested: f32 = args.parse().map_err(|_| CommandError::InvalidArguments {
        usage: RATE.usage,
    })?;

    let config = WeekendXpConfig::read(ctx.config);
    match calculator.set_player_rate(ctx.settings, guid, requested, &config) {
        Ok(rate) => {
            let message = format_message(
                ctx.locale,
                messages::RATE_SET,
                messages::RATE_SET_DEFAULT,
                &[&rate],
            );
            chat.send_sys_message(&message);
        }
        Err(RateError::InvalidRate { max, .. }) => {
            let message = format_message(
                ctx.locale,
                messages::RATE_ERROR,
                messages::RATE_ERROR_DEFAULT,
                &[&max],
            );
            chat.send_sys_message(&message);
            chat.set_sent_error_message(true);
        }
    }
    Ok(())
}

/// `weekendxp config`: shows the caller what decides their rate.
pub fn handle_show_config<C: Clock>(
    calculator: &RateCalculator<C>,
    ctx: &mut Context<'_>,
    chat: &mut dyn ChatHandler,
    args: &str,
) -> Result<(), CommandError> {
    if !args.is_empty() {
        return Err(CommandError::InvalidArguments {
            usage: CONFIG.usage,
        });
    }

    let player = chat.player().ok_or(CommandError::PlayerRequired)?;
    let header = format_message(
        ctx.locale,
        messages::CONFIG_HEADER,
        messages::CONFIG_HEADER_DEFAULT,
        &[&player.name],
    );

    let config = WeekendXpConfig::read(ctx.config);
    let player_override = PlayerOverride::load(&*ctx.settings, player.guid);
    let snapshot = calculator.describe(&config, &player_override);

    chat.send_sys_message(&header);
    for line in snapshot.lines() {
        chat.send_sys_message(&format!("  {line}"));
    }
    Ok(())
}
