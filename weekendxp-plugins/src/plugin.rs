use weekendxp_config::ConfigProvider;

use crate::{
    chat::ChatHandler,
    command::{ChatCommand, CommandError},
    locale::Locale,
    player::{Player, XpSource},
    settings::PlayerSettings,
};

/// Owned so it stays valid after the plugin's library is unloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginMetadata {
    pub name: String,
    pub version: String,
    pub description: String,
}

/// Host services passed into every hook.
pub struct Context<'a> {
    pub config: &'a dyn ConfigProvider,
    pub settings: &'a mut dyn PlayerSettings,
    pub locale: &'a dyn Locale,
}

/// A plugin loaded by the host.
///
/// Every hook runs to completion on the host's calling thread.
pub trait Plugin {
    fn metadata(&self) -> PluginMetadata;

    fn on_load(&self) {}

    fn on_unload(&self) {}

    fn commands(&self) -> &[ChatCommand] {
        &[]
    }

    /// Called once a player has entered the world.
    fn on_login(&self, _ctx: &mut Context<'_>, _chat: &mut dyn ChatHandler) {}

    /// Called before `amount` experience is granted to `player`. The plugin
    /// may change `amount`.
    fn on_give_xp(
        &self,
        _ctx: &mut Context<'_>,
        _player: &Player,
        _amount: &mut u32,
        _source: XpSource,
    ) {
    }

    /// Runs `command` (one of [`Plugin::commands`]) with its argument text.
    fn on_command(
        &self,
        _ctx: &mut Context<'_>,
        _chat: &mut dyn ChatHandler,
        _command: &ChatCommand,
        _args: &str,
    ) -> Result<(), CommandError> {
        Err(CommandError::UnknownCommand)
    }
}
