use std::collections::HashMap;

use itertools::Itertools;
use weekendxp_config::{ConfigProvider, ConfigValue, MemoryConfig, TomlConfig};
use weekendxp_plugins::{
    chat::{BufferedChat, ChatHandler},
    command::{CommandError, SecurityLevel},
    locale::NoLocale,
    player::{Player, PlayerGuid, XpSource},
    plugin::Context,
    plugin_loader::PluginLoader,
    settings::MemoryPlayerSettings,
};

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("unknown action '{0}', try 'help'")]
    UnknownAction(String),
    #[error("player {0} is not logged in")]
    NotLoggedIn(PlayerGuid),
    #[error(transparent)]
    Config(#[from] weekendxp_config::ConfigError),
}

pub const HELP: &[&str] = &[
    "login <guid> <name> <level>    log a player in",
    "logout <guid>                  log a player out",
    "level <guid> <level>           change a player's level",
    "xp <guid> <amount> [source]    grant experience (kill, quest, exploration, other)",
    "cmd <guid> <command...>        run a chat command as a player",
    "set <key> <value>              override a config option",
    "reload                         re-read the config file",
    "players                        list logged in players",
    "quit                           stop the host",
];

/// File config with in-memory overrides on top.
pub struct HostConfig {
    file: Option<TomlConfig>,
    overrides: MemoryConfig,
}

impl HostConfig {
    pub fn new(file: Option<TomlConfig>) -> Self {
        Self {
            file,
            overrides: MemoryConfig::new(),
        }
    }

    pub fn set(&mut self, key: &str, value: ConfigValue) {
        self.overrides.set(key, value);
    }

    pub fn reload(&mut self) -> Result<(), HostError> {
        if let Some(file) = &mut self.file {
            file.reload()?;
        }
        Ok(())
    }
}

impl ConfigProvider for HostConfig {
    fn value(&self, key: &str) -> Option<ConfigValue> {
        self.overrides
            .value(key)
            .or_else(|| self.file.as_ref().and_then(|file| file.value(key)))
    }
}

pub enum Outcome {
    Continue(Vec<String>),
    Quit,
}

/// Plays the game server for the loaded plugins.
pub struct Host {
    config: HostConfig,
    settings: MemoryPlayerSettings,
    loader: PluginLoader,
    players: HashMap<PlayerGuid, Player>,
    security: SecurityLevel,
}

impl Host {
    pub fn new(
        config: HostConfig,
        settings: MemoryPlayerSettings,
        loader: PluginLoader,
        security: SecurityLevel,
    ) -> Self {
        Self {
            config,
            settings,
            loader,
            players: HashMap::new(),
            security,
        }
    }

    pub fn settings(&self) -> &MemoryPlayerSettings {
        &self.settings
    }

    pub fn unload(&mut self) {
        self.loader.unload_all();
    }

    /// Runs one script line and returns what the host printed.
    pub fn handle_line(&mut self, line: &str) -> Result<Outcome, HostError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Outcome::Continue(Vec::new()));
        }

        let (action, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let output = match action {
            "login" => self.login(rest)?,
            "logout" => self.logout(rest)?,
            "level" => self.set_level(rest)?,
            "xp" => self.give_xp(rest)?,
            "cmd" => self.command(rest)?,
            "set" => self.set_option(rest)?,
            "reload" => {
                self.config.reload()?;
                vec!["config reloaded".to_owned()]
            }
            "players" => self
                .players
                .values()
                .sorted_by_key(|p| p.guid)
                .map(|p| format!("{} {} (level {})", p.guid, p.name, p.level))
                .collect(),
            "help" => HELP.iter().map(|l| l.to_string()).collect(),
            "quit" | "exit" => return Ok(Outcome::Quit),
            other => return Err(HostError::UnknownAction(other.to_owned())),
        };
        Ok(Outcome::Continue(output))
    }

    fn player(&self, guid: PlayerGuid) -> Result<&Player, HostError> {
        self.players.get(&guid).ok_or(HostError::NotLoggedIn(guid))
    }

    fn login(&mut self, args: &str) -> Result<Vec<String>, HostError> {
        const USAGE: &str = "login <guid> <name> <level>";
        let (guid, name, level) = args
            .split_whitespace()
            .collect_tuple()
            .ok_or(HostError::Usage(USAGE))?;
        let player = Player::new(
            parse_guid(guid, USAGE)?,
            name,
            level.parse().map_err(|_| HostError::Usage(USAGE))?,
        );

        let mut chat = BufferedChat::for_player(player.clone());
        self.players.insert(player.guid, player);
        let mut ctx = Context {
            config: &self.config,
            settings: &mut self.settings,
            locale: &NoLocale,
        };
        self.loader.fire_login(&mut ctx, &mut chat);
        Ok(chat.take_messages())
    }

    fn logout(&mut self, args: &str) -> Result<Vec<String>, HostError> {
        let guid = parse_guid(args, "logout <guid>")?;
        let player = self
            .players
            .remove(&guid)
            .ok_or(HostError::NotLoggedIn(guid))?;
        Ok(vec![format!("{} logged out", player.name)])
    }

    fn set_level(&mut self, args: &str) -> Result<Vec<String>, HostError> {
        const USAGE: &str = "level <guid> <level>";
        let (guid, level) = args
            .split_whitespace()
            .collect_tuple()
            .ok_or(HostError::Usage(USAGE))?;
        let guid = parse_guid(guid, USAGE)?;
        let level: u8 = level.parse().map_err(|_| HostError::Usage(USAGE))?;

        let player = self
            .players
            .get_mut(&guid)
            .ok_or(HostError::NotLoggedIn(guid))?;
        player.level = level;
        Ok(vec![format!("{} is now level {}", player.name, level)])
    }

    fn give_xp(&mut self, args: &str) -> Result<Vec<String>, HostError> {
        const USAGE: &str = "xp <guid> <amount> [kill|quest|exploration|other]";
        let mut words = args.split_whitespace();
        let guid = parse_guid(words.next().unwrap_or_default(), USAGE)?;
        let amount: u32 = words
            .next()
            .and_then(|w| w.parse().ok())
            .ok_or(HostError::Usage(USAGE))?;
        let source: XpSource = match words.next() {
            Some(word) => word.parse().map_err(|_| HostError::Usage(USAGE))?,
            None => XpSource::Kill,
        };
        if words.next().is_some() {
            return Err(HostError::Usage(USAGE));
        }

        let player = self.player(guid)?.clone();
        let mut ctx = Context {
            config: &self.config,
            settings: &mut self.settings,
            locale: &NoLocale,
        };
        let granted = self.loader.fire_give_xp(&mut ctx, &player, amount, source);
        Ok(vec![format!(
            "{} gains {} experience ({}, proposed {})",
            player.name, granted, source, amount
        )])
    }

    fn command(&mut self, args: &str) -> Result<Vec<String>, HostError> {
        const USAGE: &str = "cmd <guid> <command...>";
        let (guid, line) = args
            .split_once(char::is_whitespace)
            .ok_or(HostError::Usage(USAGE))?;
        let guid = parse_guid(guid, USAGE)?;
        let line = line.trim().trim_start_matches('.');

        let player = self.player(guid)?.clone();
        let mut chat = BufferedChat::for_player(player);
        let security = self.security;
        let mut ctx = Context {
            config: &self.config,
            settings: &mut self.settings,
            locale: &NoLocale,
        };
        let result = self.loader.dispatch_command(&mut ctx, &mut chat, security, line);

        let mut output = chat.take_messages();
        match result {
            Ok(()) if chat.has_sent_error_message() => {}
            Ok(()) => output.push("command ok".to_owned()),
            Err(CommandError::InvalidArguments { usage }) => {
                output.push(format!("Incorrect syntax. Usage: .{usage}"))
            }
            Err(e) => output.push(e.to_string()),
        }
        Ok(output)
    }

    fn set_option(&mut self, args: &str) -> Result<Vec<String>, HostError> {
        let (key, value) = args
            .split_once(char::is_whitespace)
            .ok_or(HostError::Usage("set <key> <value>"))?;
        let value = parse_value(value.trim());
        let message = format!("{key} = {value:?}");
        self.config.set(key, value);
        Ok(vec![message])
    }
}

fn parse_guid(word: &str, usage: &'static str) -> Result<PlayerGuid, HostError> {
    word.parse::<u64>()
        .map(PlayerGuid)
        .map_err(|_| HostError::Usage(usage))
}

fn parse_value(text: &str) -> ConfigValue {
    if let Ok(b) = text.parse::<bool>() {
        ConfigValue::Bool(b)
    } else if let Ok(n) = text.parse::<i64>() {
        ConfigValue::Integer(n)
    } else if let Ok(f) = text.parse::<f64>() {
        ConfigValue::Float(f)
    } else {
        ConfigValue::String(text.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use weekendxp_plugin_double_xp::DoubleXpWeekend;

    use super::*;

    fn host() -> Host {
        let mut loader = PluginLoader::new();
        loader.register(Box::new(DoubleXpWeekend::new()));
        let mut config = HostConfig::new(None);
        config.set("XPWeekend.AlwaysEnabled", ConfigValue::Bool(true));
        Host::new(config, MemoryPlayerSettings::new(), loader, SecurityLevel::Player)
    }

    fn run(host: &mut Host, line: &str) -> Vec<String> {
        match host.handle_line(line).unwrap() {
            Outcome::Continue(output) => output,
            Outcome::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn always_enabled_doubles_kill_xp() {
        let mut host = host();
        run(&mut host, "login 1 Alice 10");

        assert_eq!(
            run(&mut host, "xp 1 150"),
            ["Alice gains 300 experience (kill, proposed 150)"]
        );
    }

    #[test]
    fn rate_command_round_trip() {
        let mut host = host();
        run(&mut host, "set XPWeekend.IndividualXPEnabled 1");
        run(&mut host, "set XPWeekend.MaxAllowedRate 3");
        run(&mut host, "login 1 Alice 10");

        assert_eq!(
            run(&mut host, "cmd 1 .weekendxp rate 3"),
            ["Your experience rate has been set to 3.", "command ok"]
        );
        assert_eq!(
            run(&mut host, "xp 1 100 quest"),
            ["Alice gains 300 experience (quest, proposed 100)"]
        );
        assert_eq!(
            run(&mut host, "cmd 1 weekendxp rate abc"),
            ["Incorrect syntax. Usage: .weekendxp rate <multiplier>"]
        );
    }

    #[test]
    fn rejected_rate_has_no_ok_echo() {
        let mut host = host();
        run(&mut host, "login 1 Alice 10");

        let output = run(&mut host, "cmd 1 weekendxp rate 9");
        assert_eq!(output.len(), 1);
        assert!(output[0].starts_with("Invalid experience rate"));
    }

    #[test]
    fn unknown_player_and_action() {
        let mut host = host();
        assert!(matches!(
            host.handle_line("xp 7 10"),
            Err(HostError::NotLoggedIn(PlayerGuid(7)))
        ));
        assert!(matches!(
            host.handle_line("dance"),
            Err(HostError::UnknownAction(_))
        ));
        assert!(matches!(host.handle_line("quit"), Ok(Outcome::Quit)));
    }

    #[test]
    fn layered_config_prefers_overrides() {
        let file = TomlConfig::parse("XPWeekend.MaxLevel = 60\nXPWeekend.xpAmount = 3").unwrap();
        let mut config = HostConfig::new(Some(file));
        config.set("XPWeekend.MaxLevel", ConfigValue::Integer(70));

        assert_eq!(config.value("XPWeekend.MaxLevel"), Some(ConfigValue::Integer(70)));
        assert_eq!(config.value("XPWeekend.xpAmount"), Some(ConfigValue::Integer(3)));
    }

    #[test]
    fn values_parse_by_shape() {
        assert_eq!(parse_value("true"), ConfigValue::Bool(true));
        assert_eq!(parse_value("80"), ConfigValue::Integer(80));
        assert_eq!(parse_value("1.5"), ConfigValue::Float(1.5));
        assert_eq!(parse_value("abc"), ConfigValue::String("abc".into()));
    }
}
