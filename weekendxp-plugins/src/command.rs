use derive_more::Display;

/// Minimum account level required to run a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum SecurityLevel {
    #[display("player")]
    Player,
    #[display("moderator")]
    Moderator,
    #[display("gamemaster")]
    GameMaster,
    #[display("administrator")]
    Administrator,
}

/// A chat command a plugin registers with the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatCommand {
    /// Full command path, words separated by single spaces, e.g. `"weekendxp rate"`.
    pub name: &'static str,
    pub usage: &'static str,
    pub security: SecurityLevel,
    pub allow_console: bool,
}

impl ChatCommand {
    /// Returns the argument text if `line` invokes this command.
    ///
    /// Words are compared case-insensitively and any run of whitespace
    /// between them is accepted.
    pub fn match_line<'a>(&self, line: &'a str) -> Option<&'a str> {
        let mut rest = line.trim_start();
        for word in self.name.split(' ') {
            let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            if !rest[..end].eq_ignore_ascii_case(word) {
                return None;
            }
            rest = rest[end..].trim_start();
        }
        Some(rest.trim_end())
    }

    pub fn depth(&self) -> usize {
        self.name.split(' ').count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("no such command")]
    UnknownCommand,
    #[error("invalid arguments, usage: {usage}")]
    InvalidArguments { usage: &'static str },
    #[error("this command can only be used by a player")]
    PlayerRequired,
    #[error("this command requires {required} access")]
    Forbidden { required: SecurityLevel },
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: ChatCommand = ChatCommand {
        name: "weekendxp rate",
        usage: "weekendxp rate <multiplier>",
        security: SecurityLevel::Player,
        allow_console: false,
    };

    #[test]
    fn matches_words_and_returns_args() {
        assert_eq!(RATE.match_line("weekendxp rate 1.5"), Some("1.5"));
        assert_eq!(RATE.match_line("  WeekendXP   Rate   2 "), Some("2"));
        assert_eq!(RATE.match_line("weekendxp rate"), Some(""));
    }

    #[test]
    fn rejects_other_commands() {
        assert_eq!(RATE.match_line("weekendxp config"), None);
        assert_eq!(RATE.match_line("weekendxp rated 2"), None);
        assert_eq!(RATE.match_line("weekendxp"), None);
    }

    #[test]
    fn security_levels_are_ordered() {
        assert!(SecurityLevel::Player < SecurityLevel::GameMaster);
        assert_eq!(RATE.depth(), 2);
    }
}
