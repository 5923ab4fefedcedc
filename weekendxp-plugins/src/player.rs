use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlayerGuid(pub u64);

/// The view of a player a plugin gets during a hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub guid: PlayerGuid,
    pub name: String,
    pub level: u8,
}

impl Player {
    pub fn new(guid: PlayerGuid, name: impl Into<String>, level: u8) -> Self {
        Self {
            guid,
            name: name.into(),
            level,
        }
    }
}

/// Where a chunk of experience comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum XpSource {
    #[display("kill")]
    Kill,
    #[display("quest")]
    Quest,
    #[display("exploration")]
    Exploration,
    #[display("other")]
    Other,
}

impl XpSource {
    pub fn is_quest(self) -> bool {
        matches!(self, XpSource::Quest)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown xp source: {0}")]
pub struct UnknownXpSource(pub String);

impl std::str::FromStr for XpSource {
    type Err = UnknownXpSource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "kill" => Ok(XpSource::Kill),
            "quest" => Ok(XpSource::Quest),
            "exploration" | "explore" => Ok(XpSource::Exploration),
            "other" => Ok(XpSource::Other),
            _ => Err(UnknownXpSource(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sources() {
        assert_eq!("Quest".parse::<XpSource>(), Ok(XpSource::Quest));
        assert_eq!("explore".parse::<XpSource>(), Ok(XpSource::Exploration));

        let err = "bounty".parse::<XpSource>().unwrap_err();
        assert_eq!(err, UnknownXpSource("bounty".to_owned()));
        assert_eq!(err.to_string(), "unknown xp source: bounty");
    }
}
