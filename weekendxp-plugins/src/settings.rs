use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::player::PlayerGuid;

/// A typed per-player setting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Float(f32),
}

impl SettingValue {
    pub fn as_bool(self) -> Option<bool> {
        match self {
            SettingValue::Bool(b) => Some(b),
            SettingValue::Int(n) => Some(n != 0),
            SettingValue::Float(_) => None,
        }
    }

    pub fn as_f32(self) -> Option<f32> {
        match self {
            SettingValue::Float(f) => Some(f),
            SettingValue::Int(n) => Some(n as f32),
            SettingValue::Bool(_) => None,
        }
    }
}

/// Persisted per-player settings, addressed by module name and slot.
///
/// The host owns storage and serialization. Each player's cells are only
/// touched from that player's own hooks.
pub trait PlayerSettings {
    fn get(&self, player: PlayerGuid, module: &str, slot: u8) -> Option<SettingValue>;

    fn set(&mut self, player: PlayerGuid, module: &str, slot: u8, value: SettingValue);
}

/// In-memory settings store. Serializable so a host can persist it wholesale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryPlayerSettings {
    players: HashMap<PlayerGuid, BTreeMap<String, BTreeMap<u8, SettingValue>>>,
}

impl MemoryPlayerSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

impl PlayerSettings for MemoryPlayerSettings {
    fn get(&self, player: PlayerGuid, module: &str, slot: u8) -> Option<SettingValue> {
        self.players.get(&player)?.get(module)?.get(&slot).copied()
    }

    fn set(&mut self, player: PlayerGuid, module: &str, slot: u8, value: SettingValue) {
        self.players
            .entry(player)
            .or_default()
            .entry(module.to_owned())
            .or_default()
            .insert(slot, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_are_scoped_by_player_module_and_slot() {
        let mut settings = MemoryPlayerSettings::new();
        let alice = PlayerGuid(1);
        let bob = PlayerGuid(2);

        settings.set(alice, "mod-a", 0, SettingValue::Float(1.5));
        settings.set(alice, "mod-b", 0, SettingValue::Bool(true));

        assert_eq!(settings.get(alice, "mod-a", 0), Some(SettingValue::Float(1.5)));
        assert_eq!(settings.get(alice, "mod-a", 1), None);
        assert_eq!(settings.get(alice, "mod-b", 0), Some(SettingValue::Bool(true)));
        assert_eq!(settings.get(bob, "mod-a", 0), None);
    }

    #[test]
    fn set_overwrites() {
        let mut settings = MemoryPlayerSettings::new();
        settings.set(PlayerGuid(7), "m", 0, SettingValue::Int(2));
        settings.set(PlayerGuid(7), "m", 0, SettingValue::Int(3));

        assert_eq!(settings.get(PlayerGuid(7), "m", 0), Some(SettingValue::Int(3)));
        assert_eq!(settings.len(), 1);
    }

    #[test]
    fn legacy_integer_reads_as_float() {
        assert_eq!(SettingValue::Int(3).as_f32(), Some(3.0));
        assert_eq!(SettingValue::Bool(true).as_f32(), None);
        assert_eq!(SettingValue::Int(0).as_bool(), Some(false));
    }
}
