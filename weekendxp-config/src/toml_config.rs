use std::{
    fs,
    path::{Path, PathBuf},
};

use toml::{Table, Value};

use crate::{ConfigError, ConfigProvider, ConfigValue};

/// Config file provider.
///
/// Files are written in the usual `Module.Option = value` style, which is
/// valid TOML: dotted keys become nested tables, and both `1` and `true`
/// work for booleans. Quoted flat keys (`"Module.Option" = 1`) are also
/// accepted.
#[derive(Debug, Clone)]
pub struct TomlConfig {
    path: Option<PathBuf>,
    table: Table,
}

impl TomlConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref().to_path_buf();
        let table = Self::read_table(&path)?;
        log::info!("Loaded config from {:?}", path);

        Ok(Self {
            path: Some(path),
            table,
        })
    }

    pub fn parse(source: &str) -> Result<Self, toml::de::Error> {
        Ok(Self {
            path: None,
            table: source.parse()?,
        })
    }

    /// Re-reads the file this config was loaded from.
    ///
    /// On failure the previous values are kept. Configs built with
    /// [`TomlConfig::parse`] have nothing to reload.
    pub fn reload(&mut self) -> Result<(), ConfigError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        self.table = Self::read_table(path)?;
        log::info!("Reloaded config from {:?}", path);
        Ok(())
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn read_table(path: &Path) -> Result<Table, ConfigError> {
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        source.parse::<Table>().map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn lookup(&self, key: &str) -> Option<&Value> {
        if let Some(value) = self.table.get(key) {
            return Some(value);
        }

        let mut segments = key.split('.');
        let mut current = self.table.get(segments.next()?)?;
        for segment in segments {
            current = current.as_table()?.get(segment)?;
        }
        Some(current)
    }
}

impl ConfigProvider for TomlConfig {
    fn value(&self, key: &str) -> Option<ConfigValue> {
        match self.lookup(key)? {
            Value::Boolean(b) => Some(ConfigValue::Bool(*b)),
            Value::Integer(n) => Some(ConfigValue::Integer(*n)),
            Value::Float(f) => Some(ConfigValue::Float(*f)),
            Value::String(s) => Some(ConfigValue::String(s.clone())),
            other => {
                log::warn!("config option {key} has unsupported type {}", other.type_str());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const SAMPLE: &str = r#"
# Double XP Weekend
XPWeekend.Enabled = 1
XPWeekend.AlwaysEnabled = false
XPWeekend.xpAmount = 2.5
XPWeekend.MaxLevel = 70
"XPWeekend.Announce" = true
"#;

    #[test]
    fn dotted_and_flat_keys() {
        let config = TomlConfig::parse(SAMPLE).unwrap();
        let provider: &dyn ConfigProvider = &config;

        assert!(provider.get_option("XPWeekend.Enabled", false));
        assert!(!provider.get_option("XPWeekend.AlwaysEnabled", true));
        assert_eq!(provider.get_option("XPWeekend.xpAmount", 2.0f32), 2.5);
        assert_eq!(provider.get_option("XPWeekend.MaxLevel", 80u32), 70);
        assert!(provider.get_option("XPWeekend.Announce", false));
        assert!(provider.value("XPWeekend.QuestOnly").is_none());
        assert!(provider.value("Missing.Key.Deep").is_none());
    }

    #[test]
    fn table_value_is_not_an_option() {
        let config = TomlConfig::parse(SAMPLE).unwrap();
        assert!(config.value("XPWeekend").is_none());
    }

    #[test]
    fn load_and_reload() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "XPWeekend.MaxLevel = 60").unwrap();

        let mut config = TomlConfig::load(file.path()).unwrap();
        assert_eq!(config.value("XPWeekend.MaxLevel"), Some(ConfigValue::Integer(60)));

        fs::write(file.path(), "XPWeekend.MaxLevel = 55\n").unwrap();
        config.reload().unwrap();
        assert_eq!(config.value("XPWeekend.MaxLevel"), Some(ConfigValue::Integer(55)));
    }

    #[test]
    fn failed_reload_keeps_values() {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), "XPWeekend.MaxLevel = 60\n").unwrap();
        let mut config = TomlConfig::load(file.path()).unwrap();

        fs::write(file.path(), "XPWeekend.MaxLevel = = 1\n").unwrap();
        assert!(matches!(config.reload(), Err(ConfigError::Parse { .. })));
        assert_eq!(config.value("XPWeekend.MaxLevel"), Some(ConfigValue::Integer(60)));
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = TomlConfig::load(dir.path().join("nope.conf")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
