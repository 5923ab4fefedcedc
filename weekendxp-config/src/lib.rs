//! Configuration lookup for weekendxp plugins.
//!
//! The host owns the configuration; plugins only see a [`ConfigProvider`] and
//! read the options they care about on every call, so a reload on the host
//! side is picked up without any cache invalidation.

use std::path::PathBuf;

mod memory;
mod toml_config;
mod value;

pub use memory::MemoryConfig;
pub use toml_config::TomlConfig;
pub use value::{ConfigValue, FromConfigValue};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Key-value source of named options.
pub trait ConfigProvider {
    /// Raw value stored under `key`, if any.
    fn value(&self, key: &str) -> Option<ConfigValue>;
}

impl dyn ConfigProvider + '_ {
    /// Typed lookup with a default.
    ///
    /// Missing keys resolve to `default` silently. A value that cannot be
    /// converted to `T` also resolves to `default`, with a warning.
    pub fn get_option<T: FromConfigValue>(&self, key: &str, default: T) -> T {
        let Some(value) = self.value(key) else {
            return default;
        };

        match T::from_config_value(&value) {
            Some(v) => v,
            None => {
                log::warn!(
                    "config option {key} has unexpected value {value:?}, using the default"
                );
                default
            }
        }
    }
}
