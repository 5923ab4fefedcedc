use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use weekendxp_plugins::settings::MemoryPlayerSettings;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to access settings file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("settings file {path:?} is not valid")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Player settings persisted as a JSON file.
pub struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is an empty store.
    pub fn load(&self) -> Result<MemoryPlayerSettings, StoreError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(MemoryPlayerSettings::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&data).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })
    }

    pub fn save(&self, settings: &MemoryPlayerSettings) -> Result<(), StoreError> {
        let data = serde_json::to_string_pretty(settings).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;

        fs::write(&self.path, data).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}
