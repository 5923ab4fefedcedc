use crate::{
    chat::ChatHandler,
    command::{ChatCommand, CommandError, SecurityLevel},
    plugin::{Context, Plugin, PluginMetadata},
    player::{Player, XpSource},
};
use libloading::{Library, Symbol};
use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

/// Name of the symbol every plugin library exports.
pub const ENTRY_POINT: &[u8] = b"plugin_entry_point";

#[allow(improper_ctypes_definitions)]
pub type PluginEntryPoint = unsafe extern "C" fn() -> Box<dyn Plugin>;

#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    #[error("failed to load plugin library {path:?}")]
    Load {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },
    #[error("plugin library {path:?} has no plugin_entry_point")]
    MissingEntryPoint {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },
    #[error("failed to read plugins directory {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// Field order matters: the plugin must drop before the library holding its code.
struct LoadedPlugin {
    plugin: Box<dyn Plugin>,
    _library: Option<Library>,
}

pub struct PluginLoader {
    plugins: Vec<LoadedPlugin>,
}

impl PluginLoader {
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
        }
    }

    /// Registers a plugin that is linked into the host.
    pub fn register(&mut self, plugin: Box<dyn Plugin>) -> PluginMetadata {
        let metadata = plugin.metadata();
        plugin.on_load();
        log::info!("Loaded plugin {} v{}", metadata.name, metadata.version);
        self.plugins.push(LoadedPlugin {
            plugin,
            _library: None,
        });
        metadata
    }

    pub fn load_plugin<P: AsRef<OsStr>>(&mut self, path: P) -> Result<PluginMetadata, PluginError> {
        let path = PathBuf::from(path.as_ref());
        let lib = unsafe { Library::new(&path) }.map_err(|source| PluginError::Load {
            path: path.clone(),
            source,
        })?;

        let plugin = unsafe {
            let plugin_entry_point: Symbol<PluginEntryPoint> =
                lib.get(ENTRY_POINT)
                    .map_err(|source| PluginError::MissingEntryPoint {
                        path: path.clone(),
                        source,
                    })?;
            plugin_entry_point()
        };

        let metadata = plugin.metadata();
        plugin.on_load();
        log::info!(
            "Loaded plugin {} v{} from {:?}",
            metadata.name,
            metadata.version,
            path
        );
        self.plugins.push(LoadedPlugin {
            plugin,
            _library: Some(lib),
        });
        Ok(metadata)
    }

    /// Loads every plugin library in `dir`, creating the directory if needed.
    ///
    /// A library that fails to load is logged and skipped. Returns the
    /// number of plugins loaded.
    pub fn load_plugins_from_directory<P: AsRef<Path>>(
        &mut self,
        dir: P,
    ) -> Result<usize, PluginError> {
        let path = dir.as_ref();
        let io_err = |source| PluginError::Io {
            path: path.to_path_buf(),
            source,
        };

        if !path.exists() {
            fs::create_dir_all(path).map_err(io_err)?;
        }

        let mut loaded = 0;
        for entry in fs::read_dir(path).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();

            if Self::is_valid_plugin(&path) {
                log::info!("Loading plugin: {:?}", path.file_name().unwrap_or_default());
                match self.load_plugin(path.as_os_str()) {
                    Ok(_) => loaded += 1,
                    Err(e) => log::error!("{e}"),
                }
            }
        }
        Ok(loaded)
    }

    fn is_valid_plugin(path: &Path) -> bool {
        if let Some(extension) = path.extension() {
            return extension == "so"
                || extension == "dll"
                || extension == "dylib"
                || extension == "plugin";
        }
        false
    }

    pub fn get_plugins(&self) -> impl Iterator<Item = &dyn Plugin> {
        self.plugins.iter().map(|p| p.plugin.as_ref())
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Calls `on_unload` on every plugin and releases their libraries.
    pub fn unload_all(&mut self) {
        for loaded in self.plugins.drain(..).rev() {
            let metadata = loaded.plugin.metadata();
            loaded.plugin.on_unload();
            log::info!("Unloaded plugin {}", metadata.name);
        }
    }

    pub fn fire_login(&self, ctx: &mut Context<'_>, chat: &mut dyn ChatHandler) {
        for loaded in &self.plugins {
            loaded.plugin.on_login(ctx, chat);
        }
    }

    /// Runs every plugin's experience hook in load order and returns the
    /// final amount.
    pub fn fire_give_xp(
        &self,
        ctx: &mut Context<'_>,
        player: &Player,
        amount: u32,
        source: XpSource,
    ) -> u32 {
        let mut amount = amount;
        for loaded in &self.plugins {
            loaded.plugin.on_give_xp(ctx, player, &mut amount, source);
        }
        amount
    }

    /// Finds the command `line` invokes and runs it.
    ///
    /// When several commands match, the one with the most words wins.
    pub fn dispatch_command(
        &self,
        ctx: &mut Context<'_>,
        chat: &mut dyn ChatHandler,
        security: SecurityLevel,
        line: &str,
    ) -> Result<(), CommandError> {
        let (plugin, command, args) = self
            .find_command(line)
            .ok_or(CommandError::UnknownCommand)?;

        if chat.player().is_none() && !command.allow_console {
            return Err(CommandError::PlayerRequired);
        }
        if security < command.security {
            return Err(CommandError::Forbidden {
                required: command.security,
            });
        }

        log::debug!("Dispatching command '{}' to {}", command.name, plugin.metadata().name);
        plugin.on_command(ctx, chat, command, args)
    }

    fn find_command<'a, 'l>(
        &'a self,
        line: &'l str,
    ) -> Option<(&'a dyn Plugin, &'a ChatCommand, &'l str)> {
        self.plugins
            .iter()
            .flat_map(|loaded| {
                loaded
                    .plugin
                    .commands()
                    .iter()
                    .map(move |command| (loaded.plugin.as_ref(), command))
            })
            .filter_map(|(plugin, command)| {
                command
                    .match_line(line)
                    .map(|args| (plugin, command, args))
            })
            .max_by_key(|(_, command, _)| command.depth())
    }
}

impl Default for PluginLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PluginLoader {
    fn drop(&mut self) {
        self.unload_all();
    }
}
