//! Host side of the weekendxp plugin contract.
//!
//! A plugin implements [`plugin::Plugin`] and exports a `plugin_entry_point`
//! symbol returning it. The host loads plugins with
//! [`plugin_loader::PluginLoader`] and hands each hook a [`plugin::Context`]
//! with its config, settings store and locale.

pub mod chat;
pub mod command;
pub mod locale;
pub mod player;
pub mod plugin;
pub mod plugin_loader;
pub mod settings;

pub use weekendxp_config as config;
