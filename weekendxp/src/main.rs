use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use clap::Parser;
use weekendxp_config::TomlConfig;
use weekendxp_plugin_double_xp::DoubleXpWeekend;
use weekendxp_plugins::{command::SecurityLevel, plugin_loader::PluginLoader};

mod host;
mod store;

use host::{Host, HostConfig, Outcome};
use store::SettingsFile;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Module config file. Without one every option uses its default.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Load plugin libraries from this directory instead of the built-in
    /// Double XP Weekend plugin.
    #[arg(short, long)]
    plugins: Option<PathBuf>,

    /// JSON file player settings are loaded from and saved to.
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Run commands with game master access instead of player access.
    #[arg(long)]
    gm: bool,

    /// One of off, error, warn, info, debug, trace.
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level: log::LevelFilter = args
        .log_level
        .parse()
        .map_err(|_| format!("invalid log level '{}'", args.log_level))?;
    simple_logger::SimpleLogger::new().with_level(level).init()?;

    let config = args.config.as_ref().map(TomlConfig::load).transpose()?;

    let settings_file = args.settings.map(SettingsFile::new);
    let settings = match &settings_file {
        Some(file) => file.load()?,
        None => Default::default(),
    };

    let mut loader = PluginLoader::new();
    match &args.plugins {
        Some(dir) => {
            let loaded = loader.load_plugins_from_directory(dir)?;
            if loaded == 0 {
                log::warn!("No plugins found in {:?}", dir);
            }
        }
        None => {
            loader.register(Box::new(DoubleXpWeekend::new()));
        }
    }

    let security = if args.gm {
        SecurityLevel::GameMaster
    } else {
        SecurityLevel::Player
    };
    let mut host = Host::new(HostConfig::new(config), settings, loader, security);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        match host.handle_line(&line?) {
            Ok(Outcome::Continue(output)) => {
                for message in output {
                    writeln!(stdout, "{message}")?;
                }
            }
            Ok(Outcome::Quit) => break,
            Err(e) => writeln!(stdout, "error: {e}")?,
        }
    }

    if let Some(file) = &settings_file {
        file.save(host.settings())?;
        log::info!("Saved player settings to {:?}", file.path());
    }
    host.unload();

    Ok(())
}
