//! CLI entry and dispatch.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use trackdash_core::config::{self, Config};
use trackdash_core::{JsonFileRepository, Repository};

use crate::logging;

mod commands;

#[derive(Parser)]
#[command(name = "trackdash")]
#[command(version)]
#[command(about = "Terminal dashboard for a task-tracking roadmap")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Roadmap JSON file (overrides `data_path` from config)
    #[arg(long, value_name = "FILE", global = true)]
    data: Option<PathBuf>,

    /// Config file to use instead of $TRACKDASH_HOME/config.toml
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Print the track list (tab separated) and exit
    Tracks,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let Cli {
        command,
        data,
        config: config_override,
    } = Cli::parse();

    // Config commands never load the config, so a broken file can be replaced.
    if let Some(Commands::Config { command }) = command {
        let path = config_override.unwrap_or_else(config::paths::config_path);
        return match command {
            ConfigCommands::Path => {
                commands::config::path(&path);
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(&path),
        };
    }

    let config = match &config_override {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("load config")?;

    let _log_guard = logging::init(&config.log).context("init logging")?;

    let data_path = config.resolve_data_path(data.as_deref());
    tracing::info!(data = %data_path.display(), "using roadmap");
    let repo: Arc<dyn Repository> = Arc::new(JsonFileRepository::new(data_path));

    if matches!(command, Some(Commands::Tracks)) {
        return commands::tracks::run(repo.as_ref());
    }

    // one tokio runtime for the dashboard's background work
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    let _enter = rt.enter();
    commands::dashboard::run(&config, repo)
}
