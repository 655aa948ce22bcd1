//! Config command handlers.

use std::path::Path;

use anyhow::{Context, Result, bail};
use trackdash_core::config::Config;

pub fn path(config_path: &Path) {
    println!("{}", config_path.display());
}

pub fn init(config_path: &Path) -> Result<()> {
    let created = Config::init_at(config_path)
        .with_context(|| format!("init config at {}", config_path.display()))?;
    if !created {
        bail!("Config already exists at {}", config_path.display());
    }
    println!("Created config at {}", config_path.display());
    Ok(())
}
