//! Interactive dashboard command.

use std::sync::Arc;

use anyhow::Result;
use trackdash_core::Repository;
use trackdash_core::config::Config;

pub fn run(config: &Config, repo: Arc<dyn Repository>) -> Result<()> {
    let result = trackdash_tui::run_dashboard(config, repo);
    if let Err(err) = &result {
        tracing::error!(error = %format!("{err:#}"), "dashboard exited with error");
    }
    result
}
