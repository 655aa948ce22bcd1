//! Terminal dashboard for trackdash.
//!
//! The viewport engine (`viewport`) is the reusable core; everything else
//! wires it into an Elm-style loop: `UiEvent` in, `update` mutates
//! `AppState`, `UiEffect` out, executed by `TuiRuntime`.

pub mod command;
pub mod common;
pub mod effects;
pub mod events;
pub mod layout;
pub mod render;
pub mod runtime;
pub mod screens;
pub mod state;
pub mod terminal;
pub mod theme;
pub mod update;
pub mod viewport;

use std::io::{IsTerminal, stdout};
use std::sync::Arc;

use anyhow::Result;
pub use runtime::TuiRuntime;
use trackdash_core::Repository;
use trackdash_core::config::Config;

/// Runs the interactive dashboard until the user quits.
///
/// Must be called from inside a multi-threaded tokio runtime: the event loop
/// blocks the calling thread while repository work runs on spawned tasks.
///
/// # Errors
/// Returns an error if stdout is not a terminal or the terminal cannot be
/// set up.
pub fn run_dashboard(config: &Config, repo: Arc<dyn Repository>) -> Result<()> {
    if !stdout().is_terminal() {
        anyhow::bail!(
            "The dashboard requires a terminal.\n\
             Use `trackdash tracks` for non-interactive output."
        );
    }

    tracing::info!("dashboard starting");
    let mut runtime = TuiRuntime::new(config, repo)?;
    runtime.run()
}
