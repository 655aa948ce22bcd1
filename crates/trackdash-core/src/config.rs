//! Configuration management for trackdash.
//!
//! Loads configuration from ${TRACKDASH_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Returns the default config template with comments.
///
/// Embedded from default_config.toml at compile time.
pub fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for trackdash configuration and log directories.
    //!
    //! TRACKDASH_HOME resolution order:
    //! 1. TRACKDASH_HOME environment variable (if set)
    //! 2. ~/.config/trackdash (default)
    //! 3. ./.trackdash when no home directory can be determined

    use std::path::PathBuf;

    /// Returns the trackdash home directory.
    pub fn home_dir() -> PathBuf {
        if let Ok(home) = std::env::var("TRACKDASH_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".trackdash"),
            |h| h.join(".config").join("trackdash"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        home_dir().join("config.toml")
    }

    /// Returns the directory log files are written to.
    pub fn log_dir() -> PathBuf {
        home_dir().join("logs")
    }

    /// Roadmap file used when neither `--data` nor `data_path` is set.
    pub fn default_data_path() -> PathBuf {
        home_dir().join("roadmap.json")
    }
}

/// Terminal UI behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Tick interval while something is animating, in milliseconds.
    pub tick_ms: u64,
    /// Draw a scrollbar when content overflows.
    pub show_scrollbar: bool,
    /// Accept vim-style navigation keys.
    pub vim_keys: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_ms: 100,
            show_scrollbar: true,
            vim_keys: true,
        }
    }
}

/// Color names for the immutable render theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub accent: String,
    pub selection_bg: String,
    pub muted: String,
    pub error: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            accent: "cyan".to_string(),
            selection_bg: "blue".to_string(),
            muted: "darkgray".to_string(),
            error: "red".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter directive when TRACKDASH_LOG is unset.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Roadmap JSON file exported by the plugin.
    pub data_path: Option<PathBuf>,
    pub ui: UiConfig,
    pub theme: ThemeConfig,
    pub log: LogConfig,
}

impl Config {
    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Picks the roadmap file: explicit override, then `data_path`, then the
    /// default under the home directory.
    pub fn resolve_data_path(&self, cli_override: Option<&Path>) -> PathBuf {
        cli_override
            .map(Path::to_path_buf)
            .or_else(|| self.data_path.clone())
            .unwrap_or_else(paths::default_data_path)
    }

    /// Writes the commented default template to `path` unless a file already exists.
    ///
    /// Returns `true` if a file was written.
    ///
    /// # Errors
    /// Returns an error if the directory or file cannot be created.
    pub fn init_at(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(true)
    }
}
