//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/treedag/treedag.toml`
//! 3. Environment variables: `TREEDAG_*` prefix
//! 4. Command line flags (applied by the CLI layer)
//!
//! None of these settings change what is written to stdout.

use std::path::{Path, PathBuf};

use config::{Config, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::ApplicationError;
use crate::domain::MatchStrategy;

/// Unified configuration for treedag.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Subtree matching strategy used by compression
    pub strategy: MatchStrategy,
    /// Print statistics to stderr after each run
    pub stats: bool,
    /// Render input and result as indented trees on stderr
    pub show: bool,
}

/// Raw settings for intermediate parsing (None means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub strategy: Option<MatchStrategy>,
    pub stats: Option<bool>,
    pub show: Option<bool>,
}

/// Get the XDG config directory for treedag.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "treedag").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("treedag.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: config::ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Scalar options: overlay wins if Some, otherwise keep base.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            strategy: overlay.strategy.unwrap_or(self.strategy),
            stats: overlay.stats.unwrap_or(self.stats),
            show: overlay.show.unwrap_or(self.show),
        }
    }

    /// Load settings from the global config file and environment.
    pub fn load() -> Result<Self, ApplicationError> {
        let global = global_config_path();
        Self::load_from(global.as_deref())
    }

    /// Like [`Settings::load`], but a broken configuration only logs a
    /// warning and yields the defaults.
    pub fn load_or_default() -> Self {
        let global = global_config_path();
        Self::load_or_default_from(global.as_deref())
    }

    pub fn load_or_default_from(file: Option<&Path>) -> Self {
        Self::load_from(file).unwrap_or_else(|e| {
            warn!("ignoring configuration, using defaults: {}", e);
            Self::default()
        })
    }

    /// Load settings with `file` in place of the global config file.
    ///
    /// A missing file is skipped; an unreadable or malformed one is an error.
    pub fn load_from(file: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(path) = file {
            if path.exists() {
                debug!("loading config from {}", path.display());
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw);
            }
        }

        Self::apply_env_overrides(current)
    }

    /// Apply TREEDAG_* environment variables as explicit overrides.
    fn apply_env_overrides(settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("TREEDAG").prefix_separator("_"))
            .build()
            .map_err(config_err)?;

        let mut raw = RawSettings::default();
        if let Ok(val) = config.get_string("strategy") {
            raw.strategy = Some(val.parse().map_err(|message| ApplicationError::Config {
                message: format!("TREEDAG_STRATEGY: {}", message),
            })?);
        }
        if let Ok(val) = config.get_bool("stats") {
            raw.stats = Some(val);
        }
        if let Ok(val) = config.get_bool("show") {
            raw.show = Some(val);
        }

        Ok(settings.merge_with(&raw))
    }
}
