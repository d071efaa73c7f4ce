//! TOML-based application configuration.
//!
//! Stores the tuning knobs that are preferences rather than data:
//! - Adherence tolerance band for period summaries
//! - Number of recent days fed to the advice context
//!
//! Configuration is stored at `~/.config/kcaltrack/config.toml`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::ConfigError;

/// Summary/aggregation preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// A day counts as adherent when |net - target| is within this band.
    #[serde(default = "default_tolerance")]
    pub adherence_tolerance_kcal: f64,
    /// How many trailing days of summaries go into the advice context.
    #[serde(default = "default_context_days")]
    pub context_days: u32,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/kcaltrack/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub summary: SummaryConfig,
}

fn default_tolerance() -> f64 {
    200.0
}

fn default_context_days() -> u32 {
    7
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            adherence_tolerance_kcal: default_tolerance(),
            context_days: default_context_days(),
        }
    }
}

impl Config {
    /// Path of the config file inside the data directory.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load the configuration, falling back to defaults when the file does
    /// not exist yet.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::LoadFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Save the configuration.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }
}
