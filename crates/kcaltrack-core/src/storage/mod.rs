mod config;
pub mod log_db;

pub use config::{Config, SummaryConfig};
pub use log_db::LogDb;

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the data directory, `~/.config/kcaltrack[-dev]/`.
///
/// `KCALTRACK_DATA_DIR` overrides the location entirely (used by tests).
/// Set `KCALTRACK_ENV=dev` to use the development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = if let Ok(overridden) = std::env::var("KCALTRACK_DATA_DIR") {
        PathBuf::from(overridden)
    } else {
        let base_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config");

        let env = std::env::var("KCALTRACK_ENV").unwrap_or_else(|_| "production".to_string());

        if env == "dev" {
            base_dir.join("kcaltrack-dev")
        } else {
            base_dir.join("kcaltrack")
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DataDir(e.to_string()))?;
    Ok(dir)
}
