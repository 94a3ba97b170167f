//! Configuration file handling for ~/.vitalroute/config.ini.
//!
//! Loads user configuration with sensible defaults. Settings structs live in
//! [`super::settings`], constants in [`super::defaults`], parsing in
//! [`super::parser`].

use ini::Ini;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::settings::ConfigFile;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },
}

impl ConfigFile {
    /// Load configuration from the default path (~/.vitalroute/config.ini).
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load() -> Result<Self, ConfigFileError> {
        let path = config_file_path();
        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }
}

/// Get the path to the config directory (~/.vitalroute).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".vitalroute")
}

/// Get the path to the config file (~/.vitalroute/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::*;

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();

        assert_eq!(config.sampler.threshold_meters, DEFAULT_THRESHOLD_METERS);
        assert!(config.sampler.high_accuracy);
        assert_eq!(config.search.radius_meters, DEFAULT_SEARCH_RADIUS_METERS);
        assert_eq!(config.search.category, DEFAULT_FACILITY_CATEGORY);
        assert_eq!(config.search.keyword, DEFAULT_FACILITY_KEYWORD);
        assert!(config.search.api_key.is_none());
        assert!(config.logging.file.ends_with("vitalroute.log"));
    }

    #[test]
    fn test_load_nonexistent_returns_defaults() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.ini");

        let config = ConfigFile::load_from(&config_path).unwrap();
        let default = ConfigFile::default();

        assert_eq!(
            config.sampler.threshold_meters,
            default.sampler.threshold_meters
        );
        assert_eq!(config.search.timeout_secs, default.search.timeout_secs);
    }

    #[test]
    fn test_config_file_path_under_home() {
        let path = config_file_path();
        assert!(path.ends_with(".vitalroute/config.ini"));
    }
}
