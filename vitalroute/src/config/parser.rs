//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This module contains the `parse_ini()` function and its helpers.
//! It is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;

use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [sampler] section
    if let Some(section) = ini.section(Some("sampler")) {
        if let Some(v) = section.get("threshold_meters") {
            let parsed: f64 = v.parse().map_err(|_| ConfigFileError::InvalidValue {
                section: "sampler".to_string(),
                key: "threshold_meters".to_string(),
                value: v.to_string(),
                reason: "must be a number (meters)".to_string(),
            })?;
            if !parsed.is_finite() || parsed < 0.0 {
                return Err(ConfigFileError::InvalidValue {
                    section: "sampler".to_string(),
                    key: "threshold_meters".to_string(),
                    value: v.to_string(),
                    reason: "must be zero or a positive number (meters)".to_string(),
                });
            }
            config.sampler.threshold_meters = parsed;
        }
        if let Some(v) = section.get("high_accuracy") {
            config.sampler.high_accuracy = parse_bool(v);
        }
        if let Some(v) = section.get("timeout_secs") {
            config.sampler.timeout_secs =
                v.parse().map_err(|_| ConfigFileError::InvalidValue {
                    section: "sampler".to_string(),
                    key: "timeout_secs".to_string(),
                    value: v.to_string(),
                    reason: "must be a positive integer (seconds)".to_string(),
                })?;
        }
    }

    // [search] section
    if let Some(section) = ini.section(Some("search")) {
        if let Some(v) = section.get("radius_meters") {
            let parsed: f64 = v.parse().map_err(|_| ConfigFileError::InvalidValue {
                section: "search".to_string(),
                key: "radius_meters".to_string(),
                value: v.to_string(),
                reason: "must be a number (meters)".to_string(),
            })?;
            if !parsed.is_finite() || parsed <= 0.0 {
                return Err(ConfigFileError::InvalidValue {
                    section: "search".to_string(),
                    key: "radius_meters".to_string(),
                    value: v.to_string(),
                    reason: "must be a positive number (meters)".to_string(),
                });
            }
            config.search.radius_meters = parsed;
        }
        if let Some(v) = section.get("category") {
            let v = v.trim();
            if !v.is_empty() {
                config.search.category = v.to_lowercase();
            }
        }
        if let Some(v) = section.get("keyword") {
            let v = v.trim();
            if !v.is_empty() {
                config.search.keyword = v.to_string();
            }
        }
        if let Some(v) = section.get("timeout_secs") {
            config.search.timeout_secs =
                v.parse().map_err(|_| ConfigFileError::InvalidValue {
                    section: "search".to_string(),
                    key: "timeout_secs".to_string(),
                    value: v.to_string(),
                    reason: "must be a positive integer (seconds)".to_string(),
                })?;
        }
        if let Some(v) = section.get("endpoint") {
            let v = v.trim();
            if !v.is_empty() {
                config.search.endpoint = v.to_string();
            }
        }
        if let Some(v) = section.get("api_key") {
            let v = v.trim();
            if !v.is_empty() {
                config.search.api_key = Some(v.to_string());
            }
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = expand_tilde(v);
            }
        }
    }

    Ok(config)
}

/// Parse a boolean value from a config string.
/// Accepts: true/false, yes/no, 1/0, on/off (case-insensitive)
pub(super) fn parse_bool(value: &str) -> bool {
    let v = value.trim().to_lowercase();
    v == "true" || v == "1" || v == "yes" || v == "on"
}

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
