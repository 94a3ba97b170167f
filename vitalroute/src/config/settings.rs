//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing logic.

use std::path::PathBuf;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    /// Location sampler settings
    pub sampler: SamplerSettings,
    /// Facility search settings
    pub search: SearchSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Location sampler configuration.
#[derive(Debug, Clone)]
pub struct SamplerSettings {
    /// Minimum displacement in meters before a fix is considered significant.
    /// Default: 100
    pub threshold_meters: f64,
    /// Request the most precise positioning mode from the source.
    /// Default: true
    pub high_accuracy: bool,
    /// Timeout in seconds for acquiring a single fix.
    /// Default: 10 seconds
    pub timeout_secs: u64,
}

/// Facility search configuration.
#[derive(Debug, Clone)]
pub struct SearchSettings {
    /// Search radius around the current position, in meters.
    /// Default: 15000 (15 km)
    pub radius_meters: f64,
    /// Facility category passed to the search provider.
    /// Default: "hospital"
    pub category: String,
    /// Free-text keyword narrowing the category.
    /// Default: "multi specialty hospital"
    pub keyword: String,
    /// Timeout in seconds for a single search request.
    /// Default: 10 seconds
    pub timeout_secs: u64,
    /// Search provider endpoint URL.
    pub endpoint: String,
    /// API key for the search provider (None = provider runs unauthenticated
    /// or a static catalog is used instead).
    pub api_key: Option<String>,
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}
