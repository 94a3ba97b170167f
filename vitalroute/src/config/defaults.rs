//! Default values and constants for all configuration settings.
//!
//! Contains all `DEFAULT_*` constants and the `ConfigFile::default()`
//! implementation.

use super::settings::*;

// =============================================================================
// Position watch defaults
// =============================================================================

/// Request the most precise positioning mode the source offers.
pub const DEFAULT_HIGH_ACCURACY: bool = true;

/// Default timeout in seconds for acquiring a single fix.
pub const DEFAULT_WATCH_TIMEOUT_SECS: u64 = 10;

/// Default maximum age in seconds for replayed cached fixes.
/// Zero means every fix must be freshly acquired.
pub const DEFAULT_MAX_CACHE_AGE_SECS: u64 = 0;

// =============================================================================
// Sampler defaults
// =============================================================================

/// Default significance threshold in meters.
/// Fixes closer than this to the last accepted fix are dropped as jitter.
pub const DEFAULT_THRESHOLD_METERS: f64 = 100.0;

/// Default capacity of the accepted-sample broadcast channel.
pub const DEFAULT_EVENT_CHANNEL_CAPACITY: usize = 32;

// =============================================================================
// Facility search defaults
// =============================================================================

/// Default search radius in meters (15 km around the current position).
pub const DEFAULT_SEARCH_RADIUS_METERS: f64 = 15_000.0;

/// Default facility category passed to the search provider.
pub const DEFAULT_FACILITY_CATEGORY: &str = "hospital";

/// Default keyword narrowing the category to emergency-capable facilities.
pub const DEFAULT_FACILITY_KEYWORD: &str = "multi specialty hospital";

/// Default timeout in seconds for a single search request.
pub const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = 10;

/// Default search provider endpoint (Google Places Nearby Search).
pub const DEFAULT_PLACES_ENDPOINT: &str =
    "https://maps.googleapis.com/maps/api/place/nearbysearch/json";

// =============================================================================
// Refresh controller defaults
// =============================================================================

/// Default capacity of the refresh controller command channel.
pub const DEFAULT_COMMAND_CHANNEL_CAPACITY: usize = 16;

/// Default capacity of the search result channel.
pub const DEFAULT_RESULT_CHANNEL_CAPACITY: usize = 16;

// =============================================================================
// ConfigFile::default()
// =============================================================================

impl Default for ConfigFile {
    fn default() -> Self {
        let config_dir = super::file::config_directory();

        Self {
            sampler: SamplerSettings {
                threshold_meters: DEFAULT_THRESHOLD_METERS,
                high_accuracy: DEFAULT_HIGH_ACCURACY,
                timeout_secs: DEFAULT_WATCH_TIMEOUT_SECS,
            },
            search: SearchSettings {
                radius_meters: DEFAULT_SEARCH_RADIUS_METERS,
                category: DEFAULT_FACILITY_CATEGORY.to_string(),
                keyword: DEFAULT_FACILITY_KEYWORD.to_string(),
                timeout_secs: DEFAULT_SEARCH_TIMEOUT_SECS,
                endpoint: DEFAULT_PLACES_ENDPOINT.to_string(),
                api_key: None,
            },
            logging: LoggingSettings {
                file: config_dir.join("vitalroute.log"),
            },
        }
    }
}
