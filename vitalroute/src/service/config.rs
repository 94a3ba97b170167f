//! Service-level configuration.
//!
//! [`ServiceConfig`] groups the per-component configs the dispatch service
//! wires together, and knows how to assemble itself from a loaded
//! [`ConfigFile`].

use std::time::Duration;

use crate::config::ConfigFile;
use crate::facility::RefreshConfig;
use crate::position::{SamplerConfig, WatchOptions};

/// Top-level dispatch service configuration.
#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    /// Location sampler configuration.
    pub sampler: SamplerConfig,
    /// Facility refresh configuration.
    pub refresh: RefreshConfig,
}

impl ServiceConfig {
    /// Build a service config from a loaded config file.
    pub fn from_config_file(config: &ConfigFile) -> Self {
        let watch = WatchOptions {
            high_accuracy: config.sampler.high_accuracy,
            timeout: Duration::from_secs(config.sampler.timeout_secs),
            ..WatchOptions::default()
        };

        Self {
            sampler: SamplerConfig {
                threshold_meters: config.sampler.threshold_meters,
                watch,
                ..SamplerConfig::default()
            },
            refresh: RefreshConfig::from_settings(&config.search),
        }
    }
}
