//! Configuration loading for the dispatch client.
//!
//! Configuration lives in `~/.vitalroute/config.ini` and every key is
//! optional: a missing file or missing key falls back to the defaults in
//! [`defaults`]. Invalid values fail loudly at load time rather than being
//! silently replaced.
//!
//! # Example
//!
//! ```no_run
//! use vitalroute::config::ConfigFile;
//!
//! let config = ConfigFile::load().unwrap();
//! println!("threshold = {} m", config.sampler.threshold_meters);
//! ```

pub mod defaults;
mod file;
mod parser;
mod settings;

pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{ConfigFile, LoggingSettings, SamplerSettings, SearchSettings};
