//! Continuous position source contract.

use std::time::Duration;

use tokio::sync::mpsc;

use crate::config::defaults::{
    DEFAULT_HIGH_ACCURACY, DEFAULT_MAX_CACHE_AGE_SECS, DEFAULT_WATCH_TIMEOUT_SECS,
};

use super::{LocationSample, PositionError};

/// Options forwarded to the position source when subscribing.
///
/// Defaults prefer the most precise positioning mode, give each fix
/// 10 seconds, and never replay cached fixes.
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Ask the source for its most precise positioning mode.
    pub high_accuracy: bool,

    /// How long the source may take per fix before reporting
    /// [`PositionError::Timeout`].
    pub timeout: Duration,

    /// Oldest cached fix the source may replay. Zero forces fresh fixes.
    pub max_cache_age: Duration,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            high_accuracy: DEFAULT_HIGH_ACCURACY,
            timeout: Duration::from_secs(DEFAULT_WATCH_TIMEOUT_SECS),
            max_cache_age: Duration::from_secs(DEFAULT_MAX_CACHE_AGE_SECS),
        }
    }
}

/// One report from a continuous position source.
#[derive(Debug, Clone)]
pub enum PositionEvent {
    /// The source produced a fix.
    Fix(LocationSample),

    /// The source failed. The subscription may still recover unless the
    /// error is [`PositionError::Unsupported`].
    Failure(PositionError),
}

/// Continuous position reporting capability.
///
/// Implementations start whatever task feeds the returned channel (a GPS
/// adapter loop, a simulator, a replay file). Dropping the receiver
/// unsubscribes: the feeding task observes the closed channel and winds
/// down, so no timers or sockets outlive the consumer.
pub trait PositionSource: Send + Sync {
    /// Begin continuous position reporting.
    ///
    /// # Arguments
    ///
    /// * `options` - Accuracy, per-fix timeout and cache policy for the
    ///   subscription
    ///
    /// # Errors
    ///
    /// Returns [`PositionError::Unsupported`] when the environment has no
    /// position capability at all. Per-fix failures are reported in-stream
    /// as [`PositionEvent::Failure`] instead.
    fn subscribe(
        &self,
        options: WatchOptions,
    ) -> Result<mpsc::Receiver<PositionEvent>, PositionError>;
}
