//! Raw fix snapshot from the continuous position source.

use std::time::{Duration, Instant};

use crate::geo::GeoPoint;

/// A single position fix.
///
/// Created each time the underlying source reports. Samples are transient:
/// the sampler consumes them immediately and retains only the most recently
/// accepted one.
///
/// # Timestamp
///
/// The `observed_at` field indicates when the fix was produced. Consumers use
/// this to judge freshness; there is no separate confidence field because
/// different consumers have different staleness tolerances.
#[derive(Debug, Clone)]
pub struct LocationSample {
    /// Where the source placed the subject.
    pub point: GeoPoint,

    /// When this fix was observed.
    pub observed_at: Instant,

    /// Reported horizontal accuracy in meters, if the source provides one.
    ///
    /// Lower is better. `None` when the source does not estimate accuracy.
    pub accuracy_meters: Option<f64>,
}

impl LocationSample {
    /// Create a sample observed now, without an accuracy estimate.
    pub fn new(point: GeoPoint) -> Self {
        Self {
            point,
            observed_at: Instant::now(),
            accuracy_meters: None,
        }
    }

    /// Create a sample observed now, with the source's accuracy estimate.
    pub fn with_accuracy(point: GeoPoint, accuracy_meters: f64) -> Self {
        Self {
            point,
            observed_at: Instant::now(),
            accuracy_meters: Some(accuracy_meters),
        }
    }

    /// Get the age of this sample (time since it was observed).
    pub fn age(&self) -> Duration {
        self.observed_at.elapsed()
    }

    /// Check if this sample is stale (older than the given duration).
    pub fn is_stale(&self, max_age: Duration) -> bool {
        self.age() > max_age
    }
}
