//! Shared location-sampler status for display.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use super::{LocationSample, PositionError};

/// Shared sampler status for display in a UI.
///
/// Thread-safe snapshot holder: the sampler writes, consumers read. This is
/// the only way other components observe `last_accepted`; nobody holds a
/// mutable reference into the sampler.
#[derive(Debug, Default)]
pub struct SharedPositionStatus {
    inner: RwLock<PositionStatusSnapshot>,
}

impl SharedPositionStatus {
    /// Create a new shared status holder.
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: RwLock::new(PositionStatusSnapshot::default()),
        })
    }

    /// Record an accepted sample.
    ///
    /// An accepted fix supersedes any earlier source failure.
    pub fn record_accepted(&self, sample: &LocationSample) {
        if let Ok(mut inner) = self.inner.write() {
            inner.last_accepted = Some(sample.clone());
            inner.last_update = Some(Utc::now());
            inner.last_error = None;
        }
    }

    /// Record a source failure.
    ///
    /// `last_accepted` stays as it is, so consumers can keep showing the
    /// last-known-good position alongside the error.
    pub fn record_failure(&self, error: PositionError) {
        if let Ok(mut inner) = self.inner.write() {
            inner.last_error = Some(error);
        }
    }

    /// Record whether the sampler currently holds a live subscription.
    pub fn set_watching(&self, watching: bool) {
        if let Ok(mut inner) = self.inner.write() {
            inner.watching = watching;
        }
    }

    /// Get a snapshot of the current status.
    pub fn snapshot(&self) -> PositionStatusSnapshot {
        self.inner.read().map(|r| r.clone()).unwrap_or_default()
    }
}

/// Snapshot of sampler status for display.
#[derive(Debug, Clone, Default)]
pub struct PositionStatusSnapshot {
    /// Most recently accepted sample, if any.
    pub last_accepted: Option<LocationSample>,

    /// Wall-clock time of the most recent accepted sample.
    pub last_update: Option<DateTime<Utc>>,

    /// Most recent source failure; cleared by the next accepted fix.
    pub last_error: Option<PositionError>,

    /// Whether the sampler currently holds a live subscription.
    pub watching: bool,
}

impl PositionStatusSnapshot {
    /// Format the position state as a single line.
    pub fn position_line(&self) -> String {
        match (&self.last_accepted, &self.last_error) {
            (Some(sample), None) => format!(
                "Pos: {:.4}°, {:.4}°",
                sample.point.latitude, sample.point.longitude
            ),
            (Some(sample), Some(error)) => format!(
                "Pos: {:.4}°, {:.4}° (last known; {error})",
                sample.point.latitude, sample.point.longitude
            ),
            (None, Some(error)) => format!("No fix: {error}"),
            (None, None) => "Waiting for first fix...".to_string(),
        }
    }
}
