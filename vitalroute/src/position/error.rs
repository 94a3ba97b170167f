//! Classified failures from the continuous position source.

use std::time::Duration;

use thiserror::Error;

/// Errors reported by a position source.
///
/// Every provider-specific failure is classified into one of these kinds at
/// the adapter boundary; no raw provider error crosses into the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    /// The source refused access to position data.
    ///
    /// Surfaced to the user; the last known fix stays displayed. The
    /// subscription is kept so a later grant can resume fixes, but nothing
    /// is retried actively.
    #[error("position permission denied: {0}")]
    PermissionDenied(String),

    /// The source could not produce a fix (no signal, sensor failure).
    ///
    /// Transient; the subscription remains active and may recover.
    #[error("position unavailable: {0}")]
    PositionUnavailable(String),

    /// The source failed to produce a fix within its configured timeout.
    ///
    /// Transient; the subscription remains active and may recover.
    #[error("position request timed out after {0:?}")]
    Timeout(Duration),

    /// The environment has no usable position capability.
    ///
    /// Fatal for the sampler: surfaced once, then the sampler stops.
    #[error("continuous position reporting unsupported: {0}")]
    Unsupported(String),
}

impl PositionError {
    /// Whether the subscription can keep running after this failure.
    ///
    /// Only [`PositionError::Unsupported`] ends the sampler; everything else
    /// leaves the stream open for later reports.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Unsupported(_))
    }
}
