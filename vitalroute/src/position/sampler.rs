//! Location sampler that gates raw fixes and broadcasts significant movement.
//!
//! The sampler subscribes to a [`PositionSource`], runs every incoming fix
//! through the [`SignificanceFilter`], and re-broadcasts only accepted
//! samples. Source failures are classified, recorded on the shared status,
//! and never disturb the last accepted fix.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace, warn};

use crate::config::defaults::{DEFAULT_EVENT_CHANNEL_CAPACITY, DEFAULT_THRESHOLD_METERS};

use super::filter::{Significance, SignificanceFilter};
use super::sample::LocationSample;
use super::source::{PositionEvent, PositionSource, WatchOptions};
use super::status::SharedPositionStatus;
use super::PositionError;

/// Location sampler configuration.
#[derive(Debug, Clone)]
pub struct SamplerConfig {
    /// Minimum displacement, in meters, for a fix to be emitted downstream.
    pub threshold_meters: f64,
    /// Options forwarded to the position source's subscribe call.
    pub watch: WatchOptions,
    /// Capacity of the accepted-sample broadcast channel.
    pub channel_capacity: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            threshold_meters: DEFAULT_THRESHOLD_METERS,
            watch: WatchOptions::default(),
            channel_capacity: DEFAULT_EVENT_CHANNEL_CAPACITY,
        }
    }
}

/// Location sampler statistics for monitoring.
#[derive(Debug, Default)]
pub struct SamplerStats {
    /// Raw fixes received from the source.
    pub fixes_received: AtomicU64,
    /// Fixes that passed the significance gate.
    pub fixes_accepted: AtomicU64,
    /// Fixes dropped as jitter.
    pub fixes_rejected: AtomicU64,
    /// Source failures reported in-stream or at subscribe time.
    pub source_failures: AtomicU64,
}

impl SamplerStats {
    /// Get a snapshot of current statistics.
    pub fn snapshot(&self) -> SamplerStatsSnapshot {
        SamplerStatsSnapshot {
            fixes_received: self.fixes_received.load(Ordering::Relaxed),
            fixes_accepted: self.fixes_accepted.load(Ordering::Relaxed),
            fixes_rejected: self.fixes_rejected.load(Ordering::Relaxed),
            source_failures: self.source_failures.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of sampler statistics.
#[derive(Debug, Clone, Default)]
pub struct SamplerStatsSnapshot {
    pub fixes_received: u64,
    pub fixes_accepted: u64,
    pub fixes_rejected: u64,
    pub source_failures: u64,
}

/// Converts a noisy position stream into a sparse significant-movement stream.
///
/// The sampler:
/// 1. Subscribes to the position source with the configured watch options
/// 2. Offers every fix to the significance filter
/// 3. Broadcasts accepted samples to all subscribers
/// 4. Records failures on the shared status without touching `last_accepted`
pub struct LocationSampler {
    config: SamplerConfig,
    filter: SignificanceFilter,
    accepted_tx: broadcast::Sender<LocationSample>,
    status: Arc<SharedPositionStatus>,
    stats: Arc<SamplerStats>,
}

impl LocationSampler {
    /// Create a new sampler.
    pub fn new(config: SamplerConfig) -> Self {
        let (accepted_tx, _) = broadcast::channel(config.channel_capacity.max(1));
        let filter = SignificanceFilter::new(config.threshold_meters);
        Self {
            config,
            filter,
            accepted_tx,
            status: SharedPositionStatus::new(),
            stats: Arc::new(SamplerStats::default()),
        }
    }

    /// Subscribe to accepted samples.
    ///
    /// Subscriptions taken before [`run`](Self::run) see every accepted
    /// sample; late subscribers see samples from their subscribe point on.
    pub fn subscribe(&self) -> broadcast::Receiver<LocationSample> {
        self.accepted_tx.subscribe()
    }

    /// Sender side of the accepted-sample channel, for wiring by the service.
    pub(crate) fn sender(&self) -> broadcast::Sender<LocationSample> {
        self.accepted_tx.clone()
    }

    /// Shared status snapshot holder for UI display.
    pub fn status(&self) -> Arc<SharedPositionStatus> {
        Arc::clone(&self.status)
    }

    /// Get access to the statistics for monitoring.
    pub fn stats(&self) -> Arc<SamplerStats> {
        Arc::clone(&self.stats)
    }

    /// Run the sampler until cancelled or the source stream ends.
    ///
    /// Subscribes to the source, then processes events. Cancelling is
    /// idempotent; dropping the event receiver on exit is what releases the
    /// underlying subscription.
    pub async fn run(
        mut self,
        source: Arc<dyn PositionSource>,
        cancellation_token: CancellationToken,
    ) {
        let mut events = match source.subscribe(self.config.watch.clone()) {
            Ok(events) => events,
            Err(err) => {
                error!(error = %err, "Position source subscription failed");
                self.stats.source_failures.fetch_add(1, Ordering::Relaxed);
                self.status.record_failure(err);
                return;
            }
        };

        self.status.set_watching(true);
        info!(
            threshold_m = self.config.threshold_meters,
            high_accuracy = self.config.watch.high_accuracy,
            "Location sampler started"
        );

        loop {
            tokio::select! {
                biased;

                _ = cancellation_token.cancelled() => {
                    info!("Location sampler shutting down");
                    break;
                }

                event = events.recv() => {
                    match event {
                        Some(PositionEvent::Fix(sample)) => self.handle_fix(sample),
                        Some(PositionEvent::Failure(err)) => {
                            if !self.handle_failure(err) {
                                break;
                            }
                        }
                        None => {
                            info!("Position source stream ended");
                            break;
                        }
                    }
                }
            }
        }

        self.status.set_watching(false);
    }

    /// Gate a fix and broadcast it if significant.
    fn handle_fix(&mut self, sample: LocationSample) {
        self.stats.fixes_received.fetch_add(1, Ordering::Relaxed);

        match self.filter.offer(sample.point) {
            Significance::FirstFix => {
                debug!(position = %sample.point, "Accepted first fix");
                self.accept(sample);
            }
            Significance::Moved { distance_meters } => {
                debug!(
                    position = %sample.point,
                    moved_m = format!("{:.1}", distance_meters),
                    "Accepted significant fix"
                );
                self.accept(sample);
            }
            Significance::Held { distance_meters } => {
                self.stats.fixes_rejected.fetch_add(1, Ordering::Relaxed);
                trace!(
                    distance_m = format!("{:.1}", distance_meters),
                    threshold_m = self.config.threshold_meters,
                    "Fix below significance threshold, dropped"
                );
            }
        }
    }

    fn accept(&mut self, sample: LocationSample) {
        self.stats.fixes_accepted.fetch_add(1, Ordering::Relaxed);
        self.status.record_accepted(&sample);
        // Err here just means no subscriber is currently attached; the
        // acceptance state has already advanced.
        let _ = self.accepted_tx.send(sample);
    }

    /// Record a failure; returns false when the sampler must stop.
    fn handle_failure(&mut self, err: PositionError) -> bool {
        self.stats.source_failures.fetch_add(1, Ordering::Relaxed);
        let recoverable = err.is_recoverable();

        if recoverable {
            warn!(error = %err, "Position source reported a failure");
        } else {
            error!(error = %err, "Position capability unsupported, stopping sampler");
        }

        self.status.record_failure(err);
        recoverable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoPoint;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::sync::mpsc;

    /// Test source backed by a channel the test feeds by hand.
    struct ChannelSource {
        receiver: Mutex<Option<mpsc::Receiver<PositionEvent>>>,
    }

    impl ChannelSource {
        fn new() -> (Arc<Self>, mpsc::Sender<PositionEvent>) {
            let (tx, rx) = mpsc::channel(32);
            let source = Arc::new(Self {
                receiver: Mutex::new(Some(rx)),
            });
            (source, tx)
        }
    }

    impl PositionSource for ChannelSource {
        fn subscribe(
            &self,
            _options: WatchOptions,
        ) -> Result<mpsc::Receiver<PositionEvent>, PositionError> {
            self.receiver
                .lock()
                .unwrap()
                .take()
                .ok_or_else(|| PositionError::Unsupported("already subscribed".to_string()))
        }
    }

    /// Source with no capability at all.
    struct UnsupportedSource;

    impl PositionSource for UnsupportedSource {
        fn subscribe(
            &self,
            _options: WatchOptions,
        ) -> Result<mpsc::Receiver<PositionEvent>, PositionError> {
            Err(PositionError::Unsupported("no backend".to_string()))
        }
    }

    fn fix(lat: f64, lon: f64) -> PositionEvent {
        PositionEvent::Fix(LocationSample::new(GeoPoint::new(lat, lon).unwrap()))
    }

    fn drain(rx: &mut broadcast::Receiver<LocationSample>) -> Vec<LocationSample> {
        let mut out = Vec::new();
        while let Ok(sample) = rx.try_recv() {
            out.push(sample);
        }
        out
    }

    #[tokio::test]
    async fn test_first_fix_and_significant_movement_are_broadcast() {
        let sampler = LocationSampler::new(SamplerConfig::default());
        let mut accepted = sampler.subscribe();
        let stats = sampler.stats();

        let (source, tx) = ChannelSource::new();
        tx.send(fix(17.385044, 78.486671)).await.unwrap();
        // ~55 m north of the first fix: jitter, dropped
        tx.send(fix(17.385544, 78.486671)).await.unwrap();
        // ~655 m away: significant
        tx.send(fix(17.390, 78.490)).await.unwrap();
        drop(tx);

        sampler.run(source, CancellationToken::new()).await;

        let samples = drain(&mut accepted);
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].point.latitude, 17.385044);
        assert_eq!(samples[1].point.latitude, 17.390);

        let snap = stats.snapshot();
        assert_eq!(snap.fixes_received, 3);
        assert_eq!(snap.fixes_accepted, 2);
        assert_eq!(snap.fixes_rejected, 1);
    }

    #[tokio::test]
    async fn test_failure_keeps_last_accepted_and_is_cleared_by_next_accept() {
        let sampler = LocationSampler::new(SamplerConfig::default());
        let status = sampler.status();
        let mut accepted = sampler.subscribe();

        let (source, tx) = ChannelSource::new();
        tx.send(fix(17.385044, 78.486671)).await.unwrap();
        tx.send(PositionEvent::Failure(PositionError::PositionUnavailable(
            "no signal".to_string(),
        )))
        .await
        .unwrap();
        // jitter fix, rejected: error must survive a rejected fix
        tx.send(fix(17.385100, 78.486671)).await.unwrap();
        drop(tx);

        sampler.run(source, CancellationToken::new()).await;

        assert_eq!(drain(&mut accepted).len(), 1);
        let snap = status.snapshot();
        assert!(snap.last_error.is_some());
        assert!(snap.last_accepted.is_some(), "last-known-good fix retained");
    }

    #[tokio::test]
    async fn test_accepted_fix_clears_error_state() {
        let sampler = LocationSampler::new(SamplerConfig::default());
        let status = sampler.status();

        let (source, tx) = ChannelSource::new();
        tx.send(fix(17.385044, 78.486671)).await.unwrap();
        tx.send(PositionEvent::Failure(PositionError::Timeout(
            Duration::from_secs(10),
        )))
        .await
        .unwrap();
        tx.send(fix(17.390, 78.490)).await.unwrap();
        drop(tx);

        sampler.run(source, CancellationToken::new()).await;

        assert!(status.snapshot().last_error.is_none());
    }

    #[tokio::test]
    async fn test_unsupported_failure_stops_the_sampler() {
        let sampler = LocationSampler::new(SamplerConfig::default());
        let stats = sampler.stats();
        let mut accepted = sampler.subscribe();

        let (source, tx) = ChannelSource::new();
        tx.send(fix(17.385044, 78.486671)).await.unwrap();
        tx.send(PositionEvent::Failure(PositionError::Unsupported(
            "no backend".to_string(),
        )))
        .await
        .unwrap();
        // Never consumed: the sampler stops at the unsupported failure
        tx.send(fix(17.390, 78.490)).await.unwrap();
        drop(tx);

        sampler.run(source, CancellationToken::new()).await;

        assert_eq!(drain(&mut accepted).len(), 1);
        let snap = stats.snapshot();
        assert_eq!(snap.fixes_received, 1);
        assert_eq!(snap.source_failures, 1);
    }

    #[tokio::test]
    async fn test_subscribe_failure_is_recorded() {
        let sampler = LocationSampler::new(SamplerConfig::default());
        let status = sampler.status();
        let stats = sampler.stats();

        sampler
            .run(Arc::new(UnsupportedSource), CancellationToken::new())
            .await;

        let snap = status.snapshot();
        assert!(matches!(
            snap.last_error,
            Some(PositionError::Unsupported(_))
        ));
        assert!(!snap.watching);
        assert_eq!(stats.snapshot().source_failures, 1);
    }

    #[tokio::test]
    async fn test_cancellation_stops_the_run_loop() {
        let sampler = LocationSampler::new(SamplerConfig::default());
        let status = sampler.status();

        // Keep the sender alive so only cancellation can end the loop
        let (source, tx) = ChannelSource::new();
        let token = CancellationToken::new();
        let handle = tokio::spawn(sampler.run(source, token.clone()));

        token.cancel();
        // Cancelling twice must be safe
        token.cancel();

        tokio::time::timeout(Duration::from_secs(2), handle)
            .await
            .expect("sampler should stop on cancellation")
            .unwrap();
        assert!(!status.snapshot().watching);
        drop(tx);
    }
}
