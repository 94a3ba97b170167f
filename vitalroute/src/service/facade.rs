//! Dispatch service facade implementation.

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::facility::{
    Facility, FacilitySearch, RefreshController, RefreshHandle, RefreshStats, SharedFacilityBoard,
};
use crate::position::{
    LocationSample, LocationSampler, PositionSource, SamplerStats, SharedPositionStatus,
};
use crate::route::{NavigationHandoff, SelectError};

use super::config::ServiceConfig;

/// High-level facade over the dispatch client pipeline.
///
/// Encapsulates component creation and wiring: the location sampler feeding
/// the facility refresh controller, both running as background tasks under
/// one cancellation token. The facade itself is not generic; provider
/// generics are erased into the spawned tasks, so callers can hold a
/// `DispatchService` regardless of which search backend it was started
/// with.
///
/// Must be started from within a Tokio runtime.
///
/// # Example
///
/// ```ignore
/// use vitalroute::facility::StaticCatalog;
/// use vitalroute::route::DeepLinkHandoff;
/// use vitalroute::service::{DispatchService, ServiceConfig};
///
/// let service = DispatchService::start(
///     ServiceConfig::default(),
///     position_source,
///     StaticCatalog::demo(),
///     std::sync::Arc::new(DeepLinkHandoff),
/// );
/// let board = service.facility_board();
/// service.shutdown().await;
/// ```
pub struct DispatchService {
    cancellation_token: CancellationToken,
    sampler_task: JoinHandle<()>,
    refresh_task: JoinHandle<()>,
    /// Sender side of the accepted-sample stream, kept for late subscribers.
    samples_tx: broadcast::Sender<LocationSample>,
    position_status: Arc<SharedPositionStatus>,
    sampler_stats: Arc<SamplerStats>,
    refresh: RefreshHandle,
}

impl DispatchService {
    /// Start the service: wire the sampler to the refresh controller and
    /// spawn both.
    pub fn start<S>(
        config: ServiceConfig,
        source: Arc<dyn PositionSource>,
        search: S,
        handoff: Arc<dyn NavigationHandoff>,
    ) -> Self
    where
        S: FacilitySearch + 'static,
    {
        let cancellation_token = CancellationToken::new();

        let sampler = LocationSampler::new(config.sampler);
        let samples_tx = sampler.sender();
        let position_status = sampler.status();
        let sampler_stats = sampler.stats();

        let (controller, refresh) = RefreshController::new(config.refresh, search, handoff);

        // Subscribe before either task starts so no accepted sample is missed
        let controller_rx = sampler.subscribe();

        let refresh_task = tokio::spawn(controller.run(controller_rx, cancellation_token.clone()));
        let sampler_task = tokio::spawn(sampler.run(source, cancellation_token.clone()));

        info!("Dispatch service started");

        Self {
            cancellation_token,
            sampler_task,
            refresh_task,
            samples_tx,
            position_status,
            sampler_stats,
            refresh,
        }
    }

    /// Subscribe to accepted location samples.
    ///
    /// Late subscribers see samples from their subscribe point on.
    pub fn subscribe_locations(&self) -> broadcast::Receiver<LocationSample> {
        self.samples_tx.subscribe()
    }

    /// Shared position status for display.
    pub fn position_status(&self) -> Arc<SharedPositionStatus> {
        Arc::clone(&self.position_status)
    }

    /// Location sampler statistics.
    pub fn sampler_stats(&self) -> Arc<SamplerStats> {
        Arc::clone(&self.sampler_stats)
    }

    /// Shared facility board for display.
    pub fn facility_board(&self) -> Arc<SharedFacilityBoard> {
        self.refresh.board()
    }

    /// Facility refresh statistics.
    pub fn refresh_stats(&self) -> Arc<RefreshStats> {
        self.refresh.stats()
    }

    /// Target the facility with the given id.
    ///
    /// # Errors
    ///
    /// [`SelectError::NotFound`] when the id is not in the current result
    /// set, [`SelectError::ChannelClosed`] when the service has stopped.
    pub async fn select_facility(&self, id: &str) -> Result<Facility, SelectError> {
        self.refresh.select_facility(id).await
    }

    /// Drop the current facility target, if any.
    pub async fn clear_selection(&self) {
        self.refresh.clear_selection().await
    }

    /// Re-run the facility search at the last known position.
    pub async fn refresh_facilities(&self) {
        self.refresh.refresh().await
    }

    /// Stop both background tasks and wait for them to finish.
    pub async fn shutdown(self) {
        info!("Dispatch service shutting down");
        self.cancellation_token.cancel();
        let _ = self.sampler_task.await;
        let _ = self.refresh_task.await;
        info!("Dispatch service stopped");
    }
}
