//! Facility refresh controller.
//!
//! The controller receives accepted location samples, launches one facility
//! search per sample, and applies completed searches under a
//! last-request-wins rule: results belonging to a superseded search are
//! discarded, whatever order they arrive in. It also owns the route
//! selection, clearing it whenever a refresh produces a list that no longer
//! contains the targeted facility.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::defaults::{
    DEFAULT_COMMAND_CHANNEL_CAPACITY, DEFAULT_FACILITY_CATEGORY, DEFAULT_FACILITY_KEYWORD,
    DEFAULT_RESULT_CHANNEL_CAPACITY, DEFAULT_SEARCH_RADIUS_METERS,
};
use crate::config::SearchSettings;
use crate::geo::GeoPoint;
use crate::position::LocationSample;
use crate::route::{NavigationHandoff, RouteSelection, SelectError};

use super::board::SharedFacilityBoard;
use super::search::{FacilitySearch, SearchError, SearchQuery};
use super::types::{select_valid, Facility, FetchStatus, RawFacility};

/// Sequence-stamped outcome of one spawned search task.
type SearchOutcome = (u64, Result<Vec<RawFacility>, SearchError>);

/// Facility refresh configuration.
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// Search radius around the current position, in meters.
    pub radius_meters: f64,
    /// Facility category passed to the provider.
    pub category: String,
    /// Keyword narrowing the category.
    pub keyword: String,
    /// Capacity of the command channel.
    pub command_capacity: usize,
    /// Capacity of the search result channel.
    pub result_capacity: usize,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            radius_meters: DEFAULT_SEARCH_RADIUS_METERS,
            category: DEFAULT_FACILITY_CATEGORY.to_string(),
            keyword: DEFAULT_FACILITY_KEYWORD.to_string(),
            command_capacity: DEFAULT_COMMAND_CHANNEL_CAPACITY,
            result_capacity: DEFAULT_RESULT_CHANNEL_CAPACITY,
        }
    }
}

impl RefreshConfig {
    /// Build a refresh config from the `[search]` config section.
    pub fn from_settings(settings: &SearchSettings) -> Self {
        Self {
            radius_meters: settings.radius_meters,
            category: settings.category.clone(),
            keyword: settings.keyword.clone(),
            ..Default::default()
        }
    }
}

/// Refresh controller statistics for monitoring.
#[derive(Debug, Default)]
pub struct RefreshStats {
    /// Searches launched.
    pub searches_issued: AtomicU64,
    /// Completed searches applied to the board.
    pub results_applied: AtomicU64,
    /// Completed searches discarded because a newer search superseded them.
    pub stale_discarded: AtomicU64,
    /// Provider records dropped by validation.
    pub invalid_dropped: AtomicU64,
    /// Searches that completed with an error.
    pub searches_failed: AtomicU64,
    /// Selections cleared because the facility left the result set.
    pub selections_invalidated: AtomicU64,
}

impl RefreshStats {
    /// Get a snapshot of current statistics.
    pub fn snapshot(&self) -> RefreshStatsSnapshot {
        RefreshStatsSnapshot {
            searches_issued: self.searches_issued.load(Ordering::Relaxed),
            results_applied: self.results_applied.load(Ordering::Relaxed),
            stale_discarded: self.stale_discarded.load(Ordering::Relaxed),
            invalid_dropped: self.invalid_dropped.load(Ordering::Relaxed),
            searches_failed: self.searches_failed.load(Ordering::Relaxed),
            selections_invalidated: self.selections_invalidated.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of refresh statistics.
#[derive(Debug, Clone, Default)]
pub struct RefreshStatsSnapshot {
    pub searches_issued: u64,
    pub results_applied: u64,
    pub stale_discarded: u64,
    pub invalid_dropped: u64,
    pub searches_failed: u64,
    pub selections_invalidated: u64,
}

/// Commands accepted by the refresh controller.
enum RefreshCommand {
    /// Target a facility by id from the current result set.
    Select {
        id: String,
        reply: oneshot::Sender<Result<Facility, SelectError>>,
    },
    /// Drop the current target.
    Clear,
    /// Re-run the search at the last known origin.
    Refresh,
}

/// Cloneable handle for commanding a running [`RefreshController`].
#[derive(Clone)]
pub struct RefreshHandle {
    command_tx: mpsc::Sender<RefreshCommand>,
    board: Arc<SharedFacilityBoard>,
    stats: Arc<RefreshStats>,
}

impl RefreshHandle {
    /// Target the facility with the given id.
    ///
    /// # Errors
    ///
    /// [`SelectError::NotFound`] when the id is not in the current result
    /// set, [`SelectError::ChannelClosed`] when the controller has stopped.
    pub async fn select_facility(&self, id: &str) -> Result<Facility, SelectError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(RefreshCommand::Select {
                id: id.to_string(),
                reply: reply_tx,
            })
            .await
            .map_err(|_| SelectError::ChannelClosed)?;
        reply_rx.await.map_err(|_| SelectError::ChannelClosed)?
    }

    /// Drop the current target, if any. Best-effort.
    pub async fn clear_selection(&self) {
        if self.command_tx.send(RefreshCommand::Clear).await.is_err() {
            debug!("Clear ignored, refresh controller stopped");
        }
    }

    /// Re-run the search at the last known origin. Best-effort.
    pub async fn refresh(&self) {
        if self.command_tx.send(RefreshCommand::Refresh).await.is_err() {
            debug!("Refresh ignored, refresh controller stopped");
        }
    }

    /// Shared facility board for display.
    pub fn board(&self) -> Arc<SharedFacilityBoard> {
        Arc::clone(&self.board)
    }

    /// Get access to the statistics for monitoring.
    pub fn stats(&self) -> Arc<RefreshStats> {
        Arc::clone(&self.stats)
    }
}

/// Keeps the nearby-facility list in step with the current position.
///
/// The controller:
/// 1. Receives accepted samples from the location sampler
/// 2. Spawns one sequence-stamped search task per sample
/// 3. Applies only results matching the newest sequence number
/// 4. Validates provider records and publishes the board
/// 5. Clears the route selection when its facility leaves the list
pub struct RefreshController<S> {
    config: RefreshConfig,
    search: Arc<S>,
    handoff: Arc<dyn NavigationHandoff>,
    board: Arc<SharedFacilityBoard>,
    stats: Arc<RefreshStats>,
    selection: RouteSelection,
    /// Facilities from the newest completed refresh.
    facilities: Vec<Facility>,
    /// Origin of the newest refresh, reused for manual refreshes and
    /// navigation handoff.
    last_origin: Option<GeoPoint>,
    /// Sequence number of the newest search. Results stamped with anything
    /// older are discarded.
    latest_seq: u64,
    command_rx: mpsc::Receiver<RefreshCommand>,
    result_tx: mpsc::Sender<SearchOutcome>,
    result_rx: mpsc::Receiver<SearchOutcome>,
}

impl<S: FacilitySearch + 'static> RefreshController<S> {
    /// Create a new controller and its command handle.
    pub fn new(
        config: RefreshConfig,
        search: S,
        handoff: Arc<dyn NavigationHandoff>,
    ) -> (Self, RefreshHandle) {
        let (command_tx, command_rx) = mpsc::channel(config.command_capacity.max(1));
        let (result_tx, result_rx) = mpsc::channel(config.result_capacity.max(1));
        let board = SharedFacilityBoard::new();
        let stats = Arc::new(RefreshStats::default());

        let handle = RefreshHandle {
            command_tx,
            board: Arc::clone(&board),
            stats: Arc::clone(&stats),
        };

        let controller = Self {
            config,
            search: Arc::new(search),
            handoff,
            board,
            stats,
            selection: RouteSelection::default(),
            facilities: Vec::new(),
            last_origin: None,
            latest_seq: 0,
            command_rx,
            result_tx,
            result_rx,
        };

        (controller, handle)
    }

    /// Shared facility board for display.
    pub fn board(&self) -> Arc<SharedFacilityBoard> {
        Arc::clone(&self.board)
    }

    /// Get access to the statistics for monitoring.
    pub fn stats(&self) -> Arc<RefreshStats> {
        Arc::clone(&self.stats)
    }

    /// Run the controller until cancelled or the sample stream ends.
    ///
    /// # Arguments
    ///
    /// * `samples` - Channel receiving accepted location samples
    /// * `cancellation_token` - Token to signal shutdown
    pub async fn run(
        mut self,
        mut samples: broadcast::Receiver<LocationSample>,
        cancellation_token: CancellationToken,
    ) {
        info!(
            radius_m = self.config.radius_meters,
            category = %self.config.category,
            keyword = %self.config.keyword,
            "Facility refresh controller started"
        );

        loop {
            tokio::select! {
                biased;

                _ = cancellation_token.cancelled() => {
                    info!("Facility refresh controller shutting down");
                    break;
                }

                Some(command) = self.command_rx.recv() => {
                    self.handle_command(command);
                }

                Some((seq, outcome)) = self.result_rx.recv() => {
                    self.apply_result(seq, outcome);
                }

                sample = samples.recv() => {
                    match sample {
                        Ok(sample) => self.begin_refresh(sample.point),
                        Err(broadcast::error::RecvError::Lagged(missed)) => {
                            warn!(missed, "Sample stream lagged, continuing from newest");
                        }
                        Err(broadcast::error::RecvError::Closed) => {
                            info!("Sample stream ended");
                            break;
                        }
                    }
                }
            }
        }
    }

    /// Launch a search task for `origin`, superseding any search in flight.
    fn begin_refresh(&mut self, origin: GeoPoint) {
        self.latest_seq += 1;
        let seq = self.latest_seq;
        self.last_origin = Some(origin);
        self.board.begin_refresh(origin);
        self.stats.searches_issued.fetch_add(1, Ordering::Relaxed);

        let query = SearchQuery {
            origin,
            radius_meters: self.config.radius_meters,
            category: self.config.category.clone(),
            keyword: self.config.keyword.clone(),
        };

        debug!(
            seq,
            lat = format!("{:.4}", origin.latitude),
            lon = format!("{:.4}", origin.longitude),
            "Issuing facility search"
        );

        // In-flight searches are never cancelled; their results lose on
        // sequence number instead.
        let search = Arc::clone(&self.search);
        let result_tx = self.result_tx.clone();
        tokio::spawn(async move {
            let outcome = search.search_nearby(&query).await;
            let _ = result_tx.send((seq, outcome)).await;
        });
    }

    /// Apply a completed search, discarding it when superseded.
    fn apply_result(&mut self, seq: u64, outcome: Result<Vec<RawFacility>, SearchError>) {
        if seq != self.latest_seq {
            self.stats.stale_discarded.fetch_add(1, Ordering::Relaxed);
            debug!(
                seq,
                latest = self.latest_seq,
                "Discarding superseded search result"
            );
            return;
        }

        let status = match outcome {
            Ok(raw) => {
                let (facilities, dropped) = select_valid(raw);
                if dropped > 0 {
                    self.stats
                        .invalid_dropped
                        .fetch_add(dropped as u64, Ordering::Relaxed);
                    debug!(dropped, "Dropped invalid facility records");
                }
                self.facilities = facilities;
                if self.facilities.is_empty() {
                    info!(seq, "Facility search found nothing nearby");
                    FetchStatus::Empty
                } else {
                    info!(
                        seq,
                        count = self.facilities.len(),
                        "Facility list refreshed"
                    );
                    FetchStatus::Success
                }
            }
            Err(err) => {
                self.stats.searches_failed.fetch_add(1, Ordering::Relaxed);
                warn!(seq, error = %err, "Facility search failed");
                self.facilities.clear();
                FetchStatus::Error
            }
        };

        self.stats.results_applied.fetch_add(1, Ordering::Relaxed);

        if self.selection.retain_present(&self.facilities) {
            self.stats
                .selections_invalidated
                .fetch_add(1, Ordering::Relaxed);
            info!("Targeted facility left the result set, selection cleared");
        }

        self.board.publish(
            self.facilities.clone(),
            status,
            self.selection.facility().cloned(),
        );
    }

    fn handle_command(&mut self, command: RefreshCommand) {
        match command {
            RefreshCommand::Select { id, reply } => {
                match self.facilities.iter().find(|f| f.id == id).cloned() {
                    Some(facility) => {
                        self.selection.target(facility.clone());
                        self.board.set_selection(Some(facility.clone()));
                        if let Some(origin) = self.last_origin {
                            self.handoff.open_route(origin, facility.location);
                        }
                        info!(facility = %facility.name, "Facility targeted");
                        let _ = reply.send(Ok(facility));
                    }
                    None => {
                        debug!(id = %id, "Selection rejected, id not in current results");
                        let _ = reply.send(Err(SelectError::NotFound { id }));
                    }
                }
            }
            RefreshCommand::Clear => {
                if self.selection.is_targeting() {
                    self.selection.clear();
                    self.board.set_selection(None);
                    info!("Selection cleared");
                }
            }
            RefreshCommand::Refresh => match self.last_origin {
                Some(origin) => {
                    debug!("Manual refresh requested");
                    self.begin_refresh(origin);
                }
                None => warn!("Refresh requested before first fix, ignored"),
            },
        }
    }
}
