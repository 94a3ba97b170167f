//! Shared facility board for display in the UI.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use crate::geo::GeoPoint;

use super::types::{Facility, FetchStatus};

/// Shared view of the latest facility refresh.
///
/// This provides a thread-safe way to share the current facility list,
/// refresh status, and selection with a display layer while the refresh
/// controller owns the authoritative state.
#[derive(Debug, Default)]
pub struct SharedFacilityBoard {
    inner: RwLock<BoardSnapshot>,
}

impl SharedFacilityBoard {
    /// Create a new shared facility board.
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: RwLock::new(BoardSnapshot::default()),
        })
    }

    /// Mark a refresh as in flight around `origin`.
    ///
    /// The previous facility list stays visible until the refresh completes.
    pub fn begin_refresh(&self, origin: GeoPoint) {
        if let Ok(mut inner) = self.inner.write() {
            inner.status = FetchStatus::Loading;
            inner.origin = Some(origin);
        }
    }

    /// Publish the outcome of a completed refresh.
    pub fn publish(
        &self,
        facilities: Vec<Facility>,
        status: FetchStatus,
        selection: Option<Facility>,
    ) {
        if let Ok(mut inner) = self.inner.write() {
            inner.facilities = facilities;
            inner.status = status;
            inner.selection = selection;
            inner.refreshed_at = Some(Utc::now());
        }
    }

    /// Update only the selection.
    pub fn set_selection(&self, selection: Option<Facility>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.selection = selection;
        }
    }

    /// Get a snapshot of the current board.
    pub fn snapshot(&self) -> BoardSnapshot {
        self.inner.read().map(|r| r.clone()).unwrap_or_default()
    }
}

/// Snapshot of the facility board for display.
#[derive(Debug, Clone, Default)]
pub struct BoardSnapshot {
    /// Facilities from the most recent completed refresh.
    pub facilities: Vec<Facility>,
    /// Outcome of the most recent refresh.
    pub status: FetchStatus,
    /// Currently selected facility, if any.
    pub selection: Option<Facility>,
    /// Origin of the most recent refresh.
    pub origin: Option<GeoPoint>,
    /// When the most recent refresh completed.
    pub refreshed_at: Option<DateTime<Utc>>,
}

impl BoardSnapshot {
    /// Format the refresh state as a single line.
    pub fn status_line(&self) -> String {
        match self.status {
            FetchStatus::Loading => "Searching for nearby facilities...".to_string(),
            FetchStatus::Success => match &self.refreshed_at {
                Some(at) => format!(
                    "Facilities: {} (updated {})",
                    self.facilities.len(),
                    at.format("%H:%M:%S")
                ),
                None => format!("Facilities: {}", self.facilities.len()),
            },
            FetchStatus::Empty => "No facilities found nearby".to_string(),
            FetchStatus::Error => "Facility search failed".to_string(),
        }
    }

    /// Format the selection as a single line.
    pub fn selection_line(&self) -> String {
        match &self.selection {
            Some(facility) => format!("Target: {}", facility),
            None => "Target: none".to_string(),
        }
    }
}
