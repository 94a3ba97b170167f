//! Nearby-facility search and refresh.
//!
//! This module keeps a list of facilities near the current position and a
//! shared board describing it:
//!
//! ```text
//! accepted samples ──> RefreshController ──> spawned search task (seq-stamped)
//!                          │    ▲                      │
//!                          │    └── (seq, outcome) ────┘
//!                          ▼
//!                   SharedFacilityBoard ──> display
//! ```
//!
//! Every accepted sample supersedes the previous search; results are
//! sequence-stamped so a slow older search can never overwrite a newer one.
//! Provider records are validated by [`select_valid`] before they reach the
//! board, and the route selection is cleared automatically when a refresh
//! drops the targeted facility.

mod board;
mod catalog;
mod controller;
mod places;
mod search;
mod types;

pub use board::{BoardSnapshot, SharedFacilityBoard};
pub use catalog::{CatalogEntry, StaticCatalog};
pub use controller::{
    RefreshConfig, RefreshController, RefreshHandle, RefreshStats, RefreshStatsSnapshot,
};
pub use places::PlacesClient;
pub use search::{FacilitySearch, SearchError, SearchQuery};
pub use types::{select_valid, Facility, FetchStatus, RawFacility, ADDRESS_FALLBACK, NAME_FALLBACK};
