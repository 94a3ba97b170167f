//! VitalRoute - Ambulance dispatch client core
//!
//! This library provides the core functionality for an ambulance dispatch
//! client: movement-gated location sampling, nearby medical facility
//! discovery, and route targeting with navigation handoff.
//!
//! # High-Level API
//!
//! For most use cases, the [`service`] module provides a simplified facade:
//!
//! ```ignore
//! use vitalroute::facility::StaticCatalog;
//! use vitalroute::route::DeepLinkHandoff;
//! use vitalroute::service::{DispatchService, ServiceConfig};
//!
//! let service = DispatchService::start(
//!     ServiceConfig::default(),
//!     position_source,
//!     StaticCatalog::demo(),
//!     std::sync::Arc::new(DeepLinkHandoff),
//! );
//!
//! // Facilities refresh automatically as significant movement arrives
//! let board = service.facility_board();
//! let selected = service.select_facility("facility-id").await?;
//! ```

pub mod config;
pub mod facility;
pub mod geo;
pub mod logging;
pub mod position;
pub mod route;
pub mod service;

/// Version of the VitalRoute library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_not_empty() {
        assert!(!VERSION.is_empty(), "Version should not be empty");
    }

    #[test]
    fn test_geo_module_exists() {
        // Verify geo module is accessible
        use crate::geo::GeoPoint;
        let result = GeoPoint::new(17.385044, 78.486671);
        assert!(result.is_ok());
    }
}
