//! Facility search trait and query/error types.
//!
//! The [`FacilitySearch`] trait abstracts over facility providers, allowing
//! the refresh controller to work with a live places API, a static catalog,
//! or a test double without caring which.

use std::future::Future;

use thiserror::Error;

use crate::geo::GeoPoint;

use super::types::RawFacility;

/// Parameters for one nearby-facility search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    /// Center of the search.
    pub origin: GeoPoint,
    /// Search radius in meters.
    pub radius_meters: f64,
    /// Facility category understood by the provider (e.g. "hospital").
    pub category: String,
    /// Free-text keyword narrowing the category.
    pub keyword: String,
}

/// Errors that can occur during a facility search.
#[derive(Debug, Clone, Error)]
pub enum SearchError {
    /// HTTP request failed before a response was received.
    #[error("Search request failed: {0}")]
    Transport(String),

    /// Response arrived but could not be decoded.
    #[error("Failed to parse search response: {0}")]
    Decode(String),

    /// Provider refused to serve the request (bad key or quota).
    #[error("Search request rejected by provider: {0}")]
    Rejected(String),

    /// Provider answered with an error status.
    #[error("Search provider returned an error: {0}")]
    Provider(String),
}

/// Trait for searching facilities around a position.
///
/// Implementations run one search per call and return every candidate the
/// provider produced, unvalidated. Validation and filtering happen
/// downstream in [`select_valid`](super::types::select_valid).
pub trait FacilitySearch: Send + Sync {
    /// Search for facilities near `query.origin`.
    fn search_nearby(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<Vec<RawFacility>, SearchError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_error_display() {
        let err = SearchError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "Search request failed: connection refused");

        let err = SearchError::Rejected("REQUEST_DENIED".to_string());
        assert!(err.to_string().contains("rejected"));
        assert!(err.to_string().contains("REQUEST_DENIED"));

        let err = SearchError::Provider("UNKNOWN_ERROR".to_string());
        assert!(err.to_string().contains("UNKNOWN_ERROR"));
    }

    #[test]
    fn test_search_query_holds_parameters() {
        let query = SearchQuery {
            origin: GeoPoint::new(17.385044, 78.486671).unwrap(),
            radius_meters: 15_000.0,
            category: "hospital".to_string(),
            keyword: "multi specialty hospital".to_string(),
        };

        assert_eq!(query.radius_meters, 15_000.0);
        assert_eq!(query.category, "hospital");
    }
}
