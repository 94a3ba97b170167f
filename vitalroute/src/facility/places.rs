//! Google Places implementation of [`FacilitySearch`].
//!
//! Fetches the Places Nearby Search endpoint via `reqwest` and maps the
//! response into provider-neutral [`RawFacility`] records. Provider quirks
//! (string status codes, optional geometry, `ZERO_RESULTS` as a status
//! rather than an empty list) are absorbed here.

use std::time::Duration;

use serde::Deserialize;

use super::search::{FacilitySearch, SearchError, SearchQuery};
use super::types::RawFacility;

/// Nearby Search response envelope.
///
/// We only deserialize the fields we use; everything else is ignored.
#[derive(Debug, Deserialize)]
struct PlacesResponse {
    status: String,
    #[serde(default)]
    results: Vec<PlaceRecord>,
    #[serde(default)]
    error_message: Option<String>,
}

/// One place in the `results` array.
///
/// Every field is optional: the response filter downstream decides what
/// constitutes a usable record.
#[derive(Debug, Deserialize)]
struct PlaceRecord {
    #[serde(default)]
    place_id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    vicinity: Option<String>,
    #[serde(default)]
    geometry: Option<PlaceGeometry>,
}

#[derive(Debug, Deserialize)]
struct PlaceGeometry {
    #[serde(default)]
    location: Option<PlaceLatLng>,
}

#[derive(Debug, Deserialize)]
struct PlaceLatLng {
    lat: f64,
    lng: f64,
}

/// Facility search client backed by the Google Places Nearby Search API.
///
/// Uses a reusable `reqwest::Client` with connection pooling and a
/// per-request timeout.
pub struct PlacesClient {
    /// Reusable HTTP client with connection pooling.
    http: reqwest::Client,

    /// Nearby Search endpoint URL.
    endpoint: String,

    /// API key appended to every request (None = unauthenticated endpoint,
    /// e.g. a local test server).
    api_key: Option<String>,
}

impl PlacesClient {
    /// Create a new Places client.
    pub fn new(endpoint: String, api_key: Option<String>, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http,
            endpoint,
            api_key,
        }
    }
}

impl FacilitySearch for PlacesClient {
    async fn search_nearby(&self, query: &SearchQuery) -> Result<Vec<RawFacility>, SearchError> {
        let location = format!("{},{}", query.origin.latitude, query.origin.longitude);
        let radius = format!("{:.0}", query.radius_meters);

        let mut request = self.http.get(&self.endpoint).query(&[
            ("location", location.as_str()),
            ("radius", radius.as_str()),
            ("type", query.category.as_str()),
            ("keyword", query.keyword.as_str()),
        ]);
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key.as_str())]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        let data: PlacesResponse =
            serde_json::from_slice(&bytes).map_err(|e| SearchError::Decode(e.to_string()))?;

        tracing::debug!(
            status = %data.status,
            results = data.results.len(),
            "Places response received"
        );

        convert_response(data)
    }
}

/// Map a decoded response to raw facilities, honoring the provider status.
fn convert_response(response: PlacesResponse) -> Result<Vec<RawFacility>, SearchError> {
    match response.status.as_str() {
        "OK" => Ok(response.results.into_iter().map(into_raw).collect()),
        // An empty area is a clean answer, not a failure
        "ZERO_RESULTS" => Ok(Vec::new()),
        status @ ("REQUEST_DENIED" | "OVER_QUERY_LIMIT") => Err(SearchError::Rejected(describe(
            status,
            response.error_message,
        ))),
        status => Err(SearchError::Provider(describe(
            status,
            response.error_message,
        ))),
    }
}

fn describe(status: &str, error_message: Option<String>) -> String {
    match error_message {
        Some(message) => format!("{status}: {message}"),
        None => status.to_string(),
    }
}

fn into_raw(record: PlaceRecord) -> RawFacility {
    let location = record
        .geometry
        .and_then(|g| g.location)
        .map(|l| (l.lat, l.lng));

    RawFacility {
        id: record.place_id,
        name: record.name,
        location,
        address: record.vicinity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_places_client_creation() {
        let client = PlacesClient::new(
            "https://example.test/nearbysearch/json".to_string(),
            Some("test-key".to_string()),
            Duration::from_secs(10),
        );
        assert_eq!(client.endpoint, "https://example.test/nearbysearch/json");
        assert_eq!(client.api_key.as_deref(), Some("test-key"));
    }

    #[test]
    fn test_response_deserialize_and_convert() {
        let json = r#"{
            "status": "OK",
            "results": [
                {
                    "place_id": "ChIJx1",
                    "name": "Apollo Hospitals Jubilee Hills",
                    "vicinity": "Road No 72, Jubilee Hills, Hyderabad",
                    "geometry": {"location": {"lat": 17.4201, "lng": 78.4116}}
                },
                {
                    "place_id": "ChIJx2",
                    "name": "KIMS Hospitals",
                    "vicinity": "Minister Road, Secunderabad",
                    "geometry": {"location": {"lat": 17.4415, "lng": 78.4988}}
                }
            ]
        }"#;

        let response: PlacesResponse = serde_json::from_str(json).unwrap();
        let raw = convert_response(response).unwrap();

        assert_eq!(raw.len(), 2);
        assert_eq!(raw[0].id.as_deref(), Some("ChIJx1"));
        assert_eq!(raw[0].location, Some((17.4201, 78.4116)));
        assert_eq!(
            raw[1].address.as_deref(),
            Some("Minister Road, Secunderabad")
        );
    }

    #[test]
    fn test_response_tolerates_extra_fields() {
        // The real API carries many more fields per place; ensure we tolerate them
        let json = r#"{
            "status": "OK",
            "html_attributions": [],
            "next_page_token": "Aap_token",
            "results": [
                {
                    "place_id": "ChIJx3",
                    "name": "Yashoda Hospitals",
                    "vicinity": "Raj Bhavan Road, Somajiguda",
                    "business_status": "OPERATIONAL",
                    "rating": 4.4,
                    "user_ratings_total": 9120,
                    "types": ["hospital", "health", "point_of_interest"],
                    "opening_hours": {"open_now": true},
                    "icon": "https://maps.gstatic.com/mapfiles/place_api/icons/v1/png_71/doctor-71.png",
                    "plus_code": {"compound_code": "C9C5+FH Hyderabad"},
                    "geometry": {
                        "location": {"lat": 17.4212, "lng": 78.4589},
                        "viewport": {
                            "northeast": {"lat": 17.4226, "lng": 78.4603},
                            "southwest": {"lat": 17.4199, "lng": 78.4576}
                        }
                    }
                }
            ]
        }"#;

        let response: PlacesResponse = serde_json::from_str(json).unwrap();
        let raw = convert_response(response).unwrap();
        assert_eq!(raw.len(), 1);
        assert_eq!(raw[0].name.as_deref(), Some("Yashoda Hospitals"));
    }

    #[test]
    fn test_zero_results_is_clean_empty() {
        let json = r#"{"status": "ZERO_RESULTS", "results": []}"#;

        let response: PlacesResponse = serde_json::from_str(json).unwrap();
        let raw = convert_response(response).unwrap();
        assert!(raw.is_empty());
    }

    #[test]
    fn test_denied_status_maps_to_rejected() {
        let json = r#"{
            "status": "REQUEST_DENIED",
            "results": [],
            "error_message": "The provided API key is invalid."
        }"#;

        let response: PlacesResponse = serde_json::from_str(json).unwrap();
        let err = convert_response(response).unwrap_err();
        match err {
            SearchError::Rejected(detail) => {
                assert!(detail.contains("REQUEST_DENIED"));
                assert!(detail.contains("API key is invalid"));
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_error_status_maps_to_provider_error() {
        let json = r#"{"status": "UNKNOWN_ERROR", "results": []}"#;

        let response: PlacesResponse = serde_json::from_str(json).unwrap();
        let err = convert_response(response).unwrap_err();
        match err {
            SearchError::Provider(detail) => assert_eq!(detail, "UNKNOWN_ERROR"),
            other => panic!("expected provider error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_geometry_becomes_locationless_record() {
        let json = r#"{
            "status": "OK",
            "results": [{"place_id": "ChIJx4", "name": "No Geometry"}]
        }"#;

        let response: PlacesResponse = serde_json::from_str(json).unwrap();
        let raw = convert_response(response).unwrap();
        assert_eq!(raw.len(), 1);
        assert!(raw[0].location.is_none());
    }
}
