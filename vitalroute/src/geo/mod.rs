//! Geographic primitives for the dispatch pipeline.
//!
//! Provides the validated [`GeoPoint`] value type and great-circle distance
//! on a spherical-Earth approximation. The distance function drives both the
//! significance filter (is a new fix far enough from the last accepted one?)
//! and the in-process facility catalog (is an entry inside the search
//! radius?), so its numeric behavior is pinned by the test fixtures below.
//!
//! # Coordinate System
//!
//! - Latitude: degrees north (-90 to 90)
//! - Longitude: degrees east (-180 to 180)
//! - Distance: meters

use std::f64::consts::PI;

mod types;

pub use types::{GeoError, GeoPoint, MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE};

/// Mean Earth radius in meters (spherical approximation).
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Degrees to radians conversion factor.
const DEG_TO_RAD: f64 = PI / 180.0;

/// Calculate the great-circle distance between two positions.
///
/// Uses the haversine formula, which is numerically stable for the short
/// city-scale displacements this pipeline works with. Symmetric in its
/// arguments; returns 0.0 for identical points.
///
/// # Arguments
///
/// * `from` - First position
/// * `to` - Second position
///
/// # Returns
///
/// Distance in meters.
///
/// # Example
///
/// ```
/// use vitalroute::geo::{distance_meters, GeoPoint};
///
/// let a = GeoPoint::new(0.0, 0.0).unwrap();
/// let b = GeoPoint::new(1.0, 0.0).unwrap();
///
/// // 1 degree of latitude is ~111.2 km
/// let dist = distance_meters(a, b);
/// assert!((dist - 111_195.0).abs() < 100.0);
/// ```
pub fn distance_meters(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1_rad = from.latitude * DEG_TO_RAD;
    let lat2_rad = to.latitude * DEG_TO_RAD;
    let delta_lat = (to.latitude - from.latitude) * DEG_TO_RAD;
    let delta_lon = (to.longitude - from.longitude) * DEG_TO_RAD;

    // Haversine formula
    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}
