//! Geographic point type and validation.

use std::fmt;

use thiserror::Error;

/// Valid latitude range in degrees.
pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;

/// Valid longitude range in degrees.
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// A geographic position in degrees.
///
/// Construct through [`GeoPoint::new`], which enforces the valid ranges
/// (latitude -90 to 90, longitude -180 to 180, both finite). Raw provider
/// values must pass through that validation before entering the pipeline.
///
/// Positions from successive fixes are never bit-identical, so comparing
/// two points for "sameness" goes through
/// [`distance_meters`](super::distance_meters), not field equality.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Degrees north, negative south.
    pub latitude: f64,
    /// Degrees east, negative west.
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a validated geographic point.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError::InvalidLatitude`] or [`GeoError::InvalidLongitude`]
    /// when a coordinate is out of range or not finite (NaN fails the range
    /// check).
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        if !(MIN_LATITUDE..=MAX_LATITUDE).contains(&latitude) {
            return Err(GeoError::InvalidLatitude(latitude));
        }
        if !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&longitude) {
            return Err(GeoError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.latitude, self.longitude)
    }
}

/// Errors from geographic point validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    /// Latitude is outside the valid range (-90 to 90) or not finite
    #[error("invalid latitude: {0} (must be between {MIN_LATITUDE} and {MAX_LATITUDE})")]
    InvalidLatitude(f64),

    /// Longitude is outside the valid range (-180 to 180) or not finite
    #[error("invalid longitude: {0} (must be between {MIN_LONGITUDE} and {MAX_LONGITUDE})")]
    InvalidLongitude(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid_point() {
        let point = GeoPoint::new(17.385044, 78.486671).unwrap();
        assert_eq!(point.latitude, 17.385044);
        assert_eq!(point.longitude, 78.486671);
    }

    #[test]
    fn test_new_accepts_range_boundaries() {
        assert!(GeoPoint::new(90.0, 180.0).is_ok());
        assert!(GeoPoint::new(-90.0, -180.0).is_ok());
        assert!(GeoPoint::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_new_rejects_latitude_out_of_range() {
        assert_eq!(
            GeoPoint::new(90.1, 0.0),
            Err(GeoError::InvalidLatitude(90.1))
        );
        assert_eq!(
            GeoPoint::new(-91.0, 0.0),
            Err(GeoError::InvalidLatitude(-91.0))
        );
    }

    #[test]
    fn test_new_rejects_longitude_out_of_range() {
        assert_eq!(
            GeoPoint::new(0.0, 180.5),
            Err(GeoError::InvalidLongitude(180.5))
        );
        assert_eq!(
            GeoPoint::new(0.0, -200.0),
            Err(GeoError::InvalidLongitude(-200.0))
        );
    }

    #[test]
    fn test_new_rejects_non_finite_coordinates() {
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(0.0, f64::NAN).is_err());
        assert!(GeoPoint::new(f64::INFINITY, 0.0).is_err());
        assert!(GeoPoint::new(0.0, f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_error_display_names_value_and_range() {
        let err = GeoError::InvalidLatitude(91.0);
        let msg = err.to_string();
        assert!(msg.contains("91"), "message should name the value: {msg}");
        assert!(msg.contains("-90"), "message should name the range: {msg}");
    }

    #[test]
    fn test_display_formats_lat_lon_pair() {
        let point = GeoPoint::new(17.385044, 78.486671).unwrap();
        assert_eq!(point.to_string(), "17.385044,78.486671");
    }
}
