//! Navigation handoff to an external routing app.
//!
//! Turn-by-turn navigation itself is out of scope for this client; once a
//! facility is targeted, the route is handed to whatever navigation app the
//! platform offers via a universal directions deep link.

use tracing::info;

use crate::geo::GeoPoint;

/// Build a Google Maps driving-directions deep link from `origin` to
/// `destination`.
///
/// # Example
///
/// ```
/// use vitalroute::geo::GeoPoint;
/// use vitalroute::route::directions_url;
///
/// let origin = GeoPoint::new(17.385044, 78.486671).unwrap();
/// let destination = GeoPoint::new(17.4201, 78.4116).unwrap();
/// let url = directions_url(origin, destination);
/// assert!(url.starts_with("https://www.google.com/maps/dir/?api=1"));
/// ```
pub fn directions_url(origin: GeoPoint, destination: GeoPoint) -> String {
    format!(
        "https://www.google.com/maps/dir/?api=1&origin={},{}&destination={},{}&travelmode=driving",
        origin.latitude, origin.longitude, destination.latitude, destination.longitude
    )
}

/// Hands a chosen route off to an external navigation application.
pub trait NavigationHandoff: Send + Sync {
    /// Open navigation from `origin` to `destination`.
    fn open_route(&self, origin: GeoPoint, destination: GeoPoint);
}

/// Handoff that surfaces the deep link in the log.
///
/// The default on headless platforms; a desktop frontend would replace this
/// with an implementation that launches the system browser.
#[derive(Debug, Default)]
pub struct DeepLinkHandoff;

impl NavigationHandoff for DeepLinkHandoff {
    fn open_route(&self, origin: GeoPoint, destination: GeoPoint) {
        info!(url = %directions_url(origin, destination), "Navigation handoff");
    }
}
