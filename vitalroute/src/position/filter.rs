//! Significance gate over raw position fixes.

use crate::geo::{distance_meters, GeoPoint};

/// Outcome of offering a fix to the significance filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Significance {
    /// First fix ever offered; always significant.
    FirstFix,

    /// Moved at least the threshold from the last accepted fix.
    Moved {
        /// Geodesic displacement from the previous accepted fix.
        distance_meters: f64,
    },

    /// Displacement below the threshold; the fix is dropped.
    Held {
        /// Geodesic displacement from the previous accepted fix.
        distance_meters: f64,
    },
}

impl Significance {
    /// Whether the offered fix should be emitted downstream.
    pub fn is_significant(&self) -> bool {
        !matches!(self, Self::Held { .. })
    }
}

/// Decides whether a fix represents significant movement.
///
/// Thresholds on true geodesic distance rather than coordinate deltas or
/// polling intervals: jitter-level GPS noise never fires, while genuine
/// movement fires immediately regardless of the source's update frequency.
///
/// The filter owns `last_accepted`: it advances only on a first fix or when
/// displacement from the previous accepted fix reaches the threshold.
#[derive(Debug, Clone)]
pub struct SignificanceFilter {
    threshold_meters: f64,
    last_accepted: Option<GeoPoint>,
}

impl SignificanceFilter {
    /// Create a filter with the given displacement threshold in meters.
    pub fn new(threshold_meters: f64) -> Self {
        Self {
            threshold_meters,
            last_accepted: None,
        }
    }

    /// Offer a fix; on a significant result the fix becomes `last_accepted`.
    ///
    /// A fix exactly at the threshold counts as significant.
    pub fn offer(&mut self, point: GeoPoint) -> Significance {
        match self.last_accepted {
            None => {
                self.last_accepted = Some(point);
                Significance::FirstFix
            }
            Some(previous) => {
                let distance = distance_meters(previous, point);
                if distance >= self.threshold_meters {
                    self.last_accepted = Some(point);
                    Significance::Moved {
                        distance_meters: distance,
                    }
                } else {
                    Significance::Held {
                        distance_meters: distance,
                    }
                }
            }
        }
    }

    /// The most recently accepted fix, if any.
    pub fn last_accepted(&self) -> Option<GeoPoint> {
        self.last_accepted
    }

    /// The configured displacement threshold in meters.
    pub fn threshold_meters(&self) -> f64 {
        self.threshold_meters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Ground meters per degree of latitude (2 * pi * R / 360).
    const METERS_PER_DEGREE_LAT: f64 = 111_194.93;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    /// A point displaced due north of `base` by roughly `meters`.
    fn north_of(base: GeoPoint, meters: f64) -> GeoPoint {
        point(base.latitude + meters / METERS_PER_DEGREE_LAT, base.longitude)
    }

    #[test]
    fn test_first_fix_always_significant() {
        let mut filter = SignificanceFilter::new(100.0);

        let p = point(17.385044, 78.486671);
        let outcome = filter.offer(p);

        assert_eq!(outcome, Significance::FirstFix);
        assert!(outcome.is_significant());
        assert_eq!(filter.last_accepted(), Some(p));
    }

    #[test]
    fn test_fix_below_threshold_is_held() {
        let mut filter = SignificanceFilter::new(100.0);
        let base = point(17.385044, 78.486671);
        filter.offer(base);

        let outcome = filter.offer(north_of(base, 99.0));

        assert!(!outcome.is_significant());
        match outcome {
            Significance::Held { distance_meters } => {
                assert!((distance_meters - 99.0).abs() < 1.0);
            }
            other => panic!("expected Held, got {other:?}"),
        }
        // A held fix must not advance the filter state
        assert_eq!(filter.last_accepted(), Some(base));
    }

    #[test]
    fn test_fix_beyond_threshold_is_accepted() {
        let mut filter = SignificanceFilter::new(100.0);
        let base = point(17.385044, 78.486671);
        filter.offer(base);

        let moved = north_of(base, 101.0);
        let outcome = filter.offer(moved);

        assert!(outcome.is_significant());
        assert_eq!(filter.last_accepted(), Some(moved));
    }

    #[test]
    fn test_fix_exactly_at_threshold_is_accepted() {
        let base = point(17.385044, 78.486671);
        let target = north_of(base, 150.0);

        // Pin the threshold to the exact computed displacement so the
        // boundary comparison is not at the mercy of the helper's rounding.
        let exact = distance_meters(base, target);
        let mut filter = SignificanceFilter::new(exact);
        filter.offer(base);

        assert!(filter.offer(target).is_significant());
        assert_eq!(filter.last_accepted(), Some(target));
    }

    #[test]
    fn test_held_fixes_measure_from_last_accepted_not_last_seen() {
        let mut filter = SignificanceFilter::new(100.0);
        let base = point(17.385044, 78.486671);
        filter.offer(base);

        // Creep north in 60 m steps; each is measured against `base`, so the
        // second step (120 m cumulative) fires even though each hop is small.
        assert!(!filter.offer(north_of(base, 60.0)).is_significant());
        assert!(filter.offer(north_of(base, 120.0)).is_significant());
    }

    #[test]
    fn test_zero_threshold_accepts_everything() {
        let mut filter = SignificanceFilter::new(0.0);
        let base = point(17.385044, 78.486671);

        filter.offer(base);
        // Even a zero-displacement repeat meets a zero threshold
        assert!(filter.offer(base).is_significant());
    }
}
