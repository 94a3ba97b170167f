//! Route targeting state.

use std::fmt;

use thiserror::Error;

use crate::facility::Facility;

/// Whether a destination facility is currently targeted.
///
/// Selecting while already targeting replaces the destination in one step;
/// there is no intermediate idle state. The selection survives refreshes as
/// long as the refreshed list still contains the targeted facility.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RouteSelection {
    /// No destination chosen.
    #[default]
    Idle,
    /// Routing toward a chosen facility.
    Targeting(Facility),
}

impl RouteSelection {
    /// Target a facility, replacing any previous target.
    pub fn target(&mut self, facility: Facility) {
        *self = Self::Targeting(facility);
    }

    /// Drop the current target, if any.
    pub fn clear(&mut self) {
        *self = Self::Idle;
    }

    /// The targeted facility, if any.
    pub fn facility(&self) -> Option<&Facility> {
        match self {
            Self::Targeting(facility) => Some(facility),
            Self::Idle => None,
        }
    }

    /// Whether a destination is currently targeted.
    pub fn is_targeting(&self) -> bool {
        matches!(self, Self::Targeting(_))
    }

    /// Clear the target when its facility is absent from `facilities`.
    ///
    /// Returns true when the target was cleared.
    pub fn retain_present(&mut self, facilities: &[Facility]) -> bool {
        if let Self::Targeting(selected) = self {
            if !facilities.iter().any(|f| f.id == selected.id) {
                *self = Self::Idle;
                return true;
            }
        }
        false
    }
}

impl fmt::Display for RouteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Targeting(facility) => write!(f, "Targeting {}", facility.name),
        }
    }
}

/// Errors from facility selection.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SelectError {
    /// The requested id is not in the current facility list.
    #[error("Facility '{id}' is not in the current result set")]
    NotFound { id: String },

    /// The refresh controller has shut down.
    #[error("Dispatch service is not running")]
    ChannelClosed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoPoint;

    fn facility(id: &str, name: &str) -> Facility {
        Facility {
            id: id.to_string(),
            name: name.to_string(),
            location: GeoPoint::new(17.4201, 78.4116).unwrap(),
            address: "Hyderabad".to_string(),
        }
    }

    #[test]
    fn test_starts_idle() {
        let selection = RouteSelection::default();
        assert!(!selection.is_targeting());
        assert!(selection.facility().is_none());
    }

    #[test]
    fn test_target_and_clear() {
        let mut selection = RouteSelection::default();
        selection.target(facility("a", "Apollo"));
        assert!(selection.is_targeting());
        assert_eq!(selection.facility().unwrap().id, "a");

        selection.clear();
        assert_eq!(selection, RouteSelection::Idle);
    }

    #[test]
    fn test_retarget_replaces_in_one_step() {
        let mut selection = RouteSelection::default();
        selection.target(facility("a", "Apollo"));
        selection.target(facility("b", "KIMS"));

        assert_eq!(selection.facility().unwrap().id, "b");
    }

    #[test]
    fn test_retain_present_keeps_live_target() {
        let mut selection = RouteSelection::default();
        selection.target(facility("a", "Apollo"));

        let cleared = selection.retain_present(&[facility("a", "Apollo"), facility("b", "KIMS")]);
        assert!(!cleared);
        assert!(selection.is_targeting());
    }

    #[test]
    fn test_retain_present_clears_vanished_target() {
        let mut selection = RouteSelection::default();
        selection.target(facility("a", "Apollo"));

        let cleared = selection.retain_present(&[facility("b", "KIMS")]);
        assert!(cleared);
        assert_eq!(selection, RouteSelection::Idle);
    }

    #[test]
    fn test_retain_present_on_idle_is_noop() {
        let mut selection = RouteSelection::default();
        assert!(!selection.retain_present(&[]));
        assert_eq!(selection, RouteSelection::Idle);
    }

    #[test]
    fn test_display() {
        let mut selection = RouteSelection::default();
        assert_eq!(selection.to_string(), "Idle");

        selection.target(facility("a", "Apollo"));
        assert_eq!(selection.to_string(), "Targeting Apollo");
    }

    #[test]
    fn test_select_error_display() {
        let err = SelectError::NotFound {
            id: "ghost".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Facility 'ghost' is not in the current result set"
        );
    }
}
