//! Facility data types and provider-result validation.
//!
//! Search providers return loosely-shaped records ([`RawFacility`]) in which
//! any field may be missing or malformed. [`select_valid`] is the single
//! place where those records are promoted to well-formed [`Facility`] values
//! or dropped.

use std::collections::HashSet;
use std::fmt;

use crate::geo::GeoPoint;

/// Display fallback for facilities the provider returned without a name.
pub const NAME_FALLBACK: &str = "Unnamed facility";

/// Display fallback for facilities the provider returned without an address.
pub const ADDRESS_FALLBACK: &str = "Address not available";

/// A validated nearby facility.
///
/// Every `Facility` has a non-empty identifier and in-range coordinates;
/// name and address always carry a displayable value.
#[derive(Debug, Clone, PartialEq)]
pub struct Facility {
    /// Provider-scoped stable identifier, used for selection.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Facility position.
    pub location: GeoPoint,
    /// Human-readable address or vicinity.
    pub address: String,
}

impl fmt::Display for Facility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.address)
    }
}

/// Outcome of the most recent facility refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStatus {
    /// A search is in flight; nothing has completed yet.
    #[default]
    Loading,
    /// The last search completed with at least one valid facility.
    Success,
    /// The last search completed cleanly but found nothing.
    Empty,
    /// The last search failed.
    Error,
}

impl fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchStatus::Loading => write!(f, "loading"),
            FetchStatus::Success => write!(f, "success"),
            FetchStatus::Empty => write!(f, "empty"),
            FetchStatus::Error => write!(f, "error"),
        }
    }
}

/// Unvalidated facility record as returned by a search provider.
///
/// This is our own type, decoupled from any provider wire format. Providers
/// map their responses into this shape; [`select_valid`] decides what
/// survives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFacility {
    /// Provider identifier, if present.
    pub id: Option<String>,
    /// Display name, if present.
    pub name: Option<String>,
    /// Raw latitude/longitude pair, unvalidated.
    pub location: Option<(f64, f64)>,
    /// Address or vicinity text, if present.
    pub address: Option<String>,
}

/// Promote raw provider records to validated facilities.
///
/// A record is dropped when its id is missing or blank, its coordinates are
/// missing or out of range, or its id duplicates an earlier record (first
/// occurrence wins). Missing names and addresses are not grounds for
/// dropping; they fall back to placeholder text.
///
/// # Returns
///
/// The validated facilities in provider order, plus the number of records
/// dropped.
pub fn select_valid(raw: Vec<RawFacility>) -> (Vec<Facility>, usize) {
    let total = raw.len();
    let mut seen: HashSet<String> = HashSet::new();
    let mut facilities = Vec::with_capacity(total);

    for record in raw {
        let id = match record.id {
            Some(id) if !id.trim().is_empty() => id,
            _ => continue,
        };

        let Some((lat, lon)) = record.location else {
            continue;
        };
        let Ok(location) = GeoPoint::new(lat, lon) else {
            continue;
        };

        if !seen.insert(id.clone()) {
            continue;
        }

        let name = match record.name {
            Some(name) if !name.trim().is_empty() => name,
            _ => NAME_FALLBACK.to_string(),
        };
        let address = match record.address {
            Some(address) if !address.trim().is_empty() => address,
            _ => ADDRESS_FALLBACK.to_string(),
        };

        facilities.push(Facility {
            id,
            name,
            location,
            address,
        });
    }

    let dropped = total - facilities.len();
    (facilities, dropped)
}
