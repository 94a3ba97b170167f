//! Static facility catalog.
//!
//! A [`FacilitySearch`] implementation backed by a fixed in-memory list,
//! for demos and offline operation. Queries behave like the live provider:
//! radius-limited, category- and keyword-filtered, nearest first.

use crate::geo::{distance_meters, GeoPoint};

use super::search::{FacilitySearch, SearchError, SearchQuery};
use super::types::RawFacility;

/// One facility in a static catalog.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    pub location: GeoPoint,
    pub address: String,
    /// Lowercase tags matched against query category and keyword.
    pub tags: Vec<String>,
}

/// In-memory facility catalog.
pub struct StaticCatalog {
    entries: Vec<CatalogEntry>,
}

impl StaticCatalog {
    /// Create a catalog from a list of entries.
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Demo catalog: four Hyderabad multi-specialty hospitals.
    pub fn demo() -> Self {
        Self::new(vec![
            entry(
                "apollo-jubilee-hills",
                "Apollo Hospitals Jubilee Hills",
                17.4201,
                78.4116,
                "Road No 72, Jubilee Hills, Hyderabad",
            ),
            entry(
                "kims-secunderabad",
                "KIMS Hospitals",
                17.4415,
                78.4988,
                "Minister Road, Secunderabad",
            ),
            entry(
                "yashoda-somajiguda",
                "Yashoda Hospitals",
                17.4212,
                78.4589,
                "Raj Bhavan Road, Somajiguda, Hyderabad",
            ),
            entry(
                "continental-gachibowli",
                "Continental Hospitals",
                17.4339,
                78.3619,
                "Financial District, Gachibowli, Hyderabad",
            ),
        ])
    }

    /// Number of entries in the catalog.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn entry(id: &str, name: &str, lat: f64, lon: f64, address: &str) -> CatalogEntry {
    CatalogEntry {
        id: id.to_string(),
        name: name.to_string(),
        location: GeoPoint::new(lat, lon).expect("catalog coordinates are in range"),
        address: address.to_string(),
        tags: vec![
            "hospital".to_string(),
            "multi specialty".to_string(),
            "emergency".to_string(),
        ],
    }
}

impl FacilitySearch for StaticCatalog {
    async fn search_nearby(&self, query: &SearchQuery) -> Result<Vec<RawFacility>, SearchError> {
        let mut matches: Vec<(f64, &CatalogEntry)> = self
            .entries
            .iter()
            .filter(|e| matches_category(e, &query.category))
            .filter(|e| matches_keyword(e, &query.keyword))
            .map(|e| (distance_meters(query.origin, e.location), e))
            .filter(|(distance, _)| *distance <= query.radius_meters)
            .collect();

        matches.sort_by(|a, b| a.0.total_cmp(&b.0));

        Ok(matches
            .into_iter()
            .map(|(_, e)| RawFacility {
                id: Some(e.id.clone()),
                name: Some(e.name.clone()),
                location: Some((e.location.latitude, e.location.longitude)),
                address: Some(e.address.clone()),
            })
            .collect())
    }
}

/// An empty category matches everything; otherwise it must appear in the tags.
fn matches_category(entry: &CatalogEntry, category: &str) -> bool {
    let category = category.trim().to_lowercase();
    if category.is_empty() {
        return true;
    }
    entry.tags.iter().any(|tag| tag.to_lowercase() == category)
}

/// Every whitespace-separated keyword token must appear somewhere in the
/// entry's name or tags, case-insensitively.
fn matches_keyword(entry: &CatalogEntry, keyword: &str) -> bool {
    let haystack = format!(
        "{} {}",
        entry.name.to_lowercase(),
        entry.tags.join(" ").to_lowercase()
    );
    keyword
        .split_whitespace()
        .all(|token| haystack.contains(&token.to_lowercase()))
}
