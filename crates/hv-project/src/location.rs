//! Postal-code to city/state/climate-zone lookup.
//!
//! Static table; a production deployment would call a geocoding service.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationInfo {
    pub city: String,
    pub state: String,
    pub climate_zone: String,
}

// (zip, city, state, IECC climate zone)
const ZIP_TABLE: &[(&str, &str, &str, &str)] = &[
    ("75001", "Plano", "TX", "3A"),
    ("77001", "Houston", "TX", "2A"),
    ("78701", "Austin", "TX", "2A"),
    ("75201", "Dallas", "TX", "3A"),
    ("90210", "Beverly Hills", "CA", "3B"),
    ("94102", "San Francisco", "CA", "3C"),
    ("92101", "San Diego", "CA", "3B"),
    ("95814", "Sacramento", "CA", "3B"),
    ("10001", "New York", "NY", "4A"),
    ("14201", "Buffalo", "NY", "5A"),
    ("60601", "Chicago", "IL", "5A"),
    ("33101", "Miami", "FL", "1A"),
    ("32801", "Orlando", "FL", "2A"),
    ("33602", "Tampa", "FL", "2A"),
    ("98101", "Seattle", "WA", "4C"),
    ("80202", "Denver", "CO", "5B"),
    ("85001", "Phoenix", "AZ", "2B"),
    ("30303", "Atlanta", "GA", "3A"),
    ("02101", "Boston", "MA", "5A"),
    ("19019", "Philadelphia", "PA", "4A"),
    ("48201", "Detroit", "MI", "5A"),
    ("89101", "Las Vegas", "NV", "3B"),
    ("97201", "Portland", "OR", "4C"),
    ("28202", "Charlotte", "NC", "3A"),
    ("55401", "Minneapolis", "MN", "6A"),
];

/// Look up a postal code. Surrounding whitespace is ignored.
pub fn lookup_zip(zip: &str) -> Option<LocationInfo> {
    let zip = zip.trim();
    ZIP_TABLE
        .iter()
        .find(|(z, ..)| *z == zip)
        .map(|(_, city, state, zone)| LocationInfo {
            city: city.to_string(),
            state: state.to_string(),
            climate_zone: zone.to_string(),
        })
}

/// Number of postal codes known to the lookup.
pub fn known_zip_count() -> usize {
    ZIP_TABLE.len()
}
