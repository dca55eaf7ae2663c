use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// City -> Airport Table
// ============================================================================

/// Primary airport for each supported metro area, keyed by "City, ST".
///
/// Some metros deliberately share a hub (Dallas and Fort Worth both fly out
/// of DFW, Phoenix and Mesa out of PHX). Adding a city is a data change here.
const CITY_AIRPORTS: &[(&str, &str)] = &[
    // Major hubs
    ("New York, NY", "JFK"),
    ("Los Angeles, CA", "LAX"),
    ("Chicago, IL", "ORD"),
    ("Houston, TX", "IAH"),
    ("Phoenix, AZ", "PHX"),
    ("Philadelphia, PA", "PHL"),
    ("San Antonio, TX", "SAT"),
    ("San Diego, CA", "SAN"),
    ("Dallas, TX", "DFW"),
    ("San Jose, CA", "SJC"),
    ("Austin, TX", "AUS"),
    ("Jacksonville, FL", "JAX"),
    ("Fort Worth, TX", "DFW"),
    ("Columbus, OH", "CMH"),
    ("Charlotte, NC", "CLT"),
    ("San Francisco, CA", "SFO"),
    ("Indianapolis, IN", "IND"),
    ("Seattle, WA", "SEA"),
    ("Denver, CO", "DEN"),
    ("Washington, DC", "DCA"),
    ("Nashville, TN", "BNA"),
    ("Oklahoma City, OK", "OKC"),
    ("El Paso, TX", "ELP"),
    ("Boston, MA", "BOS"),
    ("Portland, OR", "PDX"),
    ("Las Vegas, NV", "LAS"),
    ("Memphis, TN", "MEM"),
    ("Louisville, KY", "SDF"),
    ("Baltimore, MD", "BWI"),
    ("Milwaukee, WI", "MKE"),
    ("Albuquerque, NM", "ABQ"),
    ("Tucson, AZ", "TUS"),
    ("Fresno, CA", "FAT"),
    ("Mesa, AZ", "PHX"),
    ("Sacramento, CA", "SMF"),
    ("Atlanta, GA", "ATL"),
    ("Kansas City, MO", "MCI"),
    ("Miami, FL", "MIA"),
    ("Raleigh, NC", "RDU"),
    ("Omaha, NE", "OMA"),
    ("Minneapolis, MN", "MSP"),
    ("Cleveland, OH", "CLE"),
    ("Tampa, FL", "TPA"),
    ("St. Louis, MO", "STL"),
    ("Pittsburgh, PA", "PIT"),
    ("Cincinnati, OH", "CVG"),
    ("Orlando, FL", "MCO"),
    ("New Orleans, LA", "MSY"),
    ("Salt Lake City, UT", "SLC"),
    ("Detroit, MI", "DTW"),
    // Secondary markets
    ("Honolulu, HI", "HNL"),
    ("Anchorage, AK", "ANC"),
    ("Buffalo, NY", "BUF"),
    ("Richmond, VA", "RIC"),
    ("Hartford, CT", "BDL"),
    ("Providence, RI", "PVD"),
];

static AIRPORT_INDEX: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

fn index() -> &'static HashMap<&'static str, &'static str> {
    AIRPORT_INDEX.get_or_init(|| CITY_AIRPORTS.iter().copied().collect())
}

// ============================================================================
// Lookups
// ============================================================================

/// Display form of a stop, also the lookup key: `"City, ST"`.
pub fn city_label(city: &str, state: &str) -> String {
    format!("{}, {}", city, state)
}

/// Resolve a city/state pair to its IATA code.
///
/// Matching is exact and case-sensitive; no trimming or abbreviation
/// expansion is attempted.
pub fn resolve(city: &str, state: &str) -> Option<&'static str> {
    index().get(city_label(city, state).as_str()).copied()
}

pub fn has_code(city: &str, state: &str) -> bool {
    resolve(city, state).is_some()
}

/// Every supported `"City, ST"` key with its code, in table order.
pub fn known_cities() -> impl Iterator<Item = (&'static str, &'static str)> {
    CITY_AIRPORTS.iter().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_major_hubs() {
        assert_eq!(resolve("New York", "NY"), Some("JFK"));
        assert_eq!(resolve("Chicago", "IL"), Some("ORD"));
        assert_eq!(resolve("Los Angeles", "CA"), Some("LAX"));
        assert_eq!(resolve("St. Louis", "MO"), Some("STL"));
    }

    #[test]
    fn test_shared_hubs() {
        assert_eq!(resolve("Dallas", "TX"), resolve("Fort Worth", "TX"));
        assert_eq!(resolve("Mesa", "AZ"), Some("PHX"));
    }

    #[test]
    fn test_unknown_and_empty() {
        assert_eq!(resolve("Smallville", "KS"), None);
        assert_eq!(resolve("", ""), None);
        assert!(!has_code("Smallville", "KS"));
        assert!(has_code("Miami", "FL"));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(resolve("new york", "NY"), None);
        assert_eq!(resolve("NEW YORK", "NY"), None);
        assert_eq!(resolve("New York", "ny"), None);
        assert_eq!(resolve(" New York", "NY"), None);
    }

    #[test]
    fn test_table_has_no_duplicate_keys() {
        assert_eq!(index().len(), CITY_AIRPORTS.len());
        assert_eq!(known_cities().count(), 56);
        assert!(known_cities().all(|(_, code)| code.len() == 3));
    }
}
