use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::warn;

// ============================================================================
// Normalized Offer
// ============================================================================

/// One priced one-way itinerary, flattened for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FlightOffer {
    pub id: String,
    /// Decimal string exactly as quoted, e.g. "320.50".
    pub price: String,
    pub currency: String,
    pub carrier: String,
    pub carrier_name: String,
    pub stops: u32,
    /// Local time at the departure airport, no offset.
    pub departure_time: String,
    pub arrival_time: String,
    /// ISO-8601 duration, e.g. "PT4H30M".
    pub duration: String,
    pub duration_formatted: String,
}

// ============================================================================
// Provider Payload (flight-offers search v2)
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct RawOffersResponse {
    #[serde(default)]
    pub data: Vec<RawOffer>,
    pub dictionaries: Option<RawDictionaries>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawDictionaries {
    #[serde(default)]
    pub carriers: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct RawOffer {
    pub id: String,
    #[serde(default)]
    pub itineraries: Vec<RawItinerary>,
    pub price: RawPrice,
}

#[derive(Debug, Deserialize)]
pub struct RawItinerary {
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub segments: Vec<RawSegment>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSegment {
    pub departure: RawEndpoint,
    pub arrival: RawEndpoint,
    pub carrier_code: String,
    pub number: Option<String>,
    pub number_of_stops: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEndpoint {
    pub iata_code: String,
    pub at: String,
}

#[derive(Debug, Deserialize)]
pub struct RawPrice {
    pub total: String,
    pub currency: String,
}

/// Flatten a search response into display offers, keeping provider order.
///
/// Only the first itinerary of each offer is read (searches are one-way).
/// Offers without a usable first itinerary are dropped.
pub fn normalize_offers(response: RawOffersResponse) -> Vec<FlightOffer> {
    let carriers = response.dictionaries.unwrap_or_default().carriers;

    response
        .data
        .into_iter()
        .filter_map(|offer| {
            let itinerary = offer.itineraries.into_iter().next();
            let Some(itinerary) = itinerary.filter(|i| !i.segments.is_empty()) else {
                warn!(offer_id = %offer.id, "Offer has no segments, dropping");
                return None;
            };

            let first = &itinerary.segments[0];
            let last = &itinerary.segments[itinerary.segments.len() - 1];
            let carrier_name = carriers
                .get(&first.carrier_code)
                .cloned()
                .unwrap_or_else(|| first.carrier_code.clone());

            Some(FlightOffer {
                id: offer.id,
                price: offer.price.total,
                currency: offer.price.currency,
                carrier: first.carrier_code.clone(),
                carrier_name,
                stops: (itinerary.segments.len() - 1) as u32,
                departure_time: first.departure.at.clone(),
                arrival_time: last.arrival.at.clone(),
                duration_formatted: format_duration(&itinerary.duration),
                duration: itinerary.duration,
            })
        })
        .collect()
}

// ============================================================================
// Duration Formatting
// ============================================================================

static DURATION_RE: OnceLock<Regex> = OnceLock::new();

/// "PT4H30M" -> "4h 30m", "PT2H" -> "2h", "PT45M" -> "45m".
///
/// Input that does not contain the pattern comes back unchanged.
pub fn format_duration(iso: &str) -> String {
    let re = DURATION_RE.get_or_init(|| {
        Regex::new(r"PT(?:(\d+)H)?(?:(\d+)M)?").expect("duration pattern is valid")
    });

    let Some(caps) = re.captures(iso) else {
        return iso.to_string();
    };

    let hours = caps.get(1).map(|h| format!("{}h", h.as_str()));
    let minutes = caps.get(2).map(|m| format!("{}m", m.as_str()));

    [hours, minutes].into_iter().flatten().collect::<Vec<_>>().join(" ")
}
