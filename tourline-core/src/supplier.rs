use async_trait::async_trait;
use chrono::NaiveDate;
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use std::error::Error;
use tracing::warn;

use crate::legs::{plan_legs, FlightLeg, GigForLeg};
use crate::search::FlightOffer;

/// Offers requested for a single route when the caller has no preference.
pub const DEFAULT_MAX_RESULTS: u32 = 5;

/// How many offers the tour dashboard shows per leg.
pub const DASHBOARD_MAX_RESULTS: u32 = 3;

#[async_trait]
pub trait OfferSupplier: Send + Sync {
    /// Fetch offers for one route and day, in the supplier's own order.
    async fn search_offers(
        &self,
        origin_code: &str,
        destination_code: &str,
        departure_date: NaiveDate,
        max_results: u32,
    ) -> Result<Vec<FlightOffer>, Box<dyn Error + Send + Sync>>;
}

/// A planned leg with whatever the supplier returned for it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LegWithOffers {
    #[serde(flatten)]
    pub leg: FlightLeg,
    pub offers: Vec<FlightOffer>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

/// Look up offers for every leg concurrently.
///
/// A failed lookup only affects its own leg, which comes back with no
/// offers and the error message. Output order follows `legs`.
pub async fn attach_offers(
    supplier: &dyn OfferSupplier,
    legs: Vec<FlightLeg>,
    max_results: u32,
) -> Vec<LegWithOffers> {
    let lookups = legs.into_iter().map(|leg| async move {
        let result = supplier
            .search_offers(&leg.origin_code, &leg.destination_code, leg.departure_date, max_results)
            .await;
        match result {
            Ok(offers) => LegWithOffers { leg, offers, error: None },
            Err(e) => {
                warn!(
                    origin = %leg.origin_code,
                    destination = %leg.destination_code,
                    date = %leg.departure_date,
                    "Offer lookup failed: {}", e
                );
                LegWithOffers { leg, offers: Vec::new(), error: Some(e.to_string()) }
            }
        }
    });

    join_all(lookups).await
}

/// Plan a tour's legs and attach offers to each.
pub async fn plan_tour_flights(
    supplier: &dyn OfferSupplier,
    gigs: &[GigForLeg],
    max_results: u32,
) -> Vec<LegWithOffers> {
    let legs = plan_legs(gigs);
    if legs.is_empty() {
        return Vec::new();
    }
    attach_offers(supplier, legs, max_results).await
}
