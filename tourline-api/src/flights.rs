use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tourline_core::supplier::DEFAULT_MAX_RESULTS;
use tourline_core::{
    plan_legs, plan_tour_flights, validate_max_results, FlightLeg, FlightOffer, GigForLeg,
    LegWithOffers,
};
use tracing::info;

use crate::{error::AppError, state::AppState};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct PlanFlightsRequest {
    pub gigs: Vec<GigForLeg>,
    pub max_results: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlanFlightsResponse {
    pub legs: Vec<LegWithOffers>,
}

#[derive(Debug, Deserialize)]
pub struct PlanLegsRequest {
    pub gigs: Vec<GigForLeg>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlanLegsResponse {
    pub legs: Vec<FlightLeg>,
}

#[derive(Debug, Deserialize)]
pub struct OfferSearchQuery {
    pub origin: String,
    pub destination: String,
    pub date: NaiveDate,
    pub max: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OfferSearchResponse {
    pub offers: Vec<FlightOffer>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/flights/plan", post(plan_flights))
        .route("/v1/flights/legs", post(plan_flight_legs))
        .route("/v1/flights/offers", get(search_offers))
}

/// Order stops the way the planner expects them. Stable, so same-day
/// gigs keep the order they were sent in.
fn sorted_by_date(mut gigs: Vec<GigForLeg>) -> Vec<GigForLeg> {
    gigs.sort_by_key(|g| g.date);
    gigs
}

fn is_iata_code(code: &str) -> bool {
    code.len() == 3 && code.chars().all(|c| c.is_ascii_uppercase())
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /v1/flights/plan
/// Legs between consecutive gigs, each with its flight offers
async fn plan_flights(
    State(state): State<AppState>,
    Json(req): Json<PlanFlightsRequest>,
) -> Result<Json<PlanFlightsResponse>, AppError> {
    let max_results = validate_max_results(req.max_results.unwrap_or(state.flights.max_results))?;

    if req.gigs.len() < 2 {
        return Ok(Json(PlanFlightsResponse { legs: Vec::new() }));
    }

    let gigs = sorted_by_date(req.gigs);
    let legs = plan_tour_flights(state.supplier.as_ref(), &gigs, max_results).await;

    let failed = legs.iter().filter(|l| l.error.is_some()).count();
    info!(gigs = gigs.len(), legs = legs.len(), failed, "Planned tour flights");

    Ok(Json(PlanFlightsResponse { legs }))
}

/// POST /v1/flights/legs
/// Leg planning only; the provider is not contacted
async fn plan_flight_legs(Json(req): Json<PlanLegsRequest>) -> Json<PlanLegsResponse> {
    let gigs = sorted_by_date(req.gigs);
    Json(PlanLegsResponse { legs: plan_legs(&gigs) })
}

/// GET /v1/flights/offers?origin=JFK&destination=ORD&date=2026-04-11&max=5
async fn search_offers(
    State(state): State<AppState>,
    Query(query): Query<OfferSearchQuery>,
) -> Result<Json<OfferSearchResponse>, AppError> {
    for code in [&query.origin, &query.destination] {
        if !is_iata_code(code) {
            return Err(AppError::ValidationError(format!("Invalid airport code: {}", code)));
        }
    }
    let max_results = validate_max_results(query.max.unwrap_or(DEFAULT_MAX_RESULTS))?;

    let offers = state
        .supplier
        .search_offers(&query.origin, &query.destination, query.date, max_results)
        .await
        .map_err(|e| AppError::UpstreamError(e.to_string()))?;

    Ok(Json(OfferSearchResponse { offers }))
}
