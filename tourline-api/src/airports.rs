use axum::{extract::Path, routing::get, Json, Router};
use serde::Serialize;
use tourline_core::iata;

use crate::{error::AppError, state::AppState};

#[derive(Debug, Serialize)]
pub struct AirportResponse {
    pub city: String,
    pub state: String,
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct CoverageEntry {
    pub city: &'static str,
    pub code: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CoverageResponse {
    pub airports: Vec<CoverageEntry>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/airports", get(list_airports))
        .route("/v1/airports/{city}/{state}", get(lookup_airport))
}

/// GET /v1/airports
/// Every city the planner can route through
async fn list_airports() -> Json<CoverageResponse> {
    let airports = iata::known_cities()
        .map(|(city, code)| CoverageEntry { city, code })
        .collect();
    Json(CoverageResponse { airports })
}

/// GET /v1/airports/{city}/{state}
async fn lookup_airport(
    Path((city, state)): Path<(String, String)>,
) -> Result<Json<AirportResponse>, AppError> {
    let code = iata::resolve(&city, &state).ok_or_else(|| {
        AppError::NotFoundError(format!("No airport known for {}", iata::city_label(&city, &state)))
    })?;

    Ok(Json(AirportResponse {
        city,
        state,
        code: code.to_string(),
    }))
}
