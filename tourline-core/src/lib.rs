pub mod iata;
pub mod legs;
pub mod search;
pub mod supplier;

pub use legs::{plan_legs, FlightLeg, GigForLeg};
pub use search::{format_duration, FlightOffer};
pub use supplier::{attach_offers, plan_tour_flights, LegWithOffers, OfferSupplier};

/// Upper bound the flight-offers endpoint accepts for `max`.
pub const MAX_RESULTS_LIMIT: u32 = 250;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

/// Checks a requested offer count against what the provider will accept.
pub fn validate_max_results(max_results: u32) -> CoreResult<u32> {
    if max_results == 0 || max_results > MAX_RESULTS_LIMIT {
        return Err(CoreError::ValidationError(format!(
            "max_results must be between 1 and {}, got {}",
            MAX_RESULTS_LIMIT, max_results
        )));
    }
    Ok(max_results)
}
