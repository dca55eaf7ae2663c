use thiserror::Error;

/// Failures talking to the flight-search provider.
///
/// Each variant is scoped to the one call that produced it; nothing here is
/// remembered by the client afterwards.
#[derive(Debug, Error)]
pub enum FlightApiError {
    #[error("AMADEUS_API_KEY and AMADEUS_API_SECRET environment variables are required")]
    MissingCredentials,

    #[error("Amadeus auth failed ({status}): {body}")]
    AuthFailed { status: u16, body: String },

    #[error("Amadeus flight search failed ({status}): {body}")]
    SearchFailed { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}
