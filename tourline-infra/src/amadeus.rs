//! Amadeus Self-Service flight search client.
//!
//! Authenticates with the OAuth2 client-credentials grant, keeps the bearer
//! token in a [`TokenCache`] until shortly before it expires, and normalizes
//! Flight Offers Search v2 responses into [`FlightOffer`]s.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;
use tourline_core::search::{normalize_offers, FlightOffer, RawOffersResponse};
use tourline_core::OfferSupplier;
use tracing::{debug, info};

use crate::app_config::AmadeusConfig;
use crate::credentials::CredentialSource;
use crate::error::FlightApiError;
use crate::token_cache::{CachedToken, TokenCache};

const TOKEN_PATH: &str = "/v1/security/oauth2/token";
const FLIGHT_OFFERS_PATH: &str = "/v2/shopping/flight-offers";
const USER_AGENT: &str = concat!("tourline/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[allow(dead_code)]
    token_type: Option<String>,
    expires_in: u64,
}

pub struct AmadeusClient {
    http_client: reqwest::Client,
    base_url: String,
    credentials: Arc<dyn CredentialSource>,
    token_cache: TokenCache,
}

impl AmadeusClient {
    pub fn new(
        config: &AmadeusConfig,
        credentials: Arc<dyn CredentialSource>,
    ) -> Result<Self, FlightApiError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials,
            token_cache: TokenCache::new(),
        })
    }

    /// Use an existing cache, e.g. one shared with another client.
    pub fn with_cache(mut self, token_cache: TokenCache) -> Self {
        self.token_cache = token_cache;
        self
    }

    pub fn token_cache(&self) -> &TokenCache {
        &self.token_cache
    }

    /// A bearer token, from the cache when it has more than a minute left.
    pub async fn get_token(&self) -> Result<String, FlightApiError> {
        let now_ms = Utc::now().timestamp_millis();
        if let Some(token) = self.token_cache.get(now_ms).await {
            debug!("Using cached Amadeus token");
            return Ok(token);
        }

        let creds = self
            .credentials
            .credentials()
            .ok_or(FlightApiError::MissingCredentials)?;

        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", creds.api_key.as_str()),
            ("client_secret", creds.api_secret.as_str()),
        ];

        let response = self
            .http_client
            .post(format!("{}{}", self.base_url, TOKEN_PATH))
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FlightApiError::AuthFailed { status: status.as_u16(), body });
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| FlightApiError::Parse(e.to_string()))?;

        info!(expires_in = token.expires_in, "Obtained Amadeus access token");

        let cached = CachedToken::new(
            token.access_token,
            token.expires_in,
            Utc::now().timestamp_millis(),
        );
        let access_token = cached.token.clone();
        self.token_cache.set(cached).await;

        Ok(access_token)
    }

    /// Drop the cached token so the next call re-authenticates.
    pub async fn reset_token_cache(&self) {
        self.token_cache.clear().await;
    }

    /// One-way offers for a single adult, priced in USD, in provider order.
    pub async fn search_offers(
        &self,
        origin_code: &str,
        destination_code: &str,
        departure_date: NaiveDate,
        max_results: u32,
    ) -> Result<Vec<FlightOffer>, FlightApiError> {
        let token = self.get_token().await?;

        let departure_date = departure_date.format("%Y-%m-%d").to_string();
        let max = max_results.to_string();
        let query = [
            ("originLocationCode", origin_code),
            ("destinationLocationCode", destination_code),
            ("departureDate", departure_date.as_str()),
            ("adults", "1"),
            ("nonStop", "false"),
            ("max", max.as_str()),
            ("currencyCode", "USD"),
        ];

        debug!(
            origin = origin_code,
            destination = destination_code,
            date = %departure_date,
            max_results,
            "Querying Amadeus flight offers"
        );

        let response = self
            .http_client
            .get(format!("{}{}", self.base_url, FLIGHT_OFFERS_PATH))
            .query(&query)
            .bearer_auth(&token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // The token stays cached; a failed search says nothing about it.
            let body = response.text().await.unwrap_or_default();
            return Err(FlightApiError::SearchFailed { status: status.as_u16(), body });
        }

        let raw: RawOffersResponse = response
            .json()
            .await
            .map_err(|e| FlightApiError::Parse(e.to_string()))?;

        let offers = normalize_offers(raw);
        info!(
            origin = origin_code,
            destination = destination_code,
            count = offers.len(),
            "Amadeus flight search complete"
        );

        Ok(offers)
    }
}

#[async_trait]
impl OfferSupplier for AmadeusClient {
    async fn search_offers(
        &self,
        origin_code: &str,
        destination_code: &str,
        departure_date: NaiveDate,
        max_results: u32,
    ) -> Result<Vec<FlightOffer>, Box<dyn Error + Send + Sync>> {
        AmadeusClient::search_offers(self, origin_code, destination_code, departure_date, max_results)
            .await
            .map_err(Into::into)
    }
}
