pub mod app_config;
pub mod amadeus;
pub mod credentials;
pub mod error;
pub mod token_cache;

pub use amadeus::AmadeusClient;
pub use credentials::{CredentialSource, Credentials, EnvCredentials, StaticCredentials};
pub use error::FlightApiError;
pub use token_cache::{CachedToken, TokenCache};
