use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub amadeus: AmadeusConfig,
    #[serde(default)]
    pub flights: FlightsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AmadeusConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FlightsConfig {
    /// Offers fetched per leg when the request does not say.
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

fn default_base_url() -> String { "https://test.api.amadeus.com".to_string() }
fn default_timeout_seconds() -> u64 { 30 }
fn default_max_results() -> u32 { tourline_core::supplier::DASHBOARD_MAX_RESULTS }

impl Default for AmadeusConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for FlightsConfig {
    fn default() -> Self {
        Self { max_results: default_max_results() }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. `TOURLINE__SERVER__PORT=9000`
            .add_source(config::Environment::with_prefix("TOURLINE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
