use std::net::SocketAddr;
use std::sync::Arc;
use tourline_api::{app, AppState};
use tourline_infra::app_config::Config;
use tourline_infra::{AmadeusClient, CredentialSource, EnvCredentials};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "tourline_api=debug,tourline_infra=debug,tourline_core=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    tracing::info!("Starting Tourline API on port {}", config.server.port);

    let credentials = Arc::new(EnvCredentials::new());
    if credentials.credentials().is_none() {
        // Not fatal: the variables are read again on every token exchange.
        tracing::warn!("AMADEUS_API_KEY / AMADEUS_API_SECRET not set, flight searches will fail");
    }

    let client = AmadeusClient::new(&config.amadeus, credentials)?;
    tracing::info!("Flight search provider at {}", config.amadeus.base_url);

    let app_state = AppState {
        supplier: Arc::new(client),
        flights: config.flights.clone(),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
