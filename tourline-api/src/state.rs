use std::sync::Arc;
use tourline_core::OfferSupplier;
use tourline_infra::app_config::FlightsConfig;

#[derive(Clone)]
pub struct AppState {
    pub supplier: Arc<dyn OfferSupplier>,
    pub flights: FlightsConfig,
}
