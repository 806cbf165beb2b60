use std::sync::Arc;
use std::time::Duration;

use lanequote_core::config::{AppConfig, ConfigError, LoadOptions};
use lanequote_core::distance::{DistanceResolver, RouteSource};
use lanequote_core::geo::GeocodeTable;
use lanequote_core::service::{QuoteService, RouteMapRenderer};
use lanequote_routing::{MapboxDirectionsClient, MapboxStaticMap};
use thiserror::Error;
use tracing::info;

use crate::api::ApiState;

pub struct Application {
    pub config: AppConfig,
    pub state: ApiState,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("http client construction failed: {0}")]
    HttpClient(#[source] reqwest::Error),
}

pub fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config)
}

pub fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let table = Arc::new(GeocodeTable::builtin());
    info!(
        event_name = "system.bootstrap.geocode_table_loaded",
        correlation_id = "bootstrap",
        entries = table.len(),
        "geocode table loaded"
    );

    let routing_configured = config.routing.is_configured();
    let mut route_source: Option<Arc<dyn RouteSource>> = None;
    let mut map_renderer: Option<Arc<dyn RouteMapRenderer>> = None;

    if let Some(token) = config.routing.mapbox_token.as_ref().filter(|_| routing_configured) {
        let client = MapboxDirectionsClient::new(
            token.clone(),
            Duration::from_secs(config.routing.timeout_secs),
        )
        .map_err(BootstrapError::HttpClient)?;
        route_source = Some(Arc::new(client));
        map_renderer = Some(Arc::new(MapboxStaticMap::new(token.clone())));
        info!(
            event_name = "system.bootstrap.routing_configured",
            correlation_id = "bootstrap",
            "mapbox routing and static maps enabled"
        );
    } else {
        info!(
            event_name = "system.bootstrap.routing_fallback",
            correlation_id = "bootstrap",
            "no routing credential, great-circle fallback only"
        );
    }

    let resolver = DistanceResolver::new(table.clone(), route_source);
    let quote_service = Arc::new(QuoteService::new(table.clone(), resolver, map_renderer));

    let state = ApiState { quote_service, table, routing_configured };
    Ok(Application { config, state })
}
