use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use lanequote_core::config::{AppConfig, LoadOptions};
use lanequote_core::distance::{DistanceResolver, RouteSource};
use lanequote_core::domain::quote::QuoteResponse;
use lanequote_core::domain::shipment::ShipmentRequest;
use lanequote_core::geo::GeocodeTable;
use lanequote_core::service::{QuoteService, RouteMapRenderer};
use lanequote_routing::{MapboxDirectionsClient, MapboxStaticMap};

use super::CommandResult;

pub async fn run(file: &Path, pretty: bool) -> CommandResult {
    match quote_from_file(file, pretty).await {
        Ok(output) => CommandResult { exit_code: 0, output },
        Err(message) => CommandResult { exit_code: 1, output: message },
    }
}

async fn quote_from_file(file: &Path, pretty: bool) -> Result<String, String> {
    let raw = std::fs::read_to_string(file)
        .map_err(|error| format!("could not read `{}`: {error}", file.display()))?;
    let request: ShipmentRequest = serde_json::from_str(&raw)
        .map_err(|error| format!("could not parse shipment request: {error}"))?;
    request.validate().map_err(|error| format!("invalid shipment request: {error}"))?;

    let config = AppConfig::load(LoadOptions::default())
        .map_err(|error| format!("configuration error: {error}"))?;
    let service = build_service(&config).map_err(|error| format!("setup error: {error}"))?;

    let quote = service
        .create_quote(&request)
        .await
        .map_err(|error| format!("quote creation failed: {error}"))?;

    let response = QuoteResponse::from(&quote);
    let rendered = if pretty {
        serde_json::to_string_pretty(&response)
    } else {
        serde_json::to_string(&response)
    };
    rendered.map_err(|error| format!("could not serialize quote: {error}"))
}

fn build_service(config: &AppConfig) -> Result<QuoteService, reqwest::Error> {
    let table = Arc::new(GeocodeTable::builtin());

    let mut route_source: Option<Arc<dyn RouteSource>> = None;
    let mut map_renderer: Option<Arc<dyn RouteMapRenderer>> = None;
    if let Some(token) =
        config.routing.mapbox_token.as_ref().filter(|_| config.routing.is_configured())
    {
        let client = MapboxDirectionsClient::new(
            token.clone(),
            Duration::from_secs(config.routing.timeout_secs),
        )?;
        route_source = Some(Arc::new(client));
        map_renderer = Some(Arc::new(MapboxStaticMap::new(token.clone())));
    }

    let resolver = DistanceResolver::new(table.clone(), route_source);
    Ok(QuoteService::new(table, resolver, map_renderer))
}
