//! Quote assembly: distance resolution, pricing, identity, validity window,
//! and the optional route-map visualization.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::distance::DistanceResolver;
use crate::domain::quote::{Quote, QuoteId, QUOTE_TERMS, QUOTE_VALIDITY_DAYS};
use crate::domain::shipment::ShipmentRequest;
use crate::errors::ApplicationError;
use crate::geo::{GeocodeTable, Location};
use crate::pricing::price_shipment;

const QUOTE_ID_PREFIX: &str = "QT";
const QUOTE_ID_SUFFIX_LEN: usize = 4;

/// Static route-map capability. Implementations return a ready-to-embed
/// image URL or `None`; a missing map never fails a quote.
pub trait RouteMapRenderer: Send + Sync {
    fn static_map_url(&self, origin: &Location, destination: &Location, zoom: u8) -> Option<String>;
}

pub struct QuoteService {
    table: Arc<GeocodeTable>,
    resolver: DistanceResolver,
    map_renderer: Option<Arc<dyn RouteMapRenderer>>,
}

impl QuoteService {
    pub fn new(
        table: Arc<GeocodeTable>,
        resolver: DistanceResolver,
        map_renderer: Option<Arc<dyn RouteMapRenderer>>,
    ) -> Self {
        Self { table, resolver, map_renderer }
    }

    /// Build one complete, immutable quote for a validated request.
    ///
    /// Distance resolution cannot fail; a pricing error surfaces as a
    /// quote-creation failure with no retry here.
    pub async fn create_quote(&self, request: &ShipmentRequest) -> Result<Quote, ApplicationError> {
        let distance = self
            .resolver
            .resolve(&request.origin_postal_code, &request.destination_postal_code)
            .await;
        let priced = price_shipment(request, &distance)?;

        let created_at = Utc::now();
        let id = next_quote_id(created_at);
        let route_map_url = self.render_route_map(request);

        tracing::info!(
            event_name = "quote.created",
            quote_id = %id,
            origin = %request.origin_postal_code,
            destination = %request.destination_postal_code,
            distance_miles = distance.distance_miles,
            equipment_type = %priced.equipment_type,
            "quote assembled"
        );

        Ok(Quote {
            id,
            total_cost: priced.breakdown.total(),
            breakdown: priced.breakdown,
            transit_days: priced.transit_days,
            equipment_type: priced.equipment_type,
            created_at,
            valid_until: created_at + Duration::days(QUOTE_VALIDITY_DAYS),
            terms: QUOTE_TERMS.to_owned(),
            distance_miles: distance.distance_miles,
            duration_hours: distance.duration_hours,
            route_map_url,
        })
    }

    fn render_route_map(&self, request: &ShipmentRequest) -> Option<String> {
        let renderer = self.map_renderer.as_ref()?;
        let origin = self.table.lookup(&request.origin_postal_code)?;
        let destination = self.table.lookup(&request.destination_postal_code)?;
        renderer.static_map_url(origin, destination, route_zoom(origin, destination))
    }
}

/// Zoom tier from the coordinate span between the two endpoints.
pub fn route_zoom(origin: &Location, destination: &Location) -> u8 {
    let span = (origin.longitude - destination.longitude)
        .abs()
        .max((origin.latitude - destination.latitude).abs());

    if span < 1.0 {
        8
    } else if span < 3.0 {
        6
    } else if span < 7.0 {
        5
    } else if span < 15.0 {
        4
    } else {
        3
    }
}

/// Timestamp-prefixed id with a random suffix. The second-resolution
/// timestamp keeps ids operator-readable; the suffix removes the
/// same-second collision risk a bare timestamp carries.
pub fn next_quote_id(created_at: DateTime<Utc>) -> QuoteId {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(QUOTE_ID_SUFFIX_LEN)
        .map(char::from)
        .collect::<String>()
        .to_uppercase();

    QuoteId(format!("{QUOTE_ID_PREFIX}-{}-{suffix}", created_at.format("%Y%m%d-%H%M%S")))
}
