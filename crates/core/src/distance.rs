//! Two-tier distance resolution.
//!
//! A configured [`RouteSource`] is always tried first when both postal codes
//! geocode; any failure drops to the haversine fallback so that `resolve`
//! never fails outward. The fallback is an availability guarantee, not an
//! optimization.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geo::{haversine_miles, GeocodeTable, Location};

pub const METERS_TO_MILES: f64 = 0.000_621_371;
pub const SECONDS_PER_HOUR: f64 = 3600.0;
/// Assumed average speed when estimating duration from great-circle miles.
pub const FALLBACK_AVERAGE_MPH: f64 = 60.0;

/// Placeholder returned when either postal code is unknown. A deliberate
/// "unknown route" marker, not a computed value.
pub const UNKNOWN_ROUTE_MILES: f64 = 1000.0;
pub const UNKNOWN_ROUTE_HOURS: f64 = 16.0;

/// Resolved distance for one request. Never cached, never persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistanceResult {
    pub distance_miles: f64,
    pub duration_hours: f64,
    /// Opaque route geometry from the routing service, when available.
    pub route_path: Option<String>,
}

/// Raw service units for a driving route; the resolver owns conversion.
#[derive(Clone, Debug, PartialEq)]
pub struct DrivingRoute {
    pub distance_meters: f64,
    pub duration_seconds: f64,
    pub geometry: Option<String>,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RouteSourceError {
    #[error("routing service returned status {0}")]
    Status(u16),
    #[error("routing service returned no routes")]
    EmptyRoutes,
    #[error("routing service transport failure: {0}")]
    Transport(String),
}

/// Live routing capability. Implementations receive already-geocoded
/// locations; the wire contract of the backing service is longitude-first.
#[async_trait]
pub trait RouteSource: Send + Sync {
    async fn driving_route(
        &self,
        origin: &Location,
        destination: &Location,
    ) -> Result<DrivingRoute, RouteSourceError>;
}

pub struct DistanceResolver {
    table: Arc<GeocodeTable>,
    source: Option<Arc<dyn RouteSource>>,
}

impl DistanceResolver {
    pub fn new(table: Arc<GeocodeTable>, source: Option<Arc<dyn RouteSource>>) -> Self {
        Self { table, source }
    }

    pub fn offline(table: Arc<GeocodeTable>) -> Self {
        Self::new(table, None)
    }

    /// Resolve driving distance and duration between two postal codes.
    /// Infallible: unknown codes yield the fixed placeholder and service
    /// failures yield the great-circle estimate.
    pub async fn resolve(&self, origin_code: &str, destination_code: &str) -> DistanceResult {
        let (Some(origin), Some(destination)) =
            (self.table.lookup(origin_code), self.table.lookup(destination_code))
        else {
            tracing::warn!(
                event_name = "distance.unknown_postal_code",
                origin = origin_code,
                destination = destination_code,
                "postal code not in geocode table, using placeholder route"
            );
            return DistanceResult {
                distance_miles: UNKNOWN_ROUTE_MILES,
                duration_hours: UNKNOWN_ROUTE_HOURS,
                route_path: None,
            };
        };

        if let Some(source) = &self.source {
            match source.driving_route(origin, destination).await {
                Ok(route) => {
                    let result = DistanceResult {
                        distance_miles: route.distance_meters * METERS_TO_MILES,
                        duration_hours: route.duration_seconds / SECONDS_PER_HOUR,
                        route_path: route.geometry,
                    };
                    tracing::debug!(
                        event_name = "distance.resolved",
                        origin = origin_code,
                        destination = destination_code,
                        distance_miles = result.distance_miles,
                        "routing service resolved driving distance"
                    );
                    return result;
                }
                Err(error) => {
                    tracing::warn!(
                        event_name = "distance.route_source_failed",
                        origin = origin_code,
                        destination = destination_code,
                        error = %error,
                        "routing service unavailable, using great-circle fallback"
                    );
                }
            }
        }

        great_circle_estimate(origin, destination)
    }
}

/// Haversine distance with duration assumed at [`FALLBACK_AVERAGE_MPH`].
pub fn great_circle_estimate(origin: &Location, destination: &Location) -> DistanceResult {
    let distance_miles = haversine_miles(origin, destination);
    DistanceResult {
        distance_miles,
        duration_hours: distance_miles / FALLBACK_AVERAGE_MPH,
        route_path: None,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::geo::{GeocodeTable, Location};

    use super::{
        DistanceResolver, DistanceResult, DrivingRoute, RouteSource, RouteSourceError,
        UNKNOWN_ROUTE_HOURS, UNKNOWN_ROUTE_MILES,
    };

    struct FixedRoute(DrivingRoute);

    #[async_trait]
    impl RouteSource for FixedRoute {
        async fn driving_route(
            &self,
            _origin: &Location,
            _destination: &Location,
        ) -> Result<DrivingRoute, RouteSourceError> {
            Ok(self.0.clone())
        }
    }

    struct AlwaysDown;

    #[async_trait]
    impl RouteSource for AlwaysDown {
        async fn driving_route(
            &self,
            _origin: &Location,
            _destination: &Location,
        ) -> Result<DrivingRoute, RouteSourceError> {
            Err(RouteSourceError::Status(503))
        }
    }

    fn table() -> Arc<GeocodeTable> {
        Arc::new(GeocodeTable::builtin())
    }

    #[tokio::test]
    async fn converts_service_units_to_miles_and_hours() {
        let resolver = DistanceResolver::new(
            table(),
            Some(Arc::new(FixedRoute(DrivingRoute {
                distance_meters: 1_609.344,
                duration_seconds: 7200.0,
                geometry: Some("geo".to_owned()),
            }))),
        );

        let result = resolver.resolve("90021", "60601").await;
        assert!((result.distance_miles - 1.0).abs() < 1e-6);
        assert_eq!(result.duration_hours, 2.0);
        assert_eq!(result.route_path.as_deref(), Some("geo"));
    }

    #[tokio::test]
    async fn service_failure_falls_back_to_great_circle() {
        let resolver = DistanceResolver::new(table(), Some(Arc::new(AlwaysDown)));

        let result = resolver.resolve("90021", "60601").await;
        // LA -> Chicago great-circle is about 1745 miles.
        let expected = 1745.0;
        assert!(
            (result.distance_miles - expected).abs() / expected < 0.05,
            "got {}",
            result.distance_miles
        );
        assert_eq!(result.duration_hours, result.distance_miles / 60.0);
        assert!(result.route_path.is_none());
    }

    #[tokio::test]
    async fn unknown_postal_code_yields_exact_placeholder() {
        let resolver = DistanceResolver::offline(table());

        let result = resolver.resolve("00000", "11111").await;
        assert_eq!(
            result,
            DistanceResult {
                distance_miles: UNKNOWN_ROUTE_MILES,
                duration_hours: UNKNOWN_ROUTE_HOURS,
                route_path: None,
            }
        );
    }

    #[tokio::test]
    async fn unknown_postal_code_skips_the_service_entirely() {
        // The service cannot be called without coordinates, so the
        // placeholder applies even when a source is configured.
        let resolver = DistanceResolver::new(table(), Some(Arc::new(AlwaysDown)));

        let result = resolver.resolve("90021", "99999").await;
        assert_eq!(result.distance_miles, UNKNOWN_ROUTE_MILES);
        assert_eq!(result.duration_hours, UNKNOWN_ROUTE_HOURS);
    }

    #[tokio::test]
    async fn offline_fallback_is_symmetric() {
        let resolver = DistanceResolver::offline(table());

        let forward = resolver.resolve("10001", "94102").await;
        let reverse = resolver.resolve("94102", "10001").await;
        assert_eq!(forward.distance_miles, reverse.distance_miles);
        assert_eq!(forward.duration_hours, reverse.duration_hours);
    }
}
