//! Mapbox Directions client implementing the core route-source seam.

use std::time::Duration;

use async_trait::async_trait;
use lanequote_core::distance::{DrivingRoute, RouteSource, RouteSourceError};
use lanequote_core::geo::Location;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://api.mapbox.com";
const DIRECTIONS_PROFILE: &str = "mapbox/driving";

pub struct MapboxDirectionsClient {
    http: reqwest::Client,
    access_token: SecretString,
    base_url: String,
}

impl MapboxDirectionsClient {
    pub fn new(access_token: SecretString, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, access_token, base_url: DEFAULT_BASE_URL.to_owned() })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// The Mapbox coordinate segment. Longitude first is the service contract.
fn coordinate_pair(origin: &Location, destination: &Location) -> String {
    format!(
        "{},{};{},{}",
        origin.longitude, origin.latitude, destination.longitude, destination.latitude
    )
}

#[async_trait]
impl RouteSource for MapboxDirectionsClient {
    async fn driving_route(
        &self,
        origin: &Location,
        destination: &Location,
    ) -> Result<DrivingRoute, RouteSourceError> {
        let url = format!(
            "{}/directions/v5/{DIRECTIONS_PROFILE}/{}",
            self.base_url,
            coordinate_pair(origin, destination)
        );

        let response = self
            .http
            .get(&url)
            .query(&[
                ("access_token", self.access_token.expose_secret()),
                ("geometries", "geojson"),
                ("overview", "full"),
            ])
            .send()
            .await
            .map_err(|error| RouteSourceError::Transport(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RouteSourceError::Status(status.as_u16()));
        }

        let body: DirectionsResponse = response
            .json()
            .await
            .map_err(|error| RouteSourceError::Transport(error.to_string()))?;

        let route = body.routes.into_iter().next().ok_or(RouteSourceError::EmptyRoutes)?;
        tracing::debug!(
            event_name = "routing.directions_resolved",
            distance_meters = route.distance,
            duration_seconds = route.duration,
            "mapbox directions returned a route"
        );

        Ok(DrivingRoute {
            distance_meters: route.distance,
            duration_seconds: route.duration,
            geometry: route.geometry.map(|geometry| geometry.to_string()),
        })
    }
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
struct DirectionsRoute {
    distance: f64,
    duration: f64,
    geometry: Option<serde_json::Value>,
}
