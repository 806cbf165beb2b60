//! Static route-map URL construction for quote visualizations.
//!
//! Pure string building; the image itself is fetched by whoever renders the
//! quote document.

use lanequote_core::geo::Location;
use lanequote_core::service::RouteMapRenderer;
use secrecy::{ExposeSecret, SecretString};

use crate::directions::DEFAULT_BASE_URL;

const MAP_STYLE: &str = "mapbox/streets-v11";
const MAP_WIDTH: u32 = 600;
const MAP_HEIGHT: u32 = 400;
const ORIGIN_PIN: &str = "pin-s-a+00ff00";
const DESTINATION_PIN: &str = "pin-s-b+ff0000";
const PATH_STYLE: &str = "path-5+0000ff-0.6";

pub struct MapboxStaticMap {
    access_token: SecretString,
    base_url: String,
}

impl MapboxStaticMap {
    pub fn new(access_token: SecretString) -> Self {
        Self { access_token, base_url: DEFAULT_BASE_URL.to_owned() }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl RouteMapRenderer for MapboxStaticMap {
    fn static_map_url(
        &self,
        origin: &Location,
        destination: &Location,
        zoom: u8,
    ) -> Option<String> {
        let center_lon = (origin.longitude + destination.longitude) / 2.0;
        let center_lat = (origin.latitude + destination.latitude) / 2.0;

        let overlays = format!(
            "{ORIGIN_PIN}({},{}),{DESTINATION_PIN}({},{}),{PATH_STYLE}({},{},{},{})",
            origin.longitude,
            origin.latitude,
            destination.longitude,
            destination.latitude,
            origin.longitude,
            origin.latitude,
            destination.longitude,
            destination.latitude,
        );

        Some(format!(
            "{}/styles/v1/{MAP_STYLE}/static/{overlays}/{center_lon},{center_lat},{zoom}/{MAP_WIDTH}x{MAP_HEIGHT}?access_token={}",
            self.base_url,
            self.access_token.expose_secret(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use lanequote_core::geo::Location;
    use lanequote_core::service::RouteMapRenderer;

    use super::MapboxStaticMap;

    fn location(lat: f64, lon: f64) -> Location {
        Location {
            postal_code: "00000".to_owned(),
            city: String::new(),
            state_code: String::new(),
            latitude: lat,
            longitude: lon,
        }
    }

    #[test]
    fn url_carries_pins_path_center_and_zoom() {
        let renderer = MapboxStaticMap::new("pk.test".to_owned().into());
        let origin = location(34.0, -118.0);
        let destination = location(42.0, -88.0);

        let url = renderer.static_map_url(&origin, &destination, 3).expect("url");

        assert!(url.starts_with("https://api.mapbox.com/styles/v1/mapbox/streets-v11/static/"));
        assert!(url.contains("pin-s-a+00ff00(-118,34)"));
        assert!(url.contains("pin-s-b+ff0000(-88,42)"));
        assert!(url.contains("path-5+0000ff-0.6(-118,34,-88,42)"));
        assert!(url.contains("/-103,38,3/600x400?access_token=pk.test"));
    }
}
