//! Static postal-code geocoding and great-circle math.
//!
//! The table is built once at startup and shared read-only; lookups are
//! exact-match on the 5-digit code, no prefix or fuzzy matching.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub const EARTH_RADIUS_MILES: f64 = 3959.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub postal_code: String,
    pub city: String,
    pub state_code: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Clone, Debug, Default)]
pub struct GeocodeTable {
    entries: HashMap<String, Location>,
}

impl GeocodeTable {
    pub fn new(locations: impl IntoIterator<Item = Location>) -> Self {
        let entries = locations
            .into_iter()
            .map(|location| (location.postal_code.clone(), location))
            .collect();
        Self { entries }
    }

    /// The built-in table of major-market US postal codes.
    pub fn builtin() -> Self {
        Self::new(BUILTIN_LOCATIONS.iter().map(|&(zip, city, state, lat, lon)| Location {
            postal_code: zip.to_owned(),
            city: city.to_owned(),
            state_code: state.to_owned(),
            latitude: lat,
            longitude: lon,
        }))
    }

    pub fn lookup(&self, postal_code: &str) -> Option<&Location> {
        self.entries.get(postal_code)
    }

    pub fn contains(&self, postal_code: &str) -> bool {
        self.entries.contains_key(postal_code)
    }

    /// Known postal codes in ascending order, for listing surfaces.
    pub fn postal_codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Great-circle distance between two locations via the haversine formula.
pub fn haversine_miles(a: &Location, b: &Location) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);

    EARTH_RADIUS_MILES * 2.0 * h.sqrt().asin()
}

const BUILTIN_LOCATIONS: &[(&str, &str, &str, f64, f64)] = &[
    ("10001", "New York", "NY", 40.7128, -74.0060),
    ("90001", "Los Angeles", "CA", 34.0522, -118.2437),
    ("90021", "Los Angeles", "CA", 34.0407, -118.2468),
    ("60601", "Chicago", "IL", 41.8781, -87.6298),
    ("77001", "Houston", "TX", 29.7604, -95.3698),
    ("77002", "Houston", "TX", 29.7589, -95.3677),
    ("85001", "Phoenix", "AZ", 33.4484, -112.0740),
    ("19103", "Philadelphia", "PA", 39.9526, -75.1652),
    ("78205", "San Antonio", "TX", 29.4241, -98.4936),
    ("78701", "Austin", "TX", 30.2672, -97.7431),
    ("78702", "Austin", "TX", 30.2586, -97.7242),
    ("92101", "San Diego", "CA", 32.7157, -117.1611),
    ("75201", "Dallas", "TX", 32.7767, -96.7970),
    ("95113", "San Jose", "CA", 37.3382, -121.8863),
    ("32202", "Jacksonville", "FL", 30.3322, -81.6557),
    ("76102", "Fort Worth", "TX", 32.7555, -97.3308),
    ("43215", "Columbus", "OH", 39.9612, -82.9988),
    ("28202", "Charlotte", "NC", 35.2271, -80.8431),
    ("94102", "San Francisco", "CA", 37.7749, -122.4194),
    ("46204", "Indianapolis", "IN", 39.7684, -86.1581),
    ("98101", "Seattle", "WA", 47.6062, -122.3321),
    ("80202", "Denver", "CO", 39.7392, -104.9903),
    ("20001", "Washington", "DC", 38.9072, -77.0369),
    ("02108", "Boston", "MA", 42.3601, -71.0589),
    ("79901", "El Paso", "TX", 31.7619, -106.4850),
    ("37219", "Nashville", "TN", 36.1627, -86.7816),
    ("48226", "Detroit", "MI", 42.3314, -83.0458),
    ("73102", "Oklahoma City", "OK", 35.4676, -97.5164),
    ("97201", "Portland", "OR", 45.5152, -122.6784),
    ("89101", "Las Vegas", "NV", 36.1699, -115.1398),
    ("38103", "Memphis", "TN", 35.1495, -90.0490),
    ("40202", "Louisville", "KY", 38.2527, -85.7585),
    ("21201", "Baltimore", "MD", 39.2904, -76.6122),
    ("53202", "Milwaukee", "WI", 43.0389, -87.9065),
    ("07102", "Newark", "NJ", 40.7357, -74.1724),
    ("87102", "Albuquerque", "NM", 35.0844, -106.6504),
    ("85701", "Tucson", "AZ", 32.2226, -110.9747),
    ("93721", "Fresno", "CA", 36.7378, -119.7871),
    ("95814", "Sacramento", "CA", 38.5816, -121.4944),
    ("64106", "Kansas City", "MO", 39.0997, -94.5786),
    ("85201", "Mesa", "AZ", 33.4152, -111.8315),
    ("30303", "Atlanta", "GA", 33.7490, -84.3880),
    ("68102", "Omaha", "NE", 41.2565, -95.9345),
    ("80903", "Colorado Springs", "CO", 38.8339, -104.8214),
    ("27601", "Raleigh", "NC", 35.7796, -78.6382),
    ("90802", "Long Beach", "CA", 33.7701, -118.1937),
    ("23451", "Virginia Beach", "VA", 36.8529, -75.9780),
    ("94612", "Oakland", "CA", 37.8044, -122.2711),
    ("55401", "Minneapolis", "MN", 44.9778, -93.2650),
    ("74103", "Tulsa", "OK", 36.1540, -95.9928),
    ("67202", "Wichita", "KS", 37.6872, -97.3301),
    ("70112", "New Orleans", "LA", 29.9511, -90.0715),
    ("33602", "Tampa", "FL", 27.9506, -82.4572),
];
