pub mod directions;
pub mod static_map;

pub use directions::MapboxDirectionsClient;
pub use static_map::MapboxStaticMap;
