pub mod config;
pub mod distance;
pub mod domain;
pub mod errors;
pub mod geo;
pub mod pricing;
pub mod service;

pub use distance::{
    DistanceResolver, DistanceResult, DrivingRoute, RouteSource, RouteSourceError,
};
pub use domain::quote::{
    CostBreakdown, EquipmentType, Quote, QuoteId, QuoteResponse, QUOTE_TERMS, QUOTE_VALIDITY_DAYS,
};
pub use domain::shipment::{Dimensions, ShipmentRequest};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use geo::{GeocodeTable, Location};
pub use pricing::{price_shipment, PricedShipment};
pub use service::{QuoteService, RouteMapRenderer};
