pub mod quote;
pub mod shipment;
