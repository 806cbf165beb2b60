use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

pub const MAX_WEIGHT_LBS: f64 = 50_000.0;
pub const MAX_PIECE_COUNT: u32 = 100;

/// Piece dimensions in inches.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

/// A fully-extracted shipment request, the input to quoting.
///
/// Instances are produced by the extraction boundary, which runs
/// `validate` before handing one to the quote service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRequest {
    pub origin_postal_code: String,
    pub destination_postal_code: String,
    pub weight_lbs: f64,
    pub piece_count: u32,
    pub dimensions: Dimensions,
    #[serde(default)]
    pub special_services: Vec<String>,
    #[serde(default)]
    pub pickup_date: Option<NaiveDate>,
    pub commodity: String,
}

impl ShipmentRequest {
    /// Completeness and range checks for requests arriving at the boundary.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_postal_code("origin_postal_code", &self.origin_postal_code)?;
        validate_postal_code("destination_postal_code", &self.destination_postal_code)?;

        if !(self.weight_lbs > 0.0) {
            return Err(DomainError::invalid_input("weight_lbs", "must be greater than zero"));
        }
        if self.weight_lbs > MAX_WEIGHT_LBS {
            return Err(DomainError::invalid_input(
                "weight_lbs",
                format!("must not exceed {MAX_WEIGHT_LBS} lbs"),
            ));
        }
        if self.piece_count == 0 {
            return Err(DomainError::invalid_input("piece_count", "must be greater than zero"));
        }
        if self.piece_count > MAX_PIECE_COUNT {
            return Err(DomainError::invalid_input(
                "piece_count",
                format!("must not exceed {MAX_PIECE_COUNT} pieces"),
            ));
        }
        self.dimensions.validate()?;

        Ok(())
    }

    /// Exact, case-sensitive membership test used for the liftgate fee.
    pub fn requires_liftgate(&self) -> bool {
        self.special_services.iter().any(|service| service == "liftgate")
    }

    /// Climate control matches after normalization: lower-cased with spaces
    /// replaced by underscores, so "Climate Control" qualifies.
    pub fn requires_climate_control(&self) -> bool {
        self.special_services
            .iter()
            .any(|service| normalize_service(service) == "climate_control")
    }
}

impl Dimensions {
    pub fn validate(&self) -> Result<(), DomainError> {
        for (name, value) in
            [("length", self.length), ("width", self.width), ("height", self.height)]
        {
            if !(value > 0.0) {
                return Err(DomainError::invalid_input(
                    "dimensions",
                    format!("{name} must be greater than zero"),
                ));
            }
        }
        Ok(())
    }
}

pub fn normalize_service(service: &str) -> String {
    service.to_lowercase().replace(' ', "_")
}

fn validate_postal_code(field: &'static str, code: &str) -> Result<(), DomainError> {
    if code.len() == 5 && code.bytes().all(|byte| byte.is_ascii_digit()) {
        return Ok(());
    }
    Err(DomainError::invalid_input(field, "must be a 5-digit postal code"))
}
