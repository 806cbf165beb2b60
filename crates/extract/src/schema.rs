//! The extraction wire schema and response cleanup.
//!
//! Models return the shipment JSON described in the prompt; everything is
//! optional at this layer and completeness is enforced afterwards by
//! [`crate::extractor`].

use chrono::NaiveDate;
use serde::Deserialize;

use crate::ExtractionError;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ExtractedShipment {
    pub origin: Option<ExtractedParty>,
    pub destination: Option<ExtractedParty>,
    pub cargo: Option<ExtractedCargo>,
    #[serde(default)]
    pub special_services: Vec<String>,
    #[serde(default)]
    pub pickup_date: Option<NaiveDate>,
    #[serde(default)]
    pub additional_notes: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ExtractedParty {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ExtractedCargo {
    #[serde(default)]
    pub weight_lbs: Option<f64>,
    #[serde(default)]
    pub pieces: Option<u32>,
    #[serde(default)]
    pub piece_type: Option<String>,
    #[serde(default)]
    pub dimensions: Option<ExtractedDimensions>,
    #[serde(default)]
    pub commodity: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ExtractedDimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub unit: Option<String>,
}

/// Strip markdown code fences some models wrap around JSON despite the
/// prompt's instructions.
pub fn strip_code_fences(response: &str) -> String {
    let trimmed = response.trim();
    if !trimmed.starts_with("```") {
        return trimmed.replace("```", "").trim().to_owned();
    }

    let mut lines: Vec<&str> = trimmed.lines().collect();
    lines.remove(0);
    if lines.last().is_some_and(|line| line.trim_start().starts_with("```")) {
        lines.pop();
    }

    let mut body = lines.join("\n");
    if let Some(rest) = body.strip_prefix("json") {
        body = rest.to_owned();
    }
    body.replace("```", "").trim().to_owned()
}

pub fn parse_extraction(response: &str) -> Result<ExtractedShipment, ExtractionError> {
    let cleaned = strip_code_fences(response);
    serde_json::from_str(&cleaned).map_err(|error| ExtractionError::Parse(error.to_string()))
}
