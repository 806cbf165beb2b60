//! End-to-end extraction: email text in, validated [`ShipmentRequest`] out.

use std::sync::Arc;

use chrono::Utc;
use lanequote_core::domain::shipment::{Dimensions, ShipmentRequest};

use crate::llm::LlmClient;
use crate::prompt::{extraction_prompt, SYSTEM_PROMPT};
use crate::schema::{parse_extraction, ExtractedShipment};
use crate::ExtractionError;

const DEFAULT_COMMODITY: &str = "General Freight";

pub struct ShipmentExtractor {
    llm: Arc<dyn LlmClient>,
}

impl ShipmentExtractor {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    /// Extract a quoteable request from free-form email text. Fails with
    /// `Incomplete` when required details are absent, so callers can ask the
    /// sender for the missing pieces instead of quoting garbage.
    pub async fn extract(&self, email_body: &str) -> Result<ShipmentRequest, ExtractionError> {
        let prompt = extraction_prompt(email_body, Utc::now().date_naive());
        let response = self.llm.complete(SYSTEM_PROMPT, &prompt).await?;
        let extracted = parse_extraction(&response)?;

        let request = into_request(extracted)?;
        request
            .validate()
            .map_err(|error| ExtractionError::Incomplete(error.to_string()))?;

        tracing::debug!(
            event_name = "extract.request_ready",
            origin = %request.origin_postal_code,
            destination = %request.destination_postal_code,
            weight_lbs = request.weight_lbs,
            "shipment request extracted and validated"
        );
        Ok(request)
    }
}

/// Completeness checks mirror the quoting contract: both postal codes, a
/// positive weight and piece count, and usable dimensions must be present.
fn into_request(extracted: ExtractedShipment) -> Result<ShipmentRequest, ExtractionError> {
    let origin_postal_code = extracted
        .origin
        .and_then(|party| party.zip)
        .filter(|zip| !zip.trim().is_empty())
        .ok_or_else(|| ExtractionError::Incomplete("missing origin zip code".to_owned()))?;
    let destination_postal_code = extracted
        .destination
        .and_then(|party| party.zip)
        .filter(|zip| !zip.trim().is_empty())
        .ok_or_else(|| ExtractionError::Incomplete("missing destination zip code".to_owned()))?;

    let cargo = extracted
        .cargo
        .ok_or_else(|| ExtractionError::Incomplete("missing cargo details".to_owned()))?;

    let weight_lbs = cargo
        .weight_lbs
        .filter(|weight| *weight > 0.0)
        .ok_or_else(|| ExtractionError::Incomplete("missing or invalid weight".to_owned()))?;
    let piece_count = cargo
        .pieces
        .filter(|pieces| *pieces > 0)
        .ok_or_else(|| {
            ExtractionError::Incomplete("missing or invalid number of pieces".to_owned())
        })?;
    let dimensions = cargo
        .dimensions
        .ok_or_else(|| ExtractionError::Incomplete("missing cargo dimensions".to_owned()))?;

    Ok(ShipmentRequest {
        origin_postal_code,
        destination_postal_code,
        weight_lbs,
        piece_count,
        dimensions: Dimensions {
            length: dimensions.length,
            width: dimensions.width,
            height: dimensions.height,
        },
        special_services: extracted.special_services,
        pickup_date: extracted.pickup_date,
        commodity: cargo.commodity.unwrap_or_else(|| DEFAULT_COMMODITY.to_owned()),
    })
}
