use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Quote validity window from creation.
pub const QUOTE_VALIDITY_DAYS: i64 = 7;
pub const QUOTE_TERMS: &str = "Payment due upon delivery";

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuoteId(pub String);

impl std::fmt::Display for QuoteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentType {
    DryVan,
    Reefer,
    Flatbed,
}

impl EquipmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DryVan => "dry_van",
            Self::Reefer => "reefer",
            Self::Flatbed => "flatbed",
        }
    }
}

impl std::fmt::Display for EquipmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Itemized charges. Internal arithmetic keeps full precision; amounts are
/// rounded only when a quote crosses the response boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub base_rate: f64,
    pub fuel_surcharge: f64,
    pub liftgate_fee: f64,
    pub climate_control_fee: f64,
    pub insurance: f64,
}

impl CostBreakdown {
    pub fn total(&self) -> f64 {
        self.base_rate
            + self.fuel_surcharge
            + self.liftgate_fee
            + self.climate_control_fee
            + self.insurance
    }

    pub fn rounded(&self) -> Self {
        Self {
            base_rate: round2(self.base_rate),
            fuel_surcharge: round2(self.fuel_surcharge),
            liftgate_fee: round2(self.liftgate_fee),
            climate_control_fee: round2(self.climate_control_fee),
            insurance: round2(self.insurance),
        }
    }
}

/// An assembled quote. Created once per request and immutable afterwards;
/// nothing in this crate persists it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: QuoteId,
    pub total_cost: f64,
    pub breakdown: CostBreakdown,
    pub transit_days: u32,
    pub equipment_type: EquipmentType,
    pub created_at: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    pub terms: String,
    pub distance_miles: f64,
    pub duration_hours: f64,
    pub route_map_url: Option<String>,
}

/// Flat wire shape produced for downstream rendering and reply handlers.
/// Monetary amounts are rounded to 2 decimals here and nowhere earlier;
/// distance and duration round to 1 decimal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuoteResponse {
    pub quote_id: String,
    pub total_cost: f64,
    pub breakdown: CostBreakdown,
    pub transit_days: u32,
    pub equipment_type: EquipmentType,
    pub valid_until: DateTime<Utc>,
    pub terms: String,
    pub distance_miles: f64,
    pub duration_hours: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_map_url: Option<String>,
}

impl From<&Quote> for QuoteResponse {
    fn from(quote: &Quote) -> Self {
        Self {
            quote_id: quote.id.0.clone(),
            total_cost: round2(quote.total_cost),
            breakdown: quote.breakdown.rounded(),
            transit_days: quote.transit_days,
            equipment_type: quote.equipment_type,
            valid_until: quote.valid_until,
            terms: quote.terms.clone(),
            distance_miles: round1(quote.distance_miles),
            duration_hours: round1(quote.duration_hours),
            route_map_url: quote.route_map_url.clone(),
        }
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::{
        round2, CostBreakdown, EquipmentType, Quote, QuoteId, QuoteResponse, QUOTE_TERMS,
        QUOTE_VALIDITY_DAYS,
    };

    fn quote_fixture() -> Quote {
        let breakdown = CostBreakdown {
            base_rate: 3890.123456,
            fuel_surcharge: 583.5185184,
            liftgate_fee: 75.0,
            climate_control_fee: 0.0,
            insurance: 1000.004999,
        };
        let created_at = Utc::now();
        Quote {
            id: QuoteId("QT-20260824-101500-AB12".to_owned()),
            total_cost: breakdown.total(),
            breakdown,
            transit_days: 4,
            equipment_type: EquipmentType::DryVan,
            created_at,
            valid_until: created_at + Duration::days(QUOTE_VALIDITY_DAYS),
            terms: QUOTE_TERMS.to_owned(),
            distance_miles: 2015.4567,
            duration_hours: 29.87,
            route_map_url: None,
        }
    }

    #[test]
    fn breakdown_total_is_exact_sum_before_rounding() {
        let quote = quote_fixture();
        assert_eq!(quote.total_cost, quote.breakdown.total());
    }

    #[test]
    fn response_rounds_money_to_two_decimals_and_distance_to_one() {
        let response = QuoteResponse::from(&quote_fixture());

        assert_eq!(response.breakdown.base_rate, 3890.12);
        assert_eq!(response.breakdown.insurance, 1000.0);
        assert_eq!(response.distance_miles, 2015.5);
        assert_eq!(response.duration_hours, 29.9);
        assert_eq!(response.total_cost, round2(quote_fixture().total_cost));
    }

    #[test]
    fn response_round_trips_through_json_unchanged() {
        let response = QuoteResponse::from(&quote_fixture());
        let json = serde_json::to_string(&response).expect("serialize");
        let parsed: QuoteResponse = serde_json::from_str(&json).expect("parse");

        assert_eq!(parsed, response);
        assert_eq!(parsed.breakdown.base_rate, response.breakdown.base_rate);
    }

    #[test]
    fn absent_map_url_is_omitted_from_the_wire() {
        let response = QuoteResponse::from(&quote_fixture());
        let json = serde_json::to_string(&response).expect("serialize");
        assert!(!json.contains("route_map_url"));
    }

    #[test]
    fn equipment_type_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&EquipmentType::DryVan).expect("serialize"),
            "\"dry_van\""
        );
        assert_eq!(EquipmentType::Reefer.as_str(), "reefer");
    }
}
