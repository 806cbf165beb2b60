//! Deterministic freight pricing.
//!
//! Pure: no clock, no I/O. Given the same request and resolved distance the
//! output is identical. All charges are additive; the breakdown sums to the
//! total exactly, with rounding deferred to the response boundary.

use crate::distance::DistanceResult;
use crate::domain::quote::{CostBreakdown, EquipmentType};
use crate::domain::shipment::ShipmentRequest;
use crate::errors::DomainError;

pub const MINIMUM_BASE_RATE: f64 = 500.0;
pub const RATE_PER_MILE: f64 = 2.0;
pub const RATE_PER_POUND: f64 = 0.50;
pub const FUEL_SURCHARGE_RATE: f64 = 0.15;
pub const LIFTGATE_FEE: f64 = 75.0;
pub const CLIMATE_CONTROL_FEE: f64 = 150.0;
/// Insurance basis: declared value estimated at $5000 per 100 lbs.
pub const DECLARED_VALUE_PER_100_LBS: f64 = 5000.0;
pub const INSURANCE_RATE: f64 = 0.025;
pub const FLATBED_WEIGHT_THRESHOLD_LBS: f64 = 10_000.0;
pub const DRIVING_HOURS_PER_DAY: f64 = 8.0;
pub const MIN_TRANSIT_DAYS: u32 = 1;
pub const MAX_TRANSIT_DAYS: u32 = 7;

#[derive(Clone, Debug, PartialEq)]
pub struct PricedShipment {
    pub breakdown: CostBreakdown,
    pub equipment_type: EquipmentType,
    pub transit_days: u32,
}

/// Price a shipment against a resolved distance.
///
/// Upstream validation is assumed, but non-positive weight, pieces, or
/// dimensions are still rejected here rather than silently producing a
/// nonsense rate.
pub fn price_shipment(
    request: &ShipmentRequest,
    distance: &DistanceResult,
) -> Result<PricedShipment, DomainError> {
    if !(request.weight_lbs > 0.0) {
        return Err(DomainError::invalid_input("weight_lbs", "must be greater than zero"));
    }
    if request.piece_count == 0 {
        return Err(DomainError::invalid_input("piece_count", "must be greater than zero"));
    }
    request.dimensions.validate()?;

    let base_rate = (distance.distance_miles * RATE_PER_MILE
        + request.weight_lbs * RATE_PER_POUND)
        .max(MINIMUM_BASE_RATE);
    let fuel_surcharge = base_rate * FUEL_SURCHARGE_RATE;
    let liftgate_fee = if request.requires_liftgate() { LIFTGATE_FEE } else { 0.0 };
    let climate_control_fee =
        if request.requires_climate_control() { CLIMATE_CONTROL_FEE } else { 0.0 };

    let declared_value = (request.weight_lbs / 100.0) * DECLARED_VALUE_PER_100_LBS;
    let insurance = declared_value * INSURANCE_RATE;

    Ok(PricedShipment {
        breakdown: CostBreakdown {
            base_rate,
            fuel_surcharge,
            liftgate_fee,
            climate_control_fee,
            insurance,
        },
        equipment_type: classify_equipment(request),
        transit_days: transit_days(distance.duration_hours),
    })
}

/// Weight wins over climate control: anything above the flatbed threshold
/// is flatbed regardless of requested services.
pub fn classify_equipment(request: &ShipmentRequest) -> EquipmentType {
    if request.weight_lbs > FLATBED_WEIGHT_THRESHOLD_LBS {
        EquipmentType::Flatbed
    } else if request.requires_climate_control() {
        EquipmentType::Reefer
    } else {
        EquipmentType::DryVan
    }
}

/// Transit estimate at 8 driving hours per day, clamped to [1, 7].
pub fn transit_days(duration_hours: f64) -> u32 {
    let days = (duration_hours / DRIVING_HOURS_PER_DAY).ceil();
    (days as u32).clamp(MIN_TRANSIT_DAYS, MAX_TRANSIT_DAYS)
}

#[cfg(test)]
mod tests {
    use crate::distance::DistanceResult;
    use crate::domain::quote::EquipmentType;
    use crate::domain::shipment::{Dimensions, ShipmentRequest};
    use crate::errors::DomainError;

    use super::{price_shipment, transit_days, LIFTGATE_FEE, MINIMUM_BASE_RATE};

    fn request(weight_lbs: f64, special_services: &[&str]) -> ShipmentRequest {
        ShipmentRequest {
            origin_postal_code: "90021".to_owned(),
            destination_postal_code: "60601".to_owned(),
            weight_lbs,
            piece_count: 2,
            dimensions: Dimensions { length: 48.0, width: 40.0, height: 60.0 },
            special_services: special_services.iter().map(|s| (*s).to_owned()).collect(),
            pickup_date: None,
            commodity: "electronics".to_owned(),
        }
    }

    fn distance(miles: f64, hours: f64) -> DistanceResult {
        DistanceResult { distance_miles: miles, duration_hours: hours, route_path: None }
    }

    #[test]
    fn breakdown_sums_exactly_to_total() {
        let priced = price_shipment(
            &request(800.0, &["liftgate", "Climate Control"]),
            &distance(2015.3, 30.5),
        )
        .expect("pricing should succeed");

        let b = &priced.breakdown;
        let sum =
            b.base_rate + b.fuel_surcharge + b.liftgate_fee + b.climate_control_fee + b.insurance;
        assert_eq!(sum, b.total());
    }

    #[test]
    fn base_rate_never_drops_below_the_floor() {
        let priced =
            price_shipment(&request(1.0, &[]), &distance(0.5, 0.1)).expect("pricing should succeed");
        assert_eq!(priced.breakdown.base_rate, MINIMUM_BASE_RATE);
        assert_eq!(priced.breakdown.fuel_surcharge, MINIMUM_BASE_RATE * 0.15);
    }

    #[test]
    fn mileage_and_weight_combine_above_the_floor() {
        let priced = price_shipment(&request(800.0, &[]), &distance(1000.0, 16.0))
            .expect("pricing should succeed");
        assert_eq!(priced.breakdown.base_rate, 1000.0 * 2.0 + 800.0 * 0.50);
    }

    #[test]
    fn liftgate_scenario_prices_only_the_liftgate_fee() {
        let priced = price_shipment(&request(800.0, &["liftgate"]), &distance(1745.0, 29.0))
            .expect("pricing should succeed");

        assert_eq!(priced.breakdown.liftgate_fee, LIFTGATE_FEE);
        assert_eq!(priced.breakdown.climate_control_fee, 0.0);
        assert_eq!(priced.equipment_type, EquipmentType::DryVan);
    }

    #[test]
    fn insurance_derives_from_declared_value() {
        let priced =
            price_shipment(&request(800.0, &[]), &distance(100.0, 2.0)).expect("pricing");
        // 800 lbs -> $40,000 declared value -> 2.5% premium.
        assert_eq!(priced.breakdown.insurance, 1000.0);
    }

    #[test]
    fn heavy_loads_classify_as_flatbed_regardless_of_services() {
        let priced = price_shipment(
            &request(15_000.0, &["Climate Control", "liftgate"]),
            &distance(300.0, 5.0),
        )
        .expect("pricing should succeed");
        assert_eq!(priced.equipment_type, EquipmentType::Flatbed);
    }

    #[test]
    fn mixed_case_climate_control_sets_fee_and_reefer() {
        let priced = price_shipment(&request(800.0, &["Climate Control"]), &distance(300.0, 5.0))
            .expect("pricing should succeed");
        assert_eq!(priced.breakdown.climate_control_fee, 150.0);
        assert_eq!(priced.equipment_type, EquipmentType::Reefer);
    }

    #[test]
    fn transit_days_clamp_to_valid_range() {
        assert_eq!(transit_days(0.0), 1);
        assert_eq!(transit_days(7.9), 1);
        assert_eq!(transit_days(8.1), 2);
        assert_eq!(transit_days(16.0), 2);
        assert_eq!(transit_days(29.0), 4);
        assert_eq!(transit_days(500.0), 7);
    }

    #[test]
    fn non_positive_weight_is_rejected_not_priced() {
        let error = price_shipment(&request(0.0, &[]), &distance(100.0, 2.0))
            .expect_err("zero weight must not price");
        assert!(matches!(error, DomainError::InvalidInput { field: "weight_lbs", .. }));

        let error = price_shipment(&request(-5.0, &[]), &distance(100.0, 2.0))
            .expect_err("negative weight must not price");
        assert!(matches!(error, DomainError::InvalidInput { field: "weight_lbs", .. }));
    }

    #[test]
    fn zero_pieces_are_rejected() {
        let mut req = request(800.0, &[]);
        req.piece_count = 0;
        let error =
            price_shipment(&req, &distance(100.0, 2.0)).expect_err("zero pieces must not price");
        assert!(matches!(error, DomainError::InvalidInput { field: "piece_count", .. }));
    }
}
