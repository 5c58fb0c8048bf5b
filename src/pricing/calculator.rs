//! Row transformer: zone record + parameters -> display row
//!
//! Rounding is half away from zero (`f64::round`) at two decimals. The
//! monthly total is computed from the already rounded daily total, so it
//! compounds that rounding: `monthly == round2(round2(rate * size) * frequency)`.

use crate::pricing::models::{DisplayRow, ZoneRecord, SENTINEL};
use crate::pricing::params::Parameters;

/// Round to two decimals, half away from zero
///
/// Non-finite input yields zero so a total can never display as NaN or
/// infinity.
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }

    let rounded = (value * 100.0).round() / 100.0;
    if !rounded.is_finite() {
        // |value| too large to scale; already far beyond cent precision
        return value;
    }

    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Daily total: `cost_per_gb * response_size`, or zero when either is absent
pub fn total_cost(zone: &ZoneRecord, params: &Parameters) -> f64 {
    let response_size = params.response_size();
    match zone.cost_per_gb {
        Some(rate) if response_size != 0.0 => round2(rate * response_size),
        _ => 0.0,
    }
}

/// Monthly total from a (rounded) daily total
pub fn monthly_cost(total_cost: f64, params: &Parameters) -> f64 {
    round2(total_cost * params.frequency())
}

/// Transform one zone into a display row
pub fn transform_row(zone: &ZoneRecord, params: &Parameters) -> DisplayRow {
    let total = total_cost(zone, params);

    DisplayRow {
        zone: zone.zone.clone(),
        zone_type: zone.zone_type.clone(),
        cost_per_gb: zone.cost_per_gb.into(),
        cpm: zone.cpm.into(),
        spend_limit: zone.spend_limit.into(),
        current_usage: zone
            .current_usage
            .map(|usage| usage.to_string())
            .unwrap_or_else(|| SENTINEL.to_string()),
        total_cost: total,
        total_monthly_cost: monthly_cost(total, params),
    }
}

/// Transform a whole zone list, keeping source order
pub fn transform_zones(zones: &[ZoneRecord], params: &Parameters) -> Vec<DisplayRow> {
    zones.iter().map(|zone| transform_row(zone, params)).collect()
}
