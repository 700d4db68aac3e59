//! Pay-day total calculation using rust_decimal for precision
//!
//! All arithmetic is done using `Decimal` internally, then converted to
//! `f64` for storage/serialization.
//!
//! Formula:
//!   total = normal + overtime_normal × 0.5 + (overtime_holiday + overtime_eid) × 1.0

use rust_decimal::prelude::*;
use shared::models::DayCounts;

/// Weight applied to regular-rate overtime days
const OVERTIME_NORMAL_WEIGHT: Decimal = Decimal::from_parts(5, 0, 0, false, 1); // 0.5

/// Coerce a raw day-count input to a non-negative value.
///
/// Upstream data entry is tolerant: non-finite or negative inputs count as
/// zero, never as an error.
pub fn coerce_non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(coerce_non_negative(value)).unwrap_or(Decimal::ZERO)
}

/// Compute the weighted pay-day total for a set of day counts.
///
/// Deterministic and monotonic non-decreasing in each input.
pub fn calculate_total(days: &DayCounts) -> f64 {
    let total = to_decimal(days.normal_days)
        + to_decimal(days.overtime_normal_days) * OVERTIME_NORMAL_WEIGHT
        + to_decimal(days.overtime_holiday_days)
        + to_decimal(days.overtime_eid_days);
    total.to_f64().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn days(n: f64, on: f64, oh: f64, oe: f64) -> DayCounts {
        DayCounts {
            normal_days: n,
            overtime_normal_days: on,
            overtime_holiday_days: oh,
            overtime_eid_days: oe,
        }
    }

    #[test]
    fn weights_match_formula() {
        // 22 + 4×0.5 + 1×1.0 + 0 = 25
        assert_eq!(calculate_total(&days(22.0, 4.0, 1.0, 0.0)), 25.0);
        // half-day granularity from the 0.5 weight
        assert_eq!(calculate_total(&days(20.0, 3.0, 0.0, 0.0)), 21.5);
        // eid and holiday overtime both weigh 1.0
        assert_eq!(calculate_total(&days(0.0, 0.0, 2.0, 3.0)), 5.0);
    }

    #[test]
    fn zero_inputs_give_zero() {
        assert_eq!(calculate_total(&DayCounts::default()), 0.0);
    }

    #[test]
    fn negative_and_non_finite_inputs_count_as_zero() {
        assert_eq!(calculate_total(&days(-5.0, 4.0, 0.0, 0.0)), 2.0);
        assert_eq!(calculate_total(&days(f64::NAN, 0.0, f64::INFINITY, 1.0)), 1.0);
        assert_eq!(coerce_non_negative(-0.0), 0.0);
    }

    #[test]
    fn monotonic_non_decreasing_in_each_input() {
        let base = days(10.0, 2.0, 1.0, 1.0);
        let base_total = calculate_total(&base);
        for bumped in [
            days(11.0, 2.0, 1.0, 1.0),
            days(10.0, 3.0, 1.0, 1.0),
            days(10.0, 2.0, 2.0, 1.0),
            days(10.0, 2.0, 1.0, 2.0),
        ] {
            assert!(calculate_total(&bumped) >= base_total);
        }
    }
}
