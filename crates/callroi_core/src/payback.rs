//! Monthly payback simulation
//!
//! Independent of the yearly projection: simulates up to 36 months with a
//! linear containment ramp over the first three months, applying the yearly
//! growth and inflation factors of the month's projection year.

use crate::model::DealInputs;
use crate::projection::{CostRates, period_flows};

/// Maximum number of simulated months
pub const PAYBACK_HORIZON_MONTHS: u32 = 36;

/// Length of the linear containment ramp
pub const RAMP_MONTHS: u32 = 3;

/// Containment scale for a zero-based month: 1/3, 2/3, then 1.0
pub fn ramp_factor(month: u32) -> f64 {
    if month < RAMP_MONTHS {
        f64::from(month + 1) / f64::from(RAMP_MONTHS)
    } else {
        1.0
    }
}

/// Ops savings plus retained revenue for a zero-based month
pub fn monthly_value(inputs: &DealInputs, month: u32) -> f64 {
    let year = month / 12;
    let volume_factor = (1.0 + inputs.volume_growth()).powi(year as i32);
    let calls = inputs.annual_calls() as f64 / 12.0 * volume_factor;

    let flows = period_flows(inputs, calls, ramp_factor(month));
    let rates = CostRates::for_year(inputs, year);

    rates.baseline_cost(&flows) - rates.ai_cost(&flows) + flows.revenue_retained
}

/// First 1-based month whose cumulative value is non-negative.
///
/// Returns `None` when cumulative value stays negative for all 36 months.
pub fn payback_months(inputs: &DealInputs) -> Option<u32> {
    let mut cumulative = 0.0;

    for month in 0..PAYBACK_HORIZON_MONTHS {
        cumulative += monthly_value(inputs, month);
        if cumulative >= 0.0 {
            return Some(month + 1);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_factor() {
        assert!((ramp_factor(0) - 1.0 / 3.0).abs() < 1e-12);
        assert!((ramp_factor(1) - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(ramp_factor(2), 1.0);
        assert_eq!(ramp_factor(3), 1.0);
        assert_eq!(ramp_factor(35), 1.0);
    }
}
