//! Yearly value projection
//!
//! Projects five annual periods of call minutes, costs and value. The
//! steady-state containment rate (after risk adjustment) applies from year 0;
//! there is no adoption ramp on this path. The monthly payback simulation in
//! `payback` shares the per-period arithmetic but does ramp containment.

use crate::model::{DealInputs, YearResult};

/// Number of projected years
pub const HORIZON_YEARS: u32 = 5;

/// Minute and revenue flows for one period of call volume
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct PeriodFlows {
    pub baseline_minutes: f64,
    pub automated_minutes: f64,
    pub handoff_minutes: f64,
    pub human_minutes: f64,
    pub revenue_retained: f64,
}

/// Per-minute cost rates after inflation
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct CostRates {
    pub agent: f64,
    pub telco: f64,
    pub polyai: f64,
}

impl CostRates {
    /// Rates inflated to the given projection year
    pub fn for_year(inputs: &DealInputs, year: u32) -> Self {
        let inflation_factor = (1.0 + inputs.inflation()).powi(year as i32);
        Self {
            agent: inputs.agent_cost_per_min() * inflation_factor,
            telco: inputs.telco_cost_per_min() * inflation_factor,
            polyai: inputs.polyai_cost_per_min() * inflation_factor,
        }
    }

    /// Cost of handling every minute with agents
    pub fn baseline_cost(&self, flows: &PeriodFlows) -> f64 {
        flows.baseline_minutes * (self.agent + self.telco)
    }

    /// Cost of automated minutes plus the remaining human minutes
    pub fn ai_cost(&self, flows: &PeriodFlows) -> f64 {
        flows.automated_minutes * (self.polyai + self.telco)
            + flows.human_minutes * (self.agent + self.telco)
    }
}

/// Call volume for a projection year
pub(crate) fn calls_in_year(inputs: &DealInputs, year: u32) -> f64 {
    inputs.annual_calls() as f64 * (1.0 + inputs.volume_growth()).powi(year as i32)
}

/// Aggregate minute flows across all intents for `calls` calls.
///
/// Each intent's containment is `containment_m3 * (1 - risk_adjustment) * ramp`.
pub(crate) fn period_flows(inputs: &DealInputs, calls: f64, ramp: f64) -> PeriodFlows {
    let acw = inputs.acw_minutes();
    let abandon_delta = inputs.baseline_abandon_rate() - inputs.ai_abandon_rate();
    let mut flows = PeriodFlows::default();

    for intent in inputs.intents() {
        let containment = intent.containment_m3 * (1.0 - inputs.risk_adjustment()) * ramp;
        let intent_calls = calls * intent.volume_share;

        let handoff = intent_calls * intent.handoff_minutes * (1.0 - containment);

        flows.baseline_minutes += intent_calls * (intent.avg_minutes + acw);
        flows.automated_minutes += intent_calls * intent.avg_minutes * containment;
        flows.handoff_minutes += handoff;
        flows.human_minutes +=
            intent_calls * intent.avg_minutes * (1.0 - containment) + handoff + intent_calls * acw;

        if let Some(revenue) = intent.revenue_per_abandon {
            flows.revenue_retained += abandon_delta * intent_calls * revenue;
        }
    }

    flows
}

/// Project the five-year value breakdown.
///
/// Years are returned in order 0..5 and `cumulative_value` is the running sum
/// of `total_value`.
pub fn project_years(inputs: &DealInputs) -> Vec<YearResult> {
    let mut results = Vec::with_capacity(HORIZON_YEARS as usize);
    let mut cumulative_value = 0.0;

    for year in 0..HORIZON_YEARS {
        let flows = period_flows(inputs, calls_in_year(inputs, year), 1.0);
        let rates = CostRates::for_year(inputs, year);

        let baseline_cost = rates.baseline_cost(&flows);
        let ai_cost = rates.ai_cost(&flows);
        let ops_savings = baseline_cost - ai_cost;
        let total_value = ops_savings + flows.revenue_retained;
        cumulative_value += total_value;
        let discounted_value = total_value / (1.0 + inputs.discount_rate()).powi(year as i32);

        results.push(YearResult {
            year,
            baseline_minutes: flows.baseline_minutes,
            automated_minutes: flows.automated_minutes,
            handoff_minutes: flows.handoff_minutes,
            human_minutes: flows.human_minutes,
            baseline_cost,
            ai_cost,
            ops_savings,
            revenue_retained: flows.revenue_retained,
            total_value,
            cumulative_value,
            discounted_value,
        });
    }

    results
}

/// Net present value of a projection (sum of discounted yearly value)
pub fn npv(yearly: &[YearResult]) -> f64 {
    yearly.iter().map(|y| y.discounted_value).sum()
}

/// Project and discount in one step
pub fn project_npv(inputs: &DealInputs) -> f64 {
    npv(&project_years(inputs))
}
