//! Three-point scenario NPVs
//!
//! These are fixed parametric perturbations of the base case, not sampled
//! percentiles.

use crate::model::{DealInputs, ScenarioNpv};
use crate::projection::project_npv;

/// Containment multiplier for the pessimistic case
pub const P10_CONTAINMENT: f64 = 0.8;
/// Agent and platform cost multiplier for the pessimistic case
pub const P10_COSTS: f64 = 1.1;
/// Containment multiplier for the optimistic case (capped at 1.0)
pub const P90_CONTAINMENT: f64 = 1.2;
/// Agent and platform cost multiplier for the optimistic case
pub const P90_COSTS: f64 = 0.9;

/// Pessimistic copy of the inputs
pub fn pessimistic(inputs: &DealInputs) -> DealInputs {
    inputs
        .with_scaled_containment(P10_CONTAINMENT)
        .with_scaled_costs(P10_COSTS)
}

/// Optimistic copy of the inputs
pub fn optimistic(inputs: &DealInputs) -> DealInputs {
    inputs
        .with_scaled_containment(P90_CONTAINMENT)
        .with_scaled_costs(P90_COSTS)
}

/// NPV of the pessimistic, base and optimistic cases
pub fn scenarios(inputs: &DealInputs) -> ScenarioNpv {
    ScenarioNpv {
        p10: project_npv(&pessimistic(inputs)),
        p50: project_npv(inputs),
        p90: project_npv(&optimistic(inputs)),
    }
}
