//! Summary metrics derived from a yearly projection

use crate::model::{OpsRevenueSplit, YearResult};

/// Five-year cost reduction as a percentage of baseline cost.
///
/// Returns 0 when total baseline cost is 0.
pub fn roi_5y(yearly: &[YearResult]) -> f64 {
    let total_baseline: f64 = yearly.iter().map(|y| y.baseline_cost).sum();
    let total_ai: f64 = yearly.iter().map(|y| y.ai_cost).sum();

    if total_baseline == 0.0 {
        return 0.0;
    }

    (total_baseline - total_ai) / total_baseline * 100.0
}

/// Ops savings and retained revenue as percentages of their sum.
///
/// Both are 0 when the sum is 0.
pub fn ops_vs_revenue_split(yearly: &[YearResult]) -> OpsRevenueSplit {
    let total_ops: f64 = yearly.iter().map(|y| y.ops_savings).sum();
    let total_revenue: f64 = yearly.iter().map(|y| y.revenue_retained).sum();
    let total = total_ops + total_revenue;

    if total == 0.0 {
        return OpsRevenueSplit::default();
    }

    OpsRevenueSplit {
        ops_savings: total_ops / total * 100.0,
        revenue_retained: total_revenue / total * 100.0,
    }
}
