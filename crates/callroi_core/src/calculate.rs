//! Single entry point for a full deal calculation

use crate::analysis::{scenarios, tornado};
use crate::metrics::{ops_vs_revenue_split, roi_5y};
use crate::model::{DealInputs, Results};
use crate::payback::payback_months;
use crate::projection::{npv, project_years};

/// Run the projector, payback solver, metrics and sensitivity analysis.
///
/// Inputs are already validated, so this cannot fail.
pub fn calculate(inputs: &DealInputs) -> Results {
    let yearly = project_years(inputs);
    let npv_5y = npv(&yearly);
    let payback = payback_months(inputs);

    let results = Results {
        payback_months: payback,
        roi_5y: roi_5y(&yearly),
        npv_5y,
        ops_vs_revenue_split: ops_vs_revenue_split(&yearly),
        tornado: tornado(inputs),
        p10_p50_p90: scenarios(inputs),
        yearly,
    };

    tracing::debug!(
        intents = inputs.intents().len(),
        npv = results.npv_5y,
        payback = ?results.payback_months,
        "calculated deal"
    );

    results
}
