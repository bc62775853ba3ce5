//! Deal Builder
//!
//! The DealBuilder provides a fluent API for assembling a scenario. Fields
//! left unset take the same defaults as scenario files; `build()` runs the
//! full validation.
//!
//! # Example
//!
//! ```ignore
//! use callroi_core::config::{DealBuilder, IntentBuilder};
//!
//! let inputs = DealBuilder::new()
//!     .annual_calls(100_000)
//!     .agent_cost(0.80)
//!     .telco_cost(0.05)
//!     .polyai_cost(0.12)
//!     .abandon_rates(0.15, 0.08)
//!     .intent(IntentBuilder::new("Billing").share(0.6).minutes(3.0).containment(0.5, 0.8))
//!     .intent(IntentBuilder::new("Orders").share(0.4).minutes(2.0).containment(0.4, 0.7))
//!     .build()?;
//! ```

use crate::error::ValidationError;
use crate::model::{DealInputs, DealSpec, IntentRow};

/// Builder for a single intent row
#[derive(Debug, Clone)]
pub struct IntentBuilder {
    row: IntentRow,
}

impl IntentBuilder {
    /// Start an intent with zero share, one minute handling time and no containment
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            row: IntentRow {
                name: name.into(),
                volume_share: 0.0,
                avg_minutes: 1.0,
                containment_m0: 0.0,
                containment_m3: 0.0,
                handoff_minutes: 0.0,
                revenue_per_abandon: None,
            },
        }
    }

    #[must_use]
    pub fn share(mut self, volume_share: f64) -> Self {
        self.row.volume_share = volume_share;
        self
    }

    #[must_use]
    pub fn minutes(mut self, avg_minutes: f64) -> Self {
        self.row.avg_minutes = avg_minutes;
        self
    }

    /// Set go-live and steady-state containment
    #[must_use]
    pub fn containment(mut self, m0: f64, m3: f64) -> Self {
        self.row.containment_m0 = m0;
        self.row.containment_m3 = m3;
        self
    }

    #[must_use]
    pub fn handoff(mut self, minutes: f64) -> Self {
        self.row.handoff_minutes = minutes;
        self
    }

    #[must_use]
    pub fn revenue_per_abandon(mut self, revenue: f64) -> Self {
        self.row.revenue_per_abandon = Some(revenue);
        self
    }

    pub fn build(self) -> IntentRow {
        self.row
    }
}

impl From<IntentBuilder> for IntentRow {
    fn from(builder: IntentBuilder) -> Self {
        builder.build()
    }
}

/// Builder for a complete deal scenario
#[derive(Debug, Clone)]
pub struct DealBuilder {
    spec: DealSpec,
}

impl Default for DealBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DealBuilder {
    /// Create a builder with the standard defaults and no intents
    #[must_use]
    pub fn new() -> Self {
        Self {
            spec: DealSpec {
                annual_calls: 0,
                intents: Vec::new(),
                agent_cost_per_min: 0.0,
                telco_cost_per_min: 0.0,
                polyai_cost_per_min: 0.0,
                acw_minutes: 1.0,
                baseline_abandon_rate: 0.0,
                ai_abandon_rate: 0.0,
                business_hours_only: true,
                night_fraction: 0.3,
                inflation: 0.03,
                volume_growth: 0.05,
                discount_rate: 0.10,
                risk_adjustment: 0.0,
            },
        }
    }

    /// Start from an existing scenario (validated or not)
    #[must_use]
    pub fn from_spec(spec: DealSpec) -> Self {
        Self { spec }
    }

    // =========================================================================
    // Volume
    // =========================================================================

    #[must_use]
    pub fn annual_calls(mut self, calls: u64) -> Self {
        self.spec.annual_calls = calls;
        self
    }

    /// Add an intent row
    #[must_use]
    pub fn intent(mut self, intent: impl Into<IntentRow>) -> Self {
        self.spec.intents.push(intent.into());
        self
    }

    // =========================================================================
    // Cost rates
    // =========================================================================

    #[must_use]
    pub fn agent_cost(mut self, per_min: f64) -> Self {
        self.spec.agent_cost_per_min = per_min;
        self
    }

    #[must_use]
    pub fn telco_cost(mut self, per_min: f64) -> Self {
        self.spec.telco_cost_per_min = per_min;
        self
    }

    #[must_use]
    pub fn polyai_cost(mut self, per_min: f64) -> Self {
        self.spec.polyai_cost_per_min = per_min;
        self
    }

    #[must_use]
    pub fn acw_minutes(mut self, minutes: f64) -> Self {
        self.spec.acw_minutes = minutes;
        self
    }

    // =========================================================================
    // Abandonment and coverage
    // =========================================================================

    /// Set abandon rates before and after deployment
    #[must_use]
    pub fn abandon_rates(mut self, baseline: f64, ai: f64) -> Self {
        self.spec.baseline_abandon_rate = baseline;
        self.spec.ai_abandon_rate = ai;
        self
    }

    #[must_use]
    pub fn coverage(mut self, business_hours_only: bool, night_fraction: f64) -> Self {
        self.spec.business_hours_only = business_hours_only;
        self.spec.night_fraction = night_fraction;
        self
    }

    // =========================================================================
    // Economic assumptions
    // =========================================================================

    #[must_use]
    pub fn inflation(mut self, rate: f64) -> Self {
        self.spec.inflation = rate;
        self
    }

    #[must_use]
    pub fn volume_growth(mut self, rate: f64) -> Self {
        self.spec.volume_growth = rate;
        self
    }

    #[must_use]
    pub fn discount_rate(mut self, rate: f64) -> Self {
        self.spec.discount_rate = rate;
        self
    }

    #[must_use]
    pub fn risk_adjustment(mut self, adjustment: f64) -> Self {
        self.spec.risk_adjustment = adjustment;
        self
    }

    /// The unvalidated record assembled so far
    pub fn spec(&self) -> &DealSpec {
        &self.spec
    }

    /// Validate and produce the immutable inputs
    pub fn build(self) -> Result<DealInputs, ValidationError> {
        self.spec.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let inputs = DealBuilder::new()
            .annual_calls(50_000)
            .agent_cost(0.9)
            .telco_cost(0.05)
            .polyai_cost(0.1)
            .abandon_rates(0.2, 0.1)
            .intent(IntentBuilder::new("Billing").share(1.0).minutes(3.0))
            .build()
            .unwrap();

        assert_eq!(inputs.annual_calls(), 50_000);
        assert_eq!(inputs.acw_minutes(), 1.0);
        assert_eq!(inputs.discount_rate(), 0.10);
        assert_eq!(inputs.intents().len(), 1);
        assert_eq!(inputs.intents()[0].containment_m3, 0.0);
    }

    #[test]
    fn test_builder_rejects_missing_costs() {
        let err = DealBuilder::new()
            .annual_calls(50_000)
            .intent(IntentBuilder::new("Billing").share(1.0))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::NotPositive {
                field: "agent_cost_per_min".to_string(),
                value: 0.0,
            }
        );
    }

    #[test]
    fn test_intent_builder_fields() {
        let row = IntentBuilder::new("Reservations")
            .share(0.45)
            .minutes(3.5)
            .containment(0.5, 0.76)
            .handoff(1.0)
            .revenue_per_abandon(65.0)
            .build();

        assert_eq!(row.name, "Reservations");
        assert_eq!(row.volume_share, 0.45);
        assert_eq!(row.containment_m0, 0.5);
        assert_eq!(row.containment_m3, 0.76);
        assert_eq!(row.revenue_per_abandon, Some(65.0));
    }
}
