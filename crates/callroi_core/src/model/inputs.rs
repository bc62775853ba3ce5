//! Deal scenario inputs
//!
//! `DealSpec` is the plain record that scenario files deserialize into.
//! `DealInputs` is the validated, immutable form the engine consumes; it can
//! only be obtained by validating a spec (directly, through the builder DSL or
//! through deserialization).

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Maximum number of intents in a single scenario
pub const MAX_INTENTS: usize = 20;

/// Allowed deviation of the summed volume shares from 1.0
pub const VOLUME_SHARE_TOLERANCE: f64 = 0.01;

fn default_acw_minutes() -> f64 {
    1.0
}

fn default_true() -> bool {
    true
}

fn default_night_fraction() -> f64 {
    0.3
}

fn default_inflation() -> f64 {
    0.03
}

fn default_volume_growth() -> f64 {
    0.05
}

fn default_discount_rate() -> f64 {
    0.10
}

/// One call-handling category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentRow {
    pub name: String,
    /// Fraction of total call volume (0-1)
    pub volume_share: f64,
    /// Average handling minutes per call
    pub avg_minutes: f64,
    /// Containment rate at go-live
    pub containment_m0: f64,
    /// Steady-state containment rate
    pub containment_m3: f64,
    /// Extra minutes spent when automation hands off to an agent
    pub handoff_minutes: f64,
    /// Revenue preserved per prevented abandon
    #[serde(default)]
    pub revenue_per_abandon: Option<f64>,
}

/// Unvalidated deal scenario, as written in scenario files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealSpec {
    pub annual_calls: u64,
    pub intents: Vec<IntentRow>,
    pub agent_cost_per_min: f64,
    pub telco_cost_per_min: f64,
    pub polyai_cost_per_min: f64,
    #[serde(default = "default_acw_minutes")]
    pub acw_minutes: f64,
    pub baseline_abandon_rate: f64,
    pub ai_abandon_rate: f64,
    /// Deployment covers business hours only (informational)
    #[serde(default = "default_true")]
    pub business_hours_only: bool,
    /// Fraction of calls outside business hours (informational)
    #[serde(default = "default_night_fraction")]
    pub night_fraction: f64,
    #[serde(default = "default_inflation")]
    pub inflation: f64,
    #[serde(default = "default_volume_growth")]
    pub volume_growth: f64,
    #[serde(default = "default_discount_rate")]
    pub discount_rate: f64,
    #[serde(default)]
    pub risk_adjustment: f64,
}

impl DealSpec {
    /// Validate every field and the volume-share invariant.
    pub fn validate(self) -> Result<DealInputs, ValidationError> {
        if self.annual_calls == 0 {
            return Err(ValidationError::NotPositive {
                field: "annual_calls".to_string(),
                value: 0.0,
            });
        }

        let count = self.intents.len();
        if count == 0 || count > MAX_INTENTS {
            return Err(ValidationError::IntentCount {
                count,
                min: 1,
                max: MAX_INTENTS,
            });
        }

        for (idx, intent) in self.intents.iter().enumerate() {
            validate_intent(idx, intent)?;
        }

        let total: f64 = self.intents.iter().map(|i| i.volume_share).sum();
        if (total - 1.0).abs() > VOLUME_SHARE_TOLERANCE {
            return Err(ValidationError::VolumeShares { total });
        }

        positive("agent_cost_per_min", self.agent_cost_per_min)?;
        positive("telco_cost_per_min", self.telco_cost_per_min)?;
        positive("polyai_cost_per_min", self.polyai_cost_per_min)?;
        at_least_zero("acw_minutes", self.acw_minutes)?;
        in_range("baseline_abandon_rate", self.baseline_abandon_rate, 0.0, 1.0)?;
        in_range("ai_abandon_rate", self.ai_abandon_rate, 0.0, 1.0)?;
        in_range("night_fraction", self.night_fraction, 0.0, 1.0)?;
        in_range("inflation", self.inflation, 0.0, 0.2)?;
        in_range("volume_growth", self.volume_growth, 0.0, 0.5)?;
        in_range("discount_rate", self.discount_rate, 0.0, 0.3)?;
        in_range("risk_adjustment", self.risk_adjustment, 0.0, 1.0)?;

        Ok(DealInputs { spec: self })
    }
}

fn validate_intent(idx: usize, intent: &IntentRow) -> Result<(), ValidationError> {
    let field = |name: &str| format!("intents[{idx}].{name}");

    if intent.name.trim().is_empty() {
        return Err(ValidationError::Empty {
            field: field("name"),
        });
    }
    in_range(&field("volume_share"), intent.volume_share, 0.0, 1.0)?;
    positive(&field("avg_minutes"), intent.avg_minutes)?;
    in_range(&field("containment_m0"), intent.containment_m0, 0.0, 1.0)?;
    in_range(&field("containment_m3"), intent.containment_m3, 0.0, 1.0)?;
    at_least_zero(&field("handoff_minutes"), intent.handoff_minutes)?;
    if let Some(revenue) = intent.revenue_per_abandon {
        at_least_zero(&field("revenue_per_abandon"), revenue)?;
    }
    Ok(())
}

fn finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NotFinite {
            field: field.to_string(),
            value,
        })
    }
}

fn positive(field: &str, value: f64) -> Result<(), ValidationError> {
    finite(field, value)?;
    if value <= 0.0 {
        return Err(ValidationError::NotPositive {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

fn at_least_zero(field: &str, value: f64) -> Result<(), ValidationError> {
    in_range(field, value, 0.0, f64::INFINITY)
}

fn in_range(field: &str, value: f64, min: f64, max: f64) -> Result<(), ValidationError> {
    finite(field, value)?;
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// Validated, immutable deal scenario.
///
/// Sensitivity analysis derives variants through the crate-internal `with_*`
/// methods, each of which returns a new value and leaves `self` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DealSpec", into = "DealSpec")]
pub struct DealInputs {
    spec: DealSpec,
}

impl TryFrom<DealSpec> for DealInputs {
    type Error = ValidationError;

    fn try_from(spec: DealSpec) -> Result<Self, Self::Error> {
        spec.validate()
    }
}

impl From<DealInputs> for DealSpec {
    fn from(inputs: DealInputs) -> Self {
        inputs.spec
    }
}

impl DealInputs {
    /// Borrow the underlying record
    pub fn spec(&self) -> &DealSpec {
        &self.spec
    }

    pub fn annual_calls(&self) -> u64 {
        self.spec.annual_calls
    }

    pub fn intents(&self) -> &[IntentRow] {
        &self.spec.intents
    }

    pub fn agent_cost_per_min(&self) -> f64 {
        self.spec.agent_cost_per_min
    }

    pub fn telco_cost_per_min(&self) -> f64 {
        self.spec.telco_cost_per_min
    }

    pub fn polyai_cost_per_min(&self) -> f64 {
        self.spec.polyai_cost_per_min
    }

    pub fn acw_minutes(&self) -> f64 {
        self.spec.acw_minutes
    }

    pub fn baseline_abandon_rate(&self) -> f64 {
        self.spec.baseline_abandon_rate
    }

    pub fn ai_abandon_rate(&self) -> f64 {
        self.spec.ai_abandon_rate
    }

    pub fn business_hours_only(&self) -> bool {
        self.spec.business_hours_only
    }

    pub fn night_fraction(&self) -> f64 {
        self.spec.night_fraction
    }

    pub fn inflation(&self) -> f64 {
        self.spec.inflation
    }

    pub fn volume_growth(&self) -> f64 {
        self.spec.volume_growth
    }

    pub fn discount_rate(&self) -> f64 {
        self.spec.discount_rate
    }

    pub fn risk_adjustment(&self) -> f64 {
        self.spec.risk_adjustment
    }

    // === Perturbation copies (unvalidated) ===

    fn with_spec(&self, update: impl FnOnce(&mut DealSpec)) -> Self {
        let mut spec = self.spec.clone();
        update(&mut spec);
        DealInputs { spec }
    }

    pub(crate) fn with_agent_cost_per_min(&self, value: f64) -> Self {
        self.with_spec(|s| s.agent_cost_per_min = value)
    }

    pub(crate) fn with_polyai_cost_per_min(&self, value: f64) -> Self {
        self.with_spec(|s| s.polyai_cost_per_min = value)
    }

    pub(crate) fn with_volume_growth(&self, value: f64) -> Self {
        self.with_spec(|s| s.volume_growth = value)
    }

    pub(crate) fn with_discount_rate(&self, value: f64) -> Self {
        self.with_spec(|s| s.discount_rate = value)
    }

    /// Replace the steady-state containment of the intent at `index`
    pub(crate) fn with_intent_containment(&self, index: usize, value: f64) -> Self {
        self.with_spec(|s| {
            if let Some(intent) = s.intents.get_mut(index) {
                intent.containment_m3 = value;
            }
        })
    }

    /// Rescale every intent's steady-state containment, capped at 1.0
    pub(crate) fn with_scaled_containment(&self, factor: f64) -> Self {
        self.with_spec(|s| {
            for intent in &mut s.intents {
                intent.containment_m3 = (intent.containment_m3 * factor).min(1.0);
            }
        })
    }

    /// Rescale the agent and platform per-minute costs together
    pub(crate) fn with_scaled_costs(&self, factor: f64) -> Self {
        self.with_spec(|s| {
            s.agent_cost_per_min *= factor;
            s.polyai_cost_per_min *= factor;
        })
    }
}
