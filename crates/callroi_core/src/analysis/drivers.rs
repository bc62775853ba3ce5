//! Perturbable drivers for sensitivity analysis.
//!
//! Every driver knows how to read its current value from a `DealInputs` and
//! how to produce a new `DealInputs` with that value replaced. Nothing here
//! mutates the inputs it is given.

use serde::{Deserialize, Serialize};

use crate::model::DealInputs;

/// Relative swing applied to intent containment
pub const CONTAINMENT_SWING: f64 = 0.2;

/// Global scalar inputs included in the tornado
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GlobalDriver {
    AgentCost,
    PolyaiCost,
    VolumeGrowth,
    DiscountRate,
}

impl GlobalDriver {
    pub const ALL: [GlobalDriver; 4] = [
        GlobalDriver::AgentCost,
        GlobalDriver::PolyaiCost,
        GlobalDriver::VolumeGrowth,
        GlobalDriver::DiscountRate,
    ];

    pub fn label(self) -> &'static str {
        match self {
            GlobalDriver::AgentCost => "agent_cost_per_min",
            GlobalDriver::PolyaiCost => "polyai_cost_per_min",
            GlobalDriver::VolumeGrowth => "volume_growth",
            GlobalDriver::DiscountRate => "discount_rate",
        }
    }

    /// Relative swing used for the high and low cases
    pub fn swing(self) -> f64 {
        match self {
            GlobalDriver::AgentCost | GlobalDriver::PolyaiCost => 0.2,
            GlobalDriver::VolumeGrowth | GlobalDriver::DiscountRate => 0.1,
        }
    }

    pub fn get(self, inputs: &DealInputs) -> f64 {
        match self {
            GlobalDriver::AgentCost => inputs.agent_cost_per_min(),
            GlobalDriver::PolyaiCost => inputs.polyai_cost_per_min(),
            GlobalDriver::VolumeGrowth => inputs.volume_growth(),
            GlobalDriver::DiscountRate => inputs.discount_rate(),
        }
    }

    pub fn with(self, inputs: &DealInputs, value: f64) -> DealInputs {
        match self {
            GlobalDriver::AgentCost => inputs.with_agent_cost_per_min(value),
            GlobalDriver::PolyaiCost => inputs.with_polyai_cost_per_min(value),
            GlobalDriver::VolumeGrowth => inputs.with_volume_growth(value),
            GlobalDriver::DiscountRate => inputs.with_discount_rate(value),
        }
    }
}

/// One row of the sensitivity table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Driver {
    /// Steady-state containment of the intent at `index`
    Containment { index: usize, name: String },
    Global(GlobalDriver),
}

impl Driver {
    /// Label shown in the tornado output
    pub fn label(&self) -> String {
        match self {
            Driver::Containment { name, .. } => format!("Containment_{name}"),
            Driver::Global(global) => global.label().to_string(),
        }
    }

    pub fn get(&self, inputs: &DealInputs) -> f64 {
        match self {
            Driver::Containment { index, .. } => inputs
                .intents()
                .get(*index)
                .map(|i| i.containment_m3)
                .unwrap_or(0.0),
            Driver::Global(global) => global.get(inputs),
        }
    }

    /// Inputs with this driver raised by its swing (containment capped at 1.0)
    pub fn high(&self, inputs: &DealInputs) -> DealInputs {
        let value = self.get(inputs);
        match self {
            Driver::Containment { index, .. } => {
                inputs.with_intent_containment(*index, (value * (1.0 + CONTAINMENT_SWING)).min(1.0))
            }
            Driver::Global(global) => global.with(inputs, value * (1.0 + global.swing())),
        }
    }

    /// Inputs with this driver lowered by its swing (containment floored at 0.0)
    pub fn low(&self, inputs: &DealInputs) -> DealInputs {
        let value = self.get(inputs);
        match self {
            Driver::Containment { index, .. } => {
                inputs.with_intent_containment(*index, (value * (1.0 - CONTAINMENT_SWING)).max(0.0))
            }
            Driver::Global(global) => global.with(inputs, value * (1.0 - global.swing())),
        }
    }
}

/// The full driver table: one containment driver per intent, then the globals
pub fn drivers_for(inputs: &DealInputs) -> Vec<Driver> {
    inputs
        .intents()
        .iter()
        .enumerate()
        .map(|(index, intent)| Driver::Containment {
            index,
            name: intent.name.clone(),
        })
        .chain(GlobalDriver::ALL.into_iter().map(Driver::Global))
        .collect()
}
