//! Projection outputs
//!
//! Contains the per-year breakdown produced by the projector and the
//! aggregate `Results` record returned for one calculation request.

use serde::{Deserialize, Serialize};

/// One projected year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearResult {
    pub year: u32,
    pub baseline_minutes: f64,
    pub automated_minutes: f64,
    pub handoff_minutes: f64,
    pub human_minutes: f64,
    pub baseline_cost: f64,
    pub ai_cost: f64,
    pub ops_savings: f64,
    pub revenue_retained: f64,
    pub total_value: f64,
    /// Running sum of `total_value` up to and including this year
    pub cumulative_value: f64,
    /// `total_value` discounted back to year 0
    pub discounted_value: f64,
}

/// Share of total value coming from operational savings vs retained revenue, in percent
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OpsRevenueSplit {
    pub ops_savings: f64,
    pub revenue_retained: f64,
}

/// One tornado bar: driver label and its NPV swing.
///
/// Serializes as a two-element array `[driver, impact]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TornadoEntry(pub String, pub f64);

impl TornadoEntry {
    pub fn driver(&self) -> &str {
        &self.0
    }

    pub fn impact(&self) -> f64 {
        self.1
    }
}

/// Pessimistic / base / optimistic NPV
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioNpv {
    pub p10: f64,
    pub p50: f64,
    pub p90: f64,
}

/// Complete results of one calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Results {
    /// First month with non-negative cumulative value, `None` if not within 36 months
    pub payback_months: Option<u32>,
    /// Five-year cost reduction, in percent
    pub roi_5y: f64,
    pub npv_5y: f64,
    pub ops_vs_revenue_split: OpsRevenueSplit,
    /// Top drivers, largest impact first
    pub tornado: Vec<TornadoEntry>,
    pub p10_p50_p90: ScenarioNpv,
    pub yearly: Vec<YearResult>,
}

impl Results {
    /// Total undiscounted value over the horizon
    pub fn total_value(&self) -> f64 {
        self.yearly.last().map(|y| y.cumulative_value).unwrap_or(0.0)
    }

    /// Get the result for a specific projection year
    pub fn year(&self, year: u32) -> Option<&YearResult> {
        self.yearly.iter().find(|y| y.year == year)
    }
}
