//! Call automation ROI engine
//!
//! This crate models the financial case for automating inbound call handling.
//! It supports:
//! - Validated deal inputs with per-intent containment, handoff and revenue
//! - Five-year projection of minutes, costs and value with NPV
//! - Monthly payback simulation with a containment ramp
//! - Tornado sensitivity and P10/P50/P90 scenario analysis
//! - A sandboxed formula language with multi-pass dependency resolution
//! - Operator-authored calculators built on that formula language
//!
//! # Builder DSL
//!
//! ```ignore
//! use callroi_core::{DealBuilder, IntentBuilder, calculate};
//!
//! let inputs = DealBuilder::new()
//!     .annual_calls(100_000)
//!     .intent(IntentBuilder::new("billing")
//!         .share(1.0)
//!         .minutes(3.0)
//!         .containment(0.5, 0.8)
//!         .handoff(1.0))
//!     .agent_cost(0.8)
//!     .telco_cost(0.05)
//!     .polyai_cost(0.12)
//!     .build()?;
//!
//! let results = calculate(&inputs);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod analysis;
pub mod calculate;
pub mod error;
pub mod formula;
pub mod metrics;
pub mod payback;
pub mod projection;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use calculate::calculate;
pub use config::{CalculatorConfig, DealBuilder, IntentBuilder};
pub use error::{CalculatorError, FormulaError, ResolveError, ValidationError};
pub use model::{DealInputs, DealSpec, IntentRow, Results, VerticalTemplate, YearResult};
