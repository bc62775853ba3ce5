//! Scenario and calculator configuration
//!
//! - `builder` - fluent DSL for assembling validated deal inputs
//! - `calculator` - operator-authored formula calculators and built-in templates
//!
//! Industry presets live in `model::VerticalTemplate` and are assembled with
//! the same builder.

pub mod builder;
pub mod calculator;

pub use builder::{DealBuilder, IntentBuilder};
pub use calculator::{
    CalculatorConfig, CalculatorMetadata, CalculatorOutcome, InputKind, InputParameter,
    MetricValue, OutputFormat, OutputMetric, calculator_template, calculator_templates,
};
