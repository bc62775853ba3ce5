//! Core data model
//!
//! - `inputs` - validated deal scenario and intent mix
//! - `results` - yearly breakdown and aggregate results
//! - `vertical` - industry presets

mod inputs;
mod results;
mod vertical;

pub use inputs::{DealInputs, DealSpec, IntentRow, MAX_INTENTS, VOLUME_SHARE_TOLERANCE};
pub use results::{OpsRevenueSplit, Results, ScenarioNpv, TornadoEntry, YearResult};
pub use vertical::VerticalTemplate;
