//! Sensitivity and scenario analysis.
//!
//! All analysis works on independent copies of the base inputs:
//!
//! ```ignore
//! use callroi_core::analysis::{tornado, scenarios};
//!
//! let bars = tornado(&inputs);      // top five drivers by NPV swing
//! let npv = scenarios(&inputs);     // p10 / p50 / p90
//! ```
//!
//! Because no branch mutates shared state, tornado branches are evaluated in
//! parallel when the `parallel` feature is enabled.

mod drivers;
mod scenarios;
mod tornado;

pub use drivers::{CONTAINMENT_SWING, Driver, GlobalDriver, drivers_for};
pub use scenarios::{
    P10_CONTAINMENT, P10_COSTS, P90_CONTAINMENT, P90_COSTS, optimistic, pessimistic, scenarios,
};
pub use tornado::{TORNADO_SIZE, all_impacts, driver_impact, tornado};
