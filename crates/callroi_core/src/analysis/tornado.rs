//! Tornado sensitivity analysis
//!
//! Each driver is swung high and low on its own copy of the inputs, the NPV of
//! both copies is projected, and the impact is half the NPV spread.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::model::{DealInputs, TornadoEntry};
use crate::projection::project_npv;

use super::drivers::{Driver, drivers_for};

/// Number of drivers kept in the tornado
pub const TORNADO_SIZE: usize = 5;

/// NPV swing of a single driver
pub fn driver_impact(inputs: &DealInputs, driver: &Driver) -> f64 {
    let high_npv = project_npv(&driver.high(inputs));
    let low_npv = project_npv(&driver.low(inputs));
    (high_npv - low_npv).abs() / 2.0
}

/// Impact of every driver, in driver-table order
pub fn all_impacts(inputs: &DealInputs) -> Vec<TornadoEntry> {
    let drivers = drivers_for(inputs);

    #[cfg(feature = "parallel")]
    let impacts: Vec<TornadoEntry> = drivers
        .par_iter()
        .map(|driver| TornadoEntry(driver.label(), driver_impact(inputs, driver)))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let impacts: Vec<TornadoEntry> = drivers
        .iter()
        .map(|driver| TornadoEntry(driver.label(), driver_impact(inputs, driver)))
        .collect();

    impacts
}

/// Top drivers by impact, largest first.
///
/// The sort is stable, so drivers with equal impact keep table order.
pub fn tornado(inputs: &DealInputs) -> Vec<TornadoEntry> {
    let mut impacts = all_impacts(inputs);
    impacts.sort_by(|a, b| b.impact().total_cmp(&a.impact()));
    impacts.truncate(TORNADO_SIZE);
    impacts
}
