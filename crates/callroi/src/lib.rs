//! Command-line front end for the call automation ROI engine

pub mod logging;
pub mod report;
pub mod util;

pub use logging::init_logging;
