#![doc(test(attr(deny(warnings))))]

//! Budget Lens compares what each budget category was assigned with what its goal
//! needs this month, and summarises the result for a whole budget month.
//!
//! The engine lives in the `lens-*` workspace crates; this crate adds snapshot
//! loading, currency formatting, tracing setup and the command-line runner.

pub mod cli;
pub mod currency;
pub mod errors;
pub mod report;
pub mod utils;

pub use lens_config::AnalysisConfig;
pub use lens_domain::{AnalysisReport, MonthlyAnalysis, ProcessedCategory};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Budget Lens tracing initialized.");
    });
}
