//! lens-core
//!
//! Goal target calculation, category processing and monthly aggregation.
//! Depends on lens-domain and lens-config. Pure and synchronous: no I/O, no clock, no shared state.

pub mod analysis_service;
pub mod category_processor;
pub mod error;
pub mod goal_calculator;
pub mod monthly_aggregator;

pub use analysis_service::*;
pub use category_processor::*;
pub use error::CoreError;
pub use goal_calculator::*;
pub use monthly_aggregator::*;
