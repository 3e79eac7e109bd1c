//! lens-domain
//!
//! Pure domain models (category goal records, month records, processed categories,
//! monthly analysis). No I/O, no CLI, no configuration. Only data types and core enums.

pub mod analysis;
pub mod calculation;
pub mod category;
pub mod money;
pub mod month;
pub mod month_record;

pub use analysis::*;
pub use calculation::*;
pub use category::*;
pub use money::*;
pub use month::*;
pub use month_record::*;
