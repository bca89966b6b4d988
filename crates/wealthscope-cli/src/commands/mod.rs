//! Command implementations.

pub mod breakdown;
pub mod dataset;

pub use self::breakdown::{execute_breakdown, resolve_thresholds};
pub use self::dataset::{execute_dataset, load_dataset};
