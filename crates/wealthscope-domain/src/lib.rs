//! Wealthscope Domain Layer
//!
//! This crate contains the bracket aggregation engine: the pure computation that
//! re-buckets a fine-grained wealth histogram into user-defined brackets and
//! reports what each bracket captures of the global population and wealth.
//!
//! ## Key Concepts
//!
//! - **Bin**: an input histogram interval with known population and wealth mass
//! - **Threshold**: a user-entered wealth value; the set of thresholds defines brackets
//! - **Bracket**: the interval between consecutive thresholds (the last is open-ended)
//! - **Overlap fraction**: the share of a bin's mass that falls inside a bracket
//! - **Remainder**: the mass no bracket covers
//!
//! ## Pipeline
//!
//! `normalize thresholds → build brackets → overlap(bin, bracket) → aggregate →
//! derive shares → compute remainder`
//!
//! Every stage is a plain function over owned values. Nothing is cached between
//! calls, so identical inputs always produce identical outputs.
//!
//! ```
//! use wealthscope_domain::{compute_breakdown, Bin, Dataset, EngineConfig, Totals};
//!
//! let dataset = Dataset::new(
//!     vec![Bin::bounded(0.0, 10_000.0, 100.0, 500_000.0)],
//!     Totals::new(100.0, 500_000.0),
//! )
//! .unwrap();
//!
//! let breakdown = compute_breakdown(&dataset, &[5_000.0], &EngineConfig::default()).unwrap();
//! assert_eq!(breakdown.brackets[0].population_count, 50.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod aggregation;
pub mod bin;
pub mod bound;
pub mod bracket;
pub mod config;
pub mod dataset;
pub mod display;
pub mod error;
pub mod overlap;
pub mod threshold;
pub mod traits;

// Re-exports for convenience
pub use aggregation::{
    aggregate, compute_breakdown, compute_remainder, derive_shares, Breakdown, Remainder, OVERCOUNT_TOLERANCE,
};
pub use bin::Bin;
pub use bound::UpperBound;
pub use bracket::{build_brackets, Bracket};
pub use config::{EngineConfig, UnboundedBinPolicy};
pub use dataset::{Dataset, Reconciliation, Totals};
pub use display::DisplayMode;
pub use error::{EngineError, Result};
pub use overlap::overlap_fraction;
pub use threshold::{normalize_thresholds, validate_threshold, ThresholdSet};
