//! Engine error types

use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors reported at the engine boundary
///
/// All of these are detected before a computation starts. Retrying never
/// changes the outcome.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A threshold was NaN, infinite, or negative
    #[error("Invalid threshold {value}: {reason}")]
    InvalidThreshold {
        /// The rejected value
        value: f64,
        /// Why it was rejected
        reason: String,
    },

    /// An edit or delete referenced a threshold that is not in the set
    #[error("Threshold {0} is not in the set")]
    ThresholdNotFound(f64),

    /// The bins or totals violate the dataset invariants
    #[error("Dataset inconsistency: {0}")]
    DatasetInconsistency(String),
}
