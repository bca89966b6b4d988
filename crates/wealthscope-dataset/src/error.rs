//! Dataset provider error types

use thiserror::Error;
use wealthscope_domain::EngineError;

/// Errors that can occur while loading a dataset
#[derive(Error, Debug)]
pub enum DatasetError {
    /// Reading the dataset file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid JSON or misses required fields
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document contradicts itself (e.g. declared bin count)
    #[error("Inconsistent dataset document: {0}")]
    Inconsistent(String),

    /// The engine rejected the bins or totals
    #[error(transparent)]
    Engine(#[from] EngineError),
}
