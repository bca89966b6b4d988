//! Trait definitions for external interactions
//!
//! The engine never loads data itself. Infrastructure implementations live in
//! other crates.

use crate::Dataset;

/// Trait for supplying the source histogram
///
/// Implemented by the infrastructure layer (wealthscope-dataset)
pub trait DatasetProvider {
    /// Error type for load operations
    type Error;

    /// Load and validate the dataset
    fn load(&self) -> Result<Dataset, Self::Error>;
}
