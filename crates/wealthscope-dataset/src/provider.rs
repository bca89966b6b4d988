//! Dataset providers
//!
//! Both providers run the engine's consistency checks on load and report the
//! result through `tracing`.

use crate::{reference_dataset, DatasetDocument, DatasetError, Metadata};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use wealthscope_domain::config::DEFAULT_RECONCILIATION_TOLERANCE;
use wealthscope_domain::traits::DatasetProvider;
use wealthscope_domain::{Dataset, EngineConfig};

/// A validated dataset together with its descriptive metadata
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    /// Engine-ready histogram
    pub dataset: Dataset,

    /// Source metadata (sources, notes, known thresholds)
    pub metadata: Metadata,
}

/// Reads a dataset document from a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    path: PathBuf,
    config: EngineConfig,
}

impl JsonFileProvider {
    /// Create a provider for `path` with the default engine configuration
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self::with_config(path, EngineConfig::default())
    }

    /// Create a provider for `path` with a specific engine configuration
    pub fn with_config<P: AsRef<Path>>(path: P, config: EngineConfig) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            config,
        }
    }

    /// Path of the dataset file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the dataset and keep its metadata
    pub fn load_with_metadata(&self) -> Result<LoadedDataset, DatasetError> {
        debug!(path = %self.path.display(), "Reading dataset document");
        let contents = fs::read_to_string(&self.path)?;
        let document = DatasetDocument::from_json_str(&contents)?;
        let loaded = validate_document(document, &self.config)?;

        info!(
            path = %self.path.display(),
            bins = loaded.dataset.bins().len(),
            total_population = loaded.dataset.totals().total_population,
            total_wealth = loaded.dataset.totals().total_wealth,
            "Loaded dataset"
        );
        Ok(loaded)
    }
}

impl DatasetProvider for JsonFileProvider {
    type Error = DatasetError;

    fn load(&self) -> Result<Dataset, Self::Error> {
        self.load_with_metadata().map(|loaded| loaded.dataset)
    }
}

/// Serves the built-in reference dataset
#[derive(Debug, Clone, Default)]
pub struct BuiltinProvider {
    config: EngineConfig,
}

impl BuiltinProvider {
    /// Create a provider with a specific engine configuration
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Load the dataset and keep its metadata
    pub fn load_with_metadata(&self) -> Result<LoadedDataset, DatasetError> {
        let loaded = validate_document(reference_dataset(), &self.config)?;
        info!(bins = loaded.dataset.bins().len(), "Loaded built-in reference dataset");
        Ok(loaded)
    }
}

impl DatasetProvider for BuiltinProvider {
    type Error = DatasetError;

    fn load(&self) -> Result<Dataset, Self::Error> {
        self.load_with_metadata().map(|loaded| loaded.dataset)
    }
}

fn validate_document(document: DatasetDocument, config: &EngineConfig) -> Result<LoadedDataset, DatasetError> {
    let dataset = document.to_dataset(config)?;
    let reconciliation = dataset.reconciliation();

    debug!(
        population_drift = reconciliation.population_drift,
        wealth_drift = reconciliation.wealth_drift,
        "Reconciled bins against totals"
    );

    if config.reconciliation_tolerance.is_none() && reconciliation.max_drift() > DEFAULT_RECONCILIATION_TOLERANCE {
        warn!(
            drift = reconciliation.max_drift(),
            "Bin sums drift from the declared totals; shares will not sum to 1"
        );
    }

    if let Some(verification) = &document.verification {
        let recorded = [
            ("population", verification.total_population_sum, reconciliation.population_sum),
            ("wealth", verification.total_wealth_sum, reconciliation.wealth_sum),
        ];
        for (dimension, recorded_sum, actual_sum) in recorded {
            if let Some(recorded_sum) = recorded_sum {
                let drift = (recorded_sum - actual_sum).abs() / actual_sum.abs().max(1.0);
                if drift > DEFAULT_RECONCILIATION_TOLERANCE {
                    warn!(dimension, recorded_sum, actual_sum, "Verification block disagrees with bin sums");
                }
            }
        }
    }

    Ok(LoadedDataset {
        dataset,
        metadata: document.metadata,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_provider_loads() {
        let dataset = BuiltinProvider::default().load().unwrap();
        assert_eq!(dataset.bins().len(), 4);
        assert!(dataset.bins()[3].max_wealth.is_unbounded());
    }

    #[test]
    fn test_builtin_metadata_has_known_thresholds() {
        let loaded = BuiltinProvider::default().load_with_metadata().unwrap();
        assert_eq!(loaded.metadata.known_thresholds.len(), 4);
    }

    #[test]
    fn test_missing_file() {
        let provider = JsonFileProvider::new("/definitely/not/here.json");
        assert!(matches!(provider.load(), Err(DatasetError::Io(_))));
    }
}
