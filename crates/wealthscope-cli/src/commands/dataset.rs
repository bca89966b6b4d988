//! Dataset command implementation.

use crate::error::Result;
use crate::output::Formatter;
use std::path::Path;
use tracing::debug;
use wealthscope_dataset::{BuiltinProvider, JsonFileProvider, LoadedDataset};
use wealthscope_domain::EngineConfig;

/// Load the dataset at `path`, or the built-in reference dataset when no path is given.
pub fn load_dataset(path: Option<&Path>, engine: &EngineConfig) -> Result<LoadedDataset> {
    let loaded = match path {
        Some(path) => JsonFileProvider::with_config(path, *engine).load_with_metadata()?,
        None => {
            debug!("No dataset path configured, using built-in reference brackets");
            BuiltinProvider::new(*engine).load_with_metadata()?
        }
    };
    Ok(loaded)
}

/// Execute the dataset command.
pub fn execute_dataset(loaded: &LoadedDataset, formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.format_dataset(loaded)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use std::fs;

    #[test]
    fn test_builtin_when_no_path() {
        let loaded = load_dataset(None, &EngineConfig::default()).unwrap();
        assert_eq!(loaded.dataset.bins().len(), 4);
        assert!(loaded.metadata.known_thresholds.contains_key("p50"));
    }

    #[test]
    fn test_missing_file_is_dataset_error() {
        let result = load_dataset(Some(Path::new("/no/such/dataset.json")), &EngineConfig::default());
        assert!(matches!(result, Err(CliError::Dataset(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wealth.json");
        fs::write(
            &path,
            r#"{
                "_metadata": { "total_adult_population": 10, "total_global_wealth_usd": 1000 },
                "bins": [
                    { "min_wealth_usd": 0, "max_wealth_usd": 100, "population_count": 8, "total_wealth_usd": 400 },
                    { "min_wealth_usd": 100, "max_wealth_usd": null, "population_count": 2, "total_wealth_usd": 600 }
                ]
            }"#,
        )
        .unwrap();

        let loaded = load_dataset(Some(&path), &EngineConfig::default()).unwrap();
        assert_eq!(loaded.dataset.bins().len(), 2);
        assert!(loaded.dataset.max_wealth().is_unbounded());
    }
}
