//! Breakdown command implementation.

use crate::cli::BreakdownArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use tracing::debug;
use wealthscope_dataset::{LoadedDataset, Preset};
use wealthscope_domain::{Breakdown, DisplayMode, EngineConfig, ThresholdSet};

/// Build the threshold set for a breakdown.
///
/// Explicit thresholds and the preset are merged. With neither, the configured
/// default thresholds apply, then the reference preset.
pub fn resolve_thresholds(
    thresholds: &[f64],
    preset: Option<Preset>,
    config: &Config,
    loaded: &LoadedDataset,
) -> Result<ThresholdSet> {
    let mut values = thresholds.to_vec();
    if let Some(preset) = preset {
        values.extend(preset.thresholds(&loaded.metadata));
    }

    if values.is_empty() {
        values = match &config.default_thresholds {
            Some(defaults) => defaults.clone(),
            None => Preset::Reference.thresholds(&loaded.metadata),
        };
    }

    Ok(ThresholdSet::new(&values)?)
}

/// Execute the breakdown command.
pub fn execute_breakdown(
    args: BreakdownArgs,
    loaded: &LoadedDataset,
    engine: &EngineConfig,
    config: &Config,
    mode: DisplayMode,
    formatter: &Formatter,
) -> Result<()> {
    let thresholds = resolve_thresholds(&args.thresholds, args.preset.map(Into::into), config, loaded)?;
    debug!(thresholds = ?thresholds.values(), "Computing breakdown");

    let breakdown = Breakdown::compute(&loaded.dataset, &thresholds, engine);
    println!("{}", formatter.format_breakdown(&breakdown, mode)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use wealthscope_dataset::{BuiltinProvider, REFERENCE_THRESHOLDS};
    use wealthscope_domain::EngineError;

    fn create_test_dataset() -> LoadedDataset {
        BuiltinProvider::default().load_with_metadata().unwrap()
    }

    #[test]
    fn test_explicit_thresholds() {
        let loaded = create_test_dataset();
        let set = resolve_thresholds(&[100.0, 5.0, 100.0], None, &Config::default(), &loaded).unwrap();
        assert_eq!(set.values(), &[5.0, 100.0]);
    }

    #[test]
    fn test_fallback_to_reference_preset() {
        let loaded = create_test_dataset();
        let set = resolve_thresholds(&[], None, &Config::default(), &loaded).unwrap();
        assert_eq!(set.values(), &REFERENCE_THRESHOLDS);
    }

    #[test]
    fn test_fallback_to_configured_defaults() {
        let loaded = create_test_dataset();
        let config = Config {
            default_thresholds: Some(vec![0.0, 50_000.0]),
            ..Config::default()
        };
        let set = resolve_thresholds(&[], None, &config, &loaded).unwrap();
        assert_eq!(set.values(), &[0.0, 50_000.0]);
    }

    #[test]
    fn test_preset_merges_with_explicit() {
        let loaded = create_test_dataset();
        let set = resolve_thresholds(&[5_000.0], Some(Preset::Reference), &Config::default(), &loaded).unwrap();
        assert_eq!(set.values(), &[0.0, 5_000.0, 10_000.0, 100_000.0, 1_000_000.0]);
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let loaded = create_test_dataset();
        let result = resolve_thresholds(&[-1.0], None, &Config::default(), &loaded);
        assert!(matches!(result, Err(CliError::Engine(EngineError::InvalidThreshold { .. }))));
    }
}
