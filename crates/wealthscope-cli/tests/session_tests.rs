//! Integration tests for wealthscope-cli
//!
//! These tests wire config, dataset loading, the editing session and the
//! formatter together the way the binary does.

use std::fs;
use wealthscope_cli::commands::{load_dataset, resolve_thresholds};
use wealthscope_cli::config::OutputFormat;
use wealthscope_cli::{Config, Edit, Formatter, Session};
use wealthscope_dataset::Preset;
use wealthscope_domain::{DisplayMode, UnboundedBinPolicy};

const DATASET: &str = r#"{
    "_metadata": {
        "source": "Test fixture",
        "total_adult_population": 100,
        "total_global_wealth_usd": 10000,
        "known_thresholds": { "p50": 500000 },
        "number_of_bins": 2
    },
    "bins": [
        { "min_wealth_usd": 0, "max_wealth_usd": 1000000, "population_count": 90, "total_wealth_usd": 9000 },
        { "min_wealth_usd": 1000000, "max_wealth_usd": null, "population_count": 10, "total_wealth_usd": 1000 }
    ]
}"#;

#[test]
fn test_config_drives_dataset_and_session() {
    let dir = tempfile::tempdir().unwrap();
    let dataset_path = dir.path().join("wealth.json");
    fs::write(&dataset_path, DATASET).unwrap();

    let config = Config::from_toml_str(&format!(
        "dataset_path = {:?}\ndefault_thresholds = [0, 500000]\n\n[engine]\nunbounded_bin_policy = \"lowest-bracket-only\"\n",
        dataset_path.display().to_string()
    ))
    .unwrap();

    let engine = config.engine_config(None).unwrap();
    assert_eq!(engine.unbounded_bin_policy, UnboundedBinPolicy::LowestBracketOnly);

    let loaded = load_dataset(config.dataset_path.as_deref(), &engine).unwrap();
    let thresholds = resolve_thresholds(&[], None, &config, &loaded).unwrap();
    assert_eq!(thresholds.values(), &[0.0, 500_000.0]);

    let mut session = Session::new(loaded, engine, thresholds, DisplayMode::Absolute);
    let breakdown = session.breakdown();
    assert_eq!(breakdown.brackets[0].population_count, 45.0);
    assert_eq!(breakdown.brackets[1].population_count, 45.0);
    assert_eq!(breakdown.remainder.not_covered_population, 10.0);

    session.apply(Edit::Add(2_000_000.0)).unwrap();
    let breakdown = session.breakdown();
    assert_eq!(breakdown.brackets[2].population_count, 10.0);
    assert!(breakdown.remainder.not_covered_population.abs() < 1e-9);
}

#[test]
fn test_percentile_preset_from_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let dataset_path = dir.path().join("wealth.json");
    fs::write(&dataset_path, DATASET).unwrap();

    let config = Config::default();
    let engine = config.engine_config(None).unwrap();
    let loaded = load_dataset(Some(&dataset_path), &engine).unwrap();

    let thresholds = resolve_thresholds(&[], Some(Preset::Percentiles), &config, &loaded).unwrap();
    assert_eq!(thresholds.values(), &[0.0, 500_000.0]);
}

#[test]
fn test_formatter_renders_session_output() {
    let config = Config::default();
    let engine = config.engine_config(None).unwrap();
    let loaded = load_dataset(None, &engine).unwrap();
    let thresholds = resolve_thresholds(&[], None, &config, &loaded).unwrap();
    let mut session = Session::new(loaded, engine, thresholds, DisplayMode::Percentage);

    let formatter = Formatter::new(OutputFormat::Table, false);
    let output = formatter.format_breakdown(&session.breakdown(), session.mode()).unwrap();
    assert!(output.contains("$1,000,000+"));
    assert!(output.contains("%"));

    session.apply(Edit::Clear).unwrap();
    let output = formatter.format_breakdown(&session.breakdown(), session.mode()).unwrap();
    assert!(output.contains("No brackets defined"));
}
