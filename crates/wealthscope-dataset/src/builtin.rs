//! Built-in reference dataset and threshold presets
//!
//! The reference dataset holds the four published brackets (UBS Global Wealth
//! Report 2023, 2022 data) as coarse bins. It is what the fine-grained
//! generator subdivides, so it reconciles exactly with the same global totals.

use crate::{BinRecord, DatasetDocument, Metadata};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Adults with tracked wealth data
const TOTAL_POPULATION: f64 = 3_767_000_000.0;

/// Global wealth (USD)
const TOTAL_WEALTH: f64 = 454_400_000_000_000.0;

/// Lower edges of the published brackets
pub const REFERENCE_THRESHOLDS: [f64; 4] = [0.0, 10_000.0, 100_000.0, 1_000_000.0];

/// (min, max, population, wealth) for each published bracket
const REFERENCE_BINS: [(f64, Option<f64>, f64, f64); 4] = [
    (0.0, Some(10_000.0), 1_488_000_000.0, 5_208_000_000_000.0),
    (10_000.0, Some(100_000.0), 1_608_000_000.0, 56_280_000_000_000.0),
    (100_000.0, Some(1_000_000.0), 613_000_000.0, 196_160_000_000_000.0),
    (1_000_000.0, None, 58_000_000.0, 196_752_000_000_000.0),
];

/// Metadata for the built-in dataset
pub fn reference_metadata() -> Metadata {
    let known_thresholds = BTreeMap::from([
        ("p50".to_string(), 8_654.0),
        ("p90".to_string(), 137_333.0),
        ("p99".to_string(), 1_081_342.0),
        ("p99.9".to_string(), 50_000_000.0),
    ]);

    Metadata {
        source: Some("UBS Global Wealth Report 2023 / Credit Suisse Global Wealth Databook 2023".to_string()),
        source_url: None,
        additional_sources: Vec::new(),
        data_year: Some(2022),
        report_year: Some(2023),
        notes: vec!["Published reference brackets only; no subdivision".to_string()],
        known_thresholds,
        total_adult_population: TOTAL_POPULATION,
        total_global_wealth_usd: TOTAL_WEALTH,
        number_of_bins: Some(REFERENCE_BINS.len()),
    }
}

/// The built-in dataset document
pub fn reference_dataset() -> DatasetDocument {
    let bins = REFERENCE_BINS
        .iter()
        .map(|&(min, max, population, wealth)| BinRecord {
            min_wealth_usd: min,
            max_wealth_usd: max,
            population_count: population,
            total_wealth_usd: wealth,
            population_share: Some(population / TOTAL_POPULATION),
            wealth_share: Some(wealth / TOTAL_WEALTH),
            avg_wealth_usd: Some(wealth / population),
            data_quality: Some("published".to_string()),
            method: None,
        })
        .collect();

    DatasetDocument {
        metadata: reference_metadata(),
        bins,
        verification: None,
    }
}

/// Named threshold presets a presenter can offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// The published bracket edges (0, 10k, 100k, 1M)
    Reference,

    /// The dataset's known percentile cut-offs, plus 0
    Percentiles,
}

impl Preset {
    /// Get the preset name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Reference => "reference",
            Preset::Percentiles => "percentiles",
        }
    }

    /// Parse a preset from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "reference" | "ref" => Some(Preset::Reference),
            "percentiles" | "pct" => Some(Preset::Percentiles),
            _ => None,
        }
    }

    /// Raw thresholds for this preset
    ///
    /// Percentile thresholds come from `metadata.known_thresholds`, so they are
    /// only as complete as the dataset document.
    pub fn thresholds(&self, metadata: &Metadata) -> Vec<f64> {
        match self {
            Preset::Reference => REFERENCE_THRESHOLDS.to_vec(),
            Preset::Percentiles => std::iter::once(0.0)
                .chain(metadata.known_thresholds.values().copied())
                .collect(),
        }
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid preset: {}", s))
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
