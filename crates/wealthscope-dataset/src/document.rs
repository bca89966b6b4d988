//! Dataset document format
//!
//! Mirrors the JSON written by the offline generator. Only bin bounds, bin
//! mass, and the two metadata totals are required; everything else is
//! descriptive and optional.

use crate::DatasetError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use wealthscope_domain::{Bin, Dataset, EngineConfig, Totals, UpperBound};

/// Top-level dataset document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetDocument {
    /// Source description and global totals
    #[serde(rename = "_metadata")]
    pub metadata: Metadata,

    /// Histogram bins in ascending order
    pub bins: Vec<BinRecord>,

    /// Sums recorded by the generator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification: Option<Verification>,
}

/// Document metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Primary data source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Link to the primary source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,

    /// Secondary sources
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_sources: Vec<String>,

    /// Year the data describes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_year: Option<u32>,

    /// Year the source report was published
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_year: Option<u32>,

    /// Free-form notes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,

    /// Published percentile cut-offs (e.g. `p50`, `p99.9`)
    #[serde(default)]
    pub known_thresholds: BTreeMap<String, f64>,

    /// Global adult population
    pub total_adult_population: f64,

    /// Global wealth (USD)
    pub total_global_wealth_usd: f64,

    /// Declared bin count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_bins: Option<usize>,
}

/// One bin as stored in the document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinRecord {
    /// Inclusive lower bound
    pub min_wealth_usd: f64,

    /// Exclusive upper bound; `null` means open-ended
    #[serde(default)]
    pub max_wealth_usd: Option<f64>,

    /// People in the bin
    pub population_count: f64,

    /// Wealth held by the bin
    pub total_wealth_usd: f64,

    /// Share of global population recorded by the generator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population_share: Option<f64>,

    /// Share of global wealth recorded by the generator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wealth_share: Option<f64>,

    /// Average wealth recorded by the generator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_wealth_usd: Option<f64>,

    /// `interpolated`, `modeled`, ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_quality: Option<String>,

    /// Generation method for the bin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

/// Sums recorded by the generator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Verification {
    /// Recorded population sum
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_population_sum: Option<f64>,

    /// Recorded wealth sum
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_wealth_sum: Option<f64>,
}

impl From<&BinRecord> for Bin {
    fn from(record: &BinRecord) -> Self {
        Bin::new(
            record.min_wealth_usd,
            UpperBound::from(record.max_wealth_usd),
            record.population_count,
            record.total_wealth_usd,
        )
    }
}

impl DatasetDocument {
    /// Parse a document from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the document to pretty JSON
    pub fn to_json_string(&self) -> Result<String, DatasetError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Global totals declared in the metadata
    pub fn totals(&self) -> Totals {
        Totals::new(
            self.metadata.total_adult_population,
            self.metadata.total_global_wealth_usd,
        )
    }

    /// Convert to a validated engine dataset
    pub fn to_dataset(&self, config: &EngineConfig) -> Result<Dataset, DatasetError> {
        if let Some(declared) = self.metadata.number_of_bins {
            if declared != self.bins.len() {
                return Err(DatasetError::Inconsistent(format!(
                    "metadata declares {} bins but the document contains {}",
                    declared,
                    self.bins.len()
                )));
            }
        }

        let bins = self.bins.iter().map(Bin::from).collect();
        Ok(Dataset::with_config(bins, self.totals(), config)?)
    }
}
