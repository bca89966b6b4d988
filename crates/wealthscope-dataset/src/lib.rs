//! Wealthscope Dataset Provider
//!
//! Loads the wealth histogram the aggregation engine runs against.
//!
//! The provider supplies:
//! - A JSON reader for the dataset document written by the offline generator
//! - A built-in coarse dataset (the four published reference brackets)
//! - Threshold presets derived from dataset metadata
//!
//! Loading runs the engine's consistency checks exactly once; the resulting
//! [`wealthscope_domain::Dataset`] is read-only.
//!
//! # Examples
//!
//! ```no_run
//! use wealthscope_dataset::JsonFileProvider;
//! use wealthscope_domain::traits::DatasetProvider;
//!
//! let provider = JsonFileProvider::new("data/wealth_distribution.json");
//! let dataset = provider.load().unwrap();
//! println!("{} bins", dataset.bins().len());
//! ```

#![warn(missing_docs)]

mod builtin;
mod document;
mod error;
mod provider;

pub use builtin::{reference_dataset, reference_metadata, Preset, REFERENCE_THRESHOLDS};
pub use document::{BinRecord, DatasetDocument, Metadata, Verification};
pub use error::DatasetError;
pub use provider::{BuiltinProvider, JsonFileProvider, LoadedDataset};
