//! Threshold editing session.
//!
//! The session holds the current threshold set as a value. Every edit builds a
//! new set and swaps it in only if validation succeeds, so a rejected edit
//! leaves the previous set in place. Breakdowns are recomputed from scratch.

use crate::error::Result;
use tracing::debug;
use wealthscope_dataset::{LoadedDataset, Metadata, Preset};
use wealthscope_domain::{Breakdown, Dataset, DisplayMode, EngineConfig, ThresholdSet};

/// A single user action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Edit {
    /// Add a threshold
    Add(f64),
    /// Replace an existing threshold
    Replace {
        /// Threshold to replace
        old: f64,
        /// Replacement value
        new: f64,
    },
    /// Remove a threshold
    Delete(f64),
    /// Remove every threshold
    Clear,
    /// Replace the set with a preset
    Preset(Preset),
    /// Switch display mode
    Mode(DisplayMode),
    /// Flip between percentage and absolute display
    ToggleMode,
}

/// Interactive session state.
#[derive(Debug, Clone)]
pub struct Session {
    dataset: Dataset,
    metadata: Metadata,
    engine: EngineConfig,
    thresholds: ThresholdSet,
    mode: DisplayMode,
}

impl Session {
    /// Create a new session.
    pub fn new(loaded: LoadedDataset, engine: EngineConfig, thresholds: ThresholdSet, mode: DisplayMode) -> Self {
        Self {
            dataset: loaded.dataset,
            metadata: loaded.metadata,
            engine,
            thresholds,
            mode,
        }
    }

    /// Apply an edit.
    pub fn apply(&mut self, edit: Edit) -> Result<()> {
        let thresholds = match edit {
            Edit::Add(value) => self.thresholds.with_added(value)?,
            Edit::Replace { old, new } => self.thresholds.with_replaced(old, new)?,
            Edit::Delete(value) => self.thresholds.without(value)?,
            Edit::Clear => ThresholdSet::empty(),
            Edit::Preset(preset) => ThresholdSet::new(&preset.thresholds(&self.metadata))?,
            Edit::Mode(mode) => {
                self.mode = mode;
                return Ok(());
            }
            Edit::ToggleMode => {
                self.mode = self.mode.toggled();
                return Ok(());
            }
        };

        debug!(?edit, thresholds = ?thresholds.values(), "Threshold set replaced");
        self.thresholds = thresholds;
        Ok(())
    }

    /// Recompute the breakdown for the current thresholds.
    pub fn breakdown(&self) -> Breakdown {
        debug!(brackets = self.thresholds.len(), policy = %self.engine.unbounded_bin_policy, "Recomputing breakdown");
        Breakdown::compute(&self.dataset, &self.thresholds, &self.engine)
    }

    /// Current thresholds.
    pub fn thresholds(&self) -> &ThresholdSet {
        &self.thresholds
    }

    /// Current display mode.
    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Dataset metadata.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}
