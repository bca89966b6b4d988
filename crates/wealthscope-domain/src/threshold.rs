//! Threshold module - validation, normalization, and the caller-owned threshold set

use crate::{build_brackets, Bracket, EngineError, Result};

/// Validate a single threshold
///
/// Thresholds must be finite and non-negative. `-0.0` is accepted and folded
/// into `0.0`.
pub fn validate_threshold(value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(EngineError::InvalidThreshold {
            value,
            reason: "must be a finite number".to_string(),
        });
    }
    if value < 0.0 {
        return Err(EngineError::InvalidThreshold {
            value,
            reason: "must be non-negative".to_string(),
        });
    }
    Ok(value + 0.0)
}

/// Sort thresholds ascending and drop exact duplicates
///
/// Duplicates are detected with `==`, not a tolerance. Inputs are expected to be
/// validated already.
pub fn normalize_thresholds(raw: &[f64]) -> Vec<f64> {
    let mut sorted = raw.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted.dedup();
    sorted
}

/// Sorted, duplicate-free, validated set of thresholds
///
/// The set is a value: every edit returns a new set and leaves the receiver
/// untouched, so a presenter replaces the set it holds rather than sharing a
/// mutable list with the engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThresholdSet {
    values: Vec<f64>,
}

impl ThresholdSet {
    /// Validate and normalize raw thresholds
    pub fn new(raw: &[f64]) -> Result<Self> {
        let validated = raw
            .iter()
            .map(|&value| validate_threshold(value))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            values: normalize_thresholds(&validated),
        })
    }

    /// The empty set (no brackets defined)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Thresholds in ascending order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of thresholds (and therefore brackets)
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no thresholds are defined
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Check membership by exact equality
    pub fn contains(&self, value: f64) -> bool {
        self.values.iter().any(|&v| v == value)
    }

    /// Return a new set with `value` added
    ///
    /// Adding a value that is already present yields an equal set.
    pub fn with_added(&self, value: f64) -> Result<Self> {
        let value = validate_threshold(value)?;
        let mut values = self.values.clone();
        values.push(value);
        Ok(Self {
            values: normalize_thresholds(&values),
        })
    }

    /// Return a new set with `old` replaced by `new`
    pub fn with_replaced(&self, old: f64, new: f64) -> Result<Self> {
        if !self.contains(old) {
            return Err(EngineError::ThresholdNotFound(old));
        }
        let new = validate_threshold(new)?;

        let mut values: Vec<f64> = self.values.iter().copied().filter(|&v| v != old).collect();
        values.push(new);
        Ok(Self {
            values: normalize_thresholds(&values),
        })
    }

    /// Return a new set with `value` removed
    pub fn without(&self, value: f64) -> Result<Self> {
        if !self.contains(value) {
            return Err(EngineError::ThresholdNotFound(value));
        }
        Ok(Self {
            values: self.values.iter().copied().filter(|&v| v != value).collect(),
        })
    }

    /// Empty brackets for this threshold set
    pub fn brackets(&self) -> Vec<Bracket> {
        build_brackets(&self.values)
    }
}
