//! Engine configuration

use std::fmt;
use std::str::FromStr;

/// Default relative tolerance when reconciling bin sums against totals
pub const DEFAULT_RECONCILIATION_TOLERANCE: f64 = 1e-6;

/// How an open-ended bin's mass is attributed when brackets start inside it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UnboundedBinPolicy {
    /// Every bracket starting at or above the bin's start receives the whole
    /// bin. Counts the tail more than once when several brackets start inside it.
    #[default]
    StartWithinBin,

    /// Only the lowest bracket starting at or above the bin's start receives
    /// the bin.
    LowestBracketOnly,
}

impl UnboundedBinPolicy {
    /// Get the policy name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            UnboundedBinPolicy::StartWithinBin => "start-within-bin",
            UnboundedBinPolicy::LowestBracketOnly => "lowest-bracket-only",
        }
    }

    /// Parse a policy from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "start-within-bin" => Some(UnboundedBinPolicy::StartWithinBin),
            "lowest-bracket-only" => Some(UnboundedBinPolicy::LowestBracketOnly),
            _ => None,
        }
    }
}

impl FromStr for UnboundedBinPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid unbounded bin policy: {}", s))
    }
}

impl fmt::Display for UnboundedBinPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for the aggregation engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Attribution rule for open-ended bins
    pub unbounded_bin_policy: UnboundedBinPolicy,

    /// Relative tolerance for bin sums against totals; `None` skips the check
    pub reconciliation_tolerance: Option<f64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            unbounded_bin_policy: UnboundedBinPolicy::StartWithinBin,
            reconciliation_tolerance: Some(DEFAULT_RECONCILIATION_TOLERANCE),
        }
    }
}

impl EngineConfig {
    /// Strict preset: conservative tail attribution, tight reconciliation
    pub fn strict() -> Self {
        Self {
            unbounded_bin_policy: UnboundedBinPolicy::LowestBracketOnly,
            reconciliation_tolerance: Some(1e-9),
        }
    }

    /// Lenient preset: accept datasets whose sums drift from the totals
    pub fn lenient() -> Self {
        Self {
            unbounded_bin_policy: UnboundedBinPolicy::StartWithinBin,
            reconciliation_tolerance: None,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if let Some(tolerance) = self.reconciliation_tolerance {
            if !tolerance.is_finite() || tolerance < 0.0 {
                return Err("reconciliation_tolerance must be a finite non-negative number".to_string());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.unbounded_bin_policy, UnboundedBinPolicy::StartWithinBin);
        assert_eq!(config.reconciliation_tolerance, Some(DEFAULT_RECONCILIATION_TOLERANCE));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(EngineConfig::strict().validate().is_ok());
        assert!(EngineConfig::lenient().validate().is_ok());
        assert_eq!(EngineConfig::strict().unbounded_bin_policy, UnboundedBinPolicy::LowestBracketOnly);
    }

    #[test]
    fn test_invalid_tolerance() {
        let mut config = EngineConfig::default();
        config.reconciliation_tolerance = Some(-1.0);
        assert!(config.validate().is_err());
        config.reconciliation_tolerance = Some(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!(UnboundedBinPolicy::parse("start-within-bin"), Some(UnboundedBinPolicy::StartWithinBin));
        assert_eq!(UnboundedBinPolicy::parse("Lowest_Bracket_Only"), Some(UnboundedBinPolicy::LowestBracketOnly));
        assert!("nope".parse::<UnboundedBinPolicy>().is_err());
        assert_eq!(UnboundedBinPolicy::LowestBracketOnly.to_string(), "lowest-bracket-only");
    }
}
