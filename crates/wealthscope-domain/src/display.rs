//! Display mode selected by a presenter

use std::fmt;
use std::str::FromStr;

/// Which derived figure a presenter shows for each bracket
///
/// Only affects rendering; aggregation always computes both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DisplayMode {
    /// Shares of the global totals
    #[default]
    Percentage,

    /// Absolute counts and currency amounts
    Absolute,
}

impl DisplayMode {
    /// Get the mode name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Percentage => "percentage",
            DisplayMode::Absolute => "absolute",
        }
    }

    /// Parse a mode from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "percentage" | "percent" | "%" => Some(DisplayMode::Percentage),
            "absolute" | "abs" => Some(DisplayMode::Absolute),
            _ => None,
        }
    }

    /// Pick the figure for this mode
    pub fn pick(&self, absolute: f64, share: f64) -> f64 {
        match self {
            DisplayMode::Percentage => share * 100.0,
            DisplayMode::Absolute => absolute,
        }
    }

    /// The other mode
    pub fn toggled(&self) -> Self {
        match self {
            DisplayMode::Percentage => DisplayMode::Absolute,
            DisplayMode::Absolute => DisplayMode::Percentage,
        }
    }
}

impl FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid display mode: {}", s))
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
