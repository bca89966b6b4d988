//! Upper bounds for wealth intervals

use std::fmt;

/// Upper bound of a bin or bracket
///
/// A bounded interval excludes its upper value. `Unbounded` stands for
/// "this value and above" and is never confused with missing data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpperBound {
    /// Exclusive finite upper bound
    Bounded(f64),

    /// Open-ended range
    Unbounded,
}

impl UpperBound {
    /// Effective numeric bound, with `Unbounded` mapped to +infinity
    pub fn value(&self) -> f64 {
        match self {
            UpperBound::Bounded(max) => *max,
            UpperBound::Unbounded => f64::INFINITY,
        }
    }

    /// Whether this is the open-ended variant
    pub fn is_unbounded(&self) -> bool {
        matches!(self, UpperBound::Unbounded)
    }

    /// The finite bound, if any
    pub fn as_option(&self) -> Option<f64> {
        match self {
            UpperBound::Bounded(max) => Some(*max),
            UpperBound::Unbounded => None,
        }
    }
}

impl From<Option<f64>> for UpperBound {
    fn from(value: Option<f64>) -> Self {
        value.map_or(UpperBound::Unbounded, UpperBound::Bounded)
    }
}

impl fmt::Display for UpperBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpperBound::Bounded(max) => write!(f, "{}", max),
            UpperBound::Unbounded => write!(f, "∞"),
        }
    }
}
