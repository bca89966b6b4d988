//! Bin module - one interval of the source wealth histogram

use crate::UpperBound;

/// A histogram bin supplied by the dataset provider
///
/// `min_wealth` is inclusive, `max_wealth` exclusive. Mass is assumed to be
/// spread uniformly across a bounded bin's width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    /// Inclusive lower bound (currency units)
    pub min_wealth: f64,

    /// Exclusive upper bound, or open-ended
    pub max_wealth: UpperBound,

    /// Number of people in the bin (may be fractional after upstream modelling)
    pub population_count: f64,

    /// Total wealth held by the bin's population (currency units)
    pub wealth_total: f64,
}

impl Bin {
    /// Create a new bin
    pub fn new(min_wealth: f64, max_wealth: UpperBound, population_count: f64, wealth_total: f64) -> Self {
        Self {
            min_wealth,
            max_wealth,
            population_count,
            wealth_total,
        }
    }

    /// Create a bin covering `[min_wealth, max_wealth)`
    pub fn bounded(min_wealth: f64, max_wealth: f64, population_count: f64, wealth_total: f64) -> Self {
        Self::new(min_wealth, UpperBound::Bounded(max_wealth), population_count, wealth_total)
    }

    /// Create an open-ended bin covering `[min_wealth, ∞)`
    pub fn open_ended(min_wealth: f64, population_count: f64, wealth_total: f64) -> Self {
        Self::new(min_wealth, UpperBound::Unbounded, population_count, wealth_total)
    }

    /// Width of the bin (infinite for open-ended bins)
    pub fn width(&self) -> f64 {
        self.max_wealth.value() - self.min_wealth
    }

    /// Average wealth per person, or 0 for an empty bin
    pub fn average_wealth(&self) -> f64 {
        if self.population_count > 0.0 {
            self.wealth_total / self.population_count
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded_width() {
        let bin = Bin::bounded(10_000.0, 20_000.0, 5.0, 75_000.0);
        assert_eq!(bin.width(), 10_000.0);
        assert_eq!(bin.average_wealth(), 15_000.0);
    }

    #[test]
    fn test_open_ended_width() {
        let bin = Bin::open_ended(1_000_000.0, 1.0, 2_000_000.0);
        assert!(bin.width().is_infinite());
        assert!(bin.max_wealth.is_unbounded());
    }

    #[test]
    fn test_empty_bin_average() {
        assert_eq!(Bin::bounded(0.0, 1.0, 0.0, 0.0).average_wealth(), 0.0);
    }
}
