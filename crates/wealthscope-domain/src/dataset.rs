//! Dataset module - validated histogram plus global totals
//!
//! The overlap math is only correct when bins are sorted, contiguous, and
//! non-overlapping. [`Dataset::new`] checks this once so individual
//! computations never have to.

use crate::config::DEFAULT_RECONCILIATION_TOLERANCE;
use crate::{Bin, EngineConfig, EngineError, Result, UpperBound};

/// Relative tolerance when comparing adjacent bin edges
const CONTIGUITY_TOLERANCE: f64 = 1e-9;

/// Global totals the shares are relative to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    /// Total population (people)
    pub total_population: f64,

    /// Total wealth (currency units)
    pub total_wealth: f64,
}

impl Totals {
    /// Create a new totals record
    pub fn new(total_population: f64, total_wealth: f64) -> Self {
        Self {
            total_population,
            total_wealth,
        }
    }
}

/// Relative drift between bin sums and declared totals
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reconciliation {
    /// Sum of `population_count` across bins
    pub population_sum: f64,

    /// Sum of `wealth_total` across bins
    pub wealth_sum: f64,

    /// `|population_sum - total_population| / total_population`
    pub population_drift: f64,

    /// `|wealth_sum - total_wealth| / total_wealth`
    pub wealth_drift: f64,
}

impl Reconciliation {
    /// Largest of the two drifts
    pub fn max_drift(&self) -> f64 {
        self.population_drift.max(self.wealth_drift)
    }
}

/// A validated, read-only histogram
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    bins: Vec<Bin>,
    totals: Totals,
}

impl Dataset {
    /// Validate bins and totals with the default reconciliation tolerance
    pub fn new(bins: Vec<Bin>, totals: Totals) -> Result<Self> {
        Self::with_tolerance(bins, totals, Some(DEFAULT_RECONCILIATION_TOLERANCE))
    }

    /// Validate bins and totals using the tolerance from `config`
    pub fn with_config(bins: Vec<Bin>, totals: Totals, config: &EngineConfig) -> Result<Self> {
        Self::with_tolerance(bins, totals, config.reconciliation_tolerance)
    }

    /// Validate bins and totals
    ///
    /// `reconciliation_tolerance` is the maximum relative drift allowed between
    /// bin sums and totals; `None` skips that check. A negative or non-finite
    /// tolerance is rejected. Structural checks always run.
    pub fn with_tolerance(bins: Vec<Bin>, totals: Totals, reconciliation_tolerance: Option<f64>) -> Result<Self> {
        if let Some(tolerance) = reconciliation_tolerance {
            if !tolerance.is_finite() || tolerance < 0.0 {
                return Err(inconsistency(format!(
                    "reconciliation tolerance must be finite and non-negative, got {}",
                    tolerance
                )));
            }
        }
        check_totals(&totals)?;
        check_bins(&bins)?;

        let dataset = Self { bins, totals };

        if let Some(tolerance) = reconciliation_tolerance {
            let reconciliation = dataset.reconciliation();
            if reconciliation.population_drift > tolerance {
                return Err(inconsistency(format!(
                    "bin populations sum to {} but total_population is {} (relative drift {:e} > {:e})",
                    reconciliation.population_sum,
                    totals.total_population,
                    reconciliation.population_drift,
                    tolerance
                )));
            }
            if reconciliation.wealth_drift > tolerance {
                return Err(inconsistency(format!(
                    "bin wealth sums to {} but total_wealth is {} (relative drift {:e} > {:e})",
                    reconciliation.wealth_sum, totals.total_wealth, reconciliation.wealth_drift, tolerance
                )));
            }
        }

        Ok(dataset)
    }

    /// Bins in ascending order
    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    /// Declared global totals
    pub fn totals(&self) -> &Totals {
        &self.totals
    }

    /// Lower edge of the first bin
    pub fn min_wealth(&self) -> f64 {
        self.bins.first().map_or(0.0, |bin| bin.min_wealth)
    }

    /// Upper edge of the last bin
    pub fn max_wealth(&self) -> UpperBound {
        self.bins.last().map_or(UpperBound::Unbounded, |bin| bin.max_wealth)
    }

    /// Compare bin sums against the declared totals
    pub fn reconciliation(&self) -> Reconciliation {
        let population_sum: f64 = self.bins.iter().map(|bin| bin.population_count).sum();
        let wealth_sum: f64 = self.bins.iter().map(|bin| bin.wealth_total).sum();

        Reconciliation {
            population_sum,
            wealth_sum,
            population_drift: (population_sum - self.totals.total_population).abs() / self.totals.total_population,
            wealth_drift: (wealth_sum - self.totals.total_wealth).abs() / self.totals.total_wealth,
        }
    }
}

fn inconsistency(message: String) -> EngineError {
    EngineError::DatasetInconsistency(message)
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn edges_match(a: f64, b: f64) -> bool {
    (a - b).abs() <= CONTIGUITY_TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

fn check_totals(totals: &Totals) -> Result<()> {
    if !totals.total_population.is_finite() || totals.total_population <= 0.0 {
        return Err(inconsistency(format!(
            "total_population must be positive, got {}",
            totals.total_population
        )));
    }
    if !totals.total_wealth.is_finite() || totals.total_wealth <= 0.0 {
        return Err(inconsistency(format!(
            "total_wealth must be positive, got {}",
            totals.total_wealth
        )));
    }
    Ok(())
}

fn check_bins(bins: &[Bin]) -> Result<()> {
    if bins.is_empty() {
        return Err(inconsistency("dataset has no bins".to_string()));
    }

    let last = bins.len() - 1;
    for (i, bin) in bins.iter().enumerate() {
        if !is_non_negative(bin.min_wealth) {
            return Err(inconsistency(format!(
                "bin {}: min_wealth {} must be finite and non-negative",
                i, bin.min_wealth
            )));
        }
        match bin.max_wealth {
            UpperBound::Bounded(max) => {
                if !max.is_finite() || max <= bin.min_wealth {
                    return Err(inconsistency(format!(
                        "bin {}: max_wealth {} must be finite and greater than min_wealth {}",
                        i, max, bin.min_wealth
                    )));
                }
            }
            UpperBound::Unbounded if i != last => {
                return Err(inconsistency(format!("bin {}: only the last bin may be open-ended", i)));
            }
            UpperBound::Unbounded => {}
        }
        if !is_non_negative(bin.population_count) {
            return Err(inconsistency(format!(
                "bin {}: population_count {} must be finite and non-negative",
                i, bin.population_count
            )));
        }
        if !is_non_negative(bin.wealth_total) {
            return Err(inconsistency(format!(
                "bin {}: wealth_total {} must be finite and non-negative",
                i, bin.wealth_total
            )));
        }
    }

    for (i, pair) in bins.windows(2).enumerate() {
        let (prev, next) = (&pair[0], &pair[1]);
        // Open-ended bins were already restricted to the last position
        if let UpperBound::Bounded(prev_max) = prev.max_wealth {
            if !edges_match(prev_max, next.min_wealth) {
                let problem = if next.min_wealth < prev_max {
                    "overlaps or is out of order with"
                } else {
                    "leaves a gap after"
                };
                return Err(inconsistency(format!(
                    "bin {} starting at {} {} bin {} ending at {}",
                    i + 1,
                    next.min_wealth,
                    problem,
                    i,
                    prev_max
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_bins() -> Vec<Bin> {
        vec![
            Bin::bounded(0.0, 10_000.0, 40.0, 100_000.0),
            Bin::bounded(10_000.0, 100_000.0, 40.0, 2_000_000.0),
            Bin::bounded(100_000.0, 1_000_000.0, 15.0, 5_000_000.0),
            Bin::open_ended(1_000_000.0, 5.0, 20_000_000.0),
        ]
    }

    fn reference_totals() -> Totals {
        Totals::new(100.0, 27_100_000.0)
    }

    fn assert_inconsistent(result: Result<Dataset>, fragment: &str) {
        match result {
            Err(EngineError::DatasetInconsistency(message)) => {
                assert!(message.contains(fragment), "'{}' should mention '{}'", message, fragment)
            }
            other => panic!("Expected DatasetInconsistency, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_dataset() {
        let dataset = Dataset::new(reference_bins(), reference_totals()).unwrap();
        assert_eq!(dataset.bins().len(), 4);
        assert_eq!(dataset.min_wealth(), 0.0);
        assert!(dataset.max_wealth().is_unbounded());
        assert_eq!(dataset.reconciliation().max_drift(), 0.0);
    }

    #[test]
    fn test_invalid_tolerance_rejected() {
        // Drifting sums must not slip through a NaN comparison
        let drifting = Totals::new(200.0, 27_100_000.0);
        for tolerance in [f64::NAN, f64::INFINITY, -1e-6] {
            assert_inconsistent(
                Dataset::with_tolerance(reference_bins(), drifting, Some(tolerance)),
                "reconciliation tolerance",
            );
        }

        let config = EngineConfig {
            reconciliation_tolerance: Some(f64::NAN),
            ..EngineConfig::default()
        };
        assert_inconsistent(
            Dataset::with_config(reference_bins(), reference_totals(), &config),
            "reconciliation tolerance",
        );
    }

    #[test]
    fn test_empty_bins_rejected() {
        assert_inconsistent(Dataset::new(vec![], reference_totals()), "no bins");
    }

    #[test]
    fn test_non_positive_totals_rejected() {
        assert_inconsistent(Dataset::new(reference_bins(), Totals::new(0.0, 1.0)), "total_population");
        assert_inconsistent(Dataset::new(reference_bins(), Totals::new(1.0, -1.0)), "total_wealth");
    }

    #[test]
    fn test_gap_rejected() {
        let mut bins = reference_bins();
        bins[1].min_wealth = 20_000.0;
        assert_inconsistent(Dataset::new(bins, reference_totals()), "gap");
    }

    #[test]
    fn test_unsorted_rejected() {
        let mut bins = reference_bins();
        bins.swap(0, 1);
        assert_inconsistent(Dataset::new(bins, reference_totals()), "out of order");
    }

    #[test]
    fn test_inner_open_ended_rejected() {
        let mut bins = reference_bins();
        bins[0].max_wealth = UpperBound::Unbounded;
        assert_inconsistent(Dataset::new(bins, reference_totals()), "only the last bin");
    }

    #[test]
    fn test_inverted_bin_rejected() {
        let bins = vec![Bin::bounded(10.0, 10.0, 1.0, 1.0)];
        assert_inconsistent(Dataset::new(bins, Totals::new(1.0, 1.0)), "greater than min_wealth");
    }

    #[test]
    fn test_negative_mass_rejected() {
        let mut bins = reference_bins();
        bins[2].population_count = -1.0;
        assert_inconsistent(Dataset::with_tolerance(bins, reference_totals(), None), "population_count");
    }

    #[test]
    fn test_reconciliation_drift_rejected() {
        let totals = Totals::new(110.0, 27_100_000.0);
        assert_inconsistent(Dataset::new(reference_bins(), totals), "bin populations");
    }

    #[test]
    fn test_reconciliation_can_be_skipped() {
        let totals = Totals::new(110.0, 27_100_000.0);
        let dataset = Dataset::with_config(reference_bins(), totals, &EngineConfig::lenient()).unwrap();
        let drift = dataset.reconciliation().population_drift;
        assert!((drift - 10.0 / 110.0).abs() < 1e-12);
    }

    #[test]
    fn test_edges_match_with_float_noise() {
        let bins = vec![
            Bin::bounded(0.0, 0.1 + 0.2, 1.0, 1.0),
            Bin::open_ended(0.3, 1.0, 1.0),
        ];
        assert!(Dataset::new(bins, Totals::new(2.0, 2.0)).is_ok());
    }
}
