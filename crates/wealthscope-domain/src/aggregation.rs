//! Aggregation module - accumulates bin mass into brackets
//!
//! Implements the engine pipeline:
//! 1. Threshold validation and normalization
//! 2. Bracket construction
//! 3. Mass accumulation via overlap fractions
//! 4. Share derivation
//! 5. Remainder (coverage) computation

use crate::{overlap_fraction, Bin, Bracket, Dataset, EngineConfig, Result, ThresholdSet, Totals, UnboundedBinPolicy};

/// Coverage of the brackets relative to the global totals
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Remainder {
    /// Population summed across all brackets
    pub covered_population: f64,

    /// Wealth summed across all brackets
    pub covered_wealth: f64,

    /// `total_population - covered_population`
    pub not_covered_population: f64,

    /// `total_wealth - covered_wealth`
    pub not_covered_wealth: f64,

    /// `covered_population / total_population`
    pub covered_population_share: f64,

    /// `covered_wealth / total_wealth`
    pub covered_wealth_share: f64,

    /// `not_covered_population / total_population`
    pub not_covered_population_share: f64,

    /// `not_covered_wealth / total_wealth`
    pub not_covered_wealth_share: f64,
}

/// Relative slack before covered mass counts as exceeding the totals
pub const OVERCOUNT_TOLERANCE: f64 = 1e-9;

impl Remainder {
    /// True when brackets claim more population or wealth than exists
    ///
    /// Only happens when an open-ended bin is credited to several brackets
    /// under [`UnboundedBinPolicy::StartWithinBin`].
    pub fn is_overcounted(&self) -> bool {
        self.covered_population_share > 1.0 + OVERCOUNT_TOLERANCE
            || self.covered_wealth_share > 1.0 + OVERCOUNT_TOLERANCE
    }
}

/// Result of one engine run
#[derive(Debug, Clone, PartialEq)]
pub struct Breakdown {
    /// Brackets in ascending order, with counts and shares filled in
    pub brackets: Vec<Bracket>,

    /// Mass not captured by any bracket
    pub remainder: Remainder,
}

impl Breakdown {
    /// Run the pipeline for an already validated threshold set
    pub fn compute(dataset: &Dataset, thresholds: &ThresholdSet, config: &EngineConfig) -> Self {
        let brackets = thresholds.brackets();
        let brackets = aggregate(dataset.bins(), brackets, config.unbounded_bin_policy);
        let brackets = derive_shares(brackets, dataset.totals());
        let remainder = compute_remainder(&brackets, dataset.totals());

        Self { brackets, remainder }
    }

    /// True when no brackets are defined
    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
    }
}

/// Validate raw thresholds and run the full pipeline
///
/// Fails with [`crate::EngineError::InvalidThreshold`] if any threshold is
/// negative or non-finite. An empty threshold list is not an error: it yields
/// a breakdown with no brackets and everything in the remainder.
pub fn compute_breakdown(dataset: &Dataset, raw_thresholds: &[f64], config: &EngineConfig) -> Result<Breakdown> {
    let thresholds = ThresholdSet::new(raw_thresholds)?;
    Ok(Breakdown::compute(dataset, &thresholds, config))
}

/// Accumulate bin mass into brackets
///
/// Every (bin, bracket) pair is visited; pairs with a positive overlap
/// fraction add `population_count * fraction` and `wealth_total * fraction`
/// to the bracket. Brackets must be in ascending order for
/// [`UnboundedBinPolicy::LowestBracketOnly`] to pick the lowest one.
pub fn aggregate(bins: &[Bin], mut brackets: Vec<Bracket>, policy: UnboundedBinPolicy) -> Vec<Bracket> {
    for bin in bins {
        let single_credit = bin.max_wealth.is_unbounded() && policy == UnboundedBinPolicy::LowestBracketOnly;
        let mut credited = false;

        for bracket in brackets.iter_mut() {
            let fraction = overlap_fraction(bin, bracket);
            if fraction <= 0.0 || (single_credit && credited) {
                continue;
            }
            bracket.population_count += bin.population_count * fraction;
            bracket.wealth_total += bin.wealth_total * fraction;
            credited = true;
        }
    }
    brackets
}

/// Fill in each bracket's shares of the global totals
///
/// Zero totals produce non-finite shares; they are passed through as is.
pub fn derive_shares(mut brackets: Vec<Bracket>, totals: &Totals) -> Vec<Bracket> {
    for bracket in brackets.iter_mut() {
        bracket.population_share = bracket.population_count / totals.total_population;
        bracket.wealth_share = bracket.wealth_total / totals.total_wealth;
    }
    brackets
}

/// Compute covered and not-covered mass across all brackets
pub fn compute_remainder(brackets: &[Bracket], totals: &Totals) -> Remainder {
    let covered_population: f64 = brackets.iter().map(|b| b.population_count).sum();
    let covered_wealth: f64 = brackets.iter().map(|b| b.wealth_total).sum();

    let not_covered_population = totals.total_population - covered_population;
    let not_covered_wealth = totals.total_wealth - covered_wealth;

    Remainder {
        covered_population,
        covered_wealth,
        not_covered_population,
        not_covered_wealth,
        covered_population_share: covered_population / totals.total_population,
        covered_wealth_share: covered_wealth / totals.total_wealth,
        not_covered_population_share: not_covered_population / totals.total_population,
        not_covered_wealth_share: not_covered_wealth / totals.total_wealth,
    }
}
