//! Bracket module - user-defined wealth intervals derived from thresholds

use crate::UpperBound;

/// A bracket spanning `[min_wealth, max_wealth)`
///
/// Counts start at zero and are filled by [`crate::aggregate`]; shares are
/// filled by [`crate::derive_shares`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    /// Inclusive lower bound (the threshold value)
    pub min_wealth: f64,

    /// Next threshold, or open-ended for the last bracket
    pub max_wealth: UpperBound,

    /// Population attributed to this bracket
    pub population_count: f64,

    /// Wealth attributed to this bracket
    pub wealth_total: f64,

    /// `population_count / total_population`
    pub population_share: f64,

    /// `wealth_total / total_wealth`
    pub wealth_share: f64,
}

impl Bracket {
    /// Create an empty bracket over the given interval
    pub fn new(min_wealth: f64, max_wealth: UpperBound) -> Self {
        Self {
            min_wealth,
            max_wealth,
            population_count: 0.0,
            wealth_total: 0.0,
            population_share: 0.0,
            wealth_share: 0.0,
        }
    }

    /// Average wealth per person, or 0 when the bracket holds nobody
    pub fn average_wealth(&self) -> f64 {
        if self.population_count > 0.0 {
            self.wealth_total / self.population_count
        } else {
            0.0
        }
    }
}

/// Build one bracket per threshold
///
/// `sorted_thresholds` must already be ascending and free of duplicates (see
/// [`crate::normalize_thresholds`]). Each bracket ends where the next begins and
/// the last is open-ended. An empty input yields no brackets.
pub fn build_brackets(sorted_thresholds: &[f64]) -> Vec<Bracket> {
    sorted_thresholds
        .iter()
        .enumerate()
        .map(|(i, &min)| {
            let max = sorted_thresholds
                .get(i + 1)
                .map_or(UpperBound::Unbounded, |&next| UpperBound::Bounded(next));
            Bracket::new(min, max)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_brackets_empty() {
        assert!(build_brackets(&[]).is_empty());
    }

    #[test]
    fn test_build_brackets_single() {
        let brackets = build_brackets(&[0.0]);
        assert_eq!(brackets.len(), 1);
        assert_eq!(brackets[0].min_wealth, 0.0);
        assert_eq!(brackets[0].max_wealth, UpperBound::Unbounded);
    }

    #[test]
    fn test_build_brackets_contiguous() {
        let brackets = build_brackets(&[0.0, 10_000.0, 100_000.0]);
        assert_eq!(brackets.len(), 3);
        assert_eq!(brackets[0].max_wealth, UpperBound::Bounded(10_000.0));
        assert_eq!(brackets[1].min_wealth, 10_000.0);
        assert_eq!(brackets[1].max_wealth, UpperBound::Bounded(100_000.0));
        assert_eq!(brackets[2].max_wealth, UpperBound::Unbounded);
        assert!(brackets.iter().all(|b| b.population_count == 0.0 && b.wealth_total == 0.0));
    }

    #[test]
    fn test_average_wealth() {
        let mut bracket = Bracket::new(0.0, UpperBound::Unbounded);
        assert_eq!(bracket.average_wealth(), 0.0);
        bracket.population_count = 4.0;
        bracket.wealth_total = 100.0;
        assert_eq!(bracket.average_wealth(), 25.0);
    }
}
