//! Overlap computation between source bins and brackets
//!
//! Mass inside a bounded bin is assumed to be uniformly distributed, so the
//! fraction attributed to a bracket is the width of the intersection over the
//! width of the bin. Open-ended bins have no width to split and are attributed
//! all-or-nothing.

use crate::{Bin, Bracket};

/// Portion of `bin`'s mass that falls inside `bracket`, in `[0, 1]`
///
/// Rules:
/// 1. An empty intersection (disjoint or zero-width) yields 0.
/// 2. An open-ended bin yields 1 when the bracket starts at or above the bin's
///    start, 0 otherwise, whether or not the bracket is open-ended itself.
/// 3. A bounded bin yields the intersection width over the bin width.
///
/// Rule 2 credits the whole tail to every bracket that starts inside it. When
/// more than one bracket starts inside an open-ended bin the tail is counted
/// more than once; see [`crate::UnboundedBinPolicy`].
pub fn overlap_fraction(bin: &Bin, bracket: &Bracket) -> f64 {
    let bin_max = bin.max_wealth.value();
    let bracket_max = bracket.max_wealth.value();

    let overlap_min = bin.min_wealth.max(bracket.min_wealth);
    let overlap_max = bin_max.min(bracket_max);

    if overlap_min >= overlap_max {
        return 0.0;
    }

    if bin.max_wealth.is_unbounded() {
        return if bracket.min_wealth >= bin.min_wealth { 1.0 } else { 0.0 };
    }

    (overlap_max - overlap_min) / bin.width()
}
