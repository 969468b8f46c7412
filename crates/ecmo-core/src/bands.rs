//! Threshold band lookup.
//!
//! Each scoring table is a list of half-open bands checked in order, plus a
//! catch-all for values no band claims. Comparisons against NaN are false,
//! so NaN always lands in the catch-all and every lookup is total.

/// First band whose exclusive upper bound is above `value`.
///
/// Bands must be sorted by ascending limit.
pub(crate) fn below<T: Copy>(value: f64, bands: &[(f64, T)], otherwise: T) -> T {
    bands
        .iter()
        .find(|(limit, _)| value < *limit)
        .map_or(otherwise, |(_, points)| *points)
}

/// First band whose inclusive lower bound `value` reaches.
///
/// Bands must be sorted by descending limit.
pub(crate) fn at_least<T: Copy>(value: f64, bands: &[(f64, T)], otherwise: T) -> T {
    bands
        .iter()
        .find(|(limit, _)| value >= *limit)
        .map_or(otherwise, |(_, points)| *points)
}

/// First band whose inclusive upper bound `value` does not exceed.
///
/// Bands must be sorted by ascending limit.
pub(crate) fn at_most<T: Copy>(value: f64, bands: &[(f64, T)], otherwise: T) -> T {
    bands
        .iter()
        .find(|(limit, _)| value <= *limit)
        .map_or(otherwise, |(_, points)| *points)
}
