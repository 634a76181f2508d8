//! Cadence and seasonal period detection

use std::collections::BTreeMap;

use forecast_spi::{Cadence, SeasonalityDetector, TimeSeries};

use crate::decomposition::required_points;

/// Typical step between consecutive dates.
///
/// The most common positive day difference wins, ties going to the smaller
/// step. Series without dates, or whose dates never advance, are `Index`.
pub fn detect_cadence(series: &TimeSeries) -> Cadence {
    let Some(dates) = series.dates() else {
        return Cadence::Index;
    };
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for w in dates.windows(2) {
        let days = (w[1] - w[0]).num_days();
        if days > 0 {
            *counts.entry(days).or_default() += 1;
        }
    }
    // max_by_key keeps the last maximum; descending order leaves the smallest
    counts
        .iter()
        .rev()
        .max_by_key(|&(_, &count)| count)
        .map(|(&days, _)| Cadence::from_step_days(days))
        .unwrap_or(Cadence::Index)
}

/// Picks the longest cadence candidate with two full cycles of data.
#[derive(Debug, Clone, Copy, Default)]
pub struct CadencePeriodDetector;

impl CadencePeriodDetector {
    pub fn new() -> Self {
        Self
    }
}

impl SeasonalityDetector for CadencePeriodDetector {
    fn detect(&self, series: &TimeSeries) -> Option<usize> {
        let cadence = detect_cadence(series);
        cadence
            .candidate_periods()
            .iter()
            .copied()
            .find(|&p| required_points(p) <= series.len())
    }
}
