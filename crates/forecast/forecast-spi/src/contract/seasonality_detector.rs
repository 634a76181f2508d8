//! Trait for seasonality detection

use crate::model::TimeSeries;

/// Picks the seasonal period for a series.
pub trait SeasonalityDetector: Send + Sync {
    /// Period to use, or `None` when the series is too short for two full
    /// cycles of any candidate.
    fn detect(&self, series: &TimeSeries) -> Option<usize>;
}
