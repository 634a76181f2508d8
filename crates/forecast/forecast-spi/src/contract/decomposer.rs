//! Trait for time series decomposition

use crate::error::Result;
use crate::model::{DecompositionResult, TimeSeries};

/// Splits a series into trend, seasonal, and residual components.
///
/// Implementations fit only the points not marked as excluded, but report
/// components for every point.
pub trait Decomposer: Send + Sync {
    fn decompose(&self, series: &TimeSeries, period: usize) -> Result<DecompositionResult>;
}
