//! Trait for confidence interval computation

use crate::model::ConfidenceInterval;

/// Trait for confidence interval computation
pub trait ConfidenceIntervalComputer: Send + Sync {
    /// Compute intervals around `forecast` (one value per step ahead) from
    /// in-sample residuals of a fit over `n_fit` points.
    fn compute(
        &self,
        forecast: &[f64],
        residuals: &[f64],
        n_fit: usize,
        confidence_level: f64,
    ) -> ConfidenceInterval;
}
