//! Anomaly detector trait definitions.

use feature_spi::FeatureMatrix;

use crate::error::Result;
use crate::model::AnomalyResult;

/// Multivariate anomaly detector.
///
/// Scores follow the convention lower = more anomalous.
pub trait AnomalyDetector: Send + Sync {
    /// Fit the detector to training rows.
    fn fit(&mut self, data: &FeatureMatrix) -> Result<()>;

    /// Flag anomalous rows.
    fn detect(&self, data: &FeatureMatrix) -> Result<AnomalyResult>;

    /// Compute per-row scores without thresholding.
    fn score(&self, data: &FeatureMatrix) -> Result<Vec<f64>>;

    /// Check if detector has been fitted.
    fn is_fitted(&self) -> bool;
}

/// Univariate detector over a plain series.
pub trait SeriesDetector: Send + Sync {
    /// Fit the detector to training data.
    fn fit(&mut self, data: &[f64]) -> Result<()>;

    /// Detect anomalies in data.
    fn detect(&self, data: &[f64]) -> Result<AnomalyResult>;

    /// Compute anomaly scores without thresholding.
    fn score(&self, data: &[f64]) -> Result<Vec<f64>>;

    /// Check if detector has been fitted.
    fn is_fitted(&self) -> bool;
}
