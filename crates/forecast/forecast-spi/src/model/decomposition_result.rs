//! Decomposition result model

/// Result of time series decomposition
#[derive(Debug, Clone, PartialEq)]
pub struct DecompositionResult {
    /// Trend component
    pub trend: Vec<f64>,
    /// Seasonal component
    pub seasonal: Vec<f64>,
    /// Residual component
    pub residual: Vec<f64>,
    /// Trend slope per period
    pub slope: f64,
    /// Trend value at period 0
    pub intercept: f64,
    /// Zero-mean seasonal offset per position modulo `period`
    pub seasonal_profile: Vec<f64>,
    pub period: usize,
    /// Points that took part in the fit
    pub fitted: Vec<bool>,
}

impl DecompositionResult {
    /// Trend plus seasonal value at any period, in or out of sample.
    pub fn project(&self, period: i64) -> f64 {
        let trend = self.intercept + self.slope * period as f64;
        let seasonal = if self.seasonal_profile.is_empty() {
            0.0
        } else {
            self.seasonal_profile[period.rem_euclid(self.seasonal_profile.len() as i64) as usize]
        };
        trend + seasonal
    }

    /// Residuals of the points used in the fit.
    pub fn fitted_residuals(&self) -> Vec<f64> {
        self.residual
            .iter()
            .zip(&self.fitted)
            .filter(|&(_, &f)| f)
            .map(|(r, _)| *r)
            .collect()
    }

    pub fn n_fit(&self) -> usize {
        self.fitted.iter().filter(|&&f| f).count()
    }
}
