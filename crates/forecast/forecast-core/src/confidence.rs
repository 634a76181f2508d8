//! Confidence interval implementations
//!
//! Normal-approximation prediction intervals built from in-sample residuals.

use forecast_spi::{ConfidenceInterval, ConfidenceIntervalComputer};

/// Two-sided normal quantile for a confidence level (step table).
pub fn z_score(confidence_level: f64) -> f64 {
    match confidence_level {
        x if x >= 0.99 => 2.576,
        x if x >= 0.95 => 1.96,
        x if x >= 0.90 => 1.645,
        x if x >= 0.80 => 1.282,
        x if x >= 0.70 => 1.036,
        x if x >= 0.60 => 0.842,
        _ => 0.674,
    }
}

/// Population standard deviation; zero for an empty slice.
pub fn residual_std(residuals: &[f64]) -> f64 {
    if residuals.is_empty() {
        return 0.0;
    }
    let n = residuals.len() as f64;
    let mean = residuals.iter().sum::<f64>() / n;
    let variance = residuals.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

/// Symmetric interval `forecast ± z * se` for each step.
pub fn from_standard_errors(
    forecast: &[f64],
    std_errors: &[f64],
    confidence_level: f64,
) -> ConfidenceInterval {
    let z = z_score(confidence_level);
    let lower = forecast
        .iter()
        .zip(std_errors)
        .map(|(&f, &se)| f - z * se)
        .collect();
    let upper = forecast
        .iter()
        .zip(std_errors)
        .map(|(&f, &se)| f + z * se)
        .collect();
    ConfidenceInterval {
        forecast: forecast.to_vec(),
        lower,
        upper,
        confidence_level,
    }
}

/// Intervals for a fitted trend: half-width `z * sigma * sqrt(1 + h / n)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResidualIntervals;

impl ResidualIntervals {
    pub fn new() -> Self {
        Self
    }
}

impl ConfidenceIntervalComputer for ResidualIntervals {
    fn compute(
        &self,
        forecast: &[f64],
        residuals: &[f64],
        n_fit: usize,
        confidence_level: f64,
    ) -> ConfidenceInterval {
        let sigma = residual_std(residuals);
        let n = n_fit.max(1) as f64;
        let std_errors: Vec<f64> = (1..=forecast.len())
            .map(|h| sigma * (1.0 + h as f64 / n).sqrt())
            .collect();
        from_standard_errors(forecast, &std_errors, confidence_level)
    }
}

/// Intervals for a random walk: half-width `z * sigma * sqrt(h)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomWalkIntervals;

impl RandomWalkIntervals {
    pub fn new() -> Self {
        Self
    }
}

impl ConfidenceIntervalComputer for RandomWalkIntervals {
    fn compute(
        &self,
        forecast: &[f64],
        residuals: &[f64],
        _n_fit: usize,
        confidence_level: f64,
    ) -> ConfidenceInterval {
        let sigma = residual_std(residuals);
        let std_errors: Vec<f64> = (1..=forecast.len())
            .map(|h| sigma * (h as f64).sqrt())
            .collect();
        from_standard_errors(forecast, &std_errors, confidence_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_z_score_table() {
        assert_eq!(z_score(0.95), 1.96);
        assert_eq!(z_score(0.99), 2.576);
        assert_eq!(z_score(0.9), 1.645);
        assert_eq!(z_score(0.5), 0.674);
    }

    #[test]
    fn test_residual_std() {
        assert_eq!(residual_std(&[]), 0.0);
        assert!((residual_std(&[1.0, -1.0, 1.0, -1.0]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_residual_intervals_widen() {
        let ci = ResidualIntervals::new().compute(&[10.0, 10.0, 10.0], &[1.0, -1.0], 2, 0.95);
        let widths = ci.widths();
        assert_eq!(ci.len(), 3);
        assert!(widths.windows(2).all(|w| w[1] > w[0]));
        assert!((widths[0] - 2.0 * 1.96 * 1.5f64.sqrt()).abs() < 1e-9);
        assert!(ci.lower.iter().zip(&ci.forecast).all(|(l, f)| l <= f));
    }

    #[test]
    fn test_zero_residuals_collapse() {
        let ci = ResidualIntervals::new().compute(&[5.0, 6.0], &[0.0, 0.0, 0.0], 3, 0.95);
        assert_eq!(ci.lower, vec![5.0, 6.0]);
        assert_eq!(ci.upper, vec![5.0, 6.0]);
    }

    #[test]
    fn test_random_walk_sqrt_growth() {
        let ci = RandomWalkIntervals::new().compute(&[0.0; 4], &[2.0, -2.0], 2, 0.95);
        let widths = ci.widths();
        assert!((widths[3] / widths[0] - 2.0).abs() < 1e-9);
    }
}
