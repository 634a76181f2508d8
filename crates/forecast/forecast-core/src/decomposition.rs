//! Time series decomposition
//!
//! Linear trend over the elapsed-period index plus an additive seasonal
//! profile averaged by position within the period.

use forecast_spi::{DecompositionResult, Decomposer, ForecastError, Result, TimeSeries};

/// Additive decomposition: Y = T + S + R, with T a least-squares line.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearSeasonalDecomposer;

impl LinearSeasonalDecomposer {
    pub fn new() -> Self {
        Self
    }
}

impl Decomposer for LinearSeasonalDecomposer {
    fn decompose(&self, series: &TimeSeries, period: usize) -> Result<DecompositionResult> {
        decompose_linear_seasonal(series, period)
    }
}

/// Points needed to estimate a profile of this period: two full cycles.
pub fn required_points(period: usize) -> usize {
    2 * period.max(1)
}

/// Least-squares line `y = intercept + slope * x`.
pub fn least_squares(x: &[f64], y: &[f64]) -> Result<(f64, f64)> {
    if x.is_empty() || x.len() != y.len() {
        return Err(ForecastError::NumericalError(
            "least squares needs matching, non-empty inputs".to_string(),
        ));
    }
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;
    let sxx: f64 = x.iter().map(|xi| (xi - mean_x).powi(2)).sum();
    if sxx == 0.0 {
        return Ok((mean_y, 0.0));
    }
    let sxy: f64 = x
        .iter()
        .zip(y)
        .map(|(xi, yi)| (xi - mean_x) * (yi - mean_y))
        .sum();
    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    if !slope.is_finite() || !intercept.is_finite() {
        return Err(ForecastError::NumericalError(
            "trend fit produced a non-finite coefficient".to_string(),
        ));
    }
    Ok((intercept, slope))
}

/// Fit trend and seasonal profile on the non-excluded points.
///
/// When exclusions leave fewer than two cycles but the whole series has
/// enough, every point is used instead.
pub fn decompose_linear_seasonal(series: &TimeSeries, period: usize) -> Result<DecompositionResult> {
    if period == 0 {
        return Err(ForecastError::InvalidPeriod(
            "period must be at least 1".to_string(),
        ));
    }
    let n = series.len();
    let required = required_points(period);
    if n < required {
        return Err(ForecastError::InsufficientData {
            required,
            actual: n,
        });
    }

    let mut fitted: Vec<bool> = series.excluded().iter().map(|e| !e).collect();
    if fitted.iter().filter(|&&f| f).count() < required {
        tracing::debug!(
            excluded = n - series.included_count(),
            "too few points left after exclusions, fitting all points"
        );
        fitted = vec![true; n];
    }

    let periods = series.periods();
    let values = series.values();
    let (x, y): (Vec<f64>, Vec<f64>) = periods
        .iter()
        .zip(values)
        .zip(&fitted)
        .filter(|&(_, &f)| f)
        .map(|((&p, &v), _)| (p as f64, v))
        .unzip();
    let (intercept, slope) = least_squares(&x, &y)?;

    let trend: Vec<f64> = periods
        .iter()
        .map(|&p| intercept + slope * p as f64)
        .collect();

    // Average detrended value per position within the period
    let mut sums = vec![0.0; period];
    let mut counts = vec![0usize; period];
    for ((&p, (&v, &t)), &f) in periods.iter().zip(values.iter().zip(&trend)).zip(&fitted) {
        if f {
            let pos = p.rem_euclid(period as i64) as usize;
            sums[pos] += v - t;
            counts[pos] += 1;
        }
    }
    let observed: Vec<f64> = sums
        .iter()
        .zip(&counts)
        .filter(|&(_, &c)| c > 0)
        .map(|(s, &c)| s / c as f64)
        .collect();
    let center = observed.iter().sum::<f64>() / observed.len().max(1) as f64;
    let seasonal_profile: Vec<f64> = sums
        .iter()
        .zip(&counts)
        .map(|(s, &c)| if c > 0 { s / c as f64 - center } else { 0.0 })
        .collect();

    let seasonal: Vec<f64> = periods
        .iter()
        .map(|&p| seasonal_profile[p.rem_euclid(period as i64) as usize])
        .collect();
    let residual: Vec<f64> = values
        .iter()
        .zip(&trend)
        .zip(&seasonal)
        .map(|((v, t), s)| v - t - s)
        .collect();

    Ok(DecompositionResult {
        trend,
        seasonal,
        residual,
        slope,
        intercept,
        seasonal_profile,
        period,
        fitted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seasonal_series(n: usize) -> TimeSeries {
        let values = (0..n)
            .map(|i| 100.0 + 2.0 * i as f64 + [10.0, -5.0, 0.0, -5.0][i % 4])
            .collect();
        TimeSeries::from_values(values).unwrap()
    }

    #[test]
    fn test_least_squares_exact_line() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [1.0, 3.0, 5.0, 7.0];
        let (intercept, slope) = least_squares(&x, &y).unwrap();
        assert!((intercept - 1.0).abs() < 1e-12);
        assert!((slope - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_recovers_trend_and_profile() {
        let result = decompose_linear_seasonal(&seasonal_series(24), 4).unwrap();

        assert_eq!(result.trend.len(), 24);
        assert!((result.slope - 2.0).abs() < 0.1);
        // Profile keeps the shape of the pattern and has zero mean
        assert!(result.seasonal_profile[0] > result.seasonal_profile[1]);
        assert!(result.seasonal_profile.iter().sum::<f64>().abs() < 1e-9);
        assert!(result.residual.iter().all(|r| r.abs() < 2.0));
    }

    #[test]
    fn test_short_data() {
        let series = TimeSeries::from_values(vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(
            decompose_linear_seasonal(&series, 4).unwrap_err(),
            ForecastError::InsufficientData {
                required: 8,
                actual: 3
            }
        );
    }

    #[test]
    fn test_excluded_points_do_not_move_the_fit() {
        let mut values: Vec<f64> = (0..24).map(|i| 10.0 + i as f64).collect();
        values[5] = 1000.0;
        let mut excluded = vec![false; 24];
        excluded[5] = true;
        let series = TimeSeries::from_values(values)
            .unwrap()
            .with_exclusions(excluded)
            .unwrap();

        let result = decompose_linear_seasonal(&series, 1).unwrap();
        assert!((result.slope - 1.0).abs() < 1e-9);
        assert!(!result.fitted[5]);
        assert_eq!(result.n_fit(), 23);
        // The outlier still gets a residual
        assert!(result.residual[5] > 900.0);
    }

    #[test]
    fn test_heavy_exclusions_fall_back_to_all_points() {
        let series = seasonal_series(8)
            .with_exclusions(vec![true, false, false, false, false, false, false, false])
            .unwrap();
        let result = decompose_linear_seasonal(&series, 4).unwrap();
        assert_eq!(result.n_fit(), 8);
    }

    #[test]
    fn test_zero_period() {
        assert!(matches!(
            decompose_linear_seasonal(&seasonal_series(8), 0),
            Err(ForecastError::InvalidPeriod(_))
        ));
    }
}
