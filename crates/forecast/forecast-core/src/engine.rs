//! Seasonal-trend forecast engine.

use forecast_api::ForecastConfig;
use forecast_spi::{
    Cadence, ConfidenceInterval, ConfidenceIntervalComputer, Decomposer, ForecastError, ForecastMethod,
    ForecastOutcome, ForecastPoint, Result, SeasonalityDetector, TimeSeries,
};

use crate::confidence::{RandomWalkIntervals, ResidualIntervals};
use crate::decomposition::{required_points, LinearSeasonalDecomposer};
use crate::seasonality::{detect_cadence, CadencePeriodDetector};

/// Projects a series `horizon` periods past its last observation.
///
/// Decomposition, period selection, and interval computation are pluggable;
/// the defaults are a least-squares trend with an averaged seasonal profile,
/// cadence-based period selection, and residual-based normal intervals.
pub struct ForecastEngine {
    config: ForecastConfig,
    decomposer: Box<dyn Decomposer>,
    detector: Box<dyn SeasonalityDetector>,
    intervals: Box<dyn ConfidenceIntervalComputer>,
}

impl ForecastEngine {
    pub fn new(config: ForecastConfig) -> Self {
        Self {
            config,
            decomposer: Box::new(LinearSeasonalDecomposer::new()),
            detector: Box::new(CadencePeriodDetector::new()),
            intervals: Box::new(ResidualIntervals::new()),
        }
    }

    pub fn with_decomposer(mut self, decomposer: impl Decomposer + 'static) -> Self {
        self.decomposer = Box::new(decomposer);
        self
    }

    pub fn with_detector(mut self, detector: impl SeasonalityDetector + 'static) -> Self {
        self.detector = Box::new(detector);
        self
    }

    pub fn with_intervals(mut self, intervals: impl ConfidenceIntervalComputer + 'static) -> Self {
        self.intervals = Box::new(intervals);
        self
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Seasonal-trend forecast.
    ///
    /// Fails with `InsufficientData` when the series holds fewer than two
    /// full cycles of the selected period.
    pub fn forecast(&self, series: &TimeSeries) -> Result<Vec<ForecastPoint>> {
        self.seasonal_trend(series).map(|(points, _, _)| points)
    }

    /// Like [`forecast`](Self::forecast), but a series too short for the
    /// seasonal-trend model gets a naive forecast instead of an error.
    pub fn forecast_or_naive(&self, series: &TimeSeries) -> Result<ForecastOutcome> {
        match self.seasonal_trend(series) {
            Ok((points, period, cadence)) => Ok(ForecastOutcome {
                points,
                method: ForecastMethod::SeasonalTrend { period },
                cadence,
                note: None,
            }),
            Err(ForecastError::InsufficientData { required, actual }) if actual > 0 => {
                let note = format!(
                    "only {actual} points, {required} needed for a seasonal forecast; \
                     repeating the last value"
                );
                tracing::warn!(required, actual, "falling back to naive forecast");
                let cadence = detect_cadence(series);
                Ok(ForecastOutcome {
                    points: self.naive(series, cadence)?,
                    method: ForecastMethod::Naive,
                    cadence,
                    note: Some(note),
                })
            }
            Err(e) => Err(e),
        }
    }

    fn prepare(&self, series: &TimeSeries) -> Result<TimeSeries> {
        self.config.validate()?;
        if series.is_empty() {
            return Err(ForecastError::InsufficientData {
                required: required_points(1),
                actual: 0,
            });
        }
        if self.config.exclude_anomalies {
            Ok(series.clone())
        } else {
            series.clone().with_exclusions(vec![false; series.len()])
        }
    }

    fn seasonal_trend(&self, series: &TimeSeries) -> Result<(Vec<ForecastPoint>, usize, Cadence)> {
        let series = self.prepare(series)?;
        let cadence = detect_cadence(&series);
        let period = match self.config.seasonal_period.or_else(|| self.detector.detect(&series)) {
            Some(p) => p,
            None => {
                let shortest = cadence.candidate_periods().iter().copied().min().unwrap_or(1);
                return Err(ForecastError::InsufficientData {
                    required: required_points(shortest),
                    actual: series.len(),
                });
            }
        };

        let decomposition = self.decomposer.decompose(&series, period)?;
        let last = series.last_period().unwrap_or(-1);
        let horizon = self.config.horizon;
        let estimates: Vec<f64> = (1..=horizon as i64)
            .map(|h| decomposition.project(last + h))
            .collect();
        let interval = self.intervals.compute(
            &estimates,
            &decomposition.fitted_residuals(),
            decomposition.n_fit(),
            self.config.confidence_level,
        );

        tracing::debug!(
            points = series.len(),
            fitted = decomposition.n_fit(),
            period,
            slope = decomposition.slope,
            horizon,
            "seasonal-trend forecast"
        );
        Ok((assemble(&series, cadence, &interval), period, cadence))
    }

    fn naive(&self, series: &TimeSeries, cadence: Cadence) -> Result<Vec<ForecastPoint>> {
        let last = series.last_value().ok_or(ForecastError::InsufficientData {
            required: 1,
            actual: 0,
        })?;
        let steps: Vec<f64> = series.values().windows(2).map(|w| w[1] - w[0]).collect();
        let estimates = vec![last; self.config.horizon];
        let interval = RandomWalkIntervals::new().compute(
            &estimates,
            &steps,
            series.len(),
            self.config.confidence_level,
        );
        Ok(assemble(series, cadence, &interval))
    }
}

/// Number the projected steps after the last observation.
fn assemble(series: &TimeSeries, cadence: Cadence, interval: &ConfidenceInterval) -> Vec<ForecastPoint> {
    let last_period = series.last_period().unwrap_or(-1);
    let last_date = series.last_date();
    interval
        .forecast
        .iter()
        .zip(interval.lower.iter().zip(&interval.upper))
        .enumerate()
        .map(|(i, (&estimate, (&lower, &upper)))| {
            let step = i as u32 + 1;
            ForecastPoint {
                period: last_period + step as i64,
                date: last_date.and_then(|d| cadence.advance(d, step)),
                estimate,
                lower,
                upper,
            }
        })
        .collect()
}

impl Default for ForecastEngine {
    fn default() -> Self {
        Self::new(ForecastConfig::default())
    }
}

impl std::fmt::Debug for ForecastEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForecastEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn monthly_dates(n: u32) -> Vec<NaiveDate> {
        (0..n)
            .map(|i| NaiveDate::from_ymd_opt(2021 + (i / 12) as i32, i % 12 + 1, 1).unwrap())
            .collect()
    }

    fn linear_monthly(n: u32) -> TimeSeries {
        let values = (0..n).map(|i| 100.0 + 5.0 * i as f64).collect();
        TimeSeries::from_values(values)
            .unwrap()
            .with_dates(monthly_dates(n))
            .unwrap()
    }

    #[test]
    fn test_linear_monthly_series() {
        let points = ForecastEngine::default().forecast(&linear_monthly(36)).unwrap();

        assert_eq!(points.len(), 12);
        assert!((points[0].estimate - 280.0).abs() < 1e-6);
        assert!((points[11].estimate - 335.0).abs() < 1e-6);
        assert!(points.windows(2).all(|w| w[1].estimate > w[0].estimate));
        assert!(points.iter().all(|p| p.contains_estimate()));
        assert_eq!(points[0].period, 36);
        assert_eq!(points[0].date, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(points[11].date, NaiveDate::from_ymd_opt(2024, 12, 1));
    }

    #[test]
    fn test_short_series_is_an_error() {
        let err = ForecastEngine::default().forecast(&linear_monthly(10)).unwrap_err();
        assert_eq!(
            err,
            ForecastError::InsufficientData {
                required: 24,
                actual: 10
            }
        );
    }

    #[test]
    fn test_short_series_degrades_to_naive() {
        let outcome = ForecastEngine::new(ForecastConfig::new(3))
            .forecast_or_naive(&linear_monthly(10))
            .unwrap();

        assert!(outcome.is_naive());
        assert!(outcome.note.is_some());
        assert_eq!(outcome.estimates(), vec![145.0; 3]);
        assert_eq!(outcome.cadence, Cadence::Monthly);
        // Constant steps give a zero-width band
        assert!(outcome.points.iter().all(|p| p.lower == p.upper));
        assert_eq!(
            outcome.points.iter().map(|p| p.period).collect::<Vec<_>>(),
            vec![10, 11, 12]
        );
    }

    #[test]
    fn test_single_point_naive() {
        let series = TimeSeries::from_values(vec![42.0]).unwrap();
        let outcome = ForecastEngine::default().forecast_or_naive(&series).unwrap();
        assert_eq!(outcome.points.len(), 12);
        assert!(outcome.points.iter().all(|p| p.estimate == 42.0 && p.date.is_none()));
    }

    #[test]
    fn test_empty_series_still_fails() {
        let series = TimeSeries::from_values(vec![]).unwrap();
        assert!(ForecastEngine::default().forecast_or_naive(&series).is_err());
    }

    #[test]
    fn test_explicit_period_and_periods_contiguous() {
        let series = TimeSeries::new(
            (5..25).collect(),
            (0..20).map(|i| [3.0, 1.0, 2.0, 0.0][i % 4] + i as f64).collect(),
        )
        .unwrap();
        let config = ForecastConfig::builder()
            .horizon(6)
            .seasonal_period(4)
            .build()
            .unwrap();
        let points = ForecastEngine::new(config).forecast(&series).unwrap();
        assert_eq!(
            points.iter().map(|p| p.period).collect::<Vec<_>>(),
            (25..31).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_exclusions_respected_or_ignored() {
        let mut values: Vec<f64> = (0..36).map(|i| 100.0 + 5.0 * i as f64).collect();
        values[30] = 5000.0;
        let mut flags = vec![false; 36];
        flags[30] = true;
        let series = TimeSeries::from_values(values)
            .unwrap()
            .with_dates(monthly_dates(36))
            .unwrap()
            .with_exclusions(flags)
            .unwrap();

        let clean = ForecastEngine::default().forecast(&series).unwrap();
        assert!((clean[0].estimate - 280.0).abs() < 1e-6);

        let config = ForecastConfig::builder().exclude_anomalies(false).build().unwrap();
        let skewed = ForecastEngine::new(config).forecast(&series).unwrap();
        assert!(skewed[0].upper - skewed[0].lower > clean[0].upper - clean[0].lower);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let engine = ForecastEngine::new(ForecastConfig::new(0));
        assert!(matches!(
            engine.forecast_or_naive(&linear_monthly(36)),
            Err(ForecastError::InvalidParameter { .. })
        ));
    }
}
