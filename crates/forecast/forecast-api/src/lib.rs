//! Forecast API
//!
//! Configuration types and builders for the seasonal-trend forecaster.

use serde::{Deserialize, Serialize};

// Re-export SPI types
pub use forecast_spi::{
    Cadence, ConfidenceInterval, ConfidenceIntervalComputer, DecompositionResult, Decomposer,
    ForecastError, ForecastMethod, ForecastOutcome, ForecastPoint, Result, SeasonalityDetector,
    TimeSeries,
};

// ============================================================================
// Forecast Configuration
// ============================================================================

/// Forecast engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Periods to project past the last observation (default: 12).
    pub horizon: usize,
    /// Two-sided interval coverage, in [0.5, 1) (default: 0.95).
    pub confidence_level: f64,
    /// Seasonal period; chosen from the series cadence when unset.
    pub seasonal_period: Option<usize>,
    /// Leave points flagged as anomalous out of the fit (default: true).
    pub exclude_anomalies: bool,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon: 12,
            confidence_level: 0.95,
            seasonal_period: None,
            exclude_anomalies: true,
        }
    }
}

impl ForecastConfig {
    pub fn new(horizon: usize) -> Self {
        Self {
            horizon,
            ..Self::default()
        }
    }

    pub fn builder() -> ForecastConfigBuilder {
        ForecastConfigBuilder::new()
    }

    /// Check parameter ranges.
    pub fn validate(&self) -> Result<()> {
        if self.horizon == 0 {
            return Err(ForecastError::invalid_parameter("horizon", "must be at least 1"));
        }
        if !(0.5..1.0).contains(&self.confidence_level) {
            return Err(ForecastError::invalid_parameter(
                "confidence_level",
                format!("must be in [0.5, 1), got {}", self.confidence_level),
            ));
        }
        if self.seasonal_period == Some(0) {
            return Err(ForecastError::InvalidPeriod(
                "seasonal period must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for ForecastConfig.
#[derive(Debug, Default)]
pub struct ForecastConfigBuilder {
    horizon: Option<usize>,
    confidence_level: Option<f64>,
    seasonal_period: Option<usize>,
    exclude_anomalies: Option<bool>,
}

impl ForecastConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn horizon(mut self, horizon: usize) -> Self {
        self.horizon = Some(horizon);
        self
    }

    pub fn confidence_level(mut self, level: f64) -> Self {
        self.confidence_level = Some(level);
        self
    }

    pub fn seasonal_period(mut self, period: usize) -> Self {
        self.seasonal_period = Some(period);
        self
    }

    pub fn exclude_anomalies(mut self, exclude: bool) -> Self {
        self.exclude_anomalies = Some(exclude);
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<ForecastConfig> {
        let defaults = ForecastConfig::default();
        let config = ForecastConfig {
            horizon: self.horizon.unwrap_or(defaults.horizon),
            confidence_level: self.confidence_level.unwrap_or(defaults.confidence_level),
            seasonal_period: self.seasonal_period.or(defaults.seasonal_period),
            exclude_anomalies: self.exclude_anomalies.unwrap_or(defaults.exclude_anomalies),
        };
        config.validate()?;
        Ok(config)
    }
}
