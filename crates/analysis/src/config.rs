//! Run configuration for the analysis routines.

use anomaly_facade::IsolationForestConfig;
use forecast_facade::ForecastConfig;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// Accepted contamination range for a run.
pub const CONTAMINATION_RANGE: (f64, f64) = (0.001, 0.1);
/// Accepted forecast horizon range for a run.
pub const HORIZON_RANGE: (usize, usize) = (1, 24);

fn check_contamination(contamination: f64) -> Result<()> {
    let (lo, hi) = CONTAMINATION_RANGE;
    if !(lo..=hi).contains(&contamination) {
        return Err(AnalysisError::parameter(
            "contamination",
            format!("must be between {lo} and {hi}, got {contamination}"),
        ));
    }
    Ok(())
}

fn check_trees(n_trees: usize) -> Result<()> {
    if n_trees == 0 {
        return Err(AnalysisError::parameter("n_trees", "must be at least 1"));
    }
    Ok(())
}

// ============================================================================
// Run Configuration
// ============================================================================

/// Parameters shared by the sales and fraud routines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Expected share of anomalous rows, 0.001 to 0.1 (default: 0.01).
    pub contamination: f64,
    /// Periods to forecast, 1 to 24 (default: 12).
    pub forecast_horizon: usize,
    pub target_column: Option<String>,
    pub date_column: Option<String>,
    /// Columns to count flagged rows by; empty lets the routine choose.
    pub group_by_columns: Vec<String>,
    pub seed: u64,
    pub n_trees: usize,
    pub seasonal_period: Option<usize>,
    pub confidence_level: f64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            contamination: 0.01,
            forecast_horizon: 12,
            target_column: None,
            date_column: None,
            group_by_columns: Vec::new(),
            seed: 42,
            n_trees: 100,
            seasonal_period: None,
            confidence_level: 0.95,
        }
    }
}

impl RunConfig {
    pub fn builder() -> RunConfigBuilder {
        RunConfigBuilder::new()
    }

    /// Check parameter ranges before any data is read.
    pub fn validate(&self) -> Result<()> {
        check_contamination(self.contamination)?;
        let (lo, hi) = HORIZON_RANGE;
        if !(lo..=hi).contains(&self.forecast_horizon) {
            return Err(AnalysisError::parameter(
                "forecast_horizon",
                format!("must be between {lo} and {hi}, got {}", self.forecast_horizon),
            ));
        }
        check_trees(self.n_trees)?;
        self.forecast_config().validate()?;
        Ok(())
    }

    pub fn isolation_forest_config(&self) -> IsolationForestConfig {
        IsolationForestConfig {
            n_trees: self.n_trees,
            contamination: self.contamination,
            seed: self.seed,
            ..IsolationForestConfig::default()
        }
    }

    pub fn forecast_config(&self) -> ForecastConfig {
        ForecastConfig {
            horizon: self.forecast_horizon,
            confidence_level: self.confidence_level,
            seasonal_period: self.seasonal_period,
            ..ForecastConfig::default()
        }
    }
}

/// Builder for RunConfig.
#[derive(Debug, Default)]
pub struct RunConfigBuilder {
    config: RunConfig,
}

impl RunConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contamination(mut self, contamination: f64) -> Self {
        self.config.contamination = contamination;
        self
    }

    pub fn forecast_horizon(mut self, horizon: usize) -> Self {
        self.config.forecast_horizon = horizon;
        self
    }

    pub fn target_column(mut self, column: impl Into<String>) -> Self {
        self.config.target_column = Some(column.into());
        self
    }

    pub fn date_column(mut self, column: impl Into<String>) -> Self {
        self.config.date_column = Some(column.into());
        self
    }

    pub fn group_by(mut self, column: impl Into<String>) -> Self {
        self.config.group_by_columns.push(column.into());
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn n_trees(mut self, n_trees: usize) -> Self {
        self.config.n_trees = n_trees;
        self
    }

    pub fn seasonal_period(mut self, period: usize) -> Self {
        self.config.seasonal_period = Some(period);
        self
    }

    pub fn confidence_level(mut self, level: f64) -> Self {
        self.config.confidence_level = level;
        self
    }

    pub fn build(self) -> Result<RunConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

// ============================================================================
// Invoice Configuration
// ============================================================================

/// Parameters for the invoice routine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceConfig {
    /// Expected share of anomalous invoices, 0.001 to 0.1 (default: 0.01).
    pub contamination: f64,
    pub seed: u64,
    pub n_trees: usize,
    /// Budget per job as a multiple of the mean job total (default: 1.1).
    pub budget_factor: f64,
    /// Quantile above which an invoice counts as high value (default: 0.99).
    pub high_value_quantile: f64,
    /// Standard deviations above the mean for the amount rule (default: 3.0).
    pub amount_sigma: f64,
    /// Customer segments kept, by revenue (default: 10).
    pub top_segments: usize,
}

impl Default for InvoiceConfig {
    fn default() -> Self {
        Self {
            contamination: 0.01,
            seed: 42,
            n_trees: 100,
            budget_factor: 1.1,
            high_value_quantile: 0.99,
            amount_sigma: 3.0,
            top_segments: 10,
        }
    }
}

impl InvoiceConfig {
    pub fn builder() -> InvoiceConfigBuilder {
        InvoiceConfigBuilder::new()
    }

    /// Check parameter ranges before any data is read.
    pub fn validate(&self) -> Result<()> {
        check_contamination(self.contamination)?;
        check_trees(self.n_trees)?;
        if !(self.budget_factor.is_finite() && self.budget_factor > 0.0) {
            return Err(AnalysisError::parameter(
                "budget_factor",
                format!("must be positive, got {}", self.budget_factor),
            ));
        }
        if !(self.high_value_quantile > 0.0 && self.high_value_quantile < 1.0) {
            return Err(AnalysisError::parameter(
                "high_value_quantile",
                format!("must be in (0, 1), got {}", self.high_value_quantile),
            ));
        }
        if !(self.amount_sigma.is_finite() && self.amount_sigma > 0.0) {
            return Err(AnalysisError::parameter("amount_sigma", "must be positive"));
        }
        Ok(())
    }

    pub fn isolation_forest_config(&self) -> IsolationForestConfig {
        IsolationForestConfig {
            n_trees: self.n_trees,
            contamination: self.contamination,
            seed: self.seed,
            ..IsolationForestConfig::default()
        }
    }
}

/// Builder for InvoiceConfig.
#[derive(Debug, Default)]
pub struct InvoiceConfigBuilder {
    config: InvoiceConfig,
}

impl InvoiceConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contamination(mut self, contamination: f64) -> Self {
        self.config.contamination = contamination;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn budget_factor(mut self, factor: f64) -> Self {
        self.config.budget_factor = factor;
        self
    }

    pub fn high_value_quantile(mut self, quantile: f64) -> Self {
        self.config.high_value_quantile = quantile;
        self
    }

    pub fn top_segments(mut self, n: usize) -> Self {
        self.config.top_segments = n;
        self
    }

    pub fn build(self) -> Result<InvoiceConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(RunConfig::default().validate().is_ok());
        assert!(InvoiceConfig::default().validate().is_ok());
    }

    #[test]
    fn test_contamination_range() {
        for bad in [0.0, 0.0005, 0.2, f64::NAN] {
            let err = RunConfig::builder().contamination(bad).build().unwrap_err();
            assert!(matches!(err, AnalysisError::Parameter { ref name, .. } if name == "contamination"));
        }
        assert!(RunConfig::builder().contamination(0.001).build().is_ok());
        assert!(RunConfig::builder().contamination(0.1).build().is_ok());
    }

    #[test]
    fn test_horizon_range() {
        assert!(RunConfig::builder().forecast_horizon(0).build().is_err());
        assert!(RunConfig::builder().forecast_horizon(25).build().is_err());
        assert!(RunConfig::builder().forecast_horizon(24).build().is_ok());
    }

    #[test]
    fn test_confidence_level_checked() {
        let err = RunConfig::builder().confidence_level(1.5).build().unwrap_err();
        assert!(matches!(err, AnalysisError::Parameter { ref name, .. } if name == "confidence_level"));
    }

    #[test]
    fn test_derived_configs() {
        let config = RunConfig::builder()
            .contamination(0.05)
            .seed(7)
            .forecast_horizon(6)
            .seasonal_period(4)
            .build()
            .unwrap();
        let forest = config.isolation_forest_config();
        assert_eq!(forest.contamination, 0.05);
        assert_eq!(forest.seed, 7);
        assert_eq!(forest.sample_size, 256);
        let forecast = config.forecast_config();
        assert_eq!(forecast.horizon, 6);
        assert_eq!(forecast.seasonal_period, Some(4));
        assert!(forecast.exclude_anomalies);
    }

    #[test]
    fn test_partial_json() {
        let config: RunConfig =
            serde_json::from_str(r#"{"contamination": 0.05, "group_by_columns": ["city"]}"#).unwrap();
        assert_eq!(config.contamination, 0.05);
        assert_eq!(config.forecast_horizon, 12);
        assert_eq!(config.group_by_columns, vec!["city"]);
    }

    #[test]
    fn test_invoice_validation() {
        assert!(InvoiceConfig::builder().budget_factor(0.0).build().is_err());
        assert!(InvoiceConfig::builder().high_value_quantile(1.0).build().is_err());
        assert!(InvoiceConfig::builder().contamination(0.5).build().is_err());
    }
}
