//! Forecast error types

use thiserror::Error;

/// Errors that can occur during forecasting operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Insufficient data points for the operation
    #[error("Insufficient data: need at least {required} points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Invalid parameter value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Numerical computation error
    #[error("Numerical error: {0}")]
    NumericalError(String),

    /// Invalid period for seasonality
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    /// Series vectors disagree in length or ordering
    #[error("Invalid series: {0}")]
    InvalidSeries(String),
}

impl ForecastError {
    pub fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        ForecastError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_insufficient_data_error_message() {
        let error = ForecastError::InsufficientData {
            required: 24,
            actual: 10,
        };
        assert_eq!(
            error.to_string(),
            "Insufficient data: need at least 24 points, got 10"
        );
    }

    #[test]
    fn test_invalid_parameter_error_message() {
        let error = ForecastError::invalid_parameter("horizon", "must be at least 1");
        assert_eq!(error.to_string(), "Invalid parameter 'horizon': must be at least 1");
    }

    #[test]
    fn test_invalid_period_error_message() {
        let error = ForecastError::InvalidPeriod("period must be positive".to_string());
        assert_eq!(error.to_string(), "Invalid period: period must be positive");
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ForecastError::NumericalError("singular fit".to_string());
        let _: &dyn Error = &error;
        assert!(error.source().is_none());
    }

    #[test]
    fn test_all_variants_are_send() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ForecastError>();
    }
}
