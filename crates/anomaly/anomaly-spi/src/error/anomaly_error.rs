//! Anomaly detection error types.

use thiserror::Error;

/// Anomaly detection errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnomalyError {
    #[error("Insufficient data: required {required}, got {got}")]
    InsufficientData { required: usize, got: usize },

    #[error("Detector not fitted: call fit() before detect()")]
    NotFitted,

    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Feature count mismatch: fitted on {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Detection error: {0}")]
    DetectionError(String),
}

impl AnomalyError {
    pub fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        AnomalyError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for anomaly detection operations.
pub type Result<T> = std::result::Result<T, AnomalyError>;
