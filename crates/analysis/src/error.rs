//! Analysis error taxonomy.
//!
//! Every domain error is folded into one of four kinds so callers can
//! react without knowing which stage failed.

use anomaly_facade::AnomalyError;
use feature_facade::FeatureError;
use forecast_facade::ForecastError;
use report::ReportError;
use table_facade::TableError;
use thiserror::Error;

/// Errors surfaced by the analysis routines.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// Missing or incompatible column(s)
    #[error("Schema error: {message}")]
    Schema {
        message: String,
        columns: Vec<String>,
    },

    /// Too little data for a stage that has no fallback
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Run parameter out of range
    #[error("Invalid parameter '{name}': {reason}")]
    Parameter { name: String, reason: String },

    /// Unexpected failure inside a routine
    #[error("Analysis failed: {0}")]
    Internal(String),
}

impl AnalysisError {
    pub fn schema(message: impl Into<String>, columns: Vec<String>) -> Self {
        AnalysisError::Schema {
            message: message.into(),
            columns,
        }
    }

    pub fn parameter(name: &str, reason: impl Into<String>) -> Self {
        AnalysisError::Parameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// Columns named by a schema error.
    pub fn columns(&self) -> &[String] {
        match self {
            AnalysisError::Schema { columns, .. } => columns,
            _ => &[],
        }
    }
}

/// Result type for analysis routines.
pub type Result<T> = std::result::Result<T, AnalysisError>;

impl From<TableError> for AnalysisError {
    fn from(e: TableError) -> Self {
        match e {
            TableError::Empty(_) => AnalysisError::InsufficientData(e.to_string()),
            TableError::Inconsistent(_) => AnalysisError::Internal(e.to_string()),
            _ => {
                let columns = e.columns();
                AnalysisError::schema(e.to_string(), columns)
            }
        }
    }
}

impl From<FeatureError> for AnalysisError {
    fn from(e: FeatureError) -> Self {
        match e {
            FeatureError::Table(inner) => inner.into(),
            FeatureError::MissingColumn(ref column) => {
                AnalysisError::schema(e.to_string(), vec![column.clone()])
            }
            FeatureError::NoFeatures => AnalysisError::InsufficientData(e.to_string()),
            FeatureError::RaggedRow { .. } => AnalysisError::Internal(e.to_string()),
        }
    }
}

impl From<AnomalyError> for AnalysisError {
    fn from(e: AnomalyError) -> Self {
        match e {
            AnomalyError::InvalidParameter { name, reason } => AnalysisError::Parameter { name, reason },
            AnomalyError::InsufficientData { .. } => AnalysisError::InsufficientData(e.to_string()),
            _ => AnalysisError::Internal(e.to_string()),
        }
    }
}

impl From<ForecastError> for AnalysisError {
    fn from(e: ForecastError) -> Self {
        match e {
            ForecastError::InvalidParameter { name, reason } => AnalysisError::Parameter { name, reason },
            ForecastError::InvalidPeriod(reason) => AnalysisError::parameter("seasonal_period", reason),
            ForecastError::InsufficientData { .. } => AnalysisError::InsufficientData(e.to_string()),
            _ => AnalysisError::Internal(e.to_string()),
        }
    }
}

impl From<ReportError> for AnalysisError {
    fn from(e: ReportError) -> Self {
        match e {
            ReportError::MissingColumn(ref column) => {
                AnalysisError::schema(e.to_string(), vec![column.clone()])
            }
            ReportError::LengthMismatch { .. } => AnalysisError::Internal(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_keep_names() {
        let err: AnalysisError = TableError::MissingColumns {
            columns: vec!["amount".to_string(), "product_id".to_string()],
        }
        .into();
        assert_eq!(err.columns(), &["amount", "product_id"]);
        assert_eq!(
            err.to_string(),
            "Schema error: Missing required column(s): amount, product_id"
        );
    }

    #[test]
    fn test_feature_error_unwraps_table_error() {
        let err: AnalysisError = FeatureError::Table(TableError::Empty("no rows".to_string())).into();
        assert!(matches!(err, AnalysisError::InsufficientData(_)));
    }

    #[test]
    fn test_parameter_errors() {
        let err: AnalysisError = AnomalyError::invalid_parameter("contamination", "too high").into();
        assert_eq!(err, AnalysisError::parameter("contamination", "too high"));

        let err: AnalysisError = ForecastError::InvalidPeriod("zero".to_string()).into();
        assert!(matches!(err, AnalysisError::Parameter { ref name, .. } if name == "seasonal_period"));
    }

    #[test]
    fn test_internal_failures() {
        let err: AnalysisError = AnomalyError::NotFitted.into();
        assert!(matches!(err, AnalysisError::Internal(_)));
        let err: AnalysisError = ReportError::LengthMismatch { rows: 2, results: 1 }.into();
        assert!(matches!(err, AnalysisError::Internal(_)));
    }
}
