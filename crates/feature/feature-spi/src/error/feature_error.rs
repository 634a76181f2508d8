//! Feature error types.

use table_spi::TableError;
use thiserror::Error;

/// Cleaning and feature-building errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    /// Role map names a column the table does not have
    #[error("Column '{0}' not found in table")]
    MissingColumn(String),

    /// No column contributed a feature
    #[error("No usable feature columns")]
    NoFeatures,

    /// Rows of unequal width
    #[error("Feature row {row} has {got} values, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },

    /// Error from the table layer
    #[error(transparent)]
    Table(#[from] TableError),
}
