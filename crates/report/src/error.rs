//! Report error types.

use thiserror::Error;

/// Errors raised while summarizing flagged rows.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReportError {
    /// A group-by or rank-by column is not in the table
    #[error("Column '{0}' not found in table")]
    MissingColumn(String),

    /// Detection result does not cover the table row for row
    #[error("Detection result has {results} rows, table has {rows}")]
    LengthMismatch { rows: usize, results: usize },
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;
