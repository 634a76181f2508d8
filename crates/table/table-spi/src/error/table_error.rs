//! Table error types.

use thiserror::Error;

use crate::model::ColumnRole;

/// Table ingestion and schema errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    /// One or more configured columns are absent from the header
    #[error("Missing required column(s): {}", .columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    /// Column content does not fit the role it was given
    #[error("Column '{column}' cannot be used as {role}: {reason}")]
    IncompatibleColumn {
        column: String,
        role: ColumnRole,
        reason: String,
    },

    /// The caller requires a target but did not name one
    #[error("A target column is required but none was specified")]
    TargetNotSpecified,

    /// Auto-selection found no numeric column to use as target
    #[error("No numeric column available to use as target")]
    NoNumericColumn,

    /// Two header cells carry the same name
    #[error("Duplicate column name: '{0}'")]
    DuplicateColumn(String),

    /// Header or records could not be read
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Header present but no data rows
    #[error("Table is empty: {0}")]
    Empty(String),

    /// Cleaned columns disagree on length or role map is inconsistent
    #[error("Inconsistent table: {0}")]
    Inconsistent(String),
}

impl TableError {
    /// Columns named by this error, if any.
    pub fn columns(&self) -> Vec<String> {
        match self {
            TableError::MissingColumns { columns } => columns.clone(),
            TableError::IncompatibleColumn { column, .. } => vec![column.clone()],
            TableError::DuplicateColumn(column) => vec![column.clone()],
            _ => Vec::new(),
        }
    }
}
