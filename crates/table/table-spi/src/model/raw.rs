//! Raw table model.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};

/// Tokens read as an empty cell, matched case-insensitively.
const NULL_TOKENS: [&str; 6] = ["na", "n/a", "nan", "null", "none", "-"];

/// A single uploaded cell before any coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawValue {
    Empty,
    Number(f64),
    Text(String),
}

impl RawValue {
    /// Classify a CSV cell.
    pub fn parse(cell: &str) -> Self {
        let trimmed = cell.trim();
        if trimmed.is_empty()
            || NULL_TOKENS
                .iter()
                .any(|token| trimmed.eq_ignore_ascii_case(token))
        {
            return RawValue::Empty;
        }
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => RawValue::Number(value),
            _ => RawValue::Text(trimmed.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RawValue::Empty)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// String form of a non-empty cell (numbers rendered with `Display`).
    pub fn as_string(&self) -> Option<String> {
        match self {
            RawValue::Empty => None,
            RawValue::Number(value) => Some(value.to_string()),
            RawValue::Text(text) => Some(text.clone()),
        }
    }
}

/// Ordered rows of raw cells under a case-sensitive header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<RawValue>>,
}

impl RawTable {
    /// Create a table, enforcing a non-empty header, at least one row,
    /// unique column names, and rectangular rows.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<RawValue>>) -> Result<Self> {
        if columns.is_empty() {
            return Err(TableError::Empty("header has no columns".to_string()));
        }
        for (i, name) in columns.iter().enumerate() {
            if columns[..i].contains(name) {
                return Err(TableError::DuplicateColumn(name.clone()));
            }
        }
        if rows.is_empty() {
            return Err(TableError::Empty("no data rows".to_string()));
        }
        if let Some((i, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns.len())
        {
            return Err(TableError::ParseError(format!(
                "row {} has {} cells, expected {}",
                i + 1,
                row.len(),
                columns.len()
            )));
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<RawValue>] {
        &self.rows
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Cells of one column, top to bottom.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &RawValue> + '_ {
        self.rows.iter().map(move |row| &row[index])
    }
}
