//! Clean table model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};
use crate::model::ColumnRole;

/// Category assigned to missing categorical cells.
pub const MISSING_CATEGORY: &str = "missing";

/// Typed column storage after imputation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "values", rename_all = "snake_case")]
pub enum ColumnData {
    Numeric(Vec<f64>),
    Date(Vec<NaiveDate>),
    Categorical(Vec<String>),
    /// Identifier and unused columns keep their text untouched.
    Text(Vec<Option<String>>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Numeric(v) => v.len(),
            ColumnData::Date(v) => v.len(),
            ColumnData::Categorical(v) => v.len(),
            ColumnData::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render one cell for display and grouping.
    pub fn display(&self, row: usize) -> String {
        match self {
            ColumnData::Numeric(v) => v[row].to_string(),
            ColumnData::Date(v) => v[row].format("%Y-%m-%d").to_string(),
            ColumnData::Categorical(v) => v[row].clone(),
            ColumnData::Text(v) => v[row].clone().unwrap_or_default(),
        }
    }
}

/// One cleaned column with the number of cells that were imputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanColumn {
    pub name: String,
    pub role: ColumnRole,
    pub data: ColumnData,
    pub imputed: usize,
}

impl CleanColumn {
    pub fn new(name: impl Into<String>, role: ColumnRole, data: ColumnData, imputed: usize) -> Self {
        Self {
            name: name.into(),
            role,
            data,
            imputed,
        }
    }
}

/// Raw table after imputation: same rows, same columns, typed values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanTable {
    columns: Vec<CleanColumn>,
    period_index: Vec<i64>,
    n_rows: usize,
}

impl CleanTable {
    /// Assemble a clean table; every column and the period index must
    /// have the same length.
    pub fn new(columns: Vec<CleanColumn>, period_index: Vec<i64>) -> Result<Self> {
        let n_rows = period_index.len();
        if let Some(bad) = columns.iter().find(|c| c.data.len() != n_rows) {
            return Err(TableError::Inconsistent(format!(
                "column '{}' has {} values, expected {}",
                bad.name,
                bad.data.len(),
                n_rows
            )));
        }
        Ok(Self {
            columns,
            period_index,
            n_rows,
        })
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn columns(&self) -> &[CleanColumn] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&CleanColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn numeric(&self, name: &str) -> Option<&[f64]> {
        match self.column(name).map(|c| &c.data) {
            Some(ColumnData::Numeric(v)) => Some(v),
            _ => None,
        }
    }

    pub fn dates(&self, name: &str) -> Option<&[NaiveDate]> {
        match self.column(name).map(|c| &c.data) {
            Some(ColumnData::Date(v)) => Some(v),
            _ => None,
        }
    }

    pub fn categorical(&self, name: &str) -> Option<&[String]> {
        match self.column(name).map(|c| &c.data) {
            Some(ColumnData::Categorical(v)) => Some(v),
            _ => None,
        }
    }

    /// Elapsed-period index per row (rank by date, or row position).
    pub fn period_index(&self) -> &[i64] {
        &self.period_index
    }

    /// Display value of any cell; `None` for an unknown column.
    pub fn display(&self, row: usize, column: &str) -> Option<String> {
        self.column(column).map(|c| c.data.display(row))
    }

    /// Display values of one row, in column order.
    pub fn row_values(&self, row: usize) -> Vec<String> {
        self.columns.iter().map(|c| c.data.display(row)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> CleanTable {
        CleanTable::new(
            vec![
                CleanColumn::new(
                    "Date",
                    ColumnRole::Date,
                    ColumnData::Date(vec![
                        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                        NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                    ]),
                    0,
                ),
                CleanColumn::new(
                    "sales",
                    ColumnRole::Target,
                    ColumnData::Numeric(vec![10.0, 12.5]),
                    1,
                ),
                CleanColumn::new(
                    "email",
                    ColumnRole::Identifier,
                    ColumnData::Text(vec![Some("a@x.io".to_string()), None]),
                    0,
                ),
            ],
            vec![0, 1],
        )
        .unwrap()
    }

    #[test]
    fn test_accessors() {
        let t = table();
        assert_eq!(t.n_rows(), 2);
        assert_eq!(t.numeric("sales"), Some(&[10.0, 12.5][..]));
        assert!(t.numeric("Date").is_none());
        assert_eq!(t.dates("Date").map(|d| d.len()), Some(2));
        assert_eq!(t.column_names(), vec!["Date", "sales", "email"]);
    }

    #[test]
    fn test_display() {
        let t = table();
        assert_eq!(t.display(1, "Date").as_deref(), Some("2024-02-01"));
        assert_eq!(t.display(1, "sales").as_deref(), Some("12.5"));
        assert_eq!(t.display(1, "email").as_deref(), Some(""));
        assert_eq!(t.row_values(0), vec!["2024-01-01", "10", "a@x.io"]);
    }

    #[test]
    fn test_rejects_length_mismatch() {
        let result = CleanTable::new(
            vec![CleanColumn::new(
                "x",
                ColumnRole::Numeric,
                ColumnData::Numeric(vec![1.0]),
                0,
            )],
            vec![0, 1],
        );
        assert!(matches!(result, Err(TableError::Inconsistent(_))));
    }
}
