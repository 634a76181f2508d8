//! Feature matrix model.

use serde::{Deserialize, Serialize};

use crate::error::{FeatureError, Result};

/// Row-major numeric features, one row per clean-table row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureMatrix {
    names: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl FeatureMatrix {
    /// Build a matrix; every row must have one value per feature name.
    pub fn new(names: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self> {
        if let Some((row, values)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != names.len())
        {
            return Err(FeatureError::RaggedRow {
                row,
                expected: names.len(),
                got: values.len(),
            });
        }
        Ok(Self { names, rows })
    }

    /// Build from column-major vectors of equal length.
    pub fn from_columns(columns: Vec<(String, Vec<f64>)>, n_rows: usize) -> Result<Self> {
        let mut names = Vec::with_capacity(columns.len());
        let mut rows = vec![Vec::with_capacity(columns.len()); n_rows];
        for (name, values) in columns {
            if values.len() != n_rows {
                return Err(FeatureError::RaggedRow {
                    row: values.len().min(n_rows),
                    expected: n_rows,
                    got: values.len(),
                });
            }
            for (row, value) in rows.iter_mut().zip(values) {
                row.push(value);
            }
            names.push(name);
        }
        Ok(Self { names, rows })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_features(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(|r| r.as_slice())
    }

    pub fn feature_index(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Values of one feature across all rows.
    pub fn column(&self, index: usize) -> Option<Vec<f64>> {
        if index >= self.n_features() {
            return None;
        }
        Some(self.rows.iter().map(|r| r[index]).collect())
    }

    /// True when every row is identical (no feature varies).
    pub fn is_constant(&self) -> bool {
        match self.rows.first() {
            None => true,
            Some(first) => self.rows.iter().all(|r| r == first),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: &[&str]) -> Vec<String> {
        n.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_new_and_access() {
        let m = FeatureMatrix::new(names(&["a", "b"]), vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(m.n_rows(), 2);
        assert_eq!(m.n_features(), 2);
        assert_eq!(m.row(1), Some(&[3.0, 4.0][..]));
        assert_eq!(m.column(1), Some(vec![2.0, 4.0]));
        assert_eq!(m.feature_index("b"), Some(1));
        assert!(m.column(2).is_none());
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = FeatureMatrix::new(names(&["a", "b"]), vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(
            err,
            FeatureError::RaggedRow {
                row: 1,
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn test_from_columns() {
        let m = FeatureMatrix::from_columns(
            vec![("x".to_string(), vec![1.0, 2.0, 3.0]), ("y".to_string(), vec![0.0, 0.0, 1.0])],
            3,
        )
        .unwrap();
        assert_eq!(m.rows()[2], vec![3.0, 1.0]);
        assert_eq!(m.names(), &["x", "y"]);
    }

    #[test]
    fn test_is_constant() {
        let same = FeatureMatrix::new(names(&["a"]), vec![vec![5.0]; 4]).unwrap();
        assert!(same.is_constant());
        let varied = FeatureMatrix::new(names(&["a"]), vec![vec![5.0], vec![6.0]]).unwrap();
        assert!(!varied.is_constant());
    }
}
