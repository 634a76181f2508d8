//! Pearson correlation over clean-table columns.

use serde::{Deserialize, Serialize};
use table_facade::{CleanTable, ColumnData};

/// Pearson correlation; `None` for mismatched or empty inputs, or when
/// either side has no variation.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.is_empty() {
        return None;
    }
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denominator = (var_x * var_y).sqrt();
    if denominator < 1e-12 {
        None
    } else {
        Some((cov / denominator).clamp(-1.0, 1.0))
    }
}

/// Symmetric correlation matrix over named columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    /// `values[i][j]` correlates `columns[i]` with `columns[j]`
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        self.values[i][j]
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Correlations between every pair of numeric columns, header order.
pub fn correlation_matrix(table: &CleanTable) -> CorrelationMatrix {
    let numeric: Vec<(&str, &[f64])> = table
        .columns()
        .iter()
        .filter_map(|c| match &c.data {
            ColumnData::Numeric(values) => Some((c.name.as_str(), values.as_slice())),
            _ => None,
        })
        .collect();

    let values = numeric
        .iter()
        .map(|(_, x)| numeric.iter().map(|(_, y)| pearson(x, y)).collect())
        .collect();
    CorrelationMatrix {
        columns: numeric.iter().map(|(name, _)| name.to_string()).collect(),
        values,
    }
}

/// Correlation of each feature with a 0/1 flag vector.
pub fn correlation_with_flags(names: &[String], columns: &[Vec<f64>], flags: &[bool]) -> Vec<(String, Option<f64>)> {
    let indicator: Vec<f64> = flags.iter().map(|&f| if f { 1.0 } else { 0.0 }).collect();
    names
        .iter()
        .zip(columns)
        .map(|(name, values)| (name.clone(), pearson(values, &indicator)))
        .collect()
}
