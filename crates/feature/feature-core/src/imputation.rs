//! Missing-value imputation.

use chrono::NaiveDate;

/// Median of the values; `None` for an empty slice.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Fill missing numbers with the column median (0.0 when nothing is
/// present). Returns the filled column and the number of imputed cells.
pub fn impute_numeric(values: &[Option<f64>]) -> (Vec<f64>, usize) {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    let fill = median(&present).unwrap_or(0.0);
    let imputed = values.len() - present.len();
    (values.iter().map(|v| v.unwrap_or(fill)).collect(), imputed)
}

/// Fill missing categories with the sentinel label.
pub fn impute_categorical(values: &[Option<String>], missing_label: &str) -> (Vec<String>, usize) {
    let mut imputed = 0;
    let filled = values
        .iter()
        .map(|v| match v {
            Some(s) => s.clone(),
            None => {
                imputed += 1;
                missing_label.to_string()
            }
        })
        .collect();
    (filled, imputed)
}

/// Forward-fill missing dates; leading gaps take the first valid date.
/// `None` when no cell holds a date.
pub fn fill_dates(values: &[Option<NaiveDate>]) -> Option<(Vec<NaiveDate>, usize)> {
    let first = values.iter().flatten().next().copied()?;
    let mut last = first;
    let mut imputed = 0;
    let filled = values
        .iter()
        .map(|v| match v {
            Some(d) => {
                last = *d;
                *d
            }
            None => {
                imputed += 1;
                last
            }
        })
        .collect();
    Some((filled, imputed))
}
