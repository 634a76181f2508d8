//! Target (amount) column auto-selection.

use table_api::IngestConfig;
use table_spi::RawTable;

/// Pick the most plausible amount column among numeric candidates.
///
/// The first candidate (in header order) whose lower-cased name contains a
/// configured keyword wins; otherwise the candidate with the highest
/// variance, ties going to the leftmost column.
pub fn select_target(table: &RawTable, candidates: &[usize], config: &IngestConfig) -> Option<usize> {
    let by_keyword = candidates.iter().copied().find(|&i| {
        let name = table.columns()[i].to_lowercase();
        config.amount_keywords.iter().any(|k| name.contains(k.as_str()))
    });
    if by_keyword.is_some() {
        return by_keyword;
    }

    let mut best: Option<(usize, f64)> = None;
    for &i in candidates {
        let values: Vec<f64> = table.column_values(i).filter_map(|v| v.as_number()).collect();
        let var = variance(&values);
        match best {
            Some((_, best_var)) if var <= best_var => {}
            _ => best = Some((i, var)),
        }
    }
    best.map(|(i, _)| i)
}

fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n
}
