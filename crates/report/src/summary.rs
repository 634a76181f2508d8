//! Ranked rows, per-group counts, and summary lines for flagged rows.

use std::collections::HashMap;

use anomaly_spi::AnomalyResult;
use serde::{Deserialize, Serialize};
use table_spi::CleanTable;

use crate::config::ReportConfig;
use crate::error::{ReportError, Result};

/// One flagged row as listed in the ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRow {
    /// Position in the input table
    pub row: usize,
    pub score: f64,
    /// Value of the rank-by column, when ranking by a numeric column
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank_value: Option<f64>,
    /// Display values in table column order
    pub cells: Vec<String>,
}

/// Flagged and total rows for one value of a group column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCount {
    pub value: String,
    pub flagged: usize,
    pub total: usize,
}

/// Flagged counts for every distinct value of one column, most flagged
/// first, ties by value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupBreakdown {
    pub column: String,
    pub counts: Vec<GroupCount>,
}

impl GroupBreakdown {
    /// Groups with at least one flagged row, at most `n` of them.
    pub fn top(&self, n: usize) -> Vec<&GroupCount> {
        self.counts.iter().filter(|g| g.flagged > 0).take(n).collect()
    }

    pub fn count(&self, value: &str) -> Option<&GroupCount> {
        self.counts.iter().find(|g| g.value == value)
    }
}

/// Everything a consumer needs to present detection results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalySummary {
    pub total_rows: usize,
    pub flagged: usize,
    /// Flagged share of all rows, in percent
    pub flagged_pct: f64,
    /// Column the ranking used; `None` when ranked by score
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ranked_by: Option<String>,
    pub columns: Vec<String>,
    pub top: Vec<RankedRow>,
    pub breakdowns: Vec<GroupBreakdown>,
    pub lines: Vec<String>,
}

/// Summarizes detection results over a clean table.
#[derive(Debug, Clone, Default)]
pub struct AnomalyReporter {
    config: ReportConfig,
}

impl AnomalyReporter {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// The most flagged groups of a breakdown, at most `category_top_n`.
    pub fn top_groups(&self, breakdown: &GroupBreakdown) -> Vec<GroupCount> {
        breakdown
            .top(self.config.category_top_n)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Rank flagged rows, count them per group, and write summary lines.
    ///
    /// Flagged rows are ranked by `rank_by` descending when it is a numeric
    /// column, otherwise by score ascending; equal keys keep table order.
    pub fn summarize(
        &self,
        table: &CleanTable,
        result: &AnomalyResult,
        group_by: &[String],
        rank_by: Option<&str>,
    ) -> Result<AnomalySummary> {
        if result.len() != table.n_rows() {
            return Err(ReportError::LengthMismatch {
                rows: table.n_rows(),
                results: result.len(),
            });
        }
        for column in group_by.iter().map(String::as_str).chain(rank_by) {
            if table.column(column).is_none() {
                return Err(ReportError::MissingColumn(column.to_string()));
            }
        }

        let rank_values = rank_by.and_then(|c| table.numeric(c));
        if rank_by.is_some() && rank_values.is_none() {
            tracing::debug!(column = rank_by, "rank column is not numeric, ranking by score");
        }
        let top = self.rank(table, result, rank_values);

        let breakdowns: Vec<GroupBreakdown> = group_by
            .iter()
            .map(|column| tally(table, result, column))
            .collect();

        let flagged = result.anomaly_count();
        let total_rows = table.n_rows();
        let flagged_pct = if total_rows == 0 {
            0.0
        } else {
            100.0 * flagged as f64 / total_rows as f64
        };
        let lines = self.lines(flagged, total_rows, flagged_pct, &breakdowns, result.note.as_deref());

        tracing::debug!(flagged, total_rows, groups = breakdowns.len(), "summarized flagged rows");
        Ok(AnomalySummary {
            total_rows,
            flagged,
            flagged_pct,
            ranked_by: rank_values.and(rank_by).map(str::to_string),
            columns: table.column_names().into_iter().map(str::to_string).collect(),
            top,
            breakdowns,
            lines,
        })
    }

    fn rank(&self, table: &CleanTable, result: &AnomalyResult, rank_values: Option<&[f64]>) -> Vec<RankedRow> {
        let mut rows = result.anomaly_indices();
        match rank_values {
            Some(values) => rows.sort_by(|&a, &b| values[b].total_cmp(&values[a])),
            None => rows.sort_by(|&a, &b| result.scores[a].total_cmp(&result.scores[b])),
        }
        rows.into_iter()
            .take(self.config.top_n)
            .map(|row| RankedRow {
                row,
                score: result.scores[row],
                rank_value: rank_values.map(|v| v[row]),
                cells: table.row_values(row),
            })
            .collect()
    }

    fn lines(
        &self,
        flagged: usize,
        total_rows: usize,
        flagged_pct: f64,
        breakdowns: &[GroupBreakdown],
        note: Option<&str>,
    ) -> Vec<String> {
        let noun = &self.config.noun;
        let mut lines = Vec::new();
        if flagged == 0 {
            lines.push(format!("No {noun} detected in {total_rows} rows."));
        } else {
            lines.push(format!(
                "Detected {flagged} {noun} out of {total_rows} rows ({flagged_pct:.2}%)."
            ));
        }
        for breakdown in breakdowns {
            let leaders: Vec<String> = breakdown
                .top(2)
                .iter()
                .map(|g| format!("{} ({})", g.value, g.flagged))
                .collect();
            if !leaders.is_empty() {
                lines.push(format!(
                    "Most {noun} by {}: {}.",
                    breakdown.column,
                    leaders.join(", ")
                ));
            }
        }
        if let Some(note) = note {
            lines.push(format!("Low confidence: {note}."));
        }
        lines
    }
}

/// Flagged and total counts for each distinct display value of `column`.
pub fn group_counts(table: &CleanTable, result: &AnomalyResult, column: &str) -> Result<GroupBreakdown> {
    if table.column(column).is_none() {
        return Err(ReportError::MissingColumn(column.to_string()));
    }
    if result.len() != table.n_rows() {
        return Err(ReportError::LengthMismatch {
            rows: table.n_rows(),
            results: result.len(),
        });
    }
    Ok(tally(table, result, column))
}

fn tally(table: &CleanTable, result: &AnomalyResult, column: &str) -> GroupBreakdown {
    let mut counts: HashMap<String, GroupCount> = HashMap::new();
    for (row, &is_anomaly) in result.is_anomaly.iter().enumerate() {
        let value = table.display(row, column).unwrap_or_default();
        let entry = counts.entry(value.clone()).or_insert(GroupCount {
            value,
            flagged: 0,
            total: 0,
        });
        entry.total += 1;
        if is_anomaly {
            entry.flagged += 1;
        }
    }
    let mut counts: Vec<GroupCount> = counts.into_values().collect();
    counts.sort_by(|a, b| b.flagged.cmp(&a.flagged).then_with(|| a.value.cmp(&b.value)));
    GroupBreakdown {
        column: column.to_string(),
        counts,
    }
}

/// Summarize with a reporter built from `config`.
pub fn summarize(
    table: &CleanTable,
    result: &AnomalyResult,
    group_by: &[String],
    rank_by: Option<&str>,
    config: &ReportConfig,
) -> Result<AnomalySummary> {
    AnomalyReporter::new(config.clone()).summarize(table, result, group_by, rank_by)
}
