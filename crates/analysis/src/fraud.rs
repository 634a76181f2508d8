//! Transaction anomaly ("fraud") detection.

use std::collections::BTreeMap;

use anomaly_facade::{detect, AnomalyResult};
use chrono::NaiveDate;
use report::{group_counts, AnomalyReporter, AnomalySummary, GroupCount, ReportConfig};
use serde::{Deserialize, Serialize};
use table_facade::{ColumnRole, IngestRequest, TargetPolicy};

use crate::config::RunConfig;
use crate::correlation::correlation_with_flags;
use crate::error::Result;
use crate::guard::guarded;
use crate::stages::{load, Prepared};

/// Name fragments of categorical columns grouped by default.
pub const GROUP_KEYWORDS: [&str; 5] = ["type", "location", "channel", "city", "category"];
/// Name fragments of account-like identifier columns.
pub const ACCOUNT_KEYWORDS: [&str; 3] = ["account", "customer", "user"];
/// Date column read when none is configured.
pub const DEFAULT_FRAUD_DATE: &str = "TransactionDate";

/// Flagged transactions on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub flagged: usize,
    pub total: usize,
}

/// Accounts with the most flagged transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountCounts {
    pub column: String,
    pub top: Vec<GroupCount>,
}

/// Correlation of one feature with the anomaly flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlagCorrelation {
    pub feature: String,
    /// `None` when the feature or the flag does not vary
    pub correlation: Option<f64>,
}

/// One transaction with its detection outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTransaction {
    pub row: usize,
    pub amount: f64,
    pub is_anomaly: bool,
    pub score: f64,
}

/// Output of the fraud routine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudReport {
    pub amount_column: String,
    pub group_by: Vec<String>,
    pub transactions: Vec<ScoredTransaction>,
    pub summary: AnomalySummary,
    /// Per-day counts; empty without a real date column
    pub over_time: Vec<DailyCount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accounts: Option<AccountCounts>,
    pub flag_correlations: Vec<FlagCorrelation>,
    pub notes: Vec<String>,
}

impl FraudReport {
    pub fn flagged(&self) -> impl Iterator<Item = &ScoredTransaction> + '_ {
        self.transactions.iter().filter(|t| t.is_anomaly)
    }
}

/// Score every transaction with an isolation forest and summarize the
/// flagged ones.
///
/// The amount column is the configured target, or the most plausible
/// numeric column when none is named.
pub fn run_fraud_detection(csv: &[u8], config: &RunConfig) -> Result<FraudReport> {
    config.validate()?;
    guarded("fraud_detection", || fraud_detection(csv, config))
}

fn fraud_detection(csv: &[u8], config: &RunConfig) -> Result<FraudReport> {
    let date = config
        .date_column
        .clone()
        .unwrap_or_else(|| DEFAULT_FRAUD_DATE.to_string());
    let request = IngestRequest::new()
        .date_column(Some(date))
        .target_column(config.target_column.clone())
        .target_policy(TargetPolicy::AutoSelect);
    let prepared = load(csv, &request)?;
    let amount_column = prepared.roles.require_target()?.to_string();

    let detection = detect(&prepared.matrix, &config.isolation_forest_config())?;

    let group_by = if config.group_by_columns.is_empty() {
        default_group_columns(&prepared)
    } else {
        config.group_by_columns.clone()
    };
    let reporter = AnomalyReporter::new(ReportConfig::builder().noun("suspicious transactions").build());
    let summary = reporter.summarize(&prepared.clean, &detection, &group_by, Some(&amount_column))?;

    let amounts = prepared.clean.numeric(&amount_column).unwrap_or(&[]);
    let transactions = detection
        .is_anomaly
        .iter()
        .zip(&detection.scores)
        .enumerate()
        .map(|(row, (&is_anomaly, &score))| ScoredTransaction {
            row,
            amount: amounts.get(row).copied().unwrap_or(0.0),
            is_anomaly,
            score,
        })
        .collect();

    let accounts = match account_column(&prepared) {
        Some(column) => {
            let counts = group_counts(&prepared.clean, &detection, &column)?;
            Some(AccountCounts {
                top: reporter.top_groups(&counts),
                column,
            })
        }
        None => None,
    };

    let over_time = daily_counts(&prepared, &detection);
    let flag_correlations = flag_correlations(&prepared, &detection);
    tracing::info!(
        rows = detection.len(),
        flagged = detection.anomaly_count(),
        amount_column = %amount_column,
        groups = group_by.len(),
        "fraud detection complete"
    );

    Ok(FraudReport {
        amount_column,
        group_by,
        transactions,
        summary,
        over_time,
        accounts,
        flag_correlations,
        notes: detection.note.iter().cloned().collect(),
    })
}

fn name_matches(name: &str, keywords: &[&str]) -> bool {
    let lower = name.to_lowercase();
    keywords.iter().any(|k| lower.contains(k))
}

/// Categorical columns whose names suggest a transaction attribute.
fn default_group_columns(prepared: &Prepared) -> Vec<String> {
    prepared
        .roles
        .iter()
        .filter(|&(name, role)| role == ColumnRole::Categorical && name_matches(name, &GROUP_KEYWORDS))
        .map(|(name, _)| name.to_string())
        .collect()
}

/// First identifier or categorical column with an account-like name.
fn account_column(prepared: &Prepared) -> Option<String> {
    prepared
        .roles
        .iter()
        .find(|&(name, role)| {
            matches!(role, ColumnRole::Identifier | ColumnRole::Categorical)
                && name_matches(name, &ACCOUNT_KEYWORDS)
        })
        .map(|(name, _)| name.to_string())
}

fn daily_counts(prepared: &Prepared, detection: &AnomalyResult) -> Vec<DailyCount> {
    let Some(dates) = prepared
        .roles
        .date_column()
        .and_then(|c| prepared.clean.dates(c))
    else {
        return Vec::new();
    };
    let mut days: BTreeMap<NaiveDate, (usize, usize)> = BTreeMap::new();
    for (&date, &is_anomaly) in dates.iter().zip(&detection.is_anomaly) {
        let entry = days.entry(date).or_default();
        entry.1 += 1;
        if is_anomaly {
            entry.0 += 1;
        }
    }
    days.into_iter()
        .map(|(date, (flagged, total))| DailyCount {
            date,
            flagged,
            total,
        })
        .collect()
}

fn flag_correlations(prepared: &Prepared, detection: &AnomalyResult) -> Vec<FlagCorrelation> {
    let matrix = &prepared.matrix;
    let columns: Vec<Vec<f64>> = (0..matrix.n_features())
        .filter_map(|i| matrix.column(i))
        .collect();
    correlation_with_flags(matrix.names(), &columns, &detection.is_anomaly)
        .into_iter()
        .map(|(feature, correlation)| FlagCorrelation {
            feature,
            correlation,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transactions_csv() -> String {
        let mut csv = String::from("TransactionDate,AccountID,TransactionType,Location,Age,TransactionAmount\n");
        for i in 0..60 {
            let day = i % 28 + 1;
            let kind = if i % 3 == 0 { "Credit" } else { "Debit" };
            let city = ["Austin", "Boston", "Denver"][i % 3];
            let amount = if i == 17 { 25_000.0 } else { 50.0 + (i % 10) as f64 * 5.0 };
            csv.push_str(&format!(
                "2024-01-{day:02},AC{i:04},{kind},{city},{},{amount}\n",
                30 + i % 20
            ));
        }
        csv
    }

    fn config() -> RunConfig {
        RunConfig::builder()
            .date_column("TransactionDate")
            .contamination(0.05)
            .build()
            .unwrap()
    }

    #[test]
    fn test_auto_selected_amount_and_default_groups() {
        let report = run_fraud_detection(transactions_csv().as_bytes(), &config()).unwrap();

        assert_eq!(report.amount_column, "TransactionAmount");
        assert_eq!(report.group_by, vec!["TransactionType", "Location"]);
        assert_eq!(report.transactions.len(), 60);
        assert_eq!(report.summary.breakdowns.len(), 2);
    }

    #[test]
    fn test_large_amount_ranked_first() {
        let report = run_fraud_detection(transactions_csv().as_bytes(), &config()).unwrap();
        assert!(report.transactions[17].is_anomaly);
        assert_eq!(report.summary.top[0].row, 17);
        assert_eq!(report.summary.top[0].rank_value, Some(25_000.0));
    }

    #[test]
    fn test_daily_counts_and_accounts() {
        let report = run_fraud_detection(transactions_csv().as_bytes(), &config()).unwrap();

        assert_eq!(report.over_time.len(), 28);
        assert_eq!(report.over_time.iter().map(|d| d.total).sum::<usize>(), 60);
        assert_eq!(
            report.over_time.iter().map(|d| d.flagged).sum::<usize>(),
            report.summary.flagged
        );
        let accounts = report.accounts.unwrap();
        assert_eq!(accounts.column, "AccountID");
        assert!(accounts.top.len() <= 10);
        assert!(accounts.top.iter().all(|g| g.flagged == 1));
    }

    #[test]
    fn test_flag_correlation_per_feature() {
        let report = run_fraud_detection(transactions_csv().as_bytes(), &config()).unwrap();
        let amount = report
            .flag_correlations
            .iter()
            .find(|c| c.feature == "TransactionAmount")
            .and_then(|c| c.correlation)
            .unwrap();
        assert!(amount > 0.0);
    }

    #[test]
    fn test_explicit_groups_must_exist() {
        let config = RunConfig::builder().group_by("Region").build().unwrap();
        let err = run_fraud_detection(transactions_csv().as_bytes(), &config).unwrap_err();
        assert_eq!(err.columns(), &["Region"]);
    }

    #[test]
    fn test_transaction_date_read_by_default() {
        let report = run_fraud_detection(transactions_csv().as_bytes(), &RunConfig::default()).unwrap();
        assert_eq!(report.over_time.len(), 28);
        assert_eq!(report.over_time[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn test_without_dates() {
        let csv = transactions_csv().replacen("TransactionDate", "PostedOn", 1);
        let report = run_fraud_detection(csv.as_bytes(), &RunConfig::default()).unwrap();
        assert!(report.over_time.is_empty());
        assert_eq!(report.transactions.len(), 60);
    }

    #[test]
    fn test_account_listing_follows_category_limit() {
        let report = run_fraud_detection(transactions_csv().as_bytes(), &RunConfig::default()).unwrap();
        let accounts = report.accounts.unwrap();
        assert_eq!(accounts.top.len(), report.summary.flagged.min(10));
    }
}
