//! Invoice segmentation, suspicious-invoice flagging, and budget analysis.

use std::collections::{BTreeMap, HashMap};

use anomaly_facade::{detect, SeriesDetector, Tail, ZScoreConfig, ZScoreDetector};
use report::{AnomalyReporter, AnomalySummary, ReportConfig};
use serde::{Deserialize, Serialize};
use table_facade::{IngestRequest, RawTable};

use crate::config::InvoiceConfig;
use crate::error::Result;
use crate::guard::guarded;
use crate::stages::{load, Prepared};
use crate::stats::{mean, quantile};

/// Columns every invoice upload must carry.
pub const REQUIRED_COLUMNS: [&str; 3] = ["invoice_date", "amount", "product_id"];
/// Columns copied into the entity table when present.
pub const ENTITY_COLUMNS: [&str; 8] = [
    "invoice_id",
    "first_name",
    "last_name",
    "email",
    "city",
    "job",
    "amount",
    "product_id",
];

const DATE: &str = "invoice_date";
const AMOUNT: &str = "amount";
const PRODUCT: &str = "product_id";
const QTY: &str = "qty";
const CITY: &str = "city";
const JOB: &str = "job";
const INVOICE_ID: &str = "invoice_id";

/// Revenue and volume for one (city, job) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerSegment {
    pub city: String,
    pub job: String,
    pub revenue: f64,
    pub invoices: usize,
    pub mean_amount: f64,
}

/// Revenue total under one label (a city or a year-month).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Revenue {
    pub label: String,
    pub revenue: f64,
}

/// An invoice flagged by the model, the amount rule, or both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuspiciousInvoice {
    pub row: usize,
    pub amount: f64,
    pub total_value: f64,
    pub score: f64,
    pub model_flag: bool,
    pub rule_flag: bool,
}

/// Rows that need an auditor's attention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditFlags {
    /// Columns that identify an invoice for duplicate detection
    pub duplicate_key: Vec<String>,
    /// Every row sharing its key with another row
    pub duplicate_rows: Vec<usize>,
    pub high_value_threshold: f64,
    pub high_value_rows: Vec<usize>,
}

/// Actual spend against budget for one job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetLine {
    pub job: String,
    pub actual: f64,
    pub budget: f64,
    /// `actual - budget`; positive means over budget
    pub variance: f64,
}

/// Projection of the identifying columns of each invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Output of the invoice routine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceReport {
    pub rows: usize,
    /// `amount * qty` per row
    pub total_values: Vec<f64>,
    pub segments: Vec<CustomerSegment>,
    pub revenue_by_city: Vec<Revenue>,
    pub monthly_revenue: Vec<Revenue>,
    pub suspicious: Vec<SuspiciousInvoice>,
    pub summary: AnomalySummary,
    pub audit: AuditFlags,
    pub budget: Vec<BudgetLine>,
    pub entities: EntityTable,
    pub notes: Vec<String>,
}

/// Analyse an invoice upload.
///
/// Requires `invoice_date`, `amount`, and `product_id` columns; `qty`,
/// `city`, `job`, and `invoice_id` enrich the output when present.
pub fn run_invoice_processing(csv: &[u8], config: &InvoiceConfig) -> Result<InvoiceReport> {
    config.validate()?;
    guarded("invoice_processing", || invoice_processing(csv, config))
}

fn invoice_processing(csv: &[u8], config: &InvoiceConfig) -> Result<InvoiceReport> {
    let request = REQUIRED_COLUMNS
        .iter()
        .fold(IngestRequest::new(), |r, c| r.require(*c))
        .date_column(Some(DATE))
        .target_column(Some(AMOUNT));
    let prepared = load(csv, &request)?;
    let clean = &prepared.clean;
    let n = clean.n_rows();
    let mut notes = Vec::new();

    let amounts = clean.numeric(AMOUNT).unwrap_or(&[]).to_vec();
    let qty = quantities(&prepared.raw);
    let total_values: Vec<f64> = amounts.iter().zip(&qty).map(|(a, q)| a * q).collect();

    // Model flags over the feature matrix, rule flags over the amount
    let detection = detect(&prepared.matrix, &config.isolation_forest_config())?;
    notes.extend(detection.note.iter().cloned());
    let rule_flags = amount_rule(&amounts, config.amount_sigma)?;
    let combined = detection.union(&rule_flags);
    let suspicious: Vec<SuspiciousInvoice> = combined
        .anomaly_indices()
        .into_iter()
        .map(|row| SuspiciousInvoice {
            row,
            amount: amounts[row],
            total_value: total_values[row],
            score: detection.scores[row],
            model_flag: detection.is_anomaly[row],
            rule_flag: rule_flags[row],
        })
        .collect();

    let group_by: Vec<String> = [CITY, JOB]
        .iter()
        .filter(|c| clean.column(c).is_some())
        .map(|c| c.to_string())
        .collect();
    let reporter = AnomalyReporter::new(ReportConfig::builder().noun("suspicious invoices").build());
    let summary = reporter.summarize(clean, &combined, &group_by, Some(AMOUNT))?;

    let cities = text_column(&prepared, CITY);
    let jobs = text_column(&prepared, JOB);
    let segments = segments(
        cities.as_deref(),
        jobs.as_deref(),
        &amounts,
        &total_values,
        config.top_segments,
    );
    let revenue_by_city = match &cities {
        Some(cities) => revenue_by(cities.iter().cloned(), &total_values, true),
        None => Vec::new(),
    };

    let monthly_revenue = match prepared.roles.date_column().and_then(|c| clean.dates(c)) {
        Some(dates) => revenue_by(
            dates.iter().map(|d| d.format("%Y-%m").to_string()),
            &total_values,
            false,
        ),
        None => {
            notes.push(format!("'{DATE}' could not be read as dates; no monthly revenue"));
            Vec::new()
        }
    };

    let audit = audit_flags(&prepared, &total_values, config.high_value_quantile);
    let budget = match &jobs {
        Some(jobs) => budget_lines(jobs, &total_values, config.budget_factor),
        None => Vec::new(),
    };

    tracing::info!(
        rows = n,
        suspicious = suspicious.len(),
        duplicates = audit.duplicate_rows.len(),
        high_value = audit.high_value_rows.len(),
        "invoice processing complete"
    );

    Ok(InvoiceReport {
        rows: n,
        total_values,
        segments,
        revenue_by_city,
        monthly_revenue,
        suspicious,
        summary,
        audit,
        budget,
        entities: entities(&prepared),
        notes,
    })
}

/// Amounts more than `sigma` standard deviations above the mean, or not
/// positive.
fn amount_rule(amounts: &[f64], sigma: f64) -> Result<Vec<bool>> {
    let mut detector = ZScoreDetector::from_config(ZScoreConfig::new(sigma).with_tail(Tail::Upper));
    detector.fit(amounts)?;
    let high = detector.detect(amounts)?;
    Ok(high
        .is_anomaly
        .iter()
        .zip(amounts)
        .map(|(&above, &amount)| above || amount <= 0.0)
        .collect())
}

/// Quantity per row; absent column or unreadable cells count as 1.
fn quantities(raw: &RawTable) -> Vec<f64> {
    match raw.column_index(QTY) {
        Some(index) => raw
            .column_values(index)
            .map(|v| v.as_number().unwrap_or(1.0))
            .collect(),
        None => vec![1.0; raw.n_rows()],
    }
}

fn text_column(prepared: &Prepared, name: &str) -> Option<Vec<String>> {
    let clean = &prepared.clean;
    clean.column(name)?;
    Some((0..clean.n_rows()).filter_map(|row| clean.display(row, name)).collect())
}

/// Sum `values` per label; sorted by revenue descending or by label.
fn revenue_by(
    labels: impl Iterator<Item = String>,
    values: &[f64],
    by_revenue: bool,
) -> Vec<Revenue> {
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for (label, value) in labels.zip(values) {
        *totals.entry(label).or_default() += value;
    }
    let mut revenue: Vec<Revenue> = totals
        .into_iter()
        .map(|(label, revenue)| Revenue { label, revenue })
        .collect();
    if by_revenue {
        revenue.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    }
    revenue
}

fn segments(
    cities: Option<&[String]>,
    jobs: Option<&[String]>,
    amounts: &[f64],
    totals: &[f64],
    top: usize,
) -> Vec<CustomerSegment> {
    let (Some(cities), Some(jobs)) = (cities, jobs) else {
        return Vec::new();
    };
    let mut groups: BTreeMap<(&str, &str), (f64, Vec<f64>)> = BTreeMap::new();
    for (((city, job), &amount), &total) in cities.iter().zip(jobs).zip(amounts).zip(totals) {
        let entry = groups.entry((city.as_str(), job.as_str())).or_default();
        entry.0 += total;
        entry.1.push(amount);
    }
    let mut segments: Vec<CustomerSegment> = groups
        .into_iter()
        .map(|((city, job), (revenue, amounts))| CustomerSegment {
            city: city.to_string(),
            job: job.to_string(),
            revenue,
            invoices: amounts.len(),
            mean_amount: mean(&amounts),
        })
        .collect();
    segments.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    segments.truncate(top);
    segments
}

fn audit_flags(prepared: &Prepared, totals: &[f64], high_quantile: f64) -> AuditFlags {
    let raw = &prepared.raw;
    let duplicate_key: Vec<String> = if raw.has_column(INVOICE_ID) {
        vec![INVOICE_ID.to_string()]
    } else {
        [DATE, PRODUCT, AMOUNT].iter().map(|c| c.to_string()).collect()
    };
    let indices: Vec<usize> = duplicate_key
        .iter()
        .filter_map(|c| raw.column_index(c))
        .collect();

    // Keys come from the uploaded cells; a row missing any key cell has none
    let keys: Vec<Option<Vec<String>>> = raw
        .rows()
        .iter()
        .map(|cells| indices.iter().map(|&i| cells[i].as_string()).collect())
        .collect();
    let mut seen: HashMap<&[String], usize> = HashMap::new();
    for key in keys.iter().flatten() {
        *seen.entry(key.as_slice()).or_default() += 1;
    }
    let duplicate_rows = keys
        .iter()
        .enumerate()
        .filter(|(_, key)| match key {
            Some(key) => seen.get(key.as_slice()).copied().unwrap_or(0) > 1,
            None => false,
        })
        .map(|(row, _)| row)
        .collect();

    let high_value_threshold = quantile(totals, high_quantile).unwrap_or(0.0);
    let high_value_rows = totals
        .iter()
        .enumerate()
        .filter(|&(_, &t)| t > high_value_threshold)
        .map(|(row, _)| row)
        .collect();

    AuditFlags {
        duplicate_key,
        duplicate_rows,
        high_value_threshold,
        high_value_rows,
    }
}

/// Actual per job against a shared budget of `factor` times the mean job
/// actual; jobs sorted by name.
fn budget_lines(jobs: &[String], totals: &[f64], factor: f64) -> Vec<BudgetLine> {
    let actual = revenue_by(jobs.iter().cloned(), totals, false);
    let per_job: Vec<f64> = actual.iter().map(|r| r.revenue).collect();
    let budget = mean(&per_job) * factor;
    actual
        .into_iter()
        .map(|r| BudgetLine {
            job: r.label,
            actual: r.revenue,
            budget,
            variance: r.revenue - budget,
        })
        .collect()
}

fn entities(prepared: &Prepared) -> EntityTable {
    let raw = &prepared.raw;
    let (columns, indices): (Vec<String>, Vec<usize>) = ENTITY_COLUMNS
        .iter()
        .filter_map(|c| raw.column_index(c).map(|i| (c.to_string(), i)))
        .unzip();
    let rows = raw
        .rows()
        .iter()
        .map(|cells| {
            indices
                .iter()
                .map(|&i| cells[i].as_string().unwrap_or_default())
                .collect()
        })
        .collect();
    EntityTable { columns, rows }
}
