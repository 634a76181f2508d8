//! Sales forecasting with anomaly flagging.

use anomaly_facade::{detect, AnomalyResult};
use chrono::NaiveDate;
use forecast_facade::{ForecastEngine, ForecastOutcome, TimeSeries};
use report::{AnomalyReporter, AnomalySummary, ReportConfig};
use serde::{Deserialize, Serialize};
use table_facade::IngestRequest;

use crate::config::RunConfig;
use crate::correlation::{correlation_matrix, CorrelationMatrix};
use crate::error::{AnalysisError, Result};
use crate::guard::guarded;
use crate::stages::{chronological_order, load, Prepared};

/// Target column used when the run names none.
pub const DEFAULT_SALES_TARGET: &str = "target_sales";
/// Date column tried when the run names none.
pub const DEFAULT_SALES_DATE: &str = "Date";

/// One historical row with its detection outcome, in time order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedRow {
    /// Position in the uploaded table
    pub row: usize,
    pub period: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub value: f64,
    pub is_anomaly: bool,
    pub score: f64,
}

/// Output of the sales routine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesForecastReport {
    pub target_column: String,
    /// Real date column, `None` when periods are row positions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_column: Option<String>,
    pub history: Vec<AnnotatedRow>,
    pub forecast: ForecastOutcome,
    pub anomalies: AnomalySummary,
    pub correlations: CorrelationMatrix,
    pub notes: Vec<String>,
}

impl SalesForecastReport {
    pub fn flagged_rows(&self) -> impl Iterator<Item = &AnnotatedRow> + '_ {
        self.history.iter().filter(|r| r.is_anomaly)
    }
}

/// Flag unusual periods in a sales history and forecast the target past it.
///
/// Flagged periods are left out of the forecast fit. A history too short
/// for a seasonal fit gets a naive forecast and a note.
pub fn run_sales_forecast(csv: &[u8], config: &RunConfig) -> Result<SalesForecastReport> {
    config.validate()?;
    guarded("sales_forecast", || sales_forecast(csv, config))
}

fn sales_forecast(csv: &[u8], config: &RunConfig) -> Result<SalesForecastReport> {
    let target = config
        .target_column
        .clone()
        .unwrap_or_else(|| DEFAULT_SALES_TARGET.to_string());
    let date = config
        .date_column
        .clone()
        .unwrap_or_else(|| DEFAULT_SALES_DATE.to_string());
    let request = IngestRequest::new()
        .date_column(Some(date))
        .target_column(Some(target.clone()));
    let prepared = load(csv, &request)?;

    let detection = detect(&prepared.matrix, &config.isolation_forest_config())?;
    let history = annotate(&prepared, &target, &detection)?;
    let series = series_from(&history)?;
    let forecast = ForecastEngine::new(config.forecast_config()).forecast_or_naive(&series)?;

    let reporter = AnomalyReporter::new(ReportConfig::default());
    let anomalies = reporter.summarize(
        &prepared.clean,
        &detection,
        &config.group_by_columns,
        Some(&target),
    )?;

    let notes: Vec<String> = detection
        .note
        .iter()
        .chain(forecast.note.iter())
        .cloned()
        .collect();
    tracing::info!(
        rows = history.len(),
        flagged = detection.anomaly_count(),
        horizon = forecast.points.len(),
        naive = forecast.is_naive(),
        "sales forecast complete"
    );

    Ok(SalesForecastReport {
        target_column: target,
        date_column: prepared.roles.date_column().map(str::to_string),
        history,
        forecast,
        anomalies,
        correlations: correlation_matrix(&prepared.clean),
        notes,
    })
}

fn annotate(prepared: &Prepared, target: &str, detection: &AnomalyResult) -> Result<Vec<AnnotatedRow>> {
    let clean = &prepared.clean;
    let values = clean.numeric(target).ok_or_else(|| {
        AnalysisError::schema(format!("target column '{target}' is not numeric"), vec![target.to_string()])
    })?;
    let dates = prepared.roles.date_column().and_then(|c| clean.dates(c));
    let periods = clean.period_index();

    Ok(chronological_order(clean)
        .into_iter()
        .map(|row| AnnotatedRow {
            row,
            period: periods[row],
            date: dates.map(|d| d[row]),
            value: values[row],
            is_anomaly: detection.is_anomaly[row],
            score: detection.scores[row],
        })
        .collect())
}

fn series_from(history: &[AnnotatedRow]) -> Result<TimeSeries> {
    let periods = history.iter().map(|r| r.period).collect();
    let values = history.iter().map(|r| r.value).collect();
    let mut series = TimeSeries::new(periods, values)?;
    let dates: Option<Vec<NaiveDate>> = history.iter().map(|r| r.date).collect();
    if let Some(dates) = dates {
        series = series.with_dates(dates)?;
    }
    Ok(series.with_exclusions(history.iter().map(|r| r.is_anomaly).collect())?)
}
