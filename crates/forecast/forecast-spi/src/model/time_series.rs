//! Time series model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, Result};

/// Observations ordered by elapsed period, with optional calendar dates and
/// per-point exclusion flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    periods: Vec<i64>,
    values: Vec<f64>,
    dates: Option<Vec<NaiveDate>>,
    excluded: Vec<bool>,
}

impl TimeSeries {
    /// Periods must be strictly increasing and values finite.
    pub fn new(periods: Vec<i64>, values: Vec<f64>) -> Result<Self> {
        if periods.len() != values.len() {
            return Err(ForecastError::InvalidSeries(format!(
                "{} periods for {} values",
                periods.len(),
                values.len()
            )));
        }
        if periods.windows(2).any(|w| w[1] <= w[0]) {
            return Err(ForecastError::InvalidSeries(
                "periods must be strictly increasing".to_string(),
            ));
        }
        if let Some(i) = values.iter().position(|v| !v.is_finite()) {
            return Err(ForecastError::InvalidSeries(format!(
                "value at position {i} is not finite"
            )));
        }
        let excluded = vec![false; values.len()];
        Ok(Self {
            periods,
            values,
            dates: None,
            excluded,
        })
    }

    /// Series indexed 0, 1, 2, ...
    pub fn from_values(values: Vec<f64>) -> Result<Self> {
        let periods = (0..values.len() as i64).collect();
        Self::new(periods, values)
    }

    /// Attach one non-decreasing calendar date per point.
    pub fn with_dates(mut self, dates: Vec<NaiveDate>) -> Result<Self> {
        if dates.len() != self.values.len() {
            return Err(ForecastError::InvalidSeries(format!(
                "{} dates for {} values",
                dates.len(),
                self.values.len()
            )));
        }
        if dates.windows(2).any(|w| w[1] < w[0]) {
            return Err(ForecastError::InvalidSeries(
                "dates must follow period order".to_string(),
            ));
        }
        self.dates = Some(dates);
        Ok(self)
    }

    /// Mark points to leave out of model fitting.
    pub fn with_exclusions(mut self, excluded: Vec<bool>) -> Result<Self> {
        if excluded.len() != self.values.len() {
            return Err(ForecastError::InvalidSeries(format!(
                "{} exclusion flags for {} values",
                excluded.len(),
                self.values.len()
            )));
        }
        self.excluded = excluded;
        Ok(self)
    }

    pub fn periods(&self) -> &[i64] {
        &self.periods
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn dates(&self) -> Option<&[NaiveDate]> {
        self.dates.as_deref()
    }

    pub fn excluded(&self) -> &[bool] {
        &self.excluded
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn last_period(&self) -> Option<i64> {
        self.periods.last().copied()
    }

    pub fn last_value(&self) -> Option<f64> {
        self.values.last().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.as_ref().and_then(|d| d.last().copied())
    }

    pub fn included_count(&self) -> usize {
        self.excluded.iter().filter(|&&e| !e).count()
    }
}
