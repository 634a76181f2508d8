//! Forecast output models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::Cadence;

/// One projected period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub period: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub estimate: f64,
    pub lower: f64,
    pub upper: f64,
}

impl ForecastPoint {
    pub fn contains_estimate(&self) -> bool {
        self.lower <= self.estimate && self.estimate <= self.upper
    }
}

/// How the points were produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ForecastMethod {
    /// Linear trend plus seasonal profile.
    SeasonalTrend { period: usize },
    /// Last value repeated.
    Naive,
}

/// Forecast points together with the method used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastOutcome {
    pub points: Vec<ForecastPoint>,
    pub method: ForecastMethod,
    pub cadence: Cadence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ForecastOutcome {
    pub fn is_naive(&self) -> bool {
        self.method == ForecastMethod::Naive
    }

    pub fn estimates(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.estimate).collect()
    }
}
