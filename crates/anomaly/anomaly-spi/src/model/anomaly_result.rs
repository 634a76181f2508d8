//! Anomaly detection result types.

use serde::{Deserialize, Serialize};

/// Anomaly detection result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyResult {
    /// Boolean mask indicating anomalies.
    pub is_anomaly: Vec<bool>,
    /// Anomaly scores for each row (lower = more anomalous).
    pub scores: Vec<f64>,
    /// Threshold used for detection.
    pub threshold: f64,
    /// Set when the result carries no real signal (too few rows,
    /// constant input).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl AnomalyResult {
    /// Create a new anomaly result.
    pub fn new(is_anomaly: Vec<bool>, scores: Vec<f64>, threshold: f64) -> Self {
        Self {
            is_anomaly,
            scores,
            threshold,
            note: None,
        }
    }

    /// Result with nothing flagged and a uniform score.
    pub fn low_confidence(n: usize, score: f64, note: impl Into<String>) -> Self {
        Self {
            is_anomaly: vec![false; n],
            scores: vec![score; n],
            threshold: score,
            note: Some(note.into()),
        }
    }

    /// Get indices of detected anomalies.
    pub fn anomaly_indices(&self) -> Vec<usize> {
        self.is_anomaly
            .iter()
            .enumerate()
            .filter_map(|(i, &is_anomaly)| if is_anomaly { Some(i) } else { None })
            .collect()
    }

    /// Count of detected anomalies.
    pub fn anomaly_count(&self) -> usize {
        self.is_anomaly.iter().filter(|&&x| x).count()
    }

    /// Flagged share of all rows.
    pub fn anomaly_fraction(&self) -> f64 {
        if self.is_anomaly.is_empty() {
            0.0
        } else {
            self.anomaly_count() as f64 / self.is_anomaly.len() as f64
        }
    }

    pub fn len(&self) -> usize {
        self.is_anomaly.len()
    }

    pub fn is_empty(&self) -> bool {
        self.is_anomaly.is_empty()
    }

    pub fn is_low_confidence(&self) -> bool {
        self.note.is_some()
    }

    /// Union of two flag sets over the same rows; scores and threshold are
    /// kept from `self`.
    pub fn union(&self, other: &[bool]) -> Self {
        let is_anomaly = self
            .is_anomaly
            .iter()
            .zip(other.iter().chain(std::iter::repeat(&false)))
            .map(|(a, b)| *a || *b)
            .collect();
        Self {
            is_anomaly,
            ..self.clone()
        }
    }
}
