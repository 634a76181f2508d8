//! Data models for anomaly detection.

mod anomaly_result;

pub use anomaly_result::AnomalyResult;
