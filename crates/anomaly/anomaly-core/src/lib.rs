//! Anomaly Detection Core
//!
//! Isolation forest, contamination thresholding, and z-score rules.

mod isolation_forest;
mod threshold;
mod zscore;

pub use isolation_forest::{detect, IsolationForest, UNIFORM_SCORE};
pub use threshold::{average_path_length, contamination_threshold, expected_anomalies};
pub use zscore::ZScoreDetector;
