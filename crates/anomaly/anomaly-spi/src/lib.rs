//! Anomaly Detection Service Provider Interface
//!
//! Defines traits and types for anomaly detection over feature matrices
//! and single series.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{AnomalyDetector, SeriesDetector};
pub use error::{AnomalyError, Result};
pub use model::AnomalyResult;
