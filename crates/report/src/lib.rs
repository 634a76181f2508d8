//! Anomaly Reporting
//!
//! Turns detection results over a clean table into a ranked list of
//! flagged rows, per-group flagged counts, and short summary lines.

mod config;
mod error;
mod summary;

pub use config::{ReportConfig, ReportConfigBuilder};
pub use error::{ReportError, Result};
pub use summary::{
    group_counts, summarize, AnomalyReporter, AnomalySummary, GroupBreakdown, GroupCount, RankedRow,
};
