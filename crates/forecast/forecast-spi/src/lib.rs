//! Forecast Service Provider Interface
//!
//! Defines the time series and forecast models, and the traits for
//! decomposition, period selection, and interval computation.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{ConfidenceIntervalComputer, Decomposer, SeasonalityDetector};
pub use error::{ForecastError, Result};
pub use model::{
    Cadence, ConfidenceInterval, DecompositionResult, ForecastMethod, ForecastOutcome,
    ForecastPoint, TimeSeries,
};
