//! Model module containing data structures

mod cadence;
mod confidence_interval;
mod decomposition_result;
mod forecast_point;
mod time_series;

pub use cadence::Cadence;
pub use confidence_interval::ConfidenceInterval;
pub use decomposition_result::DecompositionResult;
pub use forecast_point::{ForecastMethod, ForecastOutcome, ForecastPoint};
pub use time_series::TimeSeries;
