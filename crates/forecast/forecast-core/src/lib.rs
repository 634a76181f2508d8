//! Forecast Core
//!
//! Linear-trend seasonal decomposition, cadence-based period selection,
//! residual confidence intervals, and the forecast engine tying them together.

pub mod confidence;
pub mod decomposition;
mod engine;
pub mod seasonality;

pub use confidence::{residual_std, z_score, RandomWalkIntervals, ResidualIntervals};
pub use decomposition::{decompose_linear_seasonal, least_squares, LinearSeasonalDecomposer};
pub use engine::ForecastEngine;
pub use seasonality::{detect_cadence, CadencePeriodDetector};
