//! Forecast Facade
//!
//! Unified re-exports for the forecasting module.
//!
//! This facade provides a single entry point to all forecasting functionality:
//! - `TimeSeries`, `ForecastPoint` and the decomposition/interval traits from SPI
//! - `ForecastConfig` from API
//! - `ForecastEngine` and the default implementations from Core

// Re-export everything from SPI
pub use forecast_spi::*;

// Re-export everything from API
pub use forecast_api::*;

// Re-export everything from Core
pub use forecast_core::*;
