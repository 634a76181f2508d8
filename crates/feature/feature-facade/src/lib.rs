//! Feature Preparation Facade
//!
//! Unified re-exports for the feature module:
//! - `Cleaner`, `FeatureBuilder` traits and `FeatureMatrix` from SPI
//! - `FeatureConfig` from API
//! - `TableCleaner`, `TabularFeatureBuilder` and helpers from Core

// Re-export everything from SPI
pub use feature_spi::*;

// Re-export everything from API
pub use feature_api::*;

// Re-export everything from Core
pub use feature_core::*;
