//! Feature Service Provider Interface
//!
//! Defines the numeric feature matrix handed to detectors, and the
//! cleaning and feature-building contracts.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{Cleaner, FeatureBuilder};
pub use error::{FeatureError, Result};
pub use model::FeatureMatrix;
