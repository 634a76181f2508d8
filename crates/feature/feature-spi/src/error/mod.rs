//! Error module containing error types and result aliases

mod feature_error;

pub use feature_error::FeatureError;

/// Result type for feature operations.
pub type Result<T> = std::result::Result<T, FeatureError>;
