//! Feature Preparation API
//!
//! Configuration types and builders for imputation and categorical
//! encoding.

use serde::{Deserialize, Serialize};

// Re-export SPI types
pub use feature_spi::{Cleaner, FeatureBuilder, FeatureError, FeatureMatrix, Result};

/// Label for the bucket that collects categories outside the top-K.
pub const OTHER_CATEGORY: &str = "other";

// ============================================================================
// Feature Configuration
// ============================================================================

/// Encoding and imputation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Distinct-value count above which a column is bucketed into
    /// top-K + other (default: 50).
    pub max_categories: usize,
    /// Categories kept when bucketing (default: 20).
    pub top_k: usize,
    /// Category assigned to missing categorical cells (default: "missing").
    pub missing_label: String,
    /// Whether the target column is passed through as a feature
    /// (default: true).
    pub include_target: bool,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            max_categories: 50,
            top_k: 20,
            missing_label: table_spi::MISSING_CATEGORY.to_string(),
            include_target: true,
        }
    }
}

impl FeatureConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> FeatureConfigBuilder {
        FeatureConfigBuilder::new()
    }
}

/// Builder for FeatureConfig.
#[derive(Debug, Default)]
pub struct FeatureConfigBuilder {
    max_categories: Option<usize>,
    top_k: Option<usize>,
    missing_label: Option<String>,
    include_target: Option<bool>,
}

impl FeatureConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_categories(mut self, max: usize) -> Self {
        self.max_categories = Some(max);
        self
    }

    pub fn top_k(mut self, k: usize) -> Self {
        self.top_k = Some(k);
        self
    }

    pub fn missing_label(mut self, label: impl Into<String>) -> Self {
        self.missing_label = Some(label.into());
        self
    }

    pub fn include_target(mut self, include: bool) -> Self {
        self.include_target = Some(include);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> std::result::Result<FeatureConfig, &'static str> {
        let defaults = FeatureConfig::default();
        let config = FeatureConfig {
            max_categories: self.max_categories.unwrap_or(defaults.max_categories),
            top_k: self.top_k.unwrap_or(defaults.top_k),
            missing_label: self.missing_label.unwrap_or(defaults.missing_label),
            include_target: self.include_target.unwrap_or(defaults.include_target),
        };

        if config.top_k == 0 {
            return Err("top_k must be at least 1");
        }
        if config.top_k > config.max_categories {
            return Err("top_k cannot exceed max_categories");
        }
        if config.missing_label.is_empty() {
            return Err("missing_label cannot be empty");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FeatureConfig::default();
        assert_eq!(config.max_categories, 50);
        assert_eq!(config.top_k, 20);
        assert_eq!(config.missing_label, "missing");
        assert!(config.include_target);
    }

    #[test]
    fn test_builder_validation() {
        assert!(FeatureConfig::builder().top_k(0).build().is_err());
        assert!(FeatureConfig::builder().top_k(60).build().is_err());
        let config = FeatureConfig::builder()
            .max_categories(10)
            .top_k(3)
            .build()
            .unwrap();
        assert_eq!(config.top_k, 3);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: FeatureConfig = serde_json::from_str(r#"{"top_k": 5}"#).unwrap();
        assert_eq!(config.top_k, 5);
        assert_eq!(config.max_categories, 50);
    }
}
