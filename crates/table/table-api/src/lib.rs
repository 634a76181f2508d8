//! Table Ingestion API
//!
//! Configuration types and builders for CSV ingestion and column-role
//! inference.

use serde::{Deserialize, Serialize};

// Re-export SPI types
pub use table_spi::{
    CleanColumn, CleanTable, ColumnData, ColumnRole, ColumnRoleMap, IngestRequest, RawTable,
    RawValue, Result, TableError, TableIngestor, TargetPolicy, TimeAxis, MISSING_CATEGORY,
};

/// Keywords that mark a numeric column as the likely amount/target.
pub const DEFAULT_AMOUNT_KEYWORDS: [&str; 5] = ["amount", "value", "sales", "revenue", "balance"];

// ============================================================================
// Ingestion Configuration
// ============================================================================

/// Thresholds for column-role inference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Max fraction of non-empty cells allowed to fail numeric parsing
    /// before a column stops being numeric (default: 0.05).
    pub numeric_tolerance: f64,
    /// Fraction of all rows that must parse as dates for the date column
    /// to be used as the time axis (default: 0.5, strict majority).
    pub date_majority: f64,
    /// Max distinct/non-empty ratio for a text column to be categorical
    /// (default: 0.5).
    pub max_categorical_ratio: f64,
    /// Hard cap on distinct values for a categorical column (default: 1000).
    pub max_distinct: usize,
    /// Lower-case keywords for target auto-selection.
    pub amount_keywords: Vec<String>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            numeric_tolerance: 0.05,
            date_majority: 0.5,
            max_categorical_ratio: 0.5,
            max_distinct: 1000,
            amount_keywords: DEFAULT_AMOUNT_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
        }
    }
}

impl IngestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> IngestConfigBuilder {
        IngestConfigBuilder::new()
    }
}

/// Builder for IngestConfig.
#[derive(Debug, Default)]
pub struct IngestConfigBuilder {
    numeric_tolerance: Option<f64>,
    date_majority: Option<f64>,
    max_categorical_ratio: Option<f64>,
    max_distinct: Option<usize>,
    amount_keywords: Option<Vec<String>>,
}

impl IngestConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn numeric_tolerance(mut self, tolerance: f64) -> Self {
        self.numeric_tolerance = Some(tolerance);
        self
    }

    pub fn date_majority(mut self, fraction: f64) -> Self {
        self.date_majority = Some(fraction);
        self
    }

    pub fn max_categorical_ratio(mut self, ratio: f64) -> Self {
        self.max_categorical_ratio = Some(ratio);
        self
    }

    pub fn max_distinct(mut self, max: usize) -> Self {
        self.max_distinct = Some(max);
        self
    }

    pub fn amount_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.amount_keywords = Some(
            keywords
                .into_iter()
                .map(|k| k.into().to_lowercase())
                .collect(),
        );
        self
    }

    /// Build the configuration.
    pub fn build(self) -> std::result::Result<IngestConfig, &'static str> {
        let defaults = IngestConfig::default();
        let config = IngestConfig {
            numeric_tolerance: self.numeric_tolerance.unwrap_or(defaults.numeric_tolerance),
            date_majority: self.date_majority.unwrap_or(defaults.date_majority),
            max_categorical_ratio: self
                .max_categorical_ratio
                .unwrap_or(defaults.max_categorical_ratio),
            max_distinct: self.max_distinct.unwrap_or(defaults.max_distinct),
            amount_keywords: self.amount_keywords.unwrap_or(defaults.amount_keywords),
        };

        if !(0.0..1.0).contains(&config.numeric_tolerance) {
            return Err("numeric_tolerance must be in [0, 1)");
        }
        if !(0.0..1.0).contains(&config.date_majority) {
            return Err("date_majority must be in [0, 1)");
        }
        if !(0.0..=1.0).contains(&config.max_categorical_ratio) {
            return Err("max_categorical_ratio must be in [0, 1]");
        }
        Ok(config)
    }
}
