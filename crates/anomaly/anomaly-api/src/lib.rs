//! Anomaly Detection API
//!
//! Configuration types and builders for anomaly detection.

use serde::{Deserialize, Serialize};

// Re-export SPI types
pub use anomaly_spi::{AnomalyDetector, AnomalyError, AnomalyResult, Result, SeriesDetector};

/// Rows below which isolation scores carry no signal.
pub const MIN_ROWS: usize = 10;

// ============================================================================
// Isolation Forest Configuration
// ============================================================================

/// Isolation forest configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IsolationForestConfig {
    /// Number of isolation trees (default: 100).
    pub n_trees: usize,
    /// Maximum rows drawn per tree (default: 256).
    pub sample_size: usize,
    /// Expected share of anomalous rows, in (0, 0.5) (default: 0.01).
    pub contamination: f64,
    /// Seed for tree construction (default: 42).
    pub seed: u64,
}

impl Default for IsolationForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            sample_size: 256,
            contamination: 0.01,
            seed: 42,
        }
    }
}

impl IsolationForestConfig {
    pub fn new(contamination: f64) -> Self {
        Self {
            contamination,
            ..Self::default()
        }
    }

    pub fn builder() -> IsolationForestConfigBuilder {
        IsolationForestConfigBuilder::new()
    }

    /// Check parameter ranges.
    pub fn validate(&self) -> Result<()> {
        if !(self.contamination > 0.0 && self.contamination < 0.5) {
            return Err(AnomalyError::invalid_parameter(
                "contamination",
                format!("must be in (0, 0.5), got {}", self.contamination),
            ));
        }
        if self.n_trees == 0 {
            return Err(AnomalyError::invalid_parameter("n_trees", "must be at least 1"));
        }
        if self.sample_size < 2 {
            return Err(AnomalyError::invalid_parameter("sample_size", "must be at least 2"));
        }
        Ok(())
    }
}

/// Builder for IsolationForestConfig.
#[derive(Debug, Default)]
pub struct IsolationForestConfigBuilder {
    n_trees: Option<usize>,
    sample_size: Option<usize>,
    contamination: Option<f64>,
    seed: Option<u64>,
}

impl IsolationForestConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn n_trees(mut self, n: usize) -> Self {
        self.n_trees = Some(n);
        self
    }

    pub fn sample_size(mut self, size: usize) -> Self {
        self.sample_size = Some(size);
        self
    }

    pub fn contamination(mut self, contamination: f64) -> Self {
        self.contamination = Some(contamination);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<IsolationForestConfig> {
        let defaults = IsolationForestConfig::default();
        let config = IsolationForestConfig {
            n_trees: self.n_trees.unwrap_or(defaults.n_trees),
            sample_size: self.sample_size.unwrap_or(defaults.sample_size),
            contamination: self.contamination.unwrap_or(defaults.contamination),
            seed: self.seed.unwrap_or(defaults.seed),
        };
        config.validate()?;
        Ok(config)
    }
}

// ============================================================================
// Z-Score Configuration
// ============================================================================

/// Which side of the mean counts as anomalous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tail {
    Upper,
    Lower,
    #[default]
    Both,
}

/// Z-Score detector configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZScoreConfig {
    /// Z-score threshold for anomaly detection (default: 3.0).
    pub threshold: f64,
    /// Tail(s) tested against the threshold (default: both).
    pub tail: Tail,
}

impl Default for ZScoreConfig {
    fn default() -> Self {
        Self {
            threshold: 3.0,
            tail: Tail::Both,
        }
    }
}

impl ZScoreConfig {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    pub fn with_tail(mut self, tail: Tail) -> Self {
        self.tail = tail;
        self
    }
}
