//! Report configuration.

use serde::{Deserialize, Serialize};

/// How many rows and groups a summary keeps, and what to call flagged rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Flagged rows listed in the ranking (default: 5).
    pub top_n: usize,
    /// Groups listed per category breakdown (default: 10).
    pub category_top_n: usize,
    /// Plural noun used in summary lines (default: "anomalies").
    pub noun: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: 5,
            category_top_n: 10,
            noun: "anomalies".to_string(),
        }
    }
}

impl ReportConfig {
    pub fn builder() -> ReportConfigBuilder {
        ReportConfigBuilder::new()
    }
}

/// Builder for ReportConfig.
#[derive(Debug, Default)]
pub struct ReportConfigBuilder {
    top_n: Option<usize>,
    category_top_n: Option<usize>,
    noun: Option<String>,
}

impl ReportConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn top_n(mut self, n: usize) -> Self {
        self.top_n = Some(n);
        self
    }

    pub fn category_top_n(mut self, n: usize) -> Self {
        self.category_top_n = Some(n);
        self
    }

    pub fn noun(mut self, noun: impl Into<String>) -> Self {
        self.noun = Some(noun.into());
        self
    }

    pub fn build(self) -> ReportConfig {
        let defaults = ReportConfig::default();
        ReportConfig {
            top_n: self.top_n.unwrap_or(defaults.top_n),
            category_top_n: self.category_top_n.unwrap_or(defaults.category_top_n),
            noun: self.noun.unwrap_or(defaults.noun),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_defaults() {
        let config = ReportConfig::builder().noun("suspicious transactions").build();
        assert_eq!(config.top_n, 5);
        assert_eq!(config.category_top_n, 10);
        assert_eq!(config.noun, "suspicious transactions");
    }
}
