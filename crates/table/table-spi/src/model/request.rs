//! Ingestion request.

use serde::{Deserialize, Serialize};

/// How the ingestor resolves the target column when none is named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetPolicy {
    /// A named target must be given.
    #[default]
    Required,
    /// Pick the most plausible numeric column.
    AutoSelect,
    /// No target role is assigned.
    Ignore,
}

/// Per-upload column expectations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngestRequest {
    pub required_columns: Vec<String>,
    pub date_column: Option<String>,
    pub target_column: Option<String>,
    pub target_policy: TargetPolicy,
}

impl IngestRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require(mut self, column: impl Into<String>) -> Self {
        let column = column.into();
        if !self.required_columns.contains(&column) {
            self.required_columns.push(column);
        }
        self
    }

    pub fn date_column(mut self, column: Option<impl Into<String>>) -> Self {
        self.date_column = column.map(Into::into).filter(|c: &String| !c.trim().is_empty());
        self
    }

    pub fn target_column(mut self, column: Option<impl Into<String>>) -> Self {
        self.target_column = column.map(Into::into).filter(|c: &String| !c.trim().is_empty());
        self
    }

    pub fn target_policy(mut self, policy: TargetPolicy) -> Self {
        self.target_policy = policy;
        self
    }
}
