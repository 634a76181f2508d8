//! Column profiling and role inference.

use std::collections::HashSet;

use table_api::IngestConfig;
use table_spi::{ColumnRole, RawValue};

use crate::dates::parse_date;

/// Cell statistics for one column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnProfile {
    pub rows: usize,
    pub non_empty: usize,
    pub numeric: usize,
    pub dates: usize,
    pub distinct: usize,
}

impl ColumnProfile {
    /// Scan a column once.
    pub fn scan<'a>(values: impl Iterator<Item = &'a RawValue>) -> Self {
        let mut profile = ColumnProfile::default();
        let mut seen: HashSet<String> = HashSet::new();

        for value in values {
            profile.rows += 1;
            match value {
                RawValue::Empty => continue,
                RawValue::Number(_) => profile.numeric += 1,
                RawValue::Text(text) => {
                    if parse_date(text).is_some() {
                        profile.dates += 1;
                    }
                }
            }
            profile.non_empty += 1;
            if let Some(s) = value.as_string() {
                seen.insert(s);
            }
        }

        profile.distinct = seen.len();
        profile
    }

    /// Numeric when unparsable cells stay within tolerance.
    pub fn is_numeric(&self, config: &IngestConfig) -> bool {
        if self.non_empty == 0 {
            return false;
        }
        let failed = (self.non_empty - self.numeric) as f64 / self.non_empty as f64;
        failed <= config.numeric_tolerance
    }

    /// Dates parsed for a strict majority of all rows.
    pub fn is_date(&self, config: &IngestConfig) -> bool {
        self.rows > 0 && self.dates as f64 / self.rows as f64 > config.date_majority
    }

    pub fn distinct_ratio(&self) -> f64 {
        if self.non_empty == 0 {
            0.0
        } else {
            self.distinct as f64 / self.non_empty as f64
        }
    }
}

/// Role for a column that is neither the date axis nor the target.
pub fn infer_role(profile: &ColumnProfile, config: &IngestConfig) -> ColumnRole {
    if profile.non_empty == 0 {
        ColumnRole::Unused
    } else if profile.is_numeric(config) {
        ColumnRole::Numeric
    } else if profile.distinct <= config.max_distinct
        && profile.distinct_ratio() <= config.max_categorical_ratio
    {
        ColumnRole::Categorical
    } else {
        ColumnRole::Identifier
    }
}
