//! Column roles.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};

/// What a column is used for downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    Date,
    Target,
    Numeric,
    Categorical,
    Identifier,
    Unused,
}

impl ColumnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnRole::Date => "date",
            ColumnRole::Target => "target",
            ColumnRole::Numeric => "numeric",
            ColumnRole::Categorical => "categorical",
            ColumnRole::Identifier => "identifier",
            ColumnRole::Unused => "unused",
        }
    }

    /// Target and numeric columns both hold parsed reals.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnRole::Target | ColumnRole::Numeric)
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source of the time axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "column", rename_all = "snake_case")]
pub enum TimeAxis {
    /// A real date column parsed for a majority of rows.
    Column(String),
    /// Row position used as the elapsed-period index.
    Synthetic,
}

/// Immutable column-to-role assignment, in header order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRoleMap {
    roles: Vec<(String, ColumnRole)>,
    time_axis: TimeAxis,
}

impl ColumnRoleMap {
    /// Build a role map, enforcing at most one date and one target column,
    /// and agreement between the date role and the time axis.
    pub fn new(roles: Vec<(String, ColumnRole)>, time_axis: TimeAxis) -> Result<Self> {
        let dates: Vec<&str> = roles
            .iter()
            .filter(|(_, r)| *r == ColumnRole::Date)
            .map(|(c, _)| c.as_str())
            .collect();
        let targets = roles.iter().filter(|(_, r)| *r == ColumnRole::Target).count();

        if dates.len() > 1 {
            return Err(TableError::Inconsistent(format!(
                "more than one date column: {}",
                dates.join(", ")
            )));
        }
        if targets > 1 {
            return Err(TableError::Inconsistent(
                "more than one target column".to_string(),
            ));
        }
        match (&time_axis, dates.first()) {
            (TimeAxis::Column(axis), Some(date)) if axis == date => {}
            (TimeAxis::Synthetic, None) => {}
            _ => {
                return Err(TableError::Inconsistent(
                    "date role and time axis disagree".to_string(),
                ))
            }
        }

        Ok(Self { roles, time_axis })
    }

    pub fn role(&self, column: &str) -> Option<ColumnRole> {
        self.roles
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, r)| *r)
    }

    /// Columns and roles in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ColumnRole)> + '_ {
        self.roles.iter().map(|(c, r)| (c.as_str(), *r))
    }

    pub fn columns_with(&self, role: ColumnRole) -> Vec<&str> {
        self.iter()
            .filter(|(_, r)| *r == role)
            .map(|(c, _)| c)
            .collect()
    }

    pub fn target(&self) -> Option<&str> {
        self.columns_with(ColumnRole::Target).into_iter().next()
    }

    /// Target column, or a schema error when the caller needs one.
    pub fn require_target(&self) -> Result<&str> {
        self.target().ok_or(TableError::TargetNotSpecified)
    }

    pub fn date_column(&self) -> Option<&str> {
        match &self.time_axis {
            TimeAxis::Column(c) => Some(c.as_str()),
            TimeAxis::Synthetic => None,
        }
    }

    pub fn time_axis(&self) -> &TimeAxis {
        &self.time_axis
    }

    pub fn has_real_dates(&self) -> bool {
        matches!(self.time_axis, TimeAxis::Column(_))
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles() -> Vec<(String, ColumnRole)> {
        vec![
            ("Date".to_string(), ColumnRole::Date),
            ("sales".to_string(), ColumnRole::Target),
            ("region".to_string(), ColumnRole::Categorical),
        ]
    }

    #[test]
    fn test_lookup() {
        let map = ColumnRoleMap::new(roles(), TimeAxis::Column("Date".to_string())).unwrap();
        assert_eq!(map.role("sales"), Some(ColumnRole::Target));
        assert_eq!(map.target(), Some("sales"));
        assert_eq!(map.date_column(), Some("Date"));
        assert!(map.has_real_dates());
        assert_eq!(map.columns_with(ColumnRole::Categorical), vec!["region"]);
        assert_eq!(map.role("missing"), None);
    }

    #[test]
    fn test_rejects_two_targets() {
        let mut r = roles();
        r.push(("other".to_string(), ColumnRole::Target));
        let result = ColumnRoleMap::new(r, TimeAxis::Column("Date".to_string()));
        assert!(matches!(result, Err(TableError::Inconsistent(_))));
    }

    #[test]
    fn test_rejects_axis_mismatch() {
        let result = ColumnRoleMap::new(roles(), TimeAxis::Synthetic);
        assert!(result.is_err());
    }

    #[test]
    fn test_require_target() {
        let map = ColumnRoleMap::new(
            vec![("x".to_string(), ColumnRole::Numeric)],
            TimeAxis::Synthetic,
        )
        .unwrap();
        assert_eq!(map.require_target(), Err(TableError::TargetNotSpecified));
        assert!(!map.has_real_dates());
    }

    #[test]
    fn test_role_display() {
        assert_eq!(ColumnRole::Categorical.to_string(), "categorical");
        assert!(ColumnRole::Target.is_numeric());
        assert!(!ColumnRole::Identifier.is_numeric());
    }
}
