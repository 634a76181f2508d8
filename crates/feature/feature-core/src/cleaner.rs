//! Table cleaning: type coercion plus imputation.

use feature_api::{Cleaner, FeatureConfig, FeatureError, Result};
use table_core::parse_date;
use table_spi::{
    CleanColumn, CleanTable, ColumnData, ColumnRole, ColumnRoleMap, RawTable, RawValue,
    TableError,
};

use crate::imputation::{fill_dates, impute_categorical, impute_numeric};
use crate::temporal::{period_index, synthetic_index};

/// Default cleaner: median for numbers, sentinel for categories,
/// forward-fill for dates.
#[derive(Debug, Clone, Default)]
pub struct TableCleaner {
    config: FeatureConfig,
}

impl TableCleaner {
    pub fn new(config: FeatureConfig) -> Self {
        Self { config }
    }

    fn clean_column(&self, name: &str, role: ColumnRole, cells: &[&RawValue]) -> Result<CleanColumn> {
        let column = match role {
            ColumnRole::Target | ColumnRole::Numeric => {
                let values: Vec<Option<f64>> = cells.iter().map(|v| v.as_number()).collect();
                let (filled, imputed) = impute_numeric(&values);
                if imputed == cells.len() {
                    tracing::warn!(column = name, "numeric column has no values, filled with 0.0");
                }
                CleanColumn::new(name, role, ColumnData::Numeric(filled), imputed)
            }
            ColumnRole::Date => {
                let values: Vec<_> = cells
                    .iter()
                    .map(|v| v.as_string().and_then(|s| parse_date(&s)))
                    .collect();
                let (filled, imputed) = fill_dates(&values).ok_or_else(|| {
                    TableError::IncompatibleColumn {
                        column: name.to_string(),
                        role,
                        reason: "no cell parses as a date".to_string(),
                    }
                })?;
                CleanColumn::new(name, role, ColumnData::Date(filled), imputed)
            }
            ColumnRole::Categorical => {
                let values: Vec<Option<String>> = cells.iter().map(|v| v.as_string()).collect();
                let (filled, imputed) = impute_categorical(&values, &self.config.missing_label);
                CleanColumn::new(name, role, ColumnData::Categorical(filled), imputed)
            }
            ColumnRole::Identifier | ColumnRole::Unused => {
                let values = cells.iter().map(|v| v.as_string()).collect();
                CleanColumn::new(name, role, ColumnData::Text(values), 0)
            }
        };
        Ok(column)
    }
}

impl Cleaner for TableCleaner {
    fn clean(&self, raw: &RawTable, roles: &ColumnRoleMap) -> Result<CleanTable> {
        let mut columns = Vec::with_capacity(raw.n_columns());
        for (index, name) in raw.columns().iter().enumerate() {
            let role = roles
                .role(name)
                .ok_or_else(|| FeatureError::MissingColumn(name.clone()))?;
            let cells: Vec<&RawValue> = raw.column_values(index).collect();
            columns.push(self.clean_column(name, role, &cells)?);
        }

        let period = match roles.date_column() {
            Some(date) => match columns.iter().find(|c| c.name == date).map(|c| &c.data) {
                Some(ColumnData::Date(dates)) => period_index(dates),
                _ => return Err(FeatureError::MissingColumn(date.to_string())),
            },
            None => synthetic_index(raw.n_rows()),
        };

        let imputed: usize = columns.iter().map(|c| c.imputed).sum();
        tracing::debug!(rows = raw.n_rows(), imputed, "cleaned table");
        Ok(CleanTable::new(columns, period)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use table_spi::TimeAxis;

    fn raw() -> RawTable {
        table_core::read_table(
            b"Date,sales,region,id\n2024-03-01,30,North,a\n2024-01-01,,South,b\n,10,,c\n",
        )
        .unwrap()
    }

    fn roles() -> ColumnRoleMap {
        ColumnRoleMap::new(
            vec![
                ("Date".to_string(), ColumnRole::Date),
                ("sales".to_string(), ColumnRole::Target),
                ("region".to_string(), ColumnRole::Categorical),
                ("id".to_string(), ColumnRole::Identifier),
            ],
            TimeAxis::Column("Date".to_string()),
        )
        .unwrap()
    }

    #[test]
    fn test_clean_preserves_shape_and_imputes() {
        let clean = TableCleaner::default().clean(&raw(), &roles()).unwrap();

        assert_eq!(clean.n_rows(), 3);
        assert_eq!(clean.column_names(), vec!["Date", "sales", "region", "id"]);
        assert_eq!(clean.numeric("sales").unwrap(), &[30.0, 20.0, 10.0]);
        assert_eq!(clean.categorical("region").unwrap(), &["North", "South", "missing"]);
        assert_eq!(clean.column("sales").unwrap().imputed, 1);
        // third date forward-filled from the second
        assert_eq!(clean.display(2, "Date").as_deref(), Some("2024-01-01"));
        assert_eq!(clean.period_index(), &[2, 0, 1]);
    }

    #[test]
    fn test_synthetic_period_index() {
        let roles = ColumnRoleMap::new(
            vec![
                ("Date".to_string(), ColumnRole::Identifier),
                ("sales".to_string(), ColumnRole::Target),
                ("region".to_string(), ColumnRole::Categorical),
                ("id".to_string(), ColumnRole::Identifier),
            ],
            TimeAxis::Synthetic,
        )
        .unwrap();
        let clean = TableCleaner::default().clean(&raw(), &roles).unwrap();
        assert_eq!(clean.period_index(), &[0, 1, 2]);
    }

    #[test]
    fn test_unknown_column_in_roles() {
        let roles = ColumnRoleMap::new(
            vec![("sales".to_string(), ColumnRole::Target)],
            TimeAxis::Synthetic,
        )
        .unwrap();
        let err = TableCleaner::default().clean(&raw(), &roles).unwrap_err();
        assert_eq!(err, FeatureError::MissingColumn("Date".to_string()));
    }
}
