//! Feature matrix assembly.

use feature_api::{Cleaner, FeatureBuilder, FeatureConfig, FeatureError, FeatureMatrix, Result};
use table_spi::{CleanTable, ColumnData, ColumnRole, ColumnRoleMap, RawTable};

use crate::cleaner::TableCleaner;
use crate::encoding::CategoryEncoder;
use crate::temporal::{day_of_week, month};

/// Numeric pass-through, one-hot categories, and calendar features for a
/// real date axis.
#[derive(Debug, Clone, Default)]
pub struct TabularFeatureBuilder {
    config: FeatureConfig,
}

impl TabularFeatureBuilder {
    pub fn new(config: FeatureConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }
}

impl FeatureBuilder for TabularFeatureBuilder {
    fn build(&self, clean: &CleanTable, roles: &ColumnRoleMap) -> Result<FeatureMatrix> {
        for (name, _) in roles.iter() {
            if clean.column(name).is_none() {
                return Err(FeatureError::MissingColumn(name.to_string()));
            }
        }

        let mut features: Vec<(String, Vec<f64>)> = Vec::new();
        for column in clean.columns() {
            match (column.role, &column.data) {
                (ColumnRole::Target, ColumnData::Numeric(_)) if !self.config.include_target => {}
                (ColumnRole::Target | ColumnRole::Numeric, ColumnData::Numeric(values)) => {
                    features.push((column.name.clone(), values.clone()));
                }
                (ColumnRole::Categorical, ColumnData::Categorical(values)) => {
                    let encoder = CategoryEncoder::fit(values, &self.config);
                    if encoder.is_bucketed() {
                        tracing::debug!(
                            column = %column.name,
                            kept = encoder.categories().len() - 1,
                            "bucketed rare categories"
                        );
                    }
                    features.extend(
                        encoder
                            .feature_names(&column.name)
                            .into_iter()
                            .zip(encoder.encode(values)),
                    );
                }
                (ColumnRole::Date, ColumnData::Date(dates)) if roles.has_real_dates() => {
                    let name = &column.name;
                    features.push((
                        format!("{name}_day_of_week"),
                        dates.iter().map(|d| day_of_week(*d)).collect(),
                    ));
                    features.push((
                        format!("{name}_month"),
                        dates.iter().map(|d| month(*d)).collect(),
                    ));
                    features.push((
                        format!("{name}_elapsed"),
                        clean.period_index().iter().map(|&p| p as f64).collect(),
                    ));
                }
                _ => {}
            }
        }

        if features.is_empty() {
            return Err(FeatureError::NoFeatures);
        }
        let matrix = FeatureMatrix::from_columns(features, clean.n_rows())?;
        tracing::debug!(
            rows = matrix.n_rows(),
            features = matrix.n_features(),
            "built feature matrix"
        );
        Ok(matrix)
    }
}

/// Clean a raw table and build its features in one pass.
pub fn prepare(
    raw: &RawTable,
    roles: &ColumnRoleMap,
    config: &FeatureConfig,
) -> Result<(CleanTable, FeatureMatrix)> {
    let clean = TableCleaner::new(config.clone()).clean(raw, roles)?;
    let matrix = TabularFeatureBuilder::new(config.clone()).build(&clean, roles)?;
    Ok((clean, matrix))
}
