//! CSV ingestor implementation.

use table_api::IngestConfig;
use table_spi::{
    ColumnRole, ColumnRoleMap, IngestRequest, RawTable, Result, TableError, TableIngestor,
    TargetPolicy, TimeAxis,
};

use crate::inference::{infer_role, ColumnProfile};
use crate::reader::{read_header, read_table};
use crate::target::select_target;

/// Ingests comma-separated uploads.
#[derive(Debug, Clone, Default)]
pub struct CsvIngestor {
    config: IngestConfig,
}

impl CsvIngestor {
    pub fn new(config: IngestConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Header-level checks, run before any record is read.
    fn validate_header(&self, header: &[String], request: &IngestRequest) -> Result<()> {
        let mut missing: Vec<String> = request
            .required_columns
            .iter()
            .filter(|c| !header.contains(c))
            .cloned()
            .collect();
        if let Some(target) = &request.target_column {
            if !header.contains(target) && !missing.contains(target) {
                missing.push(target.clone());
            }
        }
        if !missing.is_empty() {
            return Err(TableError::MissingColumns { columns: missing });
        }

        if request.target_column.is_none() && request.target_policy == TargetPolicy::Required {
            return Err(TableError::TargetNotSpecified);
        }
        Ok(())
    }

    fn resolve_time_axis(
        &self,
        table: &RawTable,
        profiles: &[ColumnProfile],
        request: &IngestRequest,
    ) -> TimeAxis {
        let Some(name) = request.date_column.as_deref() else {
            tracing::debug!("no date column configured, using synthetic time index");
            return TimeAxis::Synthetic;
        };
        let Some(index) = table.column_index(name) else {
            tracing::warn!(column = name, "date column not found, using synthetic time index");
            return TimeAxis::Synthetic;
        };
        let profile = &profiles[index];
        if profile.is_date(&self.config) {
            TimeAxis::Column(name.to_string())
        } else {
            tracing::warn!(
                column = name,
                parsed = profile.dates,
                rows = profile.rows,
                "date column unparsable for most rows, using synthetic time index"
            );
            TimeAxis::Synthetic
        }
    }
}

impl TableIngestor for CsvIngestor {
    fn ingest(&self, raw: &[u8], request: &IngestRequest) -> Result<(RawTable, ColumnRoleMap)> {
        let header = read_header(raw)?;
        self.validate_header(&header, request)?;

        let table = read_table(raw)?;
        let profiles: Vec<ColumnProfile> = (0..table.n_columns())
            .map(|i| ColumnProfile::scan(table.column_values(i)))
            .collect();

        let time_axis = self.resolve_time_axis(&table, &profiles, request);
        let date_column = match &time_axis {
            TimeAxis::Column(c) => Some(c.as_str()),
            TimeAxis::Synthetic => None,
        };

        let mut roles = Vec::with_capacity(table.n_columns());
        for (name, profile) in table.columns().iter().zip(&profiles) {
            let role = if request.target_column.as_deref() == Some(name.as_str()) {
                if !profile.is_numeric(&self.config) {
                    return Err(TableError::IncompatibleColumn {
                        column: name.clone(),
                        role: ColumnRole::Target,
                        reason: format!(
                            "{} of {} non-empty values are not numeric",
                            profile.non_empty - profile.numeric,
                            profile.non_empty
                        ),
                    });
                }
                ColumnRole::Target
            } else if date_column == Some(name.as_str()) {
                ColumnRole::Date
            } else {
                infer_role(profile, &self.config)
            };
            roles.push((name.clone(), role));
        }

        if request.target_column.is_none() && request.target_policy == TargetPolicy::AutoSelect {
            let candidates: Vec<usize> = roles
                .iter()
                .enumerate()
                .filter(|(_, (_, r))| *r == ColumnRole::Numeric)
                .map(|(i, _)| i)
                .collect();
            let index = select_target(&table, &candidates, &self.config)
                .ok_or(TableError::NoNumericColumn)?;
            tracing::info!(column = %roles[index].0, "auto-selected target column");
            roles[index].1 = ColumnRole::Target;
        }

        let role_map = ColumnRoleMap::new(roles, time_axis)?;
        tracing::debug!(
            rows = table.n_rows(),
            columns = table.n_columns(),
            "ingested table"
        );
        Ok((table, role_map))
    }
}
