//! Ingest-and-prepare stage shared by every routine.

use feature_facade::{prepare, FeatureConfig, FeatureMatrix};
use table_facade::{CleanTable, ColumnRoleMap, CsvIngestor, IngestRequest, RawTable, TableIngestor};

use crate::error::Result;

/// One upload after ingestion, cleaning, and feature building.
#[derive(Debug, Clone)]
pub struct Prepared {
    pub raw: RawTable,
    pub roles: ColumnRoleMap,
    pub clean: CleanTable,
    pub matrix: FeatureMatrix,
}

/// Parse `csv`, assign column roles, impute, and build the feature matrix.
pub fn load(csv: &[u8], request: &IngestRequest) -> Result<Prepared> {
    let (raw, roles) = CsvIngestor::default().ingest(csv, request)?;
    let (clean, matrix) = prepare(&raw, &roles, &FeatureConfig::default())?;
    tracing::debug!(
        rows = clean.n_rows(),
        columns = raw.n_columns(),
        features = matrix.n_features(),
        real_dates = roles.has_real_dates(),
        "prepared upload"
    );
    Ok(Prepared {
        raw,
        roles,
        clean,
        matrix,
    })
}

/// Row positions sorted by elapsed period, ties in table order.
pub fn chronological_order(clean: &CleanTable) -> Vec<usize> {
    let periods = clean.period_index();
    let mut order: Vec<usize> = (0..clean.n_rows()).collect();
    order.sort_by_key(|&i| periods[i]);
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use table_facade::TargetPolicy;

    #[test]
    fn test_load_and_order() {
        let csv = b"Date,sales\n2024-03-01,3\n2024-01-01,1\n2024-02-01,2\n";
        let request = IngestRequest::new()
            .date_column(Some("Date"))
            .target_column(Some("sales"));
        let prepared = load(csv, &request).unwrap();
        assert_eq!(prepared.clean.n_rows(), 3);
        assert_eq!(prepared.matrix.n_rows(), 3);
        assert_eq!(chronological_order(&prepared.clean), vec![1, 2, 0]);
    }

    #[test]
    fn test_load_propagates_schema_errors() {
        let request = IngestRequest::new()
            .require("amount")
            .target_policy(TargetPolicy::Ignore);
        assert!(load(b"a,b\n1,2\n", &request).is_err());
    }
}
