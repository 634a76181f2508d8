//! Feature builder trait definition.

use table_spi::{CleanTable, ColumnRoleMap};

use crate::error::Result;
use crate::model::FeatureMatrix;

/// Turns a clean table into one numeric vector per row.
///
/// Implementations must emit features in a stable order: header order,
/// and sorted categories within a column.
pub trait FeatureBuilder: Send + Sync {
    fn build(&self, clean: &CleanTable, roles: &ColumnRoleMap) -> Result<FeatureMatrix>;
}
