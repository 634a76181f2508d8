//! Cleaner trait definition.

use table_spi::{CleanTable, ColumnRoleMap, RawTable};

use crate::error::Result;

/// Imputes missing cells and coerces columns to their role's type.
pub trait Cleaner: Send + Sync {
    /// Produce a clean table with the same rows and columns as `raw`.
    fn clean(&self, raw: &RawTable, roles: &ColumnRoleMap) -> Result<CleanTable>;
}
