//! Table Service Provider Interface
//!
//! Defines the tabular data model, column roles, and the ingestion contract
//! shared by every analysis stage.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::TableIngestor;
pub use error::{Result, TableError};
pub use model::{
    CleanColumn, CleanTable, ColumnData, ColumnRole, ColumnRoleMap, IngestRequest, RawTable,
    RawValue, TargetPolicy, TimeAxis, MISSING_CATEGORY,
};
