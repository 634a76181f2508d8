//! Model module containing data structures for tabular analysis

mod clean;
mod raw;
mod request;
mod role;

pub use clean::{CleanColumn, CleanTable, ColumnData, MISSING_CATEGORY};
pub use raw::{RawTable, RawValue};
pub use request::{IngestRequest, TargetPolicy};
pub use role::{ColumnRole, ColumnRoleMap, TimeAxis};
