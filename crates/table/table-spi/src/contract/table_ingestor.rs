//! Table ingestor trait definition.

use crate::error::Result;
use crate::model::{ColumnRoleMap, IngestRequest, RawTable};

/// Turns uploaded bytes into a validated table and its column roles.
///
/// Implementations must validate the header against the request before
/// reading any records, so schema failures never process a single row.
pub trait TableIngestor: Send + Sync {
    /// Parse, validate, and infer column roles.
    fn ingest(&self, raw: &[u8], request: &IngestRequest) -> Result<(RawTable, ColumnRoleMap)>;
}
