//! Error module containing error types and result aliases

mod table_error;

pub use table_error::TableError;

/// Result type for table operations.
pub type Result<T> = std::result::Result<T, TableError>;
