//! Table Ingestion Facade
//!
//! Unified re-exports for the table module:
//! - `TableIngestor` trait, data model and `TableError` from SPI
//! - `IngestConfig` from API
//! - `CsvIngestor` and inference helpers from Core

// Re-export everything from SPI
pub use table_spi::*;

// Re-export everything from API
pub use table_api::*;

// Re-export everything from Core
pub use table_core::*;
