//! Contract module containing trait definitions for table ingestion

mod table_ingestor;

pub use table_ingestor::TableIngestor;
