//! Table Ingestion Core
//!
//! CSV reading, date parsing, column profiling, and role inference.

mod dates;
mod inference;
mod ingestor;
mod reader;
mod target;

pub use dates::parse_date;
pub use inference::{infer_role, ColumnProfile};
pub use ingestor::CsvIngestor;
pub use reader::{read_header, read_table};
pub use target::select_target;
