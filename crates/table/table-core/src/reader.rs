//! CSV reading.

use table_spi::{RawTable, RawValue, Result, TableError};

fn reader(raw: &[u8]) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(raw)
}

/// Read only the header row.
pub fn read_header(raw: &[u8]) -> Result<Vec<String>> {
    let mut rdr = reader(raw);
    let headers = rdr
        .headers()
        .map_err(|e| TableError::ParseError(format!("failed to read header: {e}")))?;

    let columns: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches('\u{feff}').to_string()
            } else {
                h.to_string()
            }
        })
        .collect();

    if columns.is_empty() || columns.iter().all(|c| c.is_empty()) {
        return Err(TableError::Empty("header row is missing".to_string()));
    }
    Ok(columns)
}

/// Read the whole upload into a raw table.
pub fn read_table(raw: &[u8]) -> Result<RawTable> {
    let columns = read_header(raw)?;
    let mut rdr = reader(raw);

    let mut rows = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record.map_err(|e| TableError::ParseError(format!("row {}: {e}", i + 1)))?;
        rows.push(record.iter().map(RawValue::parse).collect());
    }

    RawTable::new(columns, rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_table() {
        let csv = b"Date, sales ,region\n2024-01-01,10,North\n2024-02-01,,South\n";
        let table = read_table(csv).unwrap();
        assert_eq!(table.columns(), &["Date", "sales", "region"]);
        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.rows()[1][1], RawValue::Empty);
        assert_eq!(table.rows()[0][1], RawValue::Number(10.0));
    }

    #[test]
    fn test_strips_bom() {
        let csv = "\u{feff}a,b\n1,2\n".as_bytes();
        assert_eq!(read_header(csv).unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_header_only_is_empty() {
        let result = read_table(b"a,b\n");
        assert!(matches!(result, Err(TableError::Empty(_))));
    }

    #[test]
    fn test_ragged_record_is_parse_error() {
        let result = read_table(b"a,b\n1,2\n3\n");
        assert!(matches!(result, Err(TableError::ParseError(_))));
    }
}
