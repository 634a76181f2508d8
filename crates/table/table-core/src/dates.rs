//! Date parsing for upload cells.

use chrono::{NaiveDate, NaiveDateTime};

/// Calendar formats tried in order; month-first wins over day-first for
/// ambiguous slash dates.
const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y", "%Y/%m/%d", "%d-%m-%Y", "%d.%m.%Y",
];

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%m/%d/%Y %H:%M"];

/// Parse a date, a datetime (time discarded), or a year-month (first day).
pub fn parse_date(cell: &str) -> Option<NaiveDate> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(datetime.date());
        }
    }
    // Year-month buckets such as "2024-03"
    if trimmed.len() == 7 {
        if let Ok(date) = NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d") {
            return Some(date);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_iso() {
        assert_eq!(parse_date("2024-03-15"), Some(ymd(2024, 3, 15)));
    }

    #[test]
    fn test_slash_formats() {
        assert_eq!(parse_date("03/15/2024"), Some(ymd(2024, 3, 15)));
        // Day-first only when month-first is impossible
        assert_eq!(parse_date("15/03/2024"), Some(ymd(2024, 3, 15)));
        assert_eq!(parse_date("2024/03/15"), Some(ymd(2024, 3, 15)));
    }

    #[test]
    fn test_datetime_and_year_month() {
        assert_eq!(parse_date("2024-03-15 10:30:00"), Some(ymd(2024, 3, 15)));
        assert_eq!(parse_date("2024-03"), Some(ymd(2024, 3, 1)));
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date("2024-13-01"), None);
    }
}
