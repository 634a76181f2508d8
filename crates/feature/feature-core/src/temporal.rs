//! Date-derived features.

use chrono::{Datelike, NaiveDate};

/// Elapsed-period index: each row's position after a stable sort by date.
pub fn period_index(dates: &[NaiveDate]) -> Vec<i64> {
    let mut order: Vec<usize> = (0..dates.len()).collect();
    order.sort_by_key(|&i| dates[i]);
    let mut index = vec![0; dates.len()];
    for (rank, &row) in order.iter().enumerate() {
        index[row] = rank as i64;
    }
    index
}

/// Row position as the period index for tables without real dates.
pub fn synthetic_index(n_rows: usize) -> Vec<i64> {
    (0..n_rows as i64).collect()
}

/// Day of week with Monday = 0.
pub fn day_of_week(date: NaiveDate) -> f64 {
    date.weekday().num_days_from_monday() as f64
}

/// Month of year, 1 to 12.
pub fn month(date: NaiveDate) -> f64 {
    date.month() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_period_index_is_stable_rank() {
        let dates = [ymd(2024, 3, 1), ymd(2024, 1, 1), ymd(2024, 3, 1), ymd(2024, 2, 1)];
        assert_eq!(period_index(&dates), vec![2, 0, 3, 1]);
    }

    #[test]
    fn test_calendar_features() {
        // 2024-01-01 was a Monday
        assert_eq!(day_of_week(ymd(2024, 1, 1)), 0.0);
        assert_eq!(day_of_week(ymd(2024, 1, 7)), 6.0);
        assert_eq!(month(ymd(2024, 12, 31)), 12.0);
    }

    #[test]
    fn test_synthetic_index() {
        assert_eq!(synthetic_index(3), vec![0, 1, 2]);
    }
}
