//! Sampling cadence of a dated series.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Spacing between consecutive observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "days", rename_all = "snake_case")]
pub enum Cadence {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
    /// Dated, with a typical step of this many days.
    Irregular(i64),
    /// No calendar; periods are row positions.
    Index,
}

impl Cadence {
    /// Classify the typical day step between observations.
    pub fn from_step_days(days: i64) -> Self {
        match days {
            1 => Cadence::Daily,
            7 => Cadence::Weekly,
            28..=31 => Cadence::Monthly,
            89..=92 => Cadence::Quarterly,
            365 | 366 => Cadence::Yearly,
            d => Cadence::Irregular(d.max(1)),
        }
    }

    /// Seasonal periods worth trying, longest first.
    pub fn candidate_periods(&self) -> &'static [usize] {
        match self {
            Cadence::Daily => &[7],
            Cadence::Weekly => &[52, 4],
            Cadence::Monthly => &[12],
            Cadence::Quarterly => &[4],
            Cadence::Yearly => &[1],
            Cadence::Irregular(_) | Cadence::Index => &[12],
        }
    }

    /// Calendar date `steps` observations after `date`; `None` without a
    /// calendar or on overflow.
    pub fn advance(&self, date: NaiveDate, steps: u32) -> Option<NaiveDate> {
        match self {
            Cadence::Daily => date.checked_add_days(Days::new(steps as u64)),
            Cadence::Weekly => date.checked_add_days(Days::new(7 * steps as u64)),
            Cadence::Monthly => date.checked_add_months(Months::new(steps)),
            Cadence::Quarterly => date.checked_add_months(Months::new(3 * steps)),
            Cadence::Yearly => date.checked_add_months(Months::new(12 * steps)),
            Cadence::Irregular(days) => {
                date.checked_add_days(Days::new(*days as u64 * steps as u64))
            }
            Cadence::Index => None,
        }
    }
}
