//! Calendar helpers for bill records.

use std::{fmt, ops::RangeInclusive};

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Last day of the month the split between early and late bills falls on.
pub const EARLY_CUTOFF_DAY: u32 = 15;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
/// Half of the month a bill is funded from.
pub enum CadenceBucket {
    /// Due on days 1 through 15.
    Early,
    /// Due on day 16 through the end of the month.
    Late,
}

impl CadenceBucket {
    pub fn for_date(date: NaiveDate) -> Self {
        if date.day() <= EARLY_CUTOFF_DAY {
            CadenceBucket::Early
        } else {
            CadenceBucket::Late
        }
    }

    /// Days of the month covered by this bucket for the month containing `date`.
    pub fn day_range(self, date: NaiveDate) -> RangeInclusive<u32> {
        match self {
            CadenceBucket::Early => 1..=EARLY_CUTOFF_DAY,
            CadenceBucket::Late => {
                (EARLY_CUTOFF_DAY + 1)..=days_in_month(date.year(), date.month())
            }
        }
    }
}

impl fmt::Display for CadenceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CadenceBucket::Early => "1st half",
            CadenceBucket::Late => "2nd half",
        };
        f.write_str(label)
    }
}

/// Number of days in the given month, falling back to 28 for out-of-range input.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    match NaiveDate::from_ymd_opt(next_year, next_month, 1) {
        Some(first_next) => (first_next - Duration::days(1)).day(),
        None => 28,
    }
}
