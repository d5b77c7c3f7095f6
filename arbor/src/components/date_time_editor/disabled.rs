//! Caller-supplied ranges of dates that should not be picked.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Deserialize;

/// A set of disabled dates. Only the calendar date is compared.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", content = "dates", rename_all = "snake_case")]
pub enum DateRange {
    /// Every date strictly after the given one.
    After(NaiveDate),
    /// Every date strictly before the given one.
    Before(NaiveDate),
    /// Every date between the two, inclusive. Order does not matter.
    Between(NaiveDate, NaiveDate),
    Specific(Vec<NaiveDate>),
    Weekdays,
    Weekends,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        match self {
            DateRange::After(after) => date > *after,
            DateRange::Before(before) => date < *before,
            DateRange::Between(a, b) => {
                let (start, end) = if a <= b { (a, b) } else { (b, a) };
                *start <= date && date <= *end
            }
            DateRange::Specific(dates) => dates.contains(&date),
            DateRange::Weekdays => !is_weekend(date),
            DateRange::Weekends => is_weekend(date),
        }
    }
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// True when any of `ranges` contains `date`.
pub fn is_date_in_ranges(date: NaiveDate, ranges: &[DateRange]) -> bool {
    ranges.iter().any(|range| range.contains(date))
}
