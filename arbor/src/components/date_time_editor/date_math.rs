//! Field-scoped spin arithmetic.
//!
//! Every function is pure and returns a new value. With `spin_loop` a field
//! wraps at its natural boundary; without it the field clamps. No field
//! carries into its neighbour: spinning the day past the end of the month
//! never changes the month.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, Timelike};

/// Number of days in `month` (1-based) of `year`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .and_then(|next| next.pred_opt())
        .map_or(31, |last| last.day())
}

/// Move `value` by `delta` inside `min..=max`.
fn spin_in_range(value: i64, delta: i64, min: i64, max: i64, spin_loop: bool) -> i64 {
    let next = value + delta;
    if spin_loop {
        let span = max - min + 1;
        min + (next - min).rem_euclid(span)
    } else {
        next.clamp(min, max)
    }
}

/// Rebuild a date-time from parts, keeping the day within the month.
fn with_date(value: NaiveDateTime, year: i32, month: u32, day: u32) -> NaiveDateTime {
    let day = day.min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
        .map(|d| d.and_time(value.time()))
        .unwrap_or(value)
}

pub fn spin_date(delta: i32, value: NaiveDateTime, spin_loop: bool) -> NaiveDateTime {
    let max = days_in_month(value.year(), value.month());
    let day = spin_in_range(value.day() as i64, delta as i64, 1, max as i64, spin_loop);
    with_date(value, value.year(), value.month(), day as u32)
}

pub fn spin_month(delta: i32, value: NaiveDateTime, spin_loop: bool) -> NaiveDateTime {
    let month = spin_in_range(value.month() as i64, delta as i64, 1, 12, spin_loop);
    with_date(value, value.year(), month as u32, value.day())
}

/// Years have no natural boundary and never wrap.
pub fn spin_year(delta: i32, value: NaiveDateTime) -> NaiveDateTime {
    let year = value.year().saturating_add(delta);
    with_date(value, year, value.month(), value.day())
}

pub fn spin_hours(delta: i32, value: NaiveDateTime, spin_loop: bool) -> NaiveDateTime {
    let hour = spin_in_range(value.hour() as i64, delta as i64, 0, 23, spin_loop);
    value.with_hour(hour as u32).unwrap_or(value)
}

pub fn spin_minutes(delta: i32, value: NaiveDateTime, spin_loop: bool) -> NaiveDateTime {
    let minute = spin_in_range(value.minute() as i64, delta as i64, 0, 59, spin_loop);
    value.with_minute(minute as u32).unwrap_or(value)
}

pub fn spin_seconds(delta: i32, value: NaiveDateTime, spin_loop: bool) -> NaiveDateTime {
    let second = spin_in_range(value.second() as i64, delta as i64, 0, 59, spin_loop);
    value.with_second(second as u32).unwrap_or(value)
}

/// Flip between AM and PM, keeping minutes and seconds.
pub fn spin_am_pm(value: NaiveDateTime) -> NaiveDateTime {
    let hour = value.hour();
    let flipped = if hour >= 12 { hour - 12 } else { hour + 12 };
    value.with_hour(flipped).unwrap_or(value)
}
