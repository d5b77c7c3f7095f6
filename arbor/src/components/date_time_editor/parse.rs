//! Reading a date back out of a filled mask.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

use super::date_math::days_in_month;
use super::part::{DatePart, DatePartInfo};

/// Resolve a two-digit year.
///
/// With a reference year the result stays in that century. Without one,
/// `00..=49` maps to 20xx and `50..=99` to 19xx.
pub fn resolve_two_digit_year(short: i32, reference: Option<i32>) -> i32 {
    match reference {
        Some(year) => year - year.rem_euclid(100) + short,
        None if short < 50 => 2000 + short,
        None => 1900 + short,
    }
}

/// Parse masked `text` laid out by `parts`.
///
/// Returns `None` when any field still holds a prompt character, holds
/// something that is not a number, or is out of range for its field.
/// Date fields the format does not contain are taken from `reference`
/// (falling back to `today`); missing time fields are zero.
pub fn parse_date_from_mask(
    text: &str,
    parts: &[DatePartInfo],
    reference: Option<NaiveDateTime>,
    today: NaiveDate,
) -> Option<NaiveDateTime> {
    let chars: Vec<char> = text.chars().collect();
    let base = reference.map(|r| r.date()).unwrap_or(today);

    let mut day = None;
    let mut month = None;
    let mut year = None;
    let mut hour = 0;
    let mut minute = 0;
    let mut second = 0;
    let mut twelve_hour = false;
    let mut pm = None;

    for part in parts.iter().filter(|p| !p.is_literal()) {
        let field: String = chars.get(part.start..part.end)?.iter().collect();

        if part.kind == DatePart::AmPm {
            pm = match field.to_ascii_uppercase().as_str() {
                "AM" => Some(false),
                "PM" => Some(true),
                _ => return None,
            };
            continue;
        }

        if !field.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let number: u32 = field.parse().ok()?;

        match part.kind {
            DatePart::Date if (1..=31).contains(&number) => day = Some(number),
            DatePart::Month if (1..=12).contains(&number) => month = Some(number),
            DatePart::Year if part.len() == 2 => {
                year = Some(resolve_two_digit_year(
                    number as i32,
                    reference.map(|r| r.year()),
                ))
            }
            DatePart::Year => year = Some(number as i32),
            DatePart::Hours => {
                twelve_hour = part.is_twelve_hour();
                let max = if twelve_hour { 12 } else { 23 };
                if number > max {
                    return None;
                }
                hour = number;
            }
            DatePart::Minutes if number < 60 => minute = number,
            DatePart::Seconds if number < 60 => second = number,
            _ => return None,
        }
    }

    if twelve_hour {
        match pm {
            Some(true) if hour < 12 => hour += 12,
            Some(false) if hour == 12 => hour = 0,
            _ => {}
        }
    }

    let year = year.unwrap_or(base.year());
    let month = month.unwrap_or(base.month());
    let day = match day {
        Some(day) => day,
        None => base.day().min(days_in_month(year, month)),
    };

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = NaiveTime::from_hms_opt(hour, minute, second)?;
    Some(date.and_time(time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::date_time_editor::part::parse_format;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn test_parse_full_date() {
        let parts = parse_format("dd-MM-yyyy").unwrap();
        let parsed = parse_date_from_mask("21-11-2011", &parts, None, today()).unwrap();
        assert_eq!(parsed.date(), NaiveDate::from_ymd_opt(2011, 11, 21).unwrap());
    }

    #[test]
    fn test_parse_rejects_partial_and_invalid() {
        let parts = parse_format("dd-MM-yyyy").unwrap();
        assert!(parse_date_from_mask("21-1_-2011", &parts, None, today()).is_none());
        assert!(parse_date_from_mask("31-02-2011", &parts, None, today()).is_none());
        assert!(parse_date_from_mask("00-02-2011", &parts, None, today()).is_none());
        assert!(parse_date_from_mask("10-13-2011", &parts, None, today()).is_none());
    }

    #[test]
    fn test_two_digit_year_century() {
        assert_eq!(resolve_two_digit_year(11, None), 2011);
        assert_eq!(resolve_two_digit_year(75, None), 1975);
        assert_eq!(resolve_two_digit_year(75, Some(2011)), 2075);
        assert_eq!(resolve_two_digit_year(5, Some(1999)), 1905);
    }

    #[test]
    fn test_time_only_format_uses_reference_date() {
        let parts = parse_format("hh:mm tt").unwrap();
        let parsed = parse_date_from_mask("02:30 PM", &parts, None, today()).unwrap();
        assert_eq!(parsed, today().and_hms_opt(14, 30, 0).unwrap());
        let midnight = parse_date_from_mask("12:05 AM", &parts, None, today()).unwrap();
        assert_eq!(midnight, today().and_hms_opt(0, 5, 0).unwrap());
    }
}
