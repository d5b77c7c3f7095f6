//! Display formatting of a committed value.
//!
//! Date patterns use the `d M y H h m s a t E` field letters. They are
//! translated into chrono format items and rendered with the locale's names.

use chrono::NaiveDateTime;
use chrono::format::{DelayedFormat, Fixed, Item, Numeric, Pad};

use super::locale::Locale;

const NAMED_SIZES: [&str; 4] = ["short", "medium", "long", "full"];

/// Expand a named format (`short`, `mediumDate`, `fullTime`, ...) into the
/// locale's pattern. Returns `None` for anything else.
pub fn resolve_named_format(name: &str, locale: &Locale) -> Option<String> {
    let (size, kind) = if let Some(size) = name.strip_suffix("Date") {
        (size, Some(true))
    } else if let Some(size) = name.strip_suffix("Time") {
        (size, Some(false))
    } else {
        (name, None)
    };
    let index = NAMED_SIZES.iter().position(|s| *s == size)?;

    Some(match kind {
        Some(true) => locale.date_formats[index].to_string(),
        Some(false) => locale.time_formats[index].to_string(),
        None => locale.date_time_formats[index]
            .replace("{1}", locale.date_formats[index])
            .replace("{0}", locale.time_formats[index]),
    })
}

/// Render `value` through a date pattern or named format.
///
/// Text inside single quotes is copied verbatim (`''` is a quote); any
/// other non-field character is a literal.
pub fn format_date(value: NaiveDateTime, format: &str, locale: &Locale) -> String {
    let pattern = resolve_named_format(format, locale).unwrap_or_else(|| format.to_string());
    let items = pattern_items(&pattern, value, locale);
    DelayedFormat::new_with_locale(Some(value.date()), Some(value.time()), items.iter(), locale.names)
        .to_string()
}

/// Translate a date pattern into chrono format items.
fn pattern_items(pattern: &str, value: NaiveDateTime, locale: &Locale) -> Vec<Item<'static>> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut items = Vec::new();
    let mut literal = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '\'' {
            let close = chars[i + 1..].iter().position(|&q| q == '\'');
            match close {
                Some(0) => literal.push('\''),
                Some(n) => literal.extend(&chars[i + 1..i + 1 + n]),
                None => literal.extend(&chars[i + 1..]),
            }
            i += close.map(|n| n + 2).unwrap_or(chars.len() - i);
            continue;
        }

        if !is_field_char(c) {
            literal.push(c);
            i += 1;
            continue;
        }

        let mut run = 1;
        while i + run < chars.len() && chars[i + run] == c {
            run += 1;
        }
        if !literal.is_empty() {
            items.push(Item::OwnedLiteral(std::mem::take(&mut literal).into_boxed_str()));
        }
        items.push(field_item(c, run, value, locale));
        i += run;
    }

    if !literal.is_empty() {
        items.push(Item::OwnedLiteral(literal.into_boxed_str()));
    }
    items
}

fn is_field_char(c: char) -> bool {
    matches!(c, 'd' | 'M' | 'y' | 'H' | 'h' | 'm' | 's' | 'a' | 't' | 'E')
}

fn numeric(field: Numeric, run: usize) -> Item<'static> {
    let pad = if run >= 2 { Pad::Zero } else { Pad::None };
    Item::Numeric(field, pad)
}

fn field_item(c: char, run: usize, value: NaiveDateTime, locale: &Locale) -> Item<'static> {
    match c {
        'd' => numeric(Numeric::Day, run),
        'M' => match run {
            1 | 2 => numeric(Numeric::Month, run),
            3 => Item::Fixed(Fixed::ShortMonthName),
            _ => Item::Fixed(Fixed::LongMonthName),
        },
        'y' if run == 2 => numeric(Numeric::YearMod100, run),
        'y' => numeric(Numeric::Year, run),
        'H' => numeric(Numeric::Hour, run),
        'h' => numeric(Numeric::Hour12, run),
        'm' => numeric(Numeric::Minute, run),
        's' => numeric(Numeric::Second, run),
        'E' if run >= 4 => Item::Fixed(Fixed::LongWeekdayName),
        'E' => Item::Fixed(Fixed::ShortWeekdayName),
        _ => am_pm_item(value, locale),
    }
}

/// AM/PM marker. Locales without one fall back to `AM`/`PM`.
fn am_pm_item(value: NaiveDateTime, locale: &Locale) -> Item<'static> {
    let marker = [Item::Fixed(Fixed::UpperAmPm)];
    let localized = DelayedFormat::new_with_locale(
        Some(value.date()),
        Some(value.time()),
        marker.iter(),
        locale.names,
    )
    .to_string();
    if localized.is_empty() {
        let fallback = value.format("%p").to_string();
        Item::OwnedLiteral(fallback.into_boxed_str())
    } else {
        Item::OwnedLiteral(localized.into_boxed_str())
    }
}
