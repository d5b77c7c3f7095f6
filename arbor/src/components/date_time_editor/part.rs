//! Date/time format parsing into editable field spans.

use spindle::mask::{DIGIT_SLOT, LETTER_SLOT};
use thiserror::Error;

/// Kind of a field in a date/time format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatePart {
    Date,
    Month,
    Year,
    Hours,
    Minutes,
    Seconds,
    AmPm,
    Literal,
}

impl DatePart {
    /// Map a format character to the field it introduces.
    fn from_format_char(c: char) -> Self {
        match c {
            'd' => DatePart::Date,
            'M' => DatePart::Month,
            'y' => DatePart::Year,
            'H' | 'h' => DatePart::Hours,
            'm' => DatePart::Minutes,
            's' => DatePart::Seconds,
            't' => DatePart::AmPm,
            _ => DatePart::Literal,
        }
    }
}

/// Character span of one field within a format (and its mask).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePartInfo {
    pub kind: DatePart,
    /// First character offset (inclusive).
    pub start: usize,
    /// Last character offset (exclusive).
    pub end: usize,
    /// The format text covering this span.
    pub format: String,
}

impl DatePartInfo {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `pos` touches this span (either edge counts).
    pub fn contains(&self, pos: usize) -> bool {
        self.start <= pos && pos <= self.end
    }

    pub fn is_literal(&self) -> bool {
        self.kind == DatePart::Literal
    }

    /// Hours rendered in 12-hour form (`h`/`hh`).
    pub fn is_twelve_hour(&self) -> bool {
        self.kind == DatePart::Hours && self.format.contains('h')
    }
}

/// Errors from [`parse_format`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("date/time format is empty")]
    Empty,

    #[error("AM/PM designator at offset {offset} must be exactly 'tt', found {len} characters")]
    AmPmLength { offset: usize, len: usize },
}

/// Split a format into contiguous field spans.
///
/// Every run of one of `d M y H h m s t` becomes a field of that kind and
/// run length; any other run of characters becomes a single literal span.
pub fn parse_format(format: &str) -> Result<Vec<DatePartInfo>, FormatError> {
    if format.is_empty() {
        return Err(FormatError::Empty);
    }

    let chars: Vec<char> = format.chars().collect();
    let mut parts: Vec<DatePartInfo> = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let kind = DatePart::from_format_char(chars[start]);
        let mut end = start + 1;
        if kind == DatePart::Literal {
            while end < chars.len() && DatePart::from_format_char(chars[end]) == DatePart::Literal {
                end += 1;
            }
        } else {
            while end < chars.len() && chars[end] == chars[start] {
                end += 1;
            }
        }

        if kind == DatePart::AmPm && end - start != 2 {
            return Err(FormatError::AmPmLength {
                offset: start,
                len: end - start,
            });
        }

        parts.push(DatePartInfo {
            kind,
            start,
            end,
            format: chars[start..end].iter().collect(),
        });
        start = end;
    }

    Ok(parts)
}

/// Widen fields so each has a fixed digit width.
///
/// One-character fields become two characters and years that are not two
/// or four characters become `yyyy`.
pub fn normalize_format(format: &str) -> String {
    let chars: Vec<char> = format.chars().collect();
    let mut out = String::with_capacity(format.len() + 4);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let kind = DatePart::from_format_char(c);
        let mut run = 1;
        if kind != DatePart::Literal {
            while i + run < chars.len() && chars[i + run] == c {
                run += 1;
            }
        }

        let width = match kind {
            DatePart::Literal => run,
            DatePart::Year if run == 2 || run == 4 => run,
            DatePart::Year => 4,
            DatePart::AmPm => 2,
            _ => run.max(2),
        };
        out.extend(std::iter::repeat_n(c, width));
        i += run;
    }

    out
}

/// Mask pattern for parsed parts: digit slots for numeric fields, letter
/// slots for AM/PM and verbatim literals.
pub fn mask_pattern(parts: &[DatePartInfo]) -> String {
    let mut pattern = String::new();
    for part in parts {
        match part.kind {
            DatePart::Literal => pattern.push_str(&part.format),
            DatePart::AmPm => pattern.extend(std::iter::repeat_n(LETTER_SLOT, part.len())),
            _ => pattern.extend(std::iter::repeat_n(DIGIT_SLOT, part.len())),
        }
    }
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_format() {
        let parts = parse_format("dd-MM-yy").unwrap();
        let kinds: Vec<_> = parts.iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![
                DatePart::Date,
                DatePart::Literal,
                DatePart::Month,
                DatePart::Literal,
                DatePart::Year
            ]
        );
        assert_eq!((parts[2].start, parts[2].end), (3, 5));
        assert_eq!(parts[4].format, "yy");
    }

    #[test]
    fn test_parse_time_with_am_pm() {
        let parts = parse_format("hh:mm tt").unwrap();
        assert_eq!(parts.last().unwrap().kind, DatePart::AmPm);
        assert!(parts[0].is_twelve_hour());
        assert_eq!(mask_pattern(&parts), "00:00 LL");
    }

    #[test]
    fn test_parse_rejects_empty_and_bad_am_pm() {
        assert_eq!(parse_format(""), Err(FormatError::Empty));
        assert!(matches!(
            parse_format("HH t"),
            Err(FormatError::AmPmLength { offset: 3, len: 1 })
        ));
    }

    #[test]
    fn test_normalize_widens_fields() {
        assert_eq!(normalize_format("d/M/y"), "dd/MM/yyyy");
        assert_eq!(normalize_format("dd.MM.yy H:m"), "dd.MM.yy HH:mm");
        assert_eq!(normalize_format("yyy"), "yyyy");
    }
}
