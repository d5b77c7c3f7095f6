use chrono::NaiveDateTime;
use thiserror::Error;

/// Range violations reported by [`DateTimeEditor::validate`](super::DateTimeEditor::validate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{value} is before the minimum {min}")]
    MinValue {
        value: NaiveDateTime,
        min: NaiveDateTime,
    },

    #[error("{value} is after the maximum {max}")]
    MaxValue {
        value: NaiveDateTime,
        max: NaiveDateTime,
    },
}
