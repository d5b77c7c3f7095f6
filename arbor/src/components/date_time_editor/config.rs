//! Date/time editor configuration.

use chrono::NaiveDateTime;
use serde::Deserialize;

use super::disabled::DateRange;

/// Configuration for a [`DateTimeEditor`](super::DateTimeEditor).
///
/// Every field has a default, so hosts can load a partial config with
/// serde and fill in the rest with the builder methods.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DateTimeEditorConfig {
    /// Editing format. Fields are widened to a fixed width before use.
    pub input_format: String,

    /// Format used while blurred. Falls back to `input_format`.
    /// May be a pattern or a named format such as `"longDate"`.
    pub display_format: Option<String>,

    /// Locale tag for display rendering.
    pub locale: String,

    /// Placeholder shown in unfilled mask slots.
    pub prompt_char: char,

    /// Wrap fields at their bounds when spinning instead of clamping.
    pub is_spin_loop: bool,

    pub min_value: Option<NaiveDateTime>,
    pub max_value: Option<NaiveDateTime>,

    /// Dates reported through the disabled-date notification.
    pub disabled_dates: Vec<DateRange>,
}

impl Default for DateTimeEditorConfig {
    fn default() -> Self {
        Self {
            input_format: "dd/MM/yyyy".to_string(),
            display_format: None,
            locale: "en-US".to_string(),
            prompt_char: '_',
            is_spin_loop: true,
            min_value: None,
            max_value: None,
            disabled_dates: Vec::new(),
        }
    }
}

impl DateTimeEditorConfig {
    /// Create a config with the given input format.
    pub fn new(input_format: impl Into<String>) -> Self {
        Self {
            input_format: input_format.into(),
            ..Default::default()
        }
    }

    pub fn display_format(mut self, format: impl Into<String>) -> Self {
        self.display_format = Some(format.into());
        self
    }

    pub fn locale(mut self, tag: impl Into<String>) -> Self {
        self.locale = tag.into();
        self
    }

    pub fn prompt_char(mut self, c: char) -> Self {
        self.prompt_char = c;
        self
    }

    /// Clamp fields at their bounds instead of wrapping.
    pub fn no_spin_loop(mut self) -> Self {
        self.is_spin_loop = false;
        self
    }

    pub fn min_value(mut self, value: NaiveDateTime) -> Self {
        self.min_value = Some(value);
        self
    }

    pub fn max_value(mut self, value: NaiveDateTime) -> Self {
        self.max_value = Some(value);
        self
    }

    pub fn disabled_dates(mut self, ranges: Vec<DateRange>) -> Self {
        self.disabled_dates = ranges;
        self
    }
}
