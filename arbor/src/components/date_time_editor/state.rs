//! Date/time editor state.

use chrono::{Datelike, Local, NaiveDateTime, Timelike};
use log::{debug, trace, warn};
use spindle::{Mask, MaskOptions, TextInputData};

use super::config::DateTimeEditorConfig;
use super::date_math;
use super::disabled::{is_date_in_ranges, DateRange};
use super::error::ValidationError;
use super::events::{DateTimeEditorEventArgs, DisabledDateEventArgs, EditorHandlers};
use super::format::format_date;
use super::locale::Locale;
use super::parse::parse_date_from_mask;
use super::part::{mask_pattern, normalize_format, parse_format, DatePart, DatePartInfo};

/// Source of "now" for spins on an empty editor and Ctrl+`;`.
pub type Clock = Box<dyn Fn() -> NaiveDateTime>;

/// A masked date/time input.
///
/// While focused the text is the mask for the input format, with one
/// fixed-width slot per field. While blurred it is the committed value
/// rendered through the display format and locale.
pub struct DateTimeEditor {
    pub(super) config: DateTimeEditorConfig,
    pub(super) locale: &'static Locale,
    pub(super) parts: Vec<DatePartInfo>,
    pub(super) mask: Mask,
    pub(super) input: TextInputData,
    pub(super) value: Option<NaiveDateTime>,
    pub(super) old_value: Option<NaiveDateTime>,
    pub(super) focused: bool,
    pub(super) clock: Clock,
    pub(super) handlers: EditorHandlers,
}

impl std::fmt::Debug for DateTimeEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DateTimeEditor")
            .field("input_format", &self.config.input_format)
            .field("value", &self.value)
            .field("text", &self.input.text)
            .field("focused", &self.focused)
            .finish_non_exhaustive()
    }
}

impl Default for DateTimeEditor {
    fn default() -> Self {
        Self::new(DateTimeEditorConfig::default())
    }
}

impl DateTimeEditor {
    /// Create an editor from a config. The editor starts blurred and empty.
    pub fn new(config: DateTimeEditorConfig) -> Self {
        let locale = Locale::from_tag(&config.locale);
        let mut editor = Self {
            mask: Mask::new("", MaskOptions::default()),
            config,
            locale,
            parts: Vec::new(),
            input: TextInputData::default(),
            value: None,
            old_value: None,
            focused: false,
            clock: Box::new(|| Local::now().naive_local()),
            handlers: EditorHandlers::default(),
        };
        editor.apply_format();
        editor.update_mask();
        editor
    }

    /// Replace the clock used for "now".
    pub fn with_clock(mut self, clock: impl Fn() -> NaiveDateTime + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Start with a value, without emitting any event.
    pub fn with_value(mut self, value: NaiveDateTime) -> Self {
        self.set_value(Some(value));
        self
    }

    // -------------------------------------------------------------------------
    // Format and mask
    // -------------------------------------------------------------------------

    /// Parse the input format and rebuild the mask.
    fn apply_format(&mut self) {
        let normalized = normalize_format(&self.config.input_format);
        self.parts = match parse_format(&normalized) {
            Ok(parts) => parts,
            Err(e) => {
                warn!("Invalid input format '{}': {}", self.config.input_format, e);
                Vec::new()
            }
        };
        self.config.input_format = normalized;
        let options = MaskOptions {
            prompt_char: self.config.prompt_char,
        };
        self.mask = Mask::new(&mask_pattern(&self.parts), options);
        debug!(
            "Date editor format '{}' -> mask '{}'",
            self.config.input_format,
            mask_pattern(&self.parts)
        );
    }

    pub fn input_format(&self) -> &str {
        &self.config.input_format
    }

    /// Change the input format and re-render.
    pub fn set_input_format(&mut self, format: impl Into<String>) {
        self.config.input_format = format.into();
        self.apply_format();
        self.update_mask();
    }

    pub fn display_format(&self) -> Option<&str> {
        self.config.display_format.as_deref()
    }

    pub fn set_display_format(&mut self, format: Option<String>) {
        self.config.display_format = format;
        self.update_mask();
    }

    pub fn locale(&self) -> &'static Locale {
        self.locale
    }

    pub fn set_locale(&mut self, tag: &str) {
        self.config.locale = tag.to_string();
        self.locale = Locale::from_tag(tag);
        self.update_mask();
    }

    /// Field spans of the input format.
    pub fn parts(&self) -> &[DatePartInfo] {
        &self.parts
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    /// The mask with every slot showing the prompt character.
    pub fn empty_mask(&self) -> String {
        self.mask.apply()
    }

    // -------------------------------------------------------------------------
    // Text and caret
    // -------------------------------------------------------------------------

    /// The text currently shown.
    pub fn text(&self) -> &str {
        &self.input.text
    }

    pub fn cursor(&self) -> usize {
        self.input.cursor
    }

    pub fn set_cursor(&mut self, pos: usize) {
        self.input.set_cursor(pos);
    }

    pub fn selection(&self) -> Option<(usize, usize)> {
        self.input.selection()
    }

    pub fn set_selection_range(&mut self, start: usize, end: usize) {
        self.input.set_selection_range(start, end);
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Re-derive the shown text from the value.
    ///
    /// With no value the empty mask is shown. While focused each field is
    /// written into its slot, zero padded, and the caret stays put. While
    /// blurred the value is rendered for display.
    pub fn update_mask(&mut self) {
        let empty = self.empty_mask();
        let Some(value) = self.value else {
            self.input.replace_text(empty);
            return;
        };

        if self.focused {
            let cursor = self.input.cursor;
            let mut text = empty;
            for part in self.parts.iter().filter(|p| !p.is_literal()) {
                let rendered = part_value(part, value);
                text = self.mask.replace(&text, &rendered, part.start, part.end).value;
            }
            self.input.text = text;
            self.input.set_cursor(cursor);
        } else {
            let format = self
                .config
                .display_format
                .as_deref()
                .unwrap_or(&self.config.input_format);
            let text = format_date(value, format, self.locale);
            self.input.replace_text(text);
        }
    }

    fn input_is_complete(&self) -> bool {
        !self.input.text.contains(self.mask.prompt_char())
    }

    // -------------------------------------------------------------------------
    // Value
    // -------------------------------------------------------------------------

    pub fn value(&self) -> Option<NaiveDateTime> {
        self.value
    }

    /// The value before the last commit.
    pub fn old_value(&self) -> Option<NaiveDateTime> {
        self.old_value
    }

    /// Set the value and re-render. No event is emitted.
    pub fn set_value(&mut self, value: Option<NaiveDateTime>) {
        self.value = value;
        self.update_mask();
    }

    /// Form-control write. Same as [`set_value`](Self::set_value).
    pub fn write_value(&mut self, value: Option<NaiveDateTime>) {
        self.set_value(value);
    }

    /// Commit an empty value.
    pub fn clear(&mut self) {
        self.update_value(None);
        self.update_mask();
    }

    /// Commit a value and emit the resulting notifications.
    ///
    /// While focused the mask is re-rendered from the new value first. The
    /// change callback always runs. `validation_fail` fires for a value
    /// outside the min/max range, `disabled_date` for a value in a disabled
    /// range. `value_change` fires only when the text is fully populated or
    /// is the empty mask.
    pub fn update_value(&mut self, new_value: Option<NaiveDateTime>) {
        self.old_value = self.value;
        self.value = new_value;
        debug!("Date editor value {:?} -> {:?}", self.old_value, self.value);
        if self.focused {
            self.update_mask();
        }

        if let Some(callback) = self.handlers.on_change.as_mut() {
            callback(new_value);
        }

        let mut args = DateTimeEditorEventArgs {
            old_value: self.old_value,
            new_value,
            user_input: self.input.text.clone(),
        };

        if let Some(value) = new_value {
            if !self.value_in_range(Some(value)) {
                trace!("Date editor value {} out of range", value);
                self.handlers.emit_validation_fail(&mut args);
            }
            if is_date_in_ranges(value.date(), &self.config.disabled_dates) {
                self.handlers.emit_disabled_date(&DisabledDateEventArgs {
                    value,
                    user_input: self.input.text.clone(),
                });
            }
        }

        if self.input_is_complete() || self.input.text == self.empty_mask() {
            self.handlers.emit_value_change(&args);
        }
    }

    /// Whether `value` satisfies the configured bounds.
    ///
    /// `None` never does. With no bounds at all any value does.
    pub fn value_in_range(&self, value: Option<NaiveDateTime>) -> bool {
        let Some(value) = value else {
            return false;
        };
        let above_min = self.config.min_value.is_none_or(|min| min <= value);
        let below_max = self.config.max_value.is_none_or(|max| value <= max);
        above_min && below_max
    }

    /// Check the value against the bounds. An empty value passes.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let Some(value) = self.value else {
            return Ok(());
        };
        if let Some(min) = self.config.min_value.filter(|min| value < *min) {
            return Err(ValidationError::MinValue { value, min });
        }
        if let Some(max) = self.config.max_value.filter(|max| value > *max) {
            return Err(ValidationError::MaxValue { value, max });
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Bounds and options
    // -------------------------------------------------------------------------

    pub fn min_value(&self) -> Option<NaiveDateTime> {
        self.config.min_value
    }

    pub fn set_min_value(&mut self, min: Option<NaiveDateTime>) {
        self.config.min_value = min;
        self.notify_validator_change();
    }

    pub fn max_value(&self) -> Option<NaiveDateTime> {
        self.config.max_value
    }

    pub fn set_max_value(&mut self, max: Option<NaiveDateTime>) {
        self.config.max_value = max;
        self.notify_validator_change();
    }

    fn notify_validator_change(&mut self) {
        if let Some(callback) = self.handlers.on_validator_change.as_mut() {
            callback();
        }
    }

    pub fn is_spin_loop(&self) -> bool {
        self.config.is_spin_loop
    }

    pub fn set_spin_loop(&mut self, spin_loop: bool) {
        self.config.is_spin_loop = spin_loop;
    }

    pub fn disabled_dates(&self) -> &[DateRange] {
        &self.config.disabled_dates
    }

    pub fn set_disabled_dates(&mut self, ranges: Vec<DateRange>) {
        self.config.disabled_dates = ranges;
    }

    // -------------------------------------------------------------------------
    // Spinning
    // -------------------------------------------------------------------------

    /// Increment a field by one.
    ///
    /// Without an explicit part the field under the caret is used while
    /// focused; otherwise the day, then the hours. With no current value the
    /// editor takes "now" instead.
    pub fn increment(&mut self, part: Option<DatePart>) {
        self.spin(part, 1);
    }

    /// Decrement a field by one. See [`increment`](Self::increment).
    pub fn decrement(&mut self, part: Option<DatePart>) {
        self.spin(part, -1);
    }

    fn spin(&mut self, part: Option<DatePart>, delta: i32) {
        let Some(target) = self.target_part(part) else {
            trace!("Date editor spin ignored: no target field");
            return;
        };
        let new_value = match self.value {
            Some(value) => self.spin_value(target, delta, value),
            None => (self.clock)(),
        };
        trace!("Date editor spin {:?} by {}", target, delta);
        self.update_value(Some(new_value));
        self.update_mask();
    }

    /// Resolve which field a spin applies to.
    pub(super) fn target_part(&self, explicit: Option<DatePart>) -> Option<DatePart> {
        if let Some(part) = explicit.filter(|p| *p != DatePart::Literal) {
            return Some(part);
        }
        if self.focused {
            let caret = self.input.selection_start();
            return self
                .parts
                .iter()
                .find(|p| !p.is_literal() && p.contains(caret))
                .map(|p| p.kind);
        }
        [DatePart::Date, DatePart::Hours]
            .into_iter()
            .find(|kind| self.parts.iter().any(|p| p.kind == *kind))
    }

    fn spin_value(&self, part: DatePart, delta: i32, value: NaiveDateTime) -> NaiveDateTime {
        let spin_loop = self.config.is_spin_loop;
        match part {
            DatePart::Date => date_math::spin_date(delta, value, spin_loop),
            DatePart::Month => date_math::spin_month(delta, value, spin_loop),
            DatePart::Year => date_math::spin_year(delta, value),
            DatePart::Hours => date_math::spin_hours(delta, value, spin_loop),
            DatePart::Minutes => date_math::spin_minutes(delta, value, spin_loop),
            DatePart::Seconds => date_math::spin_seconds(delta, value, spin_loop),
            DatePart::AmPm => date_math::spin_am_pm(value),
            DatePart::Literal => value,
        }
    }

    /// Commit the current time.
    pub fn set_now(&mut self) {
        let now = (self.clock)();
        self.update_value(Some(now));
        self.update_mask();
    }

    // -------------------------------------------------------------------------
    // Focus and typing
    // -------------------------------------------------------------------------

    pub(super) fn focus(&mut self) -> bool {
        if self.focused {
            return false;
        }
        self.focused = true;
        if let Some(callback) = self.handlers.on_touched.as_mut() {
            callback();
        }
        self.update_mask();
        self.input.set_cursor(0);
        true
    }

    /// Resolve the typed text and leave edit mode.
    pub(super) fn blur(&mut self) -> bool {
        if !self.focused {
            return false;
        }
        self.focused = false;

        if self.input.text == self.empty_mask() {
            self.update_value(None);
            self.input.replace_text("");
        } else {
            let today = (self.clock)().date();
            match parse_date_from_mask(&self.input.text, &self.parts, self.value, today) {
                Some(parsed) => self.update_value(Some(parsed)),
                None => self.resolve_invalid_input(),
            }
            self.update_mask();
        }

        if let Some(callback) = self.handlers.on_touched.as_mut() {
            callback();
        }
        true
    }

    /// Let the validation handler offer a replacement for unparsable text.
    fn resolve_invalid_input(&mut self) {
        let old_value = self.value;
        let mut args = DateTimeEditorEventArgs {
            old_value,
            new_value: None,
            user_input: self.input.text.clone(),
        };
        debug!("Date editor could not parse '{}'", args.user_input);
        self.handlers.emit_validation_fail(&mut args);

        match args.new_value {
            Some(corrected) if Some(corrected) != old_value => self.update_value(Some(corrected)),
            _ => self.update_value(None),
        }
    }

    /// Commit typed text when it forms a new valid date.
    ///
    /// A cleared mask commits `None`. Partial or unparsable text leaves the
    /// committed value alone and stays on screen until blur resolves it.
    pub(super) fn commit_typed(&mut self) {
        if self.input.text == self.empty_mask() {
            self.update_value(None);
            return;
        }

        if self.mask.is_complete(&self.input.text) {
            let today = (self.clock)().date();
            if let Some(parsed) =
                parse_date_from_mask(&self.input.text, &self.parts, self.value, today)
            {
                if Some(parsed) != self.value {
                    self.update_value(Some(parsed));
                }
                return;
            }
        }

        trace!("Date editor holding partial input '{}'", self.input.text);
    }

    /// Caret position after Ctrl+Left (`forward == false`) or Ctrl+Right.
    ///
    /// Moves one step at a time until the caret sits on the edge of a
    /// literal run or hits the end of the text.
    pub(super) fn literal_boundary(&self, forward: bool) -> usize {
        let literals: Vec<&DatePartInfo> = self.parts.iter().filter(|p| p.is_literal()).collect();
        let len = self.input.len();
        let mut pos = self.input.selection_start();

        if forward {
            loop {
                pos += 1;
                if pos >= len || literals.iter().any(|l| l.start == pos) {
                    return pos.min(len);
                }
            }
        }

        loop {
            pos = pos.saturating_sub(1);
            if pos == 0 || literals.iter().any(|l| l.end == pos) {
                return pos;
            }
        }
    }
}

/// Zero-padded text for one field of `value`, sized to the field.
fn part_value(part: &DatePartInfo, value: NaiveDateTime) -> String {
    let number = match part.kind {
        DatePart::Date => value.day() as i64,
        DatePart::Month => value.month() as i64,
        DatePart::Year => value.year() as i64,
        DatePart::Hours if part.is_twelve_hour() => value.hour12().1 as i64,
        DatePart::Hours => value.hour() as i64,
        DatePart::Minutes => value.minute() as i64,
        DatePart::Seconds => value.second() as i64,
        DatePart::AmPm => {
            return if value.hour() >= 12 { "PM" } else { "AM" }.to_string();
        }
        DatePart::Literal => return part.format.clone(),
    };

    let len = part.len();
    let padded = format!("{:0>len$}", number, len = len);
    padded[padded.len() - len..].to_string()
}
