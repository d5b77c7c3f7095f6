//! Event payloads, handler registration and input handling for the
//! date/time editor.

use chrono::NaiveDateTime;
use log::trace;
use spindle::{handle_masked_key, Key, KeyCombo, TextEditResult};

use crate::components::events::{ComponentEvents, EventResult};

use super::state::DateTimeEditor;

/// Payload of `value_change` and `validation_fail`.
///
/// A `validation_fail` handler on blur may replace `new_value` with a
/// corrected value; the editor commits it when it differs from the old one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeEditorEventArgs {
    pub old_value: Option<NaiveDateTime>,
    pub new_value: Option<NaiveDateTime>,
    /// The text shown when the event fired.
    pub user_input: String,
}

/// Payload of `disabled_date`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisabledDateEventArgs {
    pub value: NaiveDateTime,
    pub user_input: String,
}

/// Registered callbacks.
#[derive(Default)]
pub(super) struct EditorHandlers {
    pub value_change: Option<Box<dyn FnMut(&DateTimeEditorEventArgs)>>,
    pub validation_fail: Option<Box<dyn FnMut(&mut DateTimeEditorEventArgs)>>,
    pub disabled_date: Option<Box<dyn FnMut(&DisabledDateEventArgs)>>,
    pub on_change: Option<Box<dyn FnMut(Option<NaiveDateTime>)>>,
    pub on_touched: Option<Box<dyn FnMut()>>,
    pub on_validator_change: Option<Box<dyn FnMut()>>,
}

impl EditorHandlers {
    pub fn emit_value_change(&mut self, args: &DateTimeEditorEventArgs) {
        if let Some(handler) = self.value_change.as_mut() {
            handler(args);
        }
    }

    pub fn emit_validation_fail(&mut self, args: &mut DateTimeEditorEventArgs) {
        if let Some(handler) = self.validation_fail.as_mut() {
            handler(args);
        }
    }

    pub fn emit_disabled_date(&mut self, args: &DisabledDateEventArgs) {
        if let Some(handler) = self.disabled_date.as_mut() {
            handler(args);
        }
    }
}

impl DateTimeEditor {
    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Called after a committed change of a complete or cleared value.
    pub fn on_value_change(&mut self, handler: impl FnMut(&DateTimeEditorEventArgs) + 'static) {
        self.handlers.value_change = Some(Box::new(handler));
    }

    /// Called for out-of-range values and for text that does not parse on
    /// blur. In the latter case the handler may set `new_value`.
    pub fn on_validation_fail(
        &mut self,
        handler: impl FnMut(&mut DateTimeEditorEventArgs) + 'static,
    ) {
        self.handlers.validation_fail = Some(Box::new(handler));
    }

    /// Called when a committed value falls in a disabled range.
    pub fn on_disabled_date(&mut self, handler: impl FnMut(&DisabledDateEventArgs) + 'static) {
        self.handlers.disabled_date = Some(Box::new(handler));
    }

    // -------------------------------------------------------------------------
    // Form control callbacks
    // -------------------------------------------------------------------------

    /// Called with the stored value every time it changes, including
    /// silent drops while typing.
    pub fn register_on_change(&mut self, callback: impl FnMut(Option<NaiveDateTime>) + 'static) {
        self.handlers.on_change = Some(Box::new(callback));
    }

    /// Called on focus and blur.
    pub fn register_on_touched(&mut self, callback: impl FnMut() + 'static) {
        self.handlers.on_touched = Some(Box::new(callback));
    }

    /// Called when the min or max bound changes.
    pub fn register_on_validator_change(&mut self, callback: impl FnMut() + 'static) {
        self.handlers.on_validator_change = Some(Box::new(callback));
    }
}

impl ComponentEvents for DateTimeEditor {
    fn on_key(&mut self, key: &KeyCombo) -> EventResult {
        if !self.focused || key.modifiers.alt {
            return EventResult::Ignored;
        }

        match key.key {
            Key::Up => {
                self.increment(None);
                EventResult::Consumed
            }
            Key::Down => {
                self.decrement(None);
                EventResult::Consumed
            }
            Key::Char(';') if key.modifiers.ctrl => {
                self.set_now();
                EventResult::Consumed
            }
            Key::Left if key.modifiers.ctrl => {
                let pos = self.literal_boundary(false);
                self.input.set_cursor(pos);
                EventResult::Consumed
            }
            Key::Right if key.modifiers.ctrl => {
                let pos = self.literal_boundary(true);
                self.input.set_cursor(pos);
                EventResult::Consumed
            }
            _ => match handle_masked_key(&self.mask, &mut self.input, key.key, key.modifiers) {
                TextEditResult::Changed => {
                    trace!("Date editor text '{}'", self.input.text);
                    self.commit_typed();
                    EventResult::Consumed
                }
                TextEditResult::Handled => EventResult::Consumed,
                TextEditResult::Ignored => EventResult::Ignored,
            },
        }
    }

    fn on_wheel(&mut self, _delta_x: i16, delta_y: i16) -> EventResult {
        if !self.focused || delta_y == 0 {
            return EventResult::Ignored;
        }
        if delta_y < 0 {
            self.increment(None);
        } else {
            self.decrement(None);
        }
        EventResult::Consumed
    }

    fn on_focus(&mut self) -> EventResult {
        if self.focus() {
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }

    fn on_blur(&mut self) -> EventResult {
        if self.blur() {
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }
}
