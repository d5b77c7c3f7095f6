use crate::event::{Key, Modifiers};
use crate::mask::Mask;

/// Text content and caret state of a single-line input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInputData {
    pub text: String,
    /// Caret position in characters.
    pub cursor: usize,
    /// Anchor position for selection. When Some and != cursor, text is selected.
    pub anchor: Option<usize>,
}

impl TextInputData {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self {
            text,
            cursor,
            anchor: None,
        }
    }

    /// Get the selection range as (start, end) where start <= end.
    pub fn selection(&self) -> Option<(usize, usize)> {
        self.anchor.and_then(|a| {
            if a != self.cursor {
                Some(if a < self.cursor {
                    (a, self.cursor)
                } else {
                    (self.cursor, a)
                })
            } else {
                None
            }
        })
    }

    /// Start of the selection, or the caret when nothing is selected.
    pub fn selection_start(&self) -> usize {
        self.selection().map(|(start, _)| start).unwrap_or(self.cursor)
    }

    /// End of the selection, or the caret when nothing is selected.
    pub fn selection_end(&self) -> usize {
        self.selection().map(|(_, end)| end).unwrap_or(self.cursor)
    }

    /// Check if there's an active selection.
    pub fn has_selection(&self) -> bool {
        self.selection().is_some()
    }

    /// Clear the selection anchor.
    pub fn clear_selection(&mut self) {
        self.anchor = None;
    }

    /// Select all text.
    pub fn select_all(&mut self) {
        if !self.text.is_empty() {
            self.anchor = Some(0);
            self.cursor = self.len();
        }
    }

    /// Place the caret, collapsing any selection. Clamped to the text.
    pub fn set_cursor(&mut self, pos: usize) {
        self.cursor = pos.min(self.len());
        self.anchor = None;
    }

    /// Select `start..end`; the caret ends up at `end`.
    pub fn set_selection_range(&mut self, start: usize, end: usize) {
        let len = self.len();
        self.anchor = Some(start.min(len));
        self.cursor = end.min(len);
    }

    /// Replace the text, keeping the caret where it was when it still fits.
    pub fn replace_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        let len = self.len();
        self.cursor = self.cursor.min(len);
        self.anchor = self.anchor.map(|a| a.min(len));
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Result of handling a text editing key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEditResult {
    /// Text was modified.
    Changed,
    /// Key was handled but text didn't change (e.g., cursor movement).
    Handled,
    /// Key was not handled, should be passed through.
    Ignored,
}

/// Overwrite-mode editing of text constrained by a [`Mask`].
///
/// The text never changes length: typing replaces the next slot, deleting
/// resets slots to the prompt character and literals are never touched.
pub fn handle_masked_key(
    mask: &Mask,
    data: &mut TextInputData,
    key: Key,
    modifiers: Modifiers,
) -> TextEditResult {
    match key {
        Key::Char(c) if modifiers.none() || (modifiers.shift && !modifiers.ctrl) => {
            let start = data.selection_start();
            let base = match data.selection() {
                Some((s, e)) => mask.clear(&data.text, s, e),
                None => data.text.clone(),
            };
            match mask.insert(&base, start, c) {
                Some((text, cursor)) => {
                    data.text = text;
                    data.set_cursor(cursor);
                    TextEditResult::Changed
                }
                None => {
                    log::trace!("[mask] Rejected {:?} at {}", c, start);
                    TextEditResult::Handled
                }
            }
        }

        Key::Backspace if modifiers.none() => {
            if let Some((start, end)) = data.selection() {
                data.text = mask.clear(&data.text, start, end);
                data.set_cursor(start);
                return TextEditResult::Changed;
            }
            // Step back over literals to the previous slot
            let mut pos = data.cursor;
            while pos > 0 {
                pos -= 1;
                if mask.slot(pos).is_some_and(|s| !s.is_literal()) {
                    data.text = mask.clear(&data.text, pos, pos + 1);
                    data.set_cursor(pos);
                    return TextEditResult::Changed;
                }
            }
            TextEditResult::Handled
        }

        Key::Delete if modifiers.none() => {
            if let Some((start, end)) = data.selection() {
                data.text = mask.clear(&data.text, start, end);
                data.set_cursor(start);
                return TextEditResult::Changed;
            }
            let next_slot = (data.cursor..mask.len())
                .find(|&p| mask.slot(p).is_some_and(|s| !s.is_literal()));
            match next_slot {
                Some(pos) => {
                    data.text = mask.clear(&data.text, pos, pos + 1);
                    TextEditResult::Changed
                }
                None => TextEditResult::Handled,
            }
        }

        Key::Left if !modifiers.ctrl => {
            move_cursor(data, -1, modifiers.shift);
            TextEditResult::Handled
        }

        Key::Right if !modifiers.ctrl => {
            move_cursor(data, 1, modifiers.shift);
            TextEditResult::Handled
        }

        Key::Home if !modifiers.ctrl => {
            move_to(data, 0, modifiers.shift);
            TextEditResult::Handled
        }

        Key::End if !modifiers.ctrl => {
            let len = data.len();
            move_to(data, len, modifiers.shift);
            TextEditResult::Handled
        }

        Key::Char('a') if modifiers.ctrl => {
            data.select_all();
            TextEditResult::Handled
        }

        _ => TextEditResult::Ignored,
    }
}

/// Move cursor by delta characters.
fn move_cursor(data: &mut TextInputData, delta: i32, extend_selection: bool) {
    let char_count = data.len();

    if extend_selection && data.anchor.is_none() {
        data.anchor = Some(data.cursor);
    } else if !extend_selection {
        // If we have a selection and not extending, move to edge of selection
        if let Some((start, end)) = data.selection() {
            data.cursor = if delta < 0 { start } else { end };
            data.clear_selection();
            return;
        }
        data.clear_selection();
    }

    data.cursor = (data.cursor as i32 + delta).clamp(0, char_count as i32) as usize;
}

fn move_to(data: &mut TextInputData, pos: usize, extend_selection: bool) {
    if extend_selection && data.anchor.is_none() {
        data.anchor = Some(data.cursor);
    } else if !extend_selection {
        data.clear_selection();
    }
    data.cursor = pos.min(data.len());
}
