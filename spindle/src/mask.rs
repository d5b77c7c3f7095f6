//! Fixed-width input masks.
//!
//! A mask pattern is a string in which `0` marks a digit slot, `L` marks a
//! letter slot and every other character is a literal. The text shown for a
//! mask always has exactly as many characters as the pattern; unfilled slots
//! show the prompt character.

use serde::{Deserialize, Serialize};

/// Pattern character for a digit slot.
pub const DIGIT_SLOT: char = '0';
/// Pattern character for a letter slot.
pub const LETTER_SLOT: char = 'L';

/// Options shared by every mask operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskOptions {
    /// Placeholder shown in unfilled slots.
    pub prompt_char: char,
}

impl Default for MaskOptions {
    fn default() -> Self {
        Self { prompt_char: '_' }
    }
}

/// What a single pattern position accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Digit,
    Letter,
    Literal(char),
}

impl Slot {
    fn from_pattern(c: char) -> Self {
        match c {
            DIGIT_SLOT => Slot::Digit,
            LETTER_SLOT => Slot::Letter,
            other => Slot::Literal(other),
        }
    }

    /// Whether `c` may be typed into this slot.
    pub fn accepts(self, c: char) -> bool {
        match self {
            Slot::Digit => c.is_ascii_digit(),
            Slot::Letter => c.is_alphabetic(),
            Slot::Literal(_) => false,
        }
    }

    pub fn is_literal(self) -> bool {
        matches!(self, Slot::Literal(_))
    }
}

/// Result of splicing a value into masked text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskReplace {
    /// The new text.
    pub value: String,
    /// Position just after the last written slot.
    pub end: usize,
}

/// A parsed mask pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    slots: Vec<Slot>,
    options: MaskOptions,
}

impl Mask {
    pub fn new(pattern: &str, options: MaskOptions) -> Self {
        Self {
            slots: pattern.chars().map(Slot::from_pattern).collect(),
            options,
        }
    }

    pub fn options(&self) -> MaskOptions {
        self.options
    }

    pub fn prompt_char(&self) -> char {
        self.options.prompt_char
    }

    /// Number of characters in the mask.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot(&self, pos: usize) -> Option<Slot> {
        self.slots.get(pos).copied()
    }

    /// The text with every slot unfilled.
    pub fn apply(&self) -> String {
        self.slots
            .iter()
            .map(|slot| match slot {
                Slot::Literal(c) => *c,
                _ => self.options.prompt_char,
            })
            .collect()
    }

    /// True when no slot of `text` still shows the prompt character.
    pub fn is_complete(&self, text: &str) -> bool {
        text.chars().count() == self.slots.len()
            && text
                .chars()
                .zip(&self.slots)
                .all(|(c, slot)| slot.is_literal() || c != self.options.prompt_char)
    }

    /// Write `value` into the slots of `text` between `start` and `end`.
    ///
    /// Literal positions are skipped, not consumed. Slots left over once
    /// `value` runs out are reset to the prompt character.
    pub fn replace(&self, text: &str, value: &str, start: usize, end: usize) -> MaskReplace {
        let mut chars = self.normalize(text);
        let end = end.min(chars.len());
        let mut incoming = value.chars();
        let mut last = start.min(end);
        for (pos, slot) in chars.iter_mut().enumerate().take(end).skip(start) {
            if let Slot::Literal(c) = self.slots[pos] {
                *slot = c;
                continue;
            }
            *slot = incoming.next().unwrap_or(self.options.prompt_char);
            last = pos + 1;
        }
        MaskReplace {
            value: chars.into_iter().collect(),
            end: last,
        }
    }

    /// Overwrite the first slot at or after `cursor` with `c`.
    ///
    /// Returns the new text and the caret position after the written slot,
    /// or `None` when no slot accepts the character.
    pub fn insert(&self, text: &str, cursor: usize, c: char) -> Option<(String, usize)> {
        let mut chars = self.normalize(text);
        let pos = (cursor..self.slots.len()).find(|&p| !self.slots[p].is_literal())?;
        if !self.slots[pos].accepts(c) {
            return None;
        }
        chars[pos] = if self.slots[pos] == Slot::Letter {
            c.to_ascii_uppercase()
        } else {
            c
        };
        let mut next = pos + 1;
        while next < self.slots.len() && self.slots[next].is_literal() {
            next += 1;
        }
        Some((chars.into_iter().collect(), next))
    }

    /// Reset every slot in `start..end` to the prompt character.
    pub fn clear(&self, text: &str, start: usize, end: usize) -> String {
        let mut chars = self.normalize(text);
        let end = end.min(chars.len());
        for pos in start.min(end)..end {
            if !self.slots[pos].is_literal() {
                chars[pos] = self.options.prompt_char;
            }
        }
        chars.into_iter().collect()
    }

    /// Coerce arbitrary text onto the mask width, filling gaps from the
    /// empty mask.
    fn normalize(&self, text: &str) -> Vec<char> {
        let mut chars: Vec<char> = self.apply().chars().collect();
        for (slot, c) in chars.iter_mut().zip(text.chars()) {
            *slot = c;
        }
        chars
    }
}
