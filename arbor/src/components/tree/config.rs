//! Tree configuration.

use serde::Deserialize;

use crate::components::selection::SelectionMode;

/// Behaviour switches for a [`Tree`](super::Tree).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// How `select` and `deselect` behave.
    pub selection: SelectionMode,

    /// Expanding a node collapses every other node on the same level.
    pub single_branch_expand: bool,
}

impl TreeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the selection mode.
    pub fn selection(mut self, mode: SelectionMode) -> Self {
        self.selection = mode;
        self
    }

    /// Keep at most one expanded node per level.
    pub fn single_branch_expand(mut self) -> Self {
        self.single_branch_expand = true;
        self
    }
}
