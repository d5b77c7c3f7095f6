//! Selection state management for components.
//!
//! Selection is tracked by id so it stays stable while the items it refers
//! to are added, moved or removed.

use std::collections::HashSet;
use std::hash::Hash;

use serde::Deserialize;

/// Selection mode for components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// No selection allowed
    None,
    /// Each item is selected or not, independently of the others
    #[default]
    BiState,
    /// Selecting an item selects everything below it; a parent whose
    /// children are all selected becomes selected too
    Cascading,
}

/// ID-based selection state.
#[derive(Debug, Clone)]
pub struct Selection<Id = String> {
    selected: HashSet<Id>,
}

impl<Id> Default for Selection<Id> {
    fn default() -> Self {
        Self {
            selected: HashSet::new(),
        }
    }
}

impl<Id: Clone + Eq + Hash + Ord> Selection<Id> {
    /// Create a new empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all selected IDs (sorted for deterministic ordering).
    pub fn selected(&self) -> Vec<Id> {
        let mut ids: Vec<_> = self.selected.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Check if an ID is selected.
    pub fn is_selected(&self, id: &Id) -> bool {
        self.selected.contains(id)
    }

    /// Get the number of selected items.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Clear all selection.
    /// Returns the IDs that were deselected.
    pub fn clear(&mut self) -> Vec<Id> {
        let mut removed: Vec<_> = self.selected.drain().collect();
        removed.sort();
        removed
    }

    /// Toggle selection of an ID.
    /// Returns (added, removed) IDs.
    pub fn toggle(&mut self, id: &Id) -> (Vec<Id>, Vec<Id>) {
        if self.selected.remove(id) {
            (vec![], vec![id.clone()])
        } else {
            self.selected.insert(id.clone());
            (vec![id.clone()], vec![])
        }
    }

    /// Select every ID in `ids`.
    /// Returns the IDs that were newly selected.
    pub fn select_all<'a>(&mut self, ids: impl IntoIterator<Item = &'a Id>) -> Vec<Id>
    where
        Id: 'a,
    {
        ids.into_iter()
            .filter(|id| self.selected.insert((*id).clone()))
            .cloned()
            .collect()
    }

    /// Deselect every ID in `ids`.
    /// Returns the IDs that were selected before.
    pub fn deselect_all<'a>(&mut self, ids: impl IntoIterator<Item = &'a Id>) -> Vec<Id>
    where
        Id: 'a,
    {
        ids.into_iter()
            .filter(|id| self.selected.remove(*id))
            .cloned()
            .collect()
    }

    /// Keep only the IDs for which `keep` returns true.
    pub fn retain(&mut self, keep: impl FnMut(&Id) -> bool) {
        self.selected.retain(keep);
    }
}
