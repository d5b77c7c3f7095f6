//! Expansion and selection state, keyed by tree.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::debug;

use crate::components::selection::Selection;

use super::error::TreeError;
use super::id::{NodeId, TreeId};

/// Expansion and selection state of one tree.
///
/// Membership in these sets is the only record of whether a node is
/// expanded or selected.
#[derive(Debug, Clone, Default)]
pub struct TreeState {
    pub(super) expanded: HashSet<NodeId>,
    pub(super) selection: Selection<NodeId>,
}

impl TreeState {
    pub fn is_expanded(&self, node: &NodeId) -> bool {
        self.expanded.contains(node)
    }

    pub fn is_selected(&self, node: &NodeId) -> bool {
        self.selection.is_selected(node)
    }

    /// Expanded ids, sorted.
    pub fn expanded(&self) -> Vec<NodeId> {
        let mut ids: Vec<_> = self.expanded.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Selected ids, sorted.
    pub fn selected(&self) -> Vec<NodeId> {
        self.selection.selected()
    }

    /// Drop every trace of `node`.
    pub(super) fn forget(&mut self, node: &NodeId) {
        self.expanded.remove(node);
        self.selection.deselect_all([node]);
    }
}

/// Shared store of [`TreeState`]s.
///
/// A tree registers an empty state under its id when it is created and
/// clears it when destroyed. Trees sharing a registry never see each
/// other's state.
#[derive(Debug, Clone, Default)]
pub struct TreeStateRegistry {
    states: Arc<RwLock<HashMap<TreeId, TreeState>>>,
}

impl TreeStateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<TreeId, TreeState>> {
        self.states.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<TreeId, TreeState>> {
        self.states.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Register an empty state. Registering twice keeps the existing state.
    pub fn register(&self, tree: TreeId) {
        self.write().entry(tree).or_default();
        debug!("Registered tree state {}", tree);
    }

    pub fn is_registered(&self, tree: TreeId) -> bool {
        self.read().contains_key(&tree)
    }

    /// Snapshot of a tree's state.
    pub fn get(&self, tree: TreeId) -> Result<TreeState, TreeError> {
        self.read()
            .get(&tree)
            .cloned()
            .ok_or(TreeError::Unregistered(tree))
    }

    /// Remove a tree's state. Later operations on it fail with
    /// [`TreeError::Unregistered`].
    pub fn clear(&self, tree: TreeId) {
        if self.write().remove(&tree).is_some() {
            debug!("Cleared tree state {}", tree);
        }
    }

    /// Run `f` against a tree's state.
    pub(super) fn read_state<R>(
        &self,
        tree: TreeId,
        f: impl FnOnce(&TreeState) -> R,
    ) -> Result<R, TreeError> {
        self.read()
            .get(&tree)
            .map(f)
            .ok_or(TreeError::Unregistered(tree))
    }

    /// Run `f` against a tree's state, mutably.
    pub(super) fn write_state<R>(
        &self,
        tree: TreeId,
        f: impl FnOnce(&mut TreeState) -> R,
    ) -> Result<R, TreeError> {
        self.write()
            .get_mut(&tree)
            .map(f)
            .ok_or(TreeError::Unregistered(tree))
    }
}
