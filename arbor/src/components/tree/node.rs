//! Node storage and node handles.

use std::sync::{RwLock, Weak};

use super::error::TreeError;
use super::id::{NodeId, TreeId};
use super::registry::TreeStateRegistry;
use super::state::TreeInner;

/// One node in the tree's arena.
#[derive(Debug, Clone)]
pub(super) struct NodeEntry<T> {
    pub data: T,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Depth below the roots (roots are level 0).
    pub level: usize,
}

/// Read-only view of a node handed to search predicates.
#[derive(Debug, Clone, Copy)]
pub struct NodeView<'a, T> {
    pub id: &'a NodeId,
    pub data: &'a T,
    pub level: usize,
    pub parent: Option<&'a NodeId>,
}

/// Handle to a single node.
///
/// The handle does not keep the tree alive. Once the tree is dropped the
/// structural queries return `None`; once it is destroyed the state
/// queries fail with [`TreeError::Unregistered`].
#[derive(Debug, Clone)]
pub struct TreeNode<T> {
    pub(super) id: NodeId,
    pub(super) tree_id: TreeId,
    pub(super) tree: Weak<RwLock<TreeInner<T>>>,
    pub(super) registry: TreeStateRegistry,
}

impl<T: Clone> TreeNode<T> {
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn tree_id(&self) -> TreeId {
        self.tree_id
    }

    fn with_entry<R>(&self, f: impl FnOnce(&NodeEntry<T>) -> R) -> Option<R> {
        let tree = self.tree.upgrade()?;
        let guard = tree.read().unwrap_or_else(|e| e.into_inner());
        guard.nodes.get(&self.id).map(f)
    }

    /// The bound data.
    pub fn data(&self) -> Option<T> {
        self.with_entry(|entry| entry.data.clone())
    }

    pub fn level(&self) -> Option<usize> {
        self.with_entry(|entry| entry.level)
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.with_entry(|entry| entry.parent.clone()).flatten()
    }

    pub fn children(&self) -> Vec<NodeId> {
        self.with_entry(|entry| entry.children.clone())
            .unwrap_or_default()
    }

    pub fn is_expanded(&self) -> Result<bool, TreeError> {
        self.registry
            .read_state(self.tree_id, |state| state.is_expanded(&self.id))
    }

    pub fn is_selected(&self) -> Result<bool, TreeError> {
        self.registry
            .read_state(self.tree_id, |state| state.is_selected(&self.id))
    }
}
