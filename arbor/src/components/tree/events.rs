//! Event payloads, handler registration and keyboard handling for Tree.

use std::fmt;
use std::sync::Arc;

use log::warn;
use spindle::{Key, KeyCombo};

use crate::components::events::{ComponentEvents, EventResult};

use super::error::TreeError;
use super::id::{NodeId, TreeId};
use super::state::{Outcome, Tree};

/// Payload of the expand and collapse events.
///
/// Setting `cancel` in a `*_ing` handler aborts the transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNodeEventArgs {
    pub owner: TreeId,
    pub node: NodeId,
    pub cancel: bool,
}

impl TreeNodeEventArgs {
    pub fn new(owner: TreeId, node: NodeId) -> Self {
        Self {
            owner,
            node,
            cancel: false,
        }
    }
}

/// Payload of `node_selection`.
///
/// `added` and `removed` hold the full change, including cascaded nodes.
/// A handler may trim either list or set `cancel`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSelectionEventArgs {
    pub owner: TreeId,
    /// The node the change was requested on.
    pub node: NodeId,
    pub added: Vec<NodeId>,
    pub removed: Vec<NodeId>,
    pub cancel: bool,
}

pub type CancelableHandler<A> = Arc<dyn Fn(&mut A) + Send + Sync>;
pub type NotifyHandler<A> = Arc<dyn Fn(&A) + Send + Sync>;

/// Registered callbacks.
#[derive(Clone, Default)]
pub(super) struct TreeHandlers {
    pub node_expanding: Option<CancelableHandler<TreeNodeEventArgs>>,
    pub node_expanded: Option<NotifyHandler<TreeNodeEventArgs>>,
    pub node_collapsing: Option<CancelableHandler<TreeNodeEventArgs>>,
    pub node_collapsed: Option<NotifyHandler<TreeNodeEventArgs>>,
    pub node_selection: Option<CancelableHandler<NodeSelectionEventArgs>>,
}

impl fmt::Debug for TreeHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeHandlers")
            .field("node_expanding", &self.node_expanding.is_some())
            .field("node_expanded", &self.node_expanded.is_some())
            .field("node_collapsing", &self.node_collapsing.is_some())
            .field("node_collapsed", &self.node_collapsed.is_some())
            .field("node_selection", &self.node_selection.is_some())
            .finish()
    }
}

impl<T: Clone> Tree<T> {
    /// Clone a handler out so it can run without the lock held.
    pub(super) fn handler<H>(&self, pick: impl FnOnce(&TreeHandlers) -> Option<H>) -> Option<H> {
        pick(&self.read_inner().handlers)
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Called before a node expands. Set `cancel` to keep it collapsed.
    pub fn on_node_expanding(&self, handler: impl Fn(&mut TreeNodeEventArgs) + Send + Sync + 'static) {
        self.write_inner().handlers.node_expanding = Some(Arc::new(handler));
    }

    pub fn on_node_expanded(&self, handler: impl Fn(&TreeNodeEventArgs) + Send + Sync + 'static) {
        self.write_inner().handlers.node_expanded = Some(Arc::new(handler));
    }

    /// Called before a node collapses. Set `cancel` to keep it expanded.
    pub fn on_node_collapsing(&self, handler: impl Fn(&mut TreeNodeEventArgs) + Send + Sync + 'static) {
        self.write_inner().handlers.node_collapsing = Some(Arc::new(handler));
    }

    pub fn on_node_collapsed(&self, handler: impl Fn(&TreeNodeEventArgs) + Send + Sync + 'static) {
        self.write_inner().handlers.node_collapsed = Some(Arc::new(handler));
    }

    /// Called before a selection change is applied.
    pub fn on_node_selection(
        &self,
        handler: impl Fn(&mut NodeSelectionEventArgs) + Send + Sync + 'static,
    ) {
        self.write_inner().handlers.node_selection = Some(Arc::new(handler));
    }

    // -------------------------------------------------------------------------
    // Keyboard
    // -------------------------------------------------------------------------

    fn move_active(&self, forward: bool) -> Result<bool, TreeError> {
        let visible = self.visible_nodes()?;
        let next = match self.active() {
            None if forward => visible.first().cloned(),
            None => visible.last().cloned(),
            Some(active) => {
                let index = visible.iter().position(|id| *id == active);
                match (index, forward) {
                    (Some(i), true) => visible.get(i + 1).cloned(),
                    (Some(i), false) => i.checked_sub(1).and_then(|i| visible.get(i).cloned()),
                    (None, _) => visible.first().cloned(),
                }
            }
        };
        match next {
            Some(id) => {
                self.set_active(Some(&id))?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn collapse_or_parent(&self, id: &NodeId) -> Result<bool, TreeError> {
        if self.is_expanded(id)? {
            return Ok(self.collapse(id)? != Outcome::Unchanged);
        }
        match self.parent(id) {
            Some(parent) => {
                self.set_active(Some(&parent))?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn handle_key(&self, key: &KeyCombo) -> Result<bool, TreeError> {
        match key.key {
            Key::Up => return self.move_active(false),
            Key::Down => return self.move_active(true),
            _ => {}
        }

        let Some(active) = self.active() else {
            return Ok(false);
        };
        let outcome = match key.key {
            Key::Right => self.expand(&active)?,
            Key::Left => return self.collapse_or_parent(&active),
            Key::Enter => self.toggle(&active)?,
            Key::Char(' ') => self.toggle_selection(&active)?,
            _ => return Ok(false),
        };
        Ok(outcome != Outcome::Unchanged)
    }
}

impl<T: Clone> ComponentEvents for Tree<T> {
    fn on_key(&mut self, key: &KeyCombo) -> EventResult {
        if key.modifiers.ctrl || key.modifiers.alt {
            return EventResult::Ignored;
        }
        match self.handle_key(key) {
            Ok(true) => EventResult::Consumed,
            Ok(false) => EventResult::Ignored,
            Err(e) => {
                warn!("Tree {} ignored key {:?}: {}", self.id(), key.key, e);
                EventResult::Ignored
            }
        }
    }
}
