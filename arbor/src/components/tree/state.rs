//! Tree component state.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{debug, trace};

use crate::components::selection::SelectionMode;

use super::config::TreeConfig;
use super::error::TreeError;
use super::events::{NodeSelectionEventArgs, TreeHandlers, TreeNodeEventArgs};
use super::id::{IdGenerator, NodeId, TreeId};
use super::item::TreeItem;
use super::node::{NodeEntry, NodeView, TreeNode};
use super::registry::{TreeState, TreeStateRegistry};

/// Result of a state transition request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The state changed and the post-event was emitted.
    Applied,
    /// A pre-event handler set `cancel`.
    Canceled,
    /// The node was already in the requested state.
    Unchanged,
}

/// Internal state for the Tree component.
#[derive(Debug)]
pub(super) struct TreeInner<T> {
    /// Node arena.
    pub nodes: HashMap<NodeId, NodeEntry<T>>,
    /// Top-level nodes in insertion order.
    pub roots: Vec<NodeId>,
    pub ids: IdGenerator,
    /// Node receiving keyboard input.
    pub active: Option<NodeId>,
    pub config: TreeConfig,
    pub handlers: TreeHandlers,
}

impl<T> TreeInner<T> {
    fn view<'a>(&'a self, id: &'a NodeId, entry: &'a NodeEntry<T>) -> NodeView<'a, T> {
        NodeView {
            id,
            data: &entry.data,
            level: entry.level,
            parent: entry.parent.as_ref(),
        }
    }

    /// All ids, depth first, parents before children.
    fn walk(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<&NodeId> = self.roots.iter().rev().collect();
        while let Some(id) = stack.pop() {
            out.push(id.clone());
            if let Some(entry) = self.nodes.get(id) {
                stack.extend(entry.children.iter().rev());
            }
        }
        out
    }

    fn descendants(&self, id: &NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<&NodeId> = match self.nodes.get(id) {
            Some(entry) => entry.children.iter().rev().collect(),
            None => return out,
        };
        while let Some(child) = stack.pop() {
            out.push(child.clone());
            if let Some(entry) = self.nodes.get(child) {
                stack.extend(entry.children.iter().rev());
            }
        }
        out
    }

    /// Ancestors, nearest first.
    fn ancestors(&self, id: &NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = self.nodes.get(id).and_then(|e| e.parent.clone());
        while let Some(parent) = current {
            current = self.nodes.get(&parent).and_then(|e| e.parent.clone());
            out.push(parent);
        }
        out
    }
}

/// A tree of nodes with expansion and selection state.
///
/// `Tree<T>` stores nodes in a flat id-indexed arena. The expanded and
/// selected sets live in a [`TreeStateRegistry`] under the tree's id.
/// Expand, collapse and select go through cancelable pre-events and, when
/// applied, post-events. No lock is held while a handler runs, so handlers
/// may call back into the tree.
#[derive(Debug)]
pub struct Tree<T> {
    /// Unique identifier.
    id: TreeId,
    /// Internal state.
    pub(super) inner: Arc<RwLock<TreeInner<T>>>,
    registry: TreeStateRegistry,
    /// Dirty flag for re-render.
    dirty: Arc<AtomicBool>,
}

impl<T> Clone for Tree<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            registry: self.registry.clone(),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl<T: Clone> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Tree<T> {
    /// Create an empty tree with its own registry.
    pub fn new() -> Self {
        Self::with_registry(TreeStateRegistry::new(), TreeConfig::default())
    }

    pub fn with_config(config: TreeConfig) -> Self {
        Self::with_registry(TreeStateRegistry::new(), config)
    }

    /// Create an empty tree whose state lives in `registry`.
    pub fn with_registry(registry: TreeStateRegistry, config: TreeConfig) -> Self {
        let id = TreeId::new();
        registry.register(id);
        Self {
            id,
            inner: Arc::new(RwLock::new(TreeInner {
                nodes: HashMap::new(),
                roots: Vec::new(),
                ids: IdGenerator::new(),
                active: None,
                config,
                handlers: TreeHandlers::default(),
            })),
            registry,
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get the unique ID.
    pub fn id(&self) -> TreeId {
        self.id
    }

    pub fn registry(&self) -> &TreeStateRegistry {
        &self.registry
    }

    pub(super) fn read_inner(&self) -> RwLockReadGuard<'_, TreeInner<T>> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    pub(super) fn write_inner(&self) -> RwLockWriteGuard<'_, TreeInner<T>> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    pub fn config(&self) -> TreeConfig {
        self.read_inner().config
    }

    pub fn set_selection_mode(&self, mode: SelectionMode) {
        self.write_inner().config.selection = mode;
    }

    pub fn set_single_branch_expand(&self, enabled: bool) {
        self.write_inner().config.single_branch_expand = enabled;
    }

    /// Check if the tree needs re-rendering.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag (called after rendering).
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }

    fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::SeqCst);
    }

    /// Drop this tree's state from the registry. Every later state
    /// operation fails with [`TreeError::Unregistered`].
    pub fn destroy(&self) {
        self.registry.clear(self.id);
        self.write_inner().active = None;
        self.mark_dirty();
    }

    // -------------------------------------------------------------------------
    // Nodes
    // -------------------------------------------------------------------------

    /// Register a node under `parent` (or as a root) with a generated id.
    pub fn register_node(&self, parent: Option<&NodeId>, data: T) -> Result<NodeId, TreeError> {
        let mut inner = self.write_inner();
        let mut id = inner.ids.next_id();
        while inner.nodes.contains_key(&id) {
            id = inner.ids.next_id();
        }
        Self::insert_node(&mut inner, id.clone(), parent, data)?;
        drop(inner);
        self.mark_dirty();
        Ok(id)
    }

    /// Register a node with a caller-chosen id.
    pub fn register_node_with_id(
        &self,
        id: impl Into<NodeId>,
        parent: Option<&NodeId>,
        data: T,
    ) -> Result<NodeId, TreeError> {
        let id = id.into();
        Self::insert_node(&mut self.write_inner(), id.clone(), parent, data)?;
        self.mark_dirty();
        Ok(id)
    }

    fn insert_node(
        inner: &mut TreeInner<T>,
        id: NodeId,
        parent: Option<&NodeId>,
        data: T,
    ) -> Result<(), TreeError> {
        if inner.nodes.contains_key(&id) {
            return Err(TreeError::DuplicateNode(id));
        }
        let level = match parent {
            Some(parent_id) => {
                let parent_entry = inner
                    .nodes
                    .get_mut(parent_id)
                    .ok_or_else(|| TreeError::UnknownNode(parent_id.clone()))?;
                parent_entry.children.push(id.clone());
                parent_entry.level + 1
            }
            None => {
                inner.roots.push(id.clone());
                0
            }
        };
        trace!("Registered node {} at level {}", id, level);
        inner.nodes.insert(
            id,
            NodeEntry {
                data,
                parent: parent.cloned(),
                children: Vec::new(),
                level,
            },
        );
        Ok(())
    }

    /// Remove a node and everything below it.
    /// Returns the removed ids, the node itself first.
    pub fn remove_node(&self, id: &NodeId) -> Result<Vec<NodeId>, TreeError> {
        let removed = {
            let mut inner = self.write_inner();
            let entry = inner
                .nodes
                .get(id)
                .ok_or_else(|| TreeError::UnknownNode(id.clone()))?;
            let parent = entry.parent.clone();

            let mut removed = vec![id.clone()];
            removed.extend(inner.descendants(id));
            for node in &removed {
                inner.nodes.remove(node);
            }
            match parent {
                Some(parent) => {
                    if let Some(parent_entry) = inner.nodes.get_mut(&parent) {
                        parent_entry.children.retain(|c| c != id);
                    }
                }
                None => inner.roots.retain(|r| r != id),
            }
            if inner.active.as_ref().is_some_and(|a| removed.contains(a)) {
                inner.active = None;
            }
            removed
        };

        // Removing nodes from a destroyed tree has no state to clean up.
        let _ = self.registry.write_state(self.id, |state| {
            for node in &removed {
                state.forget(node);
            }
        });
        self.mark_dirty();
        Ok(removed)
    }

    /// Handle to a node.
    pub fn node(&self, id: &NodeId) -> Option<TreeNode<T>> {
        self.contains(id).then(|| TreeNode {
            id: id.clone(),
            tree_id: self.id,
            tree: Arc::downgrade(&self.inner),
            registry: self.registry.clone(),
        })
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.read_inner().nodes.contains_key(id)
    }

    /// Get the number of nodes.
    pub fn len(&self) -> usize {
        self.read_inner().nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn data(&self, id: &NodeId) -> Option<T> {
        self.read_inner().nodes.get(id).map(|e| e.data.clone())
    }

    pub fn level(&self, id: &NodeId) -> Option<usize> {
        self.read_inner().nodes.get(id).map(|e| e.level)
    }

    pub fn parent(&self, id: &NodeId) -> Option<NodeId> {
        self.read_inner().nodes.get(id).and_then(|e| e.parent.clone())
    }

    pub fn children(&self, id: &NodeId) -> Vec<NodeId> {
        self.read_inner()
            .nodes
            .get(id)
            .map(|e| e.children.clone())
            .unwrap_or_default()
    }

    pub fn roots(&self) -> Vec<NodeId> {
        self.read_inner().roots.clone()
    }

    /// Every node id, depth first.
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.read_inner().walk()
    }

    /// Ids of nodes whose ancestors are all expanded, depth first.
    pub fn visible_nodes(&self) -> Result<Vec<NodeId>, TreeError> {
        let state = self.registry.get(self.id)?;
        let inner = self.read_inner();
        let mut out = Vec::new();
        let mut stack: Vec<&NodeId> = inner.roots.iter().rev().collect();
        while let Some(id) = stack.pop() {
            out.push(id.clone());
            if state.is_expanded(id) {
                if let Some(entry) = inner.nodes.get(id) {
                    stack.extend(entry.children.iter().rev());
                }
            }
        }
        Ok(out)
    }

    fn check(&self, id: &NodeId) -> Result<(), TreeError> {
        if !self.registry.is_registered(self.id) {
            return Err(TreeError::Unregistered(self.id));
        }
        if !self.contains(id) {
            return Err(TreeError::UnknownNode(id.clone()));
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Search
    // -------------------------------------------------------------------------

    /// Nodes for which `comparer(term, node)` holds, depth first.
    pub fn find_nodes_with<S: ?Sized>(
        &self,
        term: &S,
        comparer: impl Fn(&S, &NodeView<'_, T>) -> bool,
    ) -> Vec<NodeId> {
        self.find_nodes_by(|node| comparer(term, node))
    }

    /// Nodes matching `predicate`, depth first.
    pub fn find_nodes_by(&self, predicate: impl Fn(&NodeView<'_, T>) -> bool) -> Vec<NodeId> {
        let inner = self.read_inner();
        inner
            .walk()
            .into_iter()
            .filter(|id| {
                inner
                    .nodes
                    .get(id)
                    .is_some_and(|entry| predicate(&inner.view(id, entry)))
            })
            .collect()
    }

    // -------------------------------------------------------------------------
    // Expansion
    // -------------------------------------------------------------------------

    pub fn is_expanded(&self, id: &NodeId) -> Result<bool, TreeError> {
        self.registry.read_state(self.id, |s| s.is_expanded(id))
    }

    /// Expanded ids, sorted.
    pub fn expanded(&self) -> Result<Vec<NodeId>, TreeError> {
        self.registry.read_state(self.id, TreeState::expanded)
    }

    /// Expand a node.
    ///
    /// Emits `node_expanding` first; a handler may cancel. With single
    /// branch expand every other node on the same level is collapsed
    /// directly, without events. That also happens when the node is
    /// already expanded, which otherwise changes nothing.
    pub fn expand(&self, id: &NodeId) -> Result<Outcome, TreeError> {
        self.expand_node(id, true)
    }

    fn expand_node(&self, id: &NodeId, exclusive: bool) -> Result<Outcome, TreeError> {
        self.check(id)?;
        let exclusive = exclusive && self.config().single_branch_expand;

        if self.is_expanded(id)? {
            // Already open; still enforce one expanded node per level.
            if exclusive {
                self.collapse_same_level(id)?;
            }
            return Ok(Outcome::Unchanged);
        }

        let mut args = TreeNodeEventArgs::new(self.id, id.clone());
        if let Some(handler) = self.handler(|h| h.node_expanding.clone()) {
            handler(&mut args);
        }
        if args.cancel {
            debug!("Expand of {} canceled", id);
            return Ok(Outcome::Canceled);
        }

        self.registry.write_state(self.id, |state| {
            state.expanded.insert(id.clone());
        })?;
        debug!("Expanded {}", id);
        if exclusive {
            self.collapse_same_level(id)?;
        }
        self.mark_dirty();

        if let Some(handler) = self.handler(|h| h.node_expanded.clone()) {
            handler(&args);
        }
        Ok(Outcome::Applied)
    }

    /// Collapse every other node on the level of `id`, without events.
    fn collapse_same_level(&self, id: &NodeId) -> Result<(), TreeError> {
        let level = self.level(id);
        let others = self.find_nodes_with(&(id, level), |(target, level), node| {
            node.id != *target && Some(node.level) == *level
        });
        let collapsed = self.registry.write_state(self.id, |state| {
            others.iter().filter(|other| state.expanded.remove(*other)).count()
        })?;
        if collapsed > 0 {
            debug!("Single branch expand of {} collapsed {} nodes", id, collapsed);
            self.mark_dirty();
        }
        Ok(())
    }

    /// Collapse a node. Emits `node_collapsing` first; a handler may cancel.
    pub fn collapse(&self, id: &NodeId) -> Result<Outcome, TreeError> {
        self.check(id)?;
        if !self.is_expanded(id)? {
            return Ok(Outcome::Unchanged);
        }

        let mut args = TreeNodeEventArgs::new(self.id, id.clone());
        if let Some(handler) = self.handler(|h| h.node_collapsing.clone()) {
            handler(&mut args);
        }
        if args.cancel {
            debug!("Collapse of {} canceled", id);
            return Ok(Outcome::Canceled);
        }

        self.registry.write_state(self.id, |state| {
            state.expanded.remove(id);
        })?;
        debug!("Collapsed {}", id);
        self.mark_dirty();

        if let Some(handler) = self.handler(|h| h.node_collapsed.clone()) {
            handler(&args);
        }
        Ok(Outcome::Applied)
    }

    /// Collapse if expanded, expand otherwise.
    pub fn toggle(&self, id: &NodeId) -> Result<Outcome, TreeError> {
        if self.is_expanded(id)? {
            self.collapse(id)
        } else {
            self.expand(id)
        }
    }

    /// Expand every node that has children, each through the eventful
    /// path. Single branch expand does not apply.
    /// Returns how many nodes were expanded.
    pub fn expand_all(&self) -> Result<usize, TreeError> {
        let mut count = 0;
        for id in self.node_ids() {
            if self.children(&id).is_empty() {
                continue;
            }
            if self.expand_node(&id, false)? == Outcome::Applied {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Collapse every expanded node, each through the eventful path.
    /// Returns how many nodes were collapsed.
    pub fn collapse_all(&self) -> Result<usize, TreeError> {
        let mut count = 0;
        for id in self.expanded()? {
            if !self.contains(&id) {
                continue;
            }
            if self.collapse(&id)? == Outcome::Applied {
                count += 1;
            }
        }
        Ok(count)
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    pub fn is_selected(&self, id: &NodeId) -> Result<bool, TreeError> {
        self.registry.read_state(self.id, |s| s.is_selected(id))
    }

    /// Selected ids, sorted.
    pub fn selected(&self) -> Result<Vec<NodeId>, TreeError> {
        self.registry.read_state(self.id, TreeState::selected)
    }

    /// In cascading mode, whether some but not all descendants of `id`
    /// are selected. Always false in the other modes.
    pub fn is_indeterminate(&self, id: &NodeId) -> Result<bool, TreeError> {
        self.check(id)?;
        if self.config().selection != SelectionMode::Cascading {
            return Ok(false);
        }
        let descendants = self.read_inner().descendants(id);
        if descendants.is_empty() {
            return Ok(false);
        }
        let selected = self.registry.read_state(self.id, |s| {
            descendants.iter().filter(|d| s.is_selected(d)).count()
        })?;
        Ok(selected > 0 && selected < descendants.len())
    }

    /// Select a node.
    ///
    /// In cascading mode this also selects every descendant, then every
    /// ancestor whose children all end up selected. Emits a cancelable
    /// `node_selection` carrying the full change. Ignored when selection
    /// is disabled.
    pub fn select(&self, id: &NodeId) -> Result<Outcome, TreeError> {
        self.check(id)?;
        let state = self.registry.get(self.id)?;

        let added = match self.config().selection {
            SelectionMode::None => return Ok(Outcome::Unchanged),
            SelectionMode::BiState => vec![id.clone()],
            SelectionMode::Cascading => {
                let inner = self.read_inner();
                let mut targets = vec![id.clone()];
                targets.extend(inner.descendants(id));

                let mut will_be: HashSet<NodeId> = state.selected().into_iter().collect();
                will_be.extend(targets.iter().cloned());
                for ancestor in inner.ancestors(id) {
                    let all_children = inner
                        .nodes
                        .get(&ancestor)
                        .is_some_and(|e| e.children.iter().all(|c| will_be.contains(c)));
                    if !all_children {
                        break;
                    }
                    will_be.insert(ancestor.clone());
                    targets.push(ancestor);
                }
                targets
            }
        };

        let added: Vec<NodeId> = added.into_iter().filter(|n| !state.is_selected(n)).collect();
        self.apply_selection(id, added, Vec::new())
    }

    /// Deselect a node.
    ///
    /// In cascading mode this also deselects every descendant and every
    /// ancestor. Emits a cancelable `node_selection`.
    pub fn deselect(&self, id: &NodeId) -> Result<Outcome, TreeError> {
        self.check(id)?;
        let state = self.registry.get(self.id)?;

        let removed = match self.config().selection {
            SelectionMode::None => return Ok(Outcome::Unchanged),
            SelectionMode::BiState => vec![id.clone()],
            SelectionMode::Cascading => {
                let inner = self.read_inner();
                let mut targets = vec![id.clone()];
                targets.extend(inner.descendants(id));
                targets.extend(inner.ancestors(id));
                targets
            }
        };

        let removed: Vec<NodeId> = removed.into_iter().filter(|n| state.is_selected(n)).collect();
        self.apply_selection(id, Vec::new(), removed)
    }

    /// Deselect if selected, select otherwise.
    pub fn toggle_selection(&self, id: &NodeId) -> Result<Outcome, TreeError> {
        if self.is_selected(id)? {
            self.deselect(id)
        } else {
            self.select(id)
        }
    }

    fn apply_selection(
        &self,
        id: &NodeId,
        added: Vec<NodeId>,
        removed: Vec<NodeId>,
    ) -> Result<Outcome, TreeError> {
        if added.is_empty() && removed.is_empty() {
            return Ok(Outcome::Unchanged);
        }

        let mut args = NodeSelectionEventArgs {
            owner: self.id,
            node: id.clone(),
            added,
            removed,
            cancel: false,
        };
        if let Some(handler) = self.handler(|h| h.node_selection.clone()) {
            handler(&mut args);
        }
        if args.cancel {
            debug!("Selection change on {} canceled", id);
            return Ok(Outcome::Canceled);
        }

        self.registry.write_state(self.id, |state| {
            state.selection.deselect_all(&args.removed);
            state.selection.select_all(&args.added);
        })?;
        debug!(
            "Selection on {}: +{} -{}",
            id,
            args.added.len(),
            args.removed.len()
        );
        self.mark_dirty();
        Ok(Outcome::Applied)
    }

    /// Select every node without emitting events. Ignored when selection
    /// is disabled. Returns the newly selected ids.
    pub fn select_all(&self) -> Result<Vec<NodeId>, TreeError> {
        if self.config().selection == SelectionMode::None {
            return Ok(Vec::new());
        }
        let ids = self.node_ids();
        let added = self
            .registry
            .write_state(self.id, |state| state.selection.select_all(&ids))?;
        self.mark_dirty();
        Ok(added)
    }

    /// Clear the selection without emitting events.
    /// Returns the previously selected ids.
    pub fn deselect_all(&self) -> Result<Vec<NodeId>, TreeError> {
        let removed = self
            .registry
            .write_state(self.id, |state| state.selection.clear())?;
        self.mark_dirty();
        Ok(removed)
    }

    // -------------------------------------------------------------------------
    // Active node
    // -------------------------------------------------------------------------

    /// Node receiving keyboard input.
    pub fn active(&self) -> Option<NodeId> {
        self.read_inner().active.clone()
    }

    pub fn set_active(&self, id: Option<&NodeId>) -> Result<(), TreeError> {
        if let Some(id) = id {
            self.check(id)?;
        }
        self.write_inner().active = id.cloned();
        self.mark_dirty();
        Ok(())
    }
}

impl<T: Clone + PartialEq> Tree<T> {
    /// Nodes whose bound data equals `term`, depth first.
    pub fn find_nodes(&self, term: &T) -> Vec<NodeId> {
        self.find_nodes_with(term, |term, node| node.data == term)
    }
}

impl<T: TreeItem> Tree<T> {
    /// Create a tree from a hierarchy of items, using each item's id.
    pub fn with_items(items: Vec<T>) -> Result<Self, TreeError> {
        Self::with_items_and_config(items, TreeConfig::default())
    }

    pub fn with_items_and_config(items: Vec<T>, config: TreeConfig) -> Result<Self, TreeError> {
        let tree = Self::with_config(config);
        let mut pending: Vec<(Option<NodeId>, T)> =
            items.into_iter().rev().map(|item| (None, item)).collect();
        while let Some((parent, item)) = pending.pop() {
            let children = item.children();
            let id = tree.register_node_with_id(item.id(), parent.as_ref(), item)?;
            pending.extend(children.into_iter().rev().map(|c| (Some(id.clone()), c)));
        }
        Ok(tree)
    }
}
