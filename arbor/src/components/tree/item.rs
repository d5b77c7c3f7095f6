//! TreeItem trait for hierarchical data loaded into a Tree.

/// Trait for items that can be loaded into a [`Tree`](super::Tree).
///
/// # Example
///
/// ```
/// use arbor::components::tree::TreeItem;
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct FileNode {
///     path: String,
///     children: Vec<FileNode>,
/// }
///
/// impl TreeItem for FileNode {
///     fn id(&self) -> String {
///         self.path.clone()
///     }
///
///     fn children(&self) -> Vec<Self> {
///         self.children.clone()
///     }
/// }
/// ```
pub trait TreeItem: Clone + Send + Sync + 'static {
    /// Unique, stable identifier for this node.
    ///
    /// This ID must be unique across the entire tree and stable across
    /// updates to maintain expand/collapse and selection state.
    fn id(&self) -> String;

    /// Get child items. Return an empty vec for leaf nodes.
    fn children(&self) -> Vec<Self>;
}
