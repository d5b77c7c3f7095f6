use thiserror::Error;

use super::id::{NodeId, TreeId};

/// Structural errors from tree operations.
///
/// Canceled transitions and idempotent no-ops are not errors; see
/// [`Outcome`](super::Outcome).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The tree has no registered state, either because it was never
    /// registered or because it was destroyed.
    #[error("Tree '{0}' has no registered state")]
    Unregistered(TreeId),

    #[error("Node '{0}' does not exist in this tree")]
    UnknownNode(NodeId),

    #[error("Node '{0}' is already registered")]
    DuplicateNode(NodeId),
}
