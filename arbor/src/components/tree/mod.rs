//! Tree component for hierarchical data.
//!
//! Nodes live in a flat arena keyed by [`NodeId`]. Which nodes are expanded
//! or selected is kept in a [`TreeStateRegistry`], so several trees can
//! share one registry while keeping their state apart.
//!
//! # Example
//!
//! ```
//! use arbor::components::tree::{Outcome, Tree, TreeItem};
//!
//! #[derive(Clone, Debug)]
//! struct Dir {
//!     path: String,
//!     children: Vec<Dir>,
//! }
//!
//! impl TreeItem for Dir {
//!     fn id(&self) -> String {
//!         self.path.clone()
//!     }
//!
//!     fn children(&self) -> Vec<Self> {
//!         self.children.clone()
//!     }
//! }
//!
//! let root = Dir {
//!     path: "/home".into(),
//!     children: vec![Dir { path: "/home/user".into(), children: vec![] }],
//! };
//! let tree = Tree::with_items(vec![root]).unwrap();
//! let home = "/home".into();
//!
//! assert_eq!(tree.expand(&home).unwrap(), Outcome::Applied);
//! assert_eq!(tree.expand(&home).unwrap(), Outcome::Unchanged);
//! assert_eq!(tree.visible_nodes().unwrap().len(), 2);
//! ```

mod config;
mod error;
mod events;
mod id;
mod item;
mod node;
mod registry;
mod state;

pub use config::TreeConfig;
pub use error::TreeError;
pub use events::{CancelableHandler, NodeSelectionEventArgs, NotifyHandler, TreeNodeEventArgs};
pub use id::{IdGenerator, NodeId, TreeId};
pub use item::TreeItem;
pub use node::{NodeView, TreeNode};
pub use registry::{TreeState, TreeStateRegistry};
pub use state::{Outcome, Tree};
