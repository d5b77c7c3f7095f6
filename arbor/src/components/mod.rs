//! Interactive components with self-managed state.
//!
//! Each component lives in its own module with:
//! - `state.rs` - the component state type
//! - `events.rs` - handler registration and input handling
//! - `mod.rs` - public exports

pub mod date_time_editor;
pub mod events;
pub mod selection;
pub mod tree;

pub use date_time_editor::{DateTimeEditor, DateTimeEditorConfig};
pub use events::{ComponentEvents, EventResult};
pub use selection::{Selection, SelectionMode};
pub use tree::{Tree, TreeConfig, TreeId, TreeItem};
