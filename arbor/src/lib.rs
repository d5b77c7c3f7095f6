//! Stateful widget behaviour: a masked date/time editor, an expandable
//! tree with shared expansion and selection state, and open/close
//! animation sequencing.
//!
//! Rendering is left to the host. Components take input through
//! [`ComponentEvents`](components::ComponentEvents) and expose their
//! state through plain accessors.

pub mod animation;
pub mod components;

pub mod prelude {
    pub use crate::animation::{
        AnimationPlayer, PlayerBuilder, TimelinePlayer, ToggleAnimationOwner,
        ToggleAnimationSettings,
    };
    pub use crate::components::date_time_editor::{
        DatePart, DateRange, DateTimeEditor, DateTimeEditorConfig, DateTimeEditorEventArgs,
        Locale,
    };
    pub use crate::components::tree::{
        NodeId, NodeSelectionEventArgs, Outcome, Tree, TreeConfig, TreeError, TreeId, TreeItem,
        TreeNodeEventArgs, TreeStateRegistry,
    };
    pub use crate::components::{ComponentEvents, EventResult, Selection, SelectionMode};

    pub use spindle::{Event, Key, KeyCombo, Modifiers};
}
