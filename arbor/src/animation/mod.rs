//! Animation players and the open/close sequencer built on them.

mod player;
mod toggle;

pub use player::{AnimationPlayer, PlayerBuilder, TimelineBuilder, TimelinePlayer};
pub use toggle::{Direction, ToggleAnimationOwner, ToggleAnimationSettings};
