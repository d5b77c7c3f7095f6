//! Input primitives shared by interactive widgets: key and wheel events,
//! transition timing, fixed-width masks and caret state.

pub mod event;
pub mod mask;
pub mod text_input;
pub mod transitions;

pub use event::{Event, Key, KeyCombo, Modifiers};
pub use mask::{Mask, MaskOptions, MaskReplace, Slot};
pub use text_input::{handle_masked_key, TextEditResult, TextInputData};
pub use transitions::{Easing, TransitionConfig};
