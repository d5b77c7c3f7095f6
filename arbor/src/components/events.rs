//! Component event handling types and traits.
//!
//! This module defines the core types for component-based event handling,
//! allowing each component to handle its own events while keeping the
//! host's event loop as a thin dispatcher.

use spindle::{Event, KeyCombo};

/// Result of handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored, try other handlers.
    Ignored,
    /// Event was consumed, stop propagation.
    Consumed,
}

impl EventResult {
    /// Check if the event was handled.
    pub fn is_handled(&self) -> bool {
        !matches!(self, EventResult::Ignored)
    }
}

/// Trait for components that can handle input events.
///
/// # Default Implementations
///
/// All methods have default implementations that return `EventResult::Ignored`,
/// so components only need to implement the events they care about.
pub trait ComponentEvents {
    /// Handle a key event when this component is focused.
    fn on_key(&mut self, _key: &KeyCombo) -> EventResult {
        EventResult::Ignored
    }

    /// Handle a wheel event. Negative `delta_y` means the wheel moved up.
    fn on_wheel(&mut self, _delta_x: i16, _delta_y: i16) -> EventResult {
        EventResult::Ignored
    }

    /// The component gained focus.
    fn on_focus(&mut self) -> EventResult {
        EventResult::Ignored
    }

    /// The component lost focus.
    fn on_blur(&mut self) -> EventResult {
        EventResult::Ignored
    }

    /// Route an input event to the matching handler.
    fn handle_event(&mut self, event: &Event) -> EventResult {
        match event {
            Event::Key(key) => self.on_key(key),
            Event::Wheel { delta_x, delta_y } => self.on_wheel(*delta_x, *delta_y),
            Event::Focus => self.on_focus(),
            Event::Blur => self.on_blur(),
        }
    }
}
