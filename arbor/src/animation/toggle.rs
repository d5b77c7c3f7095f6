//! Open/close animation sequencing for expandable components.

use std::fmt;
use std::time::Duration;

use log::debug;
use serde::Deserialize;
use spindle::{Easing, TransitionConfig};

use super::player::{AnimationPlayer, PlayerBuilder, TimelineBuilder};

/// Transitions used for opening and closing.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ToggleAnimationSettings {
    pub open: TransitionConfig,
    pub close: TransitionConfig,
}

impl Default for ToggleAnimationSettings {
    fn default() -> Self {
        Self {
            open: TransitionConfig::new(Duration::from_millis(350), Easing::EaseOut),
            close: TransitionConfig::new(Duration::from_millis(350), Easing::EaseIn),
        }
    }
}

impl ToggleAnimationSettings {
    pub fn new(open: TransitionConfig, close: TransitionConfig) -> Self {
        Self { open, close }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Open,
    Close,
}

struct Track<P> {
    player: P,
    on_done: Box<dyn FnMut()>,
}

/// Owns the open and close players of one component.
///
/// At most one of them is running. Reversing direction mid-flight hands
/// the position over to the other player instead of restarting it.
pub struct ToggleAnimationOwner<B: PlayerBuilder = TimelineBuilder> {
    builder: B,
    settings: ToggleAnimationSettings,
    open: Option<Track<B::Player>>,
    close: Option<Track<B::Player>>,
}

impl<B: PlayerBuilder> fmt::Debug for ToggleAnimationOwner<B>
where
    B::Player: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToggleAnimationOwner")
            .field("settings", &self.settings)
            .field("open", &self.open.as_ref().map(|t| &t.player))
            .field("close", &self.close.as_ref().map(|t| &t.player))
            .finish()
    }
}

impl Default for ToggleAnimationOwner {
    fn default() -> Self {
        Self::new(ToggleAnimationSettings::default())
    }
}

impl ToggleAnimationOwner {
    pub fn new(settings: ToggleAnimationSettings) -> Self {
        Self::with_builder(TimelineBuilder, settings)
    }
}

impl<B: PlayerBuilder> ToggleAnimationOwner<B> {
    pub fn with_builder(builder: B, settings: ToggleAnimationSettings) -> Self {
        Self {
            builder,
            settings,
            open: None,
            close: None,
        }
    }

    pub fn settings(&self) -> &ToggleAnimationSettings {
        &self.settings
    }

    /// New settings apply to players built after this call.
    pub fn set_settings(&mut self, settings: ToggleAnimationSettings) {
        self.settings = settings;
    }

    pub fn open_player(&self) -> Option<&B::Player> {
        self.open.as_ref().map(|t| &t.player)
    }

    pub fn close_player(&self) -> Option<&B::Player> {
        self.close.as_ref().map(|t| &t.player)
    }

    /// Whether either player is running.
    pub fn is_animating(&self) -> bool {
        [&self.open, &self.close]
            .into_iter()
            .flatten()
            .any(|t| t.player.has_started() && !t.player.is_done())
    }

    /// Play the open animation on `target`.
    ///
    /// Does nothing without a target or while the open player is already
    /// running. A running close animation is discarded and the open player
    /// starts from the mirrored position. `on_done` is bound when the player
    /// is first built and runs on every completion, after which the player
    /// is reset for reuse. Later calls do not replace it.
    /// Returns whether playback started.
    pub fn play_open(
        &mut self,
        target: Option<&B::Target>,
        on_done: impl FnMut() + 'static,
    ) -> bool {
        self.play(Direction::Open, target, on_done)
    }

    /// Mirror of [`play_open`](Self::play_open).
    pub fn play_close(
        &mut self,
        target: Option<&B::Target>,
        on_done: impl FnMut() + 'static,
    ) -> bool {
        self.play(Direction::Close, target, on_done)
    }

    fn play(
        &mut self,
        direction: Direction,
        target: Option<&B::Target>,
        on_done: impl FnMut() + 'static,
    ) -> bool {
        let Some(target) = target else {
            return false;
        };

        let (transition, slot, opposite) = match direction {
            Direction::Open => (self.settings.open, &mut self.open, &mut self.close),
            Direction::Close => (self.settings.close, &mut self.close, &mut self.open),
        };
        let builder = &self.builder;
        let track = slot.get_or_insert_with(|| Track {
            player: builder.build(&transition, target),
            on_done: Box::new(on_done),
        });

        if track.player.has_started() {
            return false;
        }

        if let Some(mut previous) = opposite.take_if(|t| t.player.has_started()) {
            let position = 1.0 - previous.player.position();
            previous.player.reset();
            track.player.init();
            track.player.set_position(position);
            debug!("{:?} animation takes over at {:.2}", direction, position);
        }

        track.player.play();
        true
    }

    /// Drive the running player. Completion fires the done callback and
    /// then resets the player.
    pub fn tick(&mut self, dt: Duration) {
        for track in [self.open.as_mut(), self.close.as_mut()].into_iter().flatten() {
            if track.player.advance(dt) {
                (track.on_done)();
                track.player.reset();
            }
        }
    }
}
