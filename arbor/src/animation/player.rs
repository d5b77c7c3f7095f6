//! Animation players.

use std::time::Duration;

use log::trace;
use spindle::TransitionConfig;

/// A single playable animation.
///
/// Positions are linear time fractions in `0.0..=1.0`; easing only affects
/// the rendered value.
pub trait AnimationPlayer {
    /// Prepare the player for an explicit `set_position`.
    fn init(&mut self);

    fn play(&mut self);

    /// Return to the initial, not-started state.
    fn reset(&mut self);

    fn has_started(&self) -> bool;

    fn position(&self) -> f32;

    fn set_position(&mut self, position: f32);

    fn is_done(&self) -> bool;

    /// Move the clock forward. Returns true when this call finished the
    /// animation.
    fn advance(&mut self, dt: Duration) -> bool;
}

/// Creates players bound to a target.
pub trait PlayerBuilder {
    type Target: ?Sized;
    type Player: AnimationPlayer;

    fn build(&self, transition: &TransitionConfig, target: &Self::Target) -> Self::Player;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlayState {
    Idle,
    Running,
    Finished,
}

/// Player that walks a [`TransitionConfig`] on an explicit clock.
#[derive(Debug, Clone)]
pub struct TimelinePlayer {
    target: String,
    transition: TransitionConfig,
    elapsed: Duration,
    state: PlayState,
}

impl TimelinePlayer {
    pub fn new(target: impl Into<String>, transition: TransitionConfig) -> Self {
        Self {
            target: target.into(),
            transition,
            elapsed: Duration::ZERO,
            state: PlayState::Idle,
        }
    }

    /// Id of the animated element.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn transition(&self) -> TransitionConfig {
        self.transition
    }

    /// Eased progress at the current position.
    pub fn value(&self) -> f32 {
        self.transition.progress_at(self.elapsed)
    }
}

impl AnimationPlayer for TimelinePlayer {
    fn init(&mut self) {
        self.elapsed = Duration::ZERO;
        self.state = PlayState::Idle;
    }

    fn play(&mut self) {
        if self.state != PlayState::Running {
            trace!("Playing '{}' from {:.2}", self.target, self.position());
            self.state = PlayState::Running;
        }
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
        self.state = PlayState::Idle;
    }

    fn has_started(&self) -> bool {
        self.state != PlayState::Idle
    }

    fn position(&self) -> f32 {
        if self.transition.duration.is_zero() {
            return if self.state == PlayState::Finished { 1.0 } else { 0.0 };
        }
        (self.elapsed.as_secs_f32() / self.transition.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    fn set_position(&mut self, position: f32) {
        self.elapsed = self.transition.duration.mul_f32(position.clamp(0.0, 1.0));
    }

    fn is_done(&self) -> bool {
        self.state == PlayState::Finished
    }

    fn advance(&mut self, dt: Duration) -> bool {
        if self.state != PlayState::Running {
            return false;
        }
        self.elapsed = (self.elapsed + dt).min(self.transition.duration);
        if self.elapsed >= self.transition.duration {
            self.state = PlayState::Finished;
            return true;
        }
        false
    }
}

/// Builds [`TimelinePlayer`]s for element ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimelineBuilder;

impl PlayerBuilder for TimelineBuilder {
    type Target = str;
    type Player = TimelinePlayer;

    fn build(&self, transition: &TransitionConfig, target: &str) -> TimelinePlayer {
        TimelinePlayer::new(target, *transition)
    }
}
