//! Playback failure event and observer.
//!
//! Playback systems trigger [`PlaybackFailedEvent`] when a routine has to
//! stop: the results file could not be resolved, or it could not be read or
//! parsed. The [`playback_failed_observer`] shows the message on the
//! [`StatusText`] surface and logs it. Recoverable problems (a particle line
//! with the wrong shape) are only logged and never reach this event.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::error;

use crate::resources::statustext::StatusText;

/// The playback routine an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routine {
    Particles,
    Densities,
}

impl Routine {
    pub fn as_str(&self) -> &'static str {
        match self {
            Routine::Particles => "particles",
            Routine::Densities => "densities",
        }
    }
}

/// A playback routine stopped because of an error.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct PlaybackFailedEvent {
    pub routine: Routine,
    /// User-facing message for the status text.
    pub message: String,
}

/// Observer that surfaces playback failures to the user.
pub fn playback_failed_observer(trigger: On<PlaybackFailedEvent>, mut status: ResMut<StatusText>) {
    let event = trigger.event();
    error!("[{}] {}", event.routine.as_str(), event.message);
    status.show(event.message.clone());
}
