//! Status text resource.
//!
//! The single user-visible text surface of the viewer. Playback routines
//! write error messages here; the renderer draws it over the scene.

use bevy_ecs::prelude::Resource;

/// Message currently shown to the user, if any.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusText {
    text: Option<String>,
}

impl StatusText {
    /// Replace the displayed message.
    pub fn show(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    pub fn get(&self) -> Option<&str> {
        self.text.as_deref()
    }
}
