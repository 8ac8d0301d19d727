//! Particle playback state.
//!
//! Holds the streaming [`ParticleFeed`] and the [`FrameTicker`] that paces
//! it. Driven by
//! [`particle_playback_system`](crate::systems::particles::particle_playback_system).

use bevy_ecs::prelude::Resource;

use crate::frames::particles::ParticleFeed;
use crate::resources::frameticker::FrameTicker;
use crate::resources::playbackphase::PlaybackPhase;

/// State of the particle playback routine.
#[derive(Resource)]
pub struct ParticlePlayback {
    /// Logical name of the results file being played.
    pub file: String,
    pub phase: PlaybackPhase,
    pub ticker: FrameTicker,
    /// Divisor applied to every position.
    pub scale_factor: f32,
    /// Drawn marker radius (already divided by `scale_factor`).
    pub marker_radius: f32,
    /// Frames shown so far.
    pub frames_shown: usize,
    /// Lines rejected for having the wrong shape.
    pub lines_skipped: usize,
    feed: Option<ParticleFeed>,
}

impl ParticlePlayback {
    /// New routine waiting for `file` to be resolved.
    pub fn new(file: impl Into<String>, wait_between_frames: f32, scale_factor: f32, marker_radius: f32) -> Self {
        Self {
            file: file.into(),
            phase: PlaybackPhase::Resolving,
            ticker: FrameTicker::new(wait_between_frames),
            scale_factor,
            marker_radius: marker_radius / scale_factor,
            frames_shown: 0,
            lines_skipped: 0,
            feed: None,
        }
    }

    /// Begin playing `feed` from its first line.
    pub fn start(&mut self, feed: ParticleFeed) {
        self.feed = Some(feed);
        self.phase = PlaybackPhase::Playing;
        self.ticker.restart();
    }

    pub fn finish(&mut self) {
        self.feed = None;
        self.phase = PlaybackPhase::Finished;
    }

    pub fn fail(&mut self) {
        self.feed = None;
        self.phase = PlaybackPhase::Failed;
    }

    pub fn feed_mut(&mut self) -> Option<&mut ParticleFeed> {
        self.feed.as_mut()
    }
}
