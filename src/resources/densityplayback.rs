//! Density playback state.
//!
//! Holds the fully parsed [`DensityFrames`], the playback cursor and the
//! [`FrameTicker`]. Driven by
//! [`density_playback_system`](crate::systems::densities::density_playback_system).

use bevy_ecs::prelude::Resource;

use crate::frames::densities::DensityFrames;
use crate::resources::frameticker::FrameTicker;
use crate::resources::playbackphase::PlaybackPhase;

/// State of the density playback routine.
#[derive(Resource)]
pub struct DensityPlayback {
    /// Logical name of the results file being played.
    pub file: String,
    pub phase: PlaybackPhase,
    pub ticker: FrameTicker,
    /// Number of region markers in the grid.
    pub cell_count: usize,
    /// Index of the next frame to show.
    pub cursor: usize,
    frames: Option<DensityFrames>,
}

impl DensityPlayback {
    /// New routine waiting for `file` to be resolved.
    pub fn new(file: impl Into<String>, wait_between_frames: f32, cell_count: usize) -> Self {
        Self {
            file: file.into(),
            phase: PlaybackPhase::Resolving,
            ticker: FrameTicker::new(wait_between_frames),
            cell_count,
            cursor: 0,
            frames: None,
        }
    }

    /// Begin playing `frames` from the first one.
    pub fn start(&mut self, frames: DensityFrames) {
        self.frames = Some(frames);
        self.cursor = 0;
        self.phase = PlaybackPhase::Playing;
        self.ticker.restart();
    }

    pub fn finish(&mut self) {
        self.phase = PlaybackPhase::Finished;
    }

    pub fn fail(&mut self) {
        self.frames = None;
        self.phase = PlaybackPhase::Failed;
    }

    pub fn frames(&self) -> Option<&DensityFrames> {
        self.frames.as_ref()
    }
}
