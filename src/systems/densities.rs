//! Density grid spawning and playback.
//!
//! [`spawn_region_grid`] creates one cube marker per
//! [`RegionGrid`] cell before any file is read. The
//! [`density_playback_system`] then loads the resolved density file in a
//! single pass and, every time the ticker fires, recolors each region from
//! the next frame.
//!
//! # Line length policy
//!
//! A frame shorter than the grid updates only its first `len` regions; the
//! rest keep their previous color. Values beyond the grid are ignored.
//! Both cases are logged as warnings.

use bevy_ecs::prelude::*;
use log::{info, warn};

use crate::components::regionmarker::RegionMarker;
use crate::components::scale::Scale;
use crate::components::tint::Tint;
use crate::components::worldposition::WorldPosition;
use crate::events::playback::{PlaybackFailedEvent, Routine};
use crate::events::resolver::ResolveMessage;
use crate::frames::densities::{DensityFrames, normalize_density};
use crate::resources::densityplayback::DensityPlayback;
use crate::resources::playbackphase::PlaybackPhase;
use crate::resources::regiongrid::RegionGrid;
use crate::resources::worldtime::WorldTime;

/// Spawn a transparent cube marker for every grid cell, in enumeration order.
pub fn spawn_region_grid(world: &mut World, grid: &RegionGrid) {
    let size = grid.cell_size();
    world.spawn_batch(
        grid.iter_cells()
            .map(|(index, center)| {
                (
                    RegionMarker { index },
                    WorldPosition::from(center),
                    Scale::new(size),
                    Tint::transparent(),
                )
            })
            .collect::<Vec<_>>(),
    );
    info!(
        "Spawned {} region markers ({}^3, cell size {})",
        grid.cell_count(),
        grid.regions_per_dim,
        size
    );
}

/// System that plays density frames onto the region markers.
pub fn density_playback_system(
    time: Res<WorldTime>,
    playback: Option<ResMut<DensityPlayback>>,
    mut resolved: MessageReader<ResolveMessage>,
    mut regions: Query<(&RegionMarker, &mut Tint)>,
    mut commands: Commands,
) {
    let Some(mut playback) = playback else {
        return;
    };

    for msg in resolved.read() {
        if playback.phase != PlaybackPhase::Resolving || msg.name() != playback.file {
            continue;
        }
        match msg {
            ResolveMessage::Resolved { path, .. } => match DensityFrames::load(path) {
                Ok(frames) => {
                    info!(
                        "Loaded {} density frames from {} (max density {})",
                        frames.len(),
                        path.display(),
                        frames.max_density()
                    );
                    playback.start(frames);
                }
                Err(e) => {
                    playback.fail();
                    commands.trigger(PlaybackFailedEvent {
                        routine: Routine::Densities,
                        message: format!("Error reading results file: {}", e),
                    });
                }
            },
            ResolveMessage::Failed { error, .. } => {
                playback.fail();
                commands.trigger(PlaybackFailedEvent {
                    routine: Routine::Densities,
                    message: error.status_text(),
                });
            }
        }
    }

    if playback.phase != PlaybackPhase::Playing || !playback.ticker.tick(time.delta) {
        return;
    }

    let index = playback.cursor;
    let cell_count = playback.cell_count;
    let shown = match playback.frames() {
        Some(frames) => match frames.frame(index) {
            Some(values) => {
                apply_density_frame(index, values, frames.max_density(), cell_count, &mut regions);
                true
            }
            None => false,
        },
        None => false,
    };

    if shown {
        playback.cursor += 1;
    } else {
        info!("Density playback complete ({} frames)", index);
        playback.finish();
    }
}

/// Recolor region markers from one frame of densities.
pub fn apply_density_frame(
    frame_index: usize,
    values: &[i64],
    max: i64,
    cell_count: usize,
    regions: &mut Query<(&RegionMarker, &mut Tint)>,
) {
    if values.len() < cell_count {
        warn!(
            "Density frame {} has {} values for {} regions; {} regions keep their color",
            frame_index + 1,
            values.len(),
            cell_count,
            cell_count - values.len()
        );
    } else if values.len() > cell_count {
        warn!(
            "Density frame {} has {} values for {} regions; extra values ignored",
            frame_index + 1,
            values.len(),
            cell_count
        );
    }

    for (marker, mut tint) in regions.iter_mut() {
        if let Some(&d) = values.get(marker.index) {
            *tint = Tint::from_density(normalize_density(d, max));
        }
    }
}
