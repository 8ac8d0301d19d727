//! Particle playback system.
//!
//! Each tick the [`particle_playback_system`]:
//!
//! 1. Starts playback when the resolver answers for the configured file.
//! 2. When the [`FrameTicker`](crate::resources::frameticker::FrameTicker)
//!    fires, reads the next line of the feed and replaces every
//!    [`ParticleMarker`] entity with one sphere per parsed position.
//!
//! A line with the wrong value count is logged and skipped, leaving the
//! previous frame on screen. A malformed number or a read error stops the
//! routine through [`PlaybackFailedEvent`].

use bevy_ecs::prelude::*;
use log::{error, info};
use raylib::prelude::{Color, Vector3};

use crate::components::particlemarker::ParticleMarker;
use crate::components::scale::Scale;
use crate::components::tint::Tint;
use crate::components::worldposition::WorldPosition;
use crate::events::playback::{PlaybackFailedEvent, Routine};
use crate::events::resolver::ResolveMessage;
use crate::frames::FrameError;
use crate::frames::particles::{ParticleFeed, parse_particle_line};
use crate::resources::particleplayback::ParticlePlayback;
use crate::resources::playbackphase::PlaybackPhase;
use crate::resources::worldtime::WorldTime;

const PARTICLE_COLOR: Color = Color::new(30, 110, 220, 255);

/// System that streams particle frames into marker entities.
pub fn particle_playback_system(
    time: Res<WorldTime>,
    playback: Option<ResMut<ParticlePlayback>>,
    mut resolved: MessageReader<ResolveMessage>,
    markers: Query<Entity, With<ParticleMarker>>,
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
            ResolveMessage::Resolved { path, .. } => match ParticleFeed::open(path) {
                Ok(feed) => {
                    info!("Playing particles from {}", path.display());
                    playback.start(feed);
                }
                Err(e) => {
                    playback.fail();
                    commands.trigger(PlaybackFailedEvent {
                        routine: Routine::Particles,
                        message: format!("Error reading results file: {}", e),
                    });
                }
            },
            ResolveMessage::Failed { error, .. } => {
                playback.fail();
                commands.trigger(PlaybackFailedEvent {
                    routine: Routine::Particles,
                    message: error.status_text(),
                });
            }
        }
    }

    if playback.phase != PlaybackPhase::Playing || !playback.ticker.tick(time.delta) {
        return;
    }

    let scale = playback.scale_factor;
    let Some(feed) = playback.feed_mut() else {
        return;
    };
    let next = feed.next_line();
    let line_number = feed.line_number();

    let line = match next {
        None => {
            info!(
                "Particle playback complete ({} frames, {} lines skipped)",
                playback.frames_shown, playback.lines_skipped
            );
            playback.finish();
            return;
        }
        Some(Err(e)) => {
            playback.fail();
            commands.trigger(PlaybackFailedEvent {
                routine: Routine::Particles,
                message: format!(
                    "Error reading results file: {}",
                    FrameError::from(e).at_line(line_number + 1)
                ),
            });
            return;
        }
        Some(Ok(line)) => line,
    };

    match parse_particle_line(&line, scale) {
        Ok(points) => {
            for entity in markers.iter() {
                commands.entity(entity).despawn();
            }
            spawn_particle_markers(&mut commands, &points, playback.marker_radius);
            playback.frames_shown += 1;
        }
        Err(e) if e.is_recoverable() => {
            error!("Invalid line format: {} ({})", line, e.at_line(line_number));
            playback.lines_skipped += 1;
        }
        Err(e) => {
            playback.fail();
            commands.trigger(PlaybackFailedEvent {
                routine: Routine::Particles,
                message: format!("Error reading results file: {}", e.at_line(line_number)),
            });
        }
    }
}

/// Spawn one sphere marker per position.
pub fn spawn_particle_markers(commands: &mut Commands, points: &[Vector3], radius: f32) {
    commands.spawn_batch(
        points
            .iter()
            .map(|p| {
                (
                    ParticleMarker,
                    WorldPosition::from(*p),
                    Scale::new(radius),
                    Tint {
                        color: PARTICLE_COLOR,
                    },
                )
            })
            .collect::<Vec<_>>(),
    );
}
