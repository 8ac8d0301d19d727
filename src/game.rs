//! Scene setup for the two playback routines.
//!
//! [`setup_common`] inserts the resources and observers both routines share.
//! [`setup_particles`] and [`setup_densities`] then prepare one routine and
//! ask the resolver thread for its results file. [`build_update_schedule`]
//! returns the per-frame logic schedule; rendering runs after it, outside
//! the schedule.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use log::{info, warn};

use crate::events::playback::playback_failed_observer;
use crate::events::resolver::ResolveMessage;
use crate::resources::camera3d::Camera3DRes;
use crate::resources::densityplayback::DensityPlayback;
use crate::resources::particleplayback::ParticlePlayback;
use crate::resources::resolverbridge::ResolverBridge;
use crate::resources::statustext::StatusText;
use crate::resources::viewerconfig::ViewerConfig;
use crate::resources::worldtime::WorldTime;
use crate::systems::densities::{density_playback_system, spawn_region_grid};
use crate::systems::particles::particle_playback_system;
use crate::systems::resolver::{poll_resolver_messages, update_resolver_messages};

/// Insert the shared resources and observers.
///
/// The resolver bridge is set up separately with
/// [`setup_resolver`](crate::resources::resolverbridge::setup_resolver).
pub fn setup_common(world: &mut World) {
    world.insert_resource(WorldTime::default());
    world.insert_resource(StatusText::default());
    world.init_resource::<Messages<ResolveMessage>>();
    world.spawn(Observer::new(playback_failed_observer));
    world.flush();
}

/// Prepare particle playback of `file`.
pub fn setup_particles(world: &mut World, config: &ViewerConfig, file: &str) {
    world.insert_resource(ParticlePlayback::new(
        file,
        config.wait_between_frames,
        config.scale_factor,
        config.marker_radius,
    ));
    world.insert_resource(Camera3DRes::framing_box(
        config.box_width / config.scale_factor,
    ));
    request_file(world, file);
    info!("Particle playback set up for {}", file);
}

/// Prepare density playback of `file`.
///
/// The region grid is spawned here, before the file is requested.
pub fn setup_densities(world: &mut World, config: &ViewerConfig, file: &str) {
    let grid = config.region_grid();
    spawn_region_grid(world, &grid);
    world.insert_resource(grid);
    world.insert_resource(DensityPlayback::new(
        file,
        config.wait_between_frames,
        grid.cell_count(),
    ));
    world.insert_resource(Camera3DRes::framing_box(grid.box_width));
    request_file(world, file);
    info!("Density playback set up for {}", file);
}

fn request_file(world: &mut World, file: &str) {
    match world.get_resource_mut::<ResolverBridge>() {
        Some(mut bridge) => bridge.request(file),
        None => warn!("No resolver available; {} will never load", file),
    }
}

/// Per-frame logic: drain resolver replies, then advance playback.
pub fn build_update_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(
        // resolver message systems must be together
        (poll_resolver_messages, update_resolver_messages).chain(),
    );
    update.add_systems(particle_playback_system.after(update_resolver_messages));
    update.add_systems(density_playback_system.after(update_resolver_messages));
    update
}
