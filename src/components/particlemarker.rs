use bevy_ecs::prelude::Component;

/// Tag for the sphere markers of the current particle frame.
///
/// Every accepted particle line despawns all tagged entities and spawns a
/// fresh set, so no marker lives longer than one frame.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct ParticleMarker;
