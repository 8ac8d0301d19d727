//! Debug toggle resource.
//!
//! The mere presence of this resource indicates that the debug HUD and the
//! region grid wireframe should be drawn. Remove it to disable them.

use bevy_ecs::prelude::Resource;

/// Marker resource: when present, the renderer draws overlays.
#[derive(Resource, Clone, Copy)]
pub struct DebugMode {}
