//! Region marker component.
//!
//! One entity per density grid cell, spawned once at startup by
//! [`spawn_region_grid`](crate::systems::densities::spawn_region_grid). The
//! `index` links the marker to the value at the same position in every
//! density line.

use bevy_ecs::prelude::Component;

/// Marks an entity as the visual for grid cell `index`.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegionMarker {
    /// Enumeration index of the cell (x outer, y middle, z inner).
    pub index: usize,
}
