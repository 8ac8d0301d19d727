//! Shared 3D camera resource.
//!
//! Wraps raylib's [`raylib::prelude::Camera3D`] so that the renderer and the
//! setup code agree on a single view. The renderer orbits it every frame.

use bevy_ecs::prelude::Resource;
use raylib::prelude::{Camera3D, Vector3};

/// ECS resource that holds the active 3D camera parameters.
#[derive(Resource)]
pub struct Camera3DRes(pub Camera3D);

impl Camera3DRes {
    /// Perspective camera looking at the centre of a cube of edge `extent`
    /// whose minimum corner is the origin.
    pub fn framing_box(extent: f32) -> Self {
        let half = extent * 0.5;
        let target = Vector3::new(half, half, half);
        let position = Vector3::new(half + extent * 1.4, half + extent * 0.9, half + extent * 1.4);
        Self(Camera3D::perspective(
            position,
            target,
            Vector3::new(0.0, 1.0, 0.0),
            45.0,
        ))
    }
}
