use bevy_ecs::prelude::Component;

/// Uniform marker size in world units.
///
/// Spheres read it as a radius, region cubes as their edge length.
#[derive(Component, Clone, Debug, Copy, PartialEq)]
pub struct Scale {
    pub size: f32,
}

impl Scale {
    pub fn new(size: f32) -> Self {
        Self { size }
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::new(1.0)
    }
}
