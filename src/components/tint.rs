//! Color tint component for rendering markers.
//!
//! Particle spheres carry a fixed tint. Region cubes start fully
//! transparent and get a new tint for every density frame through
//! [`Tint::from_density`].

use bevy_ecs::prelude::Component;
use raylib::prelude::Color;

/// Color applied when drawing a marker.
#[derive(Component, Clone, Debug, Copy, PartialEq)]
pub struct Tint {
    pub color: Color,
}

impl Tint {
    /// Create a new Tint with the specified RGBA values.
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            color: Color::new(r, g, b, a),
        }
    }

    /// Red tint for a normalised density `t` in `[0, 1]`.
    ///
    /// The color is `(t, 0, 0)` with alpha `t`, so empty regions vanish and
    /// the densest region is opaque red. Out-of-range input is clamped.
    pub fn from_density(t: f32) -> Self {
        let level = (t.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(level, 0, 0, level)
    }

    /// Fully transparent black, the state of a region before its first frame.
    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    pub fn is_visible(&self) -> bool {
        self.color.a > 0
    }
}
