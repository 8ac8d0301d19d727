//! ECS components for marker entities.
//!
//! Submodules overview:
//! - [`particlemarker`] – tag for the per-frame particle spheres
//! - [`regionmarker`] – density grid cell index of a region cube
//! - [`scale`] – uniform marker size
//! - [`tint`] – draw color, derived from density for region cubes
//! - [`worldposition`] – world-space centre of a marker

pub mod particlemarker;
pub mod regionmarker;
pub mod scale;
pub mod tint;
pub mod worldposition;
