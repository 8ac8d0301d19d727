//! Simulation results viewer library.
//!
//! This module exposes the viewer's ECS components, resources, systems, and
//! events, plus the results file parsers and tools, for use in integration
//! tests and by the binary.

pub mod components;
pub mod content;
pub mod events;
pub mod frames;
pub mod game;
pub mod resources;
pub mod simulator;
pub mod systems;
