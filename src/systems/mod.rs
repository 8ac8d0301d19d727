//! Viewer systems.
//!
//! Submodules overview
//! - [`densities`] – spawn the region grid and play density frames onto it
//! - [`particles`] – stream particle frames into sphere markers
//! - [`render`] – draw markers, status text and debug overlays using Raylib
//! - [`resolver`] – resolver worker thread and its message queue systems
//! - [`time`] – update simulation time and delta

pub mod densities;
pub mod particles;
pub mod render;
pub mod resolver;
pub mod time;
