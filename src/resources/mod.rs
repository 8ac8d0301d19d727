//! ECS resources made available to systems.
//!
//! Overview
//! - `camera3d` – shared 3D camera used by the renderer
//! - `debugmode` – presence toggles the debug HUD and grid wireframe
//! - `densityplayback` – parsed density frames and playback cursor
//! - `frameticker` – interval timer gating "advance one frame"
//! - `particleplayback` – streaming particle feed and playback counters
//! - `playbackphase` – lifecycle shared by both routines
//! - `regiongrid` – layout and enumeration of the density grid
//! - `resolverbridge` – bridge and channels for the resolver thread
//! - `statustext` – single user-visible message surface
//! - `viewerconfig` – INI-backed settings
//! - `worldtime` – simulation time and delta
pub mod camera3d;
pub mod debugmode;
pub mod densityplayback;
pub mod frameticker;
pub mod particleplayback;
pub mod playbackphase;
pub mod regiongrid;
pub mod resolverbridge;
pub mod statustext;
pub mod viewerconfig;
pub mod worldtime;
