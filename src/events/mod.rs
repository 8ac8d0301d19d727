//! Event and message types used by the viewer.
//!
//! Submodules:
//! - [`playback`] – failure notifications raised by the playback systems
//! - [`resolver`] – commands and replies for the background resolver thread
pub mod playback;
pub mod resolver;
