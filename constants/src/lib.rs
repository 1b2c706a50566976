//! Shared tuning values for the library engine.
//!
//! Everything here is a default: the runtime manifest may override layout and
//! camera values, see `LayoutSettings` and `ChoreographySettings` in the engine.

pub mod camera;
pub mod layout;
pub mod path;
pub mod render_settings;
