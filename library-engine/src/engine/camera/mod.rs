//! Camera choreography for hierarchy navigation.
//!
//! Frames each navigation level from a per-level standoff and animates between
//! framings with a single cancellable interpolation.

/// Interpolation owner and completion signalling.
pub mod choreographer;

/// Camera pose and per-level framing maths.
pub mod pose;

/// Per-level standoff, lift and duration settings.
pub mod settings;

/// Plugin and systems that drive the camera entity.
pub mod systems;
