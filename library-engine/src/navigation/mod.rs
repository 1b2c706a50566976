//! Hierarchical navigation through the library.
//!
//! Overview, section, shelf and item form a strict drill-down path. The
//! controller owns the position in that path; the navigator pairs each change
//! with a camera move so that a request either fully happens or not at all.

pub mod controller;
pub mod error;

/// All-or-nothing coupling of state changes and camera moves.
pub mod navigator;

/// ECS plugin: request, change and failure events.
pub mod plugin;

pub mod state;
