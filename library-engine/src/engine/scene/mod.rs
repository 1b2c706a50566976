//! Procedural library scene.
//!
//! Places walls on a ring, shelves up each wall and item slots along each
//! shelf, and answers where the camera should look for a navigation state.

/// World transforms and the geometry lookup used by camera framing.
pub mod geometry;

/// Ring, shelf and slot placement computed from the catalog.
pub mod layout;

/// Mesh spawning, lighting and the library camera.
pub mod library_builder;
