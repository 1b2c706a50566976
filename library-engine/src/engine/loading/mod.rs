//! Startup loading of the library manifest.
//!
//! Requests the JSON manifest, then installs the catalog, layout and camera
//! settings it describes before the scene is built.

/// Manifest request, installation and failure reporting.
///
/// Inserts `LibraryCatalog` and `LibraryLayout` and configures the camera choreographer.
pub mod manifest_loader;

/// Loading progress tracking resource for state transitions.
pub mod progress;
