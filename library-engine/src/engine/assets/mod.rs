//! Library catalog data and its JSON manifest.

/// Section, shelf and item records plus the catalog resource.
pub mod catalog;

/// JSON manifest carrying the catalog with optional layout and camera overrides.
pub mod library_manifest;
