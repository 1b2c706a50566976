/// Library manifest, relative to the asset root.
pub const MANIFEST_PATH: &str = "library.catalog.json";

/// Extension registered with the JSON asset loader.
pub const MANIFEST_EXTENSION: &str = "catalog.json";
