use crate::engine::assets::catalog::{LibraryCatalog, SectionRecord};
use crate::engine::camera::settings::ChoreographySettings;
use crate::engine::scene::layout::LayoutSettings;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Complete library description as a Bevy asset. Mirrors the JSON file exactly.
/// Layout and camera settings fall back to the shared constants when omitted.
#[derive(Asset, TypePath, Debug, Clone, Serialize, Deserialize)]
pub struct LibraryManifest {
    #[serde(default)]
    pub layout: LayoutSettings,
    #[serde(default)]
    pub camera: ChoreographySettings,
    pub sections: Vec<SectionRecord>,
}

impl LibraryManifest {
    /// Split out the catalog resource used by navigation and picking.
    pub fn to_catalog(&self) -> LibraryCatalog {
        LibraryCatalog::new(self.sections.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use constants::{camera, layout};

    #[test]
    fn settings_default_from_constants() {
        let manifest: LibraryManifest = serde_json::from_value(serde_json::json!({
            "sections": [{ "id": "lab", "label": "Lab" }]
        }))
        .unwrap();

        assert_eq!(manifest.layout.ring_radius, layout::RING_RADIUS);
        assert_eq!(manifest.camera.base_standoff, camera::BASE_STANDOFF);
        assert_eq!(manifest.to_catalog().sections().len(), 1);
    }

    #[test]
    fn partial_settings_keep_remaining_defaults() {
        let manifest: LibraryManifest = serde_json::from_value(serde_json::json!({
            "layout": { "ring_radius": 9.0 },
            "camera": { "item": { "standoff": 0.2, "lift": 0.0, "duration": 0.4 } },
            "sections": []
        }))
        .unwrap();

        assert_eq!(manifest.layout.ring_radius, 9.0);
        assert_eq!(manifest.layout.wall_height, layout::WALL_HEIGHT);
        assert_eq!(manifest.camera.item.duration, 0.4);
        assert_eq!(manifest.camera.item.standoff, 0.2);
        assert_eq!(manifest.camera.shelf.standoff, camera::SHELF_STANDOFF);
    }

    #[test]
    fn single_field_level_override_loads() {
        let manifest: LibraryManifest = serde_json::from_value(serde_json::json!({
            "camera": { "item": { "standoff": 0.2 } },
            "sections": []
        }))
        .unwrap();

        assert_eq!(manifest.camera.item.standoff, 0.2);
        assert_eq!(manifest.camera.item.lift, camera::ITEM_LIFT);
        assert_eq!(manifest.camera.item.duration, camera::ITEM_DURATION);
        assert!(manifest.camera.is_well_formed());
    }

    #[test]
    fn shipped_manifest_is_complete() {
        use crate::engine::scene::geometry::SceneGeometryProvider;
        use crate::engine::scene::layout::LibraryLayout;
        use crate::navigation::state::NavigationState;

        let manifest: LibraryManifest =
            serde_json::from_str(include_str!("../../../assets/library.catalog.json")).unwrap();
        assert!(manifest.camera.is_well_formed());

        let catalog = manifest.to_catalog();
        let layout = LibraryLayout::new(manifest.layout.clone(), &catalog);
        assert_eq!(catalog.item_count(), 12);

        // Every item the catalog lists must be reachable by the camera.
        for (section, record) in catalog.sections().iter().enumerate() {
            for (shelf, shelf_record) in record.shelves.iter().enumerate() {
                for item in &shelf_record.items {
                    let snapshot = catalog.snapshot(section, shelf, &item.id).unwrap();
                    let state =
                        NavigationState::at_item(section, shelf, item.id.clone(), snapshot);
                    assert!(layout.world_transform(&state).is_some(), "{}", item.id);
                }
            }
        }
    }
}
