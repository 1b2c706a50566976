use crate::engine::assets::catalog::LibraryCatalog;
use crate::engine::scene::geometry::{SceneGeometryProvider, WorldTransform};
use crate::navigation::state::{Level, NavigationState};
use bevy::prelude::*;
use constants::layout;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::f32::consts::TAU;

/// Library dimensions, overridable from the manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub ring_radius: f32,
    pub wall_width: f32,
    pub wall_height: f32,
    pub wall_thickness: f32,
    pub shelf_thickness: f32,
    pub shelf_depth: f32,
    pub item_size: [f32; 3],
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            ring_radius: layout::RING_RADIUS,
            wall_width: layout::WALL_WIDTH,
            wall_height: layout::WALL_HEIGHT,
            wall_thickness: layout::WALL_THICKNESS,
            shelf_thickness: layout::SHELF_THICKNESS,
            shelf_depth: layout::SHELF_DEPTH,
            item_size: layout::ITEM_SIZE,
        }
    }
}

impl LayoutSettings {
    pub fn wall_size(&self) -> Vec3 {
        Vec3::new(self.wall_width, self.wall_height, self.wall_thickness)
    }

    pub fn shelf_size(&self) -> Vec3 {
        Vec3::new(
            self.wall_width * layout::SHELF_WIDTH_FRACTION,
            self.shelf_thickness,
            self.shelf_depth,
        )
    }

    pub fn item_size(&self) -> Vec3 {
        Vec3::from_array(self.item_size)
    }
}

/// Where an item sits in the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemAddress {
    pub section: usize,
    pub shelf: usize,
    pub slot: usize,
}

/// Procedural placement of sections, shelves and item slots.
///
/// Sections stand on a regular ring facing outward, shelves are spread evenly
/// over the wall height, and item slots share the central part of the wall
/// width just above their shelf.
#[derive(Resource, Debug, Clone)]
pub struct LibraryLayout {
    settings: LayoutSettings,
    // Item count of every shelf, per section.
    shelves: Vec<Vec<usize>>,
    items: HashMap<String, ItemAddress>,
}

impl LibraryLayout {
    pub fn new(settings: LayoutSettings, catalog: &LibraryCatalog) -> Self {
        let mut items = HashMap::new();
        let shelves: Vec<Vec<usize>> = catalog
            .sections()
            .iter()
            .enumerate()
            .map(|(section, record)| {
                record
                    .shelves
                    .iter()
                    .enumerate()
                    .map(|(shelf, shelf_record)| {
                        for (slot, item) in shelf_record.items.iter().enumerate() {
                            if items
                                .insert(item.id.clone(), ItemAddress { section, shelf, slot })
                                .is_some()
                            {
                                warn!("Duplicate item id '{}' in catalog; last one wins", item.id);
                            }
                        }
                        shelf_record.items.len()
                    })
                    .collect::<Vec<usize>>()
            })
            .collect();

        Self {
            settings,
            shelves,
            items,
        }
    }

    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    pub fn section_count(&self) -> usize {
        self.shelves.len()
    }

    pub fn shelf_count(&self, section: usize) -> Option<usize> {
        self.shelves.get(section).map(Vec::len)
    }

    pub fn item_address(&self, item_id: &str) -> Option<ItemAddress> {
        self.items.get(item_id).copied()
    }

    /// Centre of the ring at half wall height, facing +Z.
    pub fn overview_transform(&self) -> WorldTransform {
        WorldTransform::new(
            Vec3::new(0.0, self.settings.wall_height * 0.5, 0.0),
            Quat::IDENTITY,
        )
    }

    pub fn section_transform(&self, section: usize) -> Option<WorldTransform> {
        if section >= self.section_count() {
            return None;
        }
        let angle = section as f32 / self.section_count() as f32 * TAU;
        let position = Vec3::new(
            angle.sin() * self.settings.ring_radius,
            self.settings.wall_height * 0.5,
            angle.cos() * self.settings.ring_radius,
        );
        Some(WorldTransform::new(position, Quat::from_rotation_y(angle)))
    }

    pub fn shelf_transform(&self, section: usize, shelf: usize) -> Option<WorldTransform> {
        let shelf_count = self.shelf_count(section)?;
        if shelf >= shelf_count {
            return None;
        }
        let wall = self.section_transform(section)?;
        let local = Vec3::new(
            0.0,
            self.shelf_height(shelf, shelf_count),
            self.settings.shelf_depth * 0.5,
        );
        Some(WorldTransform::new(
            wall.transform_point(local),
            wall.orientation,
        ))
    }

    pub fn item_transform(&self, address: ItemAddress) -> Option<WorldTransform> {
        let shelf_count = self.shelf_count(address.section)?;
        let slots = *self.shelves.get(address.section)?.get(address.shelf)?;
        if address.slot >= slots {
            return None;
        }
        let wall = self.section_transform(address.section)?;
        let span = self.settings.wall_width * layout::ITEM_SPAN_FRACTION;
        let spacing = span / slots as f32;
        let local = Vec3::new(
            -span * 0.5 + (address.slot as f32 + 0.5) * spacing,
            self.shelf_height(address.shelf, shelf_count) + layout::ITEM_LIFT,
            self.settings.shelf_depth * 0.5,
        );
        Some(WorldTransform::new(
            wall.transform_point(local),
            wall.orientation,
        ))
    }

    // Height of a shelf centre relative to the wall centre.
    fn shelf_height(&self, shelf: usize, shelf_count: usize) -> f32 {
        let height = self.settings.wall_height;
        -height * 0.5 + (shelf as f32 + 0.5) * (height / shelf_count as f32)
    }
}

impl SceneGeometryProvider for LibraryLayout {
    fn world_transform(&self, state: &NavigationState) -> Option<WorldTransform> {
        match state.level() {
            Level::Overview => Some(self.overview_transform()),
            Level::Section => self.section_transform(state.section_index()?),
            Level::Shelf => self.shelf_transform(state.section_index()?, state.shelf_index()?),
            Level::Item => {
                let address = self.item_address(state.item_id()?)?;
                // The item must live on the selected shelf.
                if Some(address.section) != state.section_index()
                    || Some(address.shelf) != state.shelf_index()
                {
                    return None;
                }
                self.item_transform(address)
            }
        }
    }
}
