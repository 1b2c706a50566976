use crate::navigation::controller::BreadcrumbLabels;
use crate::navigation::state::ItemSnapshot;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// External links attached to a catalog record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo: Option<String>,
}

/// Descriptive record stored in a single item slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub stack: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub metadata: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub links: ItemLinks,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShelfRecord {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub descriptor: String,
    #[serde(default)]
    pub focus: String,
    #[serde(default)]
    pub items: Vec<ItemRecord>,
}

/// One wall of the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRecord {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub shelves: Vec<ShelfRecord>,
}

/// Static catalog data, inserted once the manifest has loaded.
/// Navigation never mutates it; selections copy records out as snapshots.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct LibraryCatalog {
    sections: Vec<SectionRecord>,
}

impl LibraryCatalog {
    pub fn new(sections: Vec<SectionRecord>) -> Self {
        Self { sections }
    }

    pub fn sections(&self) -> &[SectionRecord] {
        &self.sections
    }

    pub fn section(&self, section: usize) -> Option<&SectionRecord> {
        self.sections.get(section)
    }

    pub fn shelf(&self, section: usize, shelf: usize) -> Option<&ShelfRecord> {
        self.section(section)?.shelves.get(shelf)
    }

    /// Find an item on a specific shelf.
    pub fn item(&self, section: usize, shelf: usize, item_id: &str) -> Option<&ItemRecord> {
        self.shelf(section, shelf)?
            .items
            .iter()
            .find(|item| item.id == item_id)
    }

    /// Capture an immutable copy of an item record for the navigation state.
    pub fn snapshot(&self, section: usize, shelf: usize, item_id: &str) -> Option<ItemSnapshot> {
        self.item(section, shelf, item_id)
            .map(|record| Arc::new(record.clone()))
    }

    pub fn item_count(&self) -> usize {
        self.sections
            .iter()
            .flat_map(|section| section.shelves.iter())
            .map(|shelf| shelf.items.len())
            .sum()
    }
}

impl BreadcrumbLabels for LibraryCatalog {
    fn section_label(&self, section: usize) -> Option<String> {
        self.section(section).map(|record| record.label.clone())
    }

    fn shelf_label(&self, section: usize, shelf: usize) -> Option<String> {
        self.shelf(section, shelf).map(|record| record.label.clone())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    fn item(id: &str, title: &str) -> ItemRecord {
        ItemRecord {
            id: id.to_string(),
            title: title.to_string(),
            stack: String::new(),
            summary: String::new(),
            metadata: String::new(),
            details: String::new(),
            links: ItemLinks::default(),
        }
    }

    fn shelf(id: &str, label: &str, items: Vec<ItemRecord>) -> ShelfRecord {
        ShelfRecord {
            id: id.to_string(),
            label: label.to_string(),
            descriptor: String::new(),
            focus: String::new(),
            items,
        }
    }

    /// Three sections with uneven shelf and item counts.
    pub(crate) fn sample_catalog() -> LibraryCatalog {
        LibraryCatalog::new(vec![
            SectionRecord {
                id: "engineering".to_string(),
                label: "Engineering".to_string(),
                shelves: vec![
                    shelf(
                        "distributed-systems",
                        "Distributed Systems",
                        vec![item("mesh-queue", "Adaptive Mesh Queue"), item("lightboard", "Consensus Lightboard")],
                    ),
                    shelf("observability", "Data + Observability", vec![item("signal-atlas", "Signal Atlas")]),
                ],
            },
            SectionRecord {
                id: "platform".to_string(),
                label: "Platform".to_string(),
                shelves: vec![shelf(
                    "automation",
                    "Platform Automation",
                    vec![item("release-loom", "Release Loom")],
                )],
            },
            SectionRecord {
                id: "lab".to_string(),
                label: "Lab".to_string(),
                shelves: vec![
                    shelf("prototypes", "Experimental Prototypes", vec![item("x42", "Acoustic Hash Grid")]),
                    shelf("hardware", "Hardware", vec![item("forma", "Forma Switch"), item("chronicle", "Chronicle Delta")]),
                ],
            },
        ])
    }

    #[test]
    fn item_lookup_is_scoped_to_its_shelf() {
        let catalog = sample_catalog();
        assert!(catalog.item(0, 0, "mesh-queue").is_some());
        assert!(catalog.item(0, 1, "mesh-queue").is_none());
        assert!(catalog.item(7, 0, "mesh-queue").is_none());
    }

    #[test]
    fn snapshot_is_an_independent_copy() {
        let catalog = sample_catalog();
        let snapshot = catalog.snapshot(2, 0, "x42").unwrap();
        assert_eq!(snapshot.title, "Acoustic Hash Grid");
        assert_eq!(*snapshot, *catalog.item(2, 0, "x42").unwrap());
        assert_eq!(catalog.item_count(), 7);
    }

    #[test]
    fn labels_come_from_records() {
        let catalog = sample_catalog();
        assert_eq!(catalog.section_label(1).as_deref(), Some("Platform"));
        assert_eq!(catalog.shelf_label(0, 1).as_deref(), Some("Data + Observability"));
        assert_eq!(catalog.shelf_label(1, 4), None);
    }

    #[test]
    fn records_deserialize_with_optional_fields_missing() {
        let section: SectionRecord = serde_json::from_value(serde_json::json!({
            "id": "lab",
            "label": "Lab",
            "shelves": [{
                "id": "prototypes",
                "label": "Experimental Prototypes",
                "items": [{ "id": "x42", "title": "Acoustic Hash Grid", "links": { "demo": "https://example.com" } }]
            }]
        }))
        .unwrap();
        let record = &section.shelves[0].items[0];
        assert_eq!(record.links.demo.as_deref(), Some("https://example.com"));
        assert_eq!(record.links.github, None);
        assert!(record.summary.is_empty());
    }
}
