use crate::engine::assets::catalog::ItemRecord;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Depth in the four-tier navigation hierarchy, ordered shallow to deep.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[default]
    Overview,
    Section,
    Shelf,
    Item,
}

impl Level {
    pub const ALL: [Level; 4] = [Level::Overview, Level::Section, Level::Shelf, Level::Item];

    /// The level one step towards the root, if any.
    pub fn shallower(self) -> Option<Level> {
        match self {
            Self::Overview => None,
            Self::Section => Some(Self::Overview),
            Self::Shelf => Some(Self::Section),
            Self::Item => Some(Self::Shelf),
        }
    }

    /// Convert level to string identifier for frontend communication.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Section => "section",
            Self::Shelf => "shelf",
            Self::Item => "item",
        }
    }
}

/// Immutable copy of the selected item's record, captured at selection time.
pub type ItemSnapshot = Arc<ItemRecord>;

/// Current position in the hierarchy.
///
/// Fields deeper than `level` are always unset. Only
/// [`NavigationController`](super::controller::NavigationController) builds
/// new states, and it does so one whole transition at a time.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NavigationState {
    level: Level,
    section_index: Option<usize>,
    shelf_index: Option<usize>,
    item_id: Option<String>,
    item_snapshot: Option<ItemSnapshot>,
}

impl NavigationState {
    pub(crate) fn overview() -> Self {
        Self::default()
    }

    pub(crate) fn at_section(section: usize) -> Self {
        Self {
            level: Level::Section,
            section_index: Some(section),
            ..Self::default()
        }
    }

    pub(crate) fn at_shelf(section: usize, shelf: usize) -> Self {
        Self {
            level: Level::Shelf,
            section_index: Some(section),
            shelf_index: Some(shelf),
            ..Self::default()
        }
    }

    pub(crate) fn at_item(
        section: usize,
        shelf: usize,
        item_id: String,
        snapshot: ItemSnapshot,
    ) -> Self {
        Self {
            level: Level::Item,
            section_index: Some(section),
            shelf_index: Some(shelf),
            item_id: Some(item_id),
            item_snapshot: Some(snapshot),
        }
    }

    /// Copy of this state cut back to `level`, dropping every deeper field.
    pub(crate) fn truncated(&self, level: Level) -> Self {
        Self {
            level,
            section_index: self.section_index.filter(|_| level >= Level::Section),
            shelf_index: self.shelf_index.filter(|_| level >= Level::Shelf),
            item_id: self.item_id.clone().filter(|_| level == Level::Item),
            item_snapshot: self.item_snapshot.clone().filter(|_| level == Level::Item),
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn section_index(&self) -> Option<usize> {
        self.section_index
    }

    pub fn shelf_index(&self) -> Option<usize> {
        self.shelf_index
    }

    pub fn item_id(&self) -> Option<&str> {
        self.item_id.as_deref()
    }

    pub fn item_snapshot(&self) -> Option<&ItemSnapshot> {
        self.item_snapshot.as_ref()
    }

    /// True when every field is set exactly as far as `level` reaches.
    pub fn is_consistent(&self) -> bool {
        self.section_index.is_some() == (self.level >= Level::Section)
            && self.shelf_index.is_some() == (self.level >= Level::Shelf)
            && self.item_id.is_some() == (self.level == Level::Item)
            && self.item_snapshot.is_some() == (self.level == Level::Item)
    }
}
