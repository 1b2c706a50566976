use crate::navigation::state::Level;
use constants::camera;
use serde::{Deserialize, Deserializer, Serialize};

/// How the camera frames one level of the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelFraming {
    /// Multiplier on the base standoff, measured along the object's outward normal.
    pub standoff: f32,
    /// Vertical lift, also a multiplier on the base standoff.
    pub lift: f32,
    /// Transition duration in seconds.
    pub duration: f32,
}

// Manifest form of a level block; omitted fields keep that level's defaults.
#[derive(Deserialize)]
struct LevelOverride {
    standoff: Option<f32>,
    lift: Option<f32>,
    duration: Option<f32>,
}

impl LevelOverride {
    fn over(self, base: LevelFraming) -> LevelFraming {
        LevelFraming {
            standoff: self.standoff.unwrap_or(base.standoff),
            lift: self.lift.unwrap_or(base.lift),
            duration: self.duration.unwrap_or(base.duration),
        }
    }
}

fn overview_framing<'de, D: Deserializer<'de>>(d: D) -> Result<LevelFraming, D::Error> {
    LevelOverride::deserialize(d).map(|o| o.over(default_overview()))
}

fn section_framing<'de, D: Deserializer<'de>>(d: D) -> Result<LevelFraming, D::Error> {
    LevelOverride::deserialize(d).map(|o| o.over(default_section()))
}

fn shelf_framing<'de, D: Deserializer<'de>>(d: D) -> Result<LevelFraming, D::Error> {
    LevelOverride::deserialize(d).map(|o| o.over(default_shelf()))
}

fn item_framing<'de, D: Deserializer<'de>>(d: D) -> Result<LevelFraming, D::Error> {
    LevelOverride::deserialize(d).map(|o| o.over(default_item()))
}

/// Why a set of camera settings was refused.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettingsError {
    #[error("base standoff must be positive, got {0}")]
    BaseStandoff(f32),
    #[error("{deeper:?} standoff must be smaller than {shallower:?} standoff")]
    StandoffNotShrinking { shallower: Level, deeper: Level },
    #[error("item duration must be the shortest, but {level:?} is not longer")]
    ItemNotFastest { level: Level },
}

/// Per-level camera framing, overridable from the manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoreographySettings {
    #[serde(default = "default_base_standoff")]
    pub base_standoff: f32,
    #[serde(default = "default_overview", deserialize_with = "overview_framing")]
    pub overview: LevelFraming,
    #[serde(default = "default_section", deserialize_with = "section_framing")]
    pub section: LevelFraming,
    #[serde(default = "default_shelf", deserialize_with = "shelf_framing")]
    pub shelf: LevelFraming,
    #[serde(default = "default_item", deserialize_with = "item_framing")]
    pub item: LevelFraming,
}

fn default_base_standoff() -> f32 {
    camera::BASE_STANDOFF
}

fn default_overview() -> LevelFraming {
    LevelFraming {
        standoff: camera::OVERVIEW_STANDOFF,
        lift: camera::OVERVIEW_LIFT,
        duration: camera::OVERVIEW_DURATION,
    }
}

fn default_section() -> LevelFraming {
    LevelFraming {
        standoff: camera::SECTION_STANDOFF,
        lift: camera::SECTION_LIFT,
        duration: camera::SECTION_DURATION,
    }
}

fn default_shelf() -> LevelFraming {
    LevelFraming {
        standoff: camera::SHELF_STANDOFF,
        lift: camera::SHELF_LIFT,
        duration: camera::SHELF_DURATION,
    }
}

fn default_item() -> LevelFraming {
    LevelFraming {
        standoff: camera::ITEM_STANDOFF,
        lift: camera::ITEM_LIFT,
        duration: camera::ITEM_DURATION,
    }
}

impl Default for ChoreographySettings {
    fn default() -> Self {
        Self {
            base_standoff: default_base_standoff(),
            overview: default_overview(),
            section: default_section(),
            shelf: default_shelf(),
            item: default_item(),
        }
    }
}

impl ChoreographySettings {
    pub fn framing(&self, level: Level) -> &LevelFraming {
        match level {
            Level::Overview => &self.overview,
            Level::Section => &self.section,
            Level::Shelf => &self.shelf,
            Level::Item => &self.item,
        }
    }

    pub fn duration_for(&self, level: Level) -> f32 {
        self.framing(level).duration
    }

    /// Standoffs must shrink with depth and the item push-in must be the quickest move.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !exceeds(self.base_standoff, 0.0) {
            return Err(SettingsError::BaseStandoff(self.base_standoff));
        }
        for pair in Level::ALL.windows(2) {
            if !exceeds(self.framing(pair[0]).standoff, self.framing(pair[1]).standoff) {
                return Err(SettingsError::StandoffNotShrinking {
                    shallower: pair[0],
                    deeper: pair[1],
                });
            }
        }
        for level in [Level::Overview, Level::Section, Level::Shelf] {
            if !exceeds(self.framing(level).duration, self.item.duration) {
                return Err(SettingsError::ItemNotFastest { level });
            }
        }
        Ok(())
    }

    pub fn is_well_formed(&self) -> bool {
        self.validate().is_ok()
    }
}

// False for NaN on either side.
fn exceeds(a: f32, b: f32) -> bool {
    a > b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_well_formed() {
        let settings = ChoreographySettings::default();
        assert!(settings.is_well_formed());
        assert_eq!(settings.duration_for(Level::Item), camera::ITEM_DURATION);
    }

    #[test]
    fn growing_standoff_is_rejected() {
        let mut settings = ChoreographySettings::default();
        settings.shelf.standoff = settings.section.standoff * 2.0;
        assert!(!settings.is_well_formed());
    }

    #[test]
    fn slow_item_push_in_is_rejected() {
        let mut settings = ChoreographySettings::default();
        settings.item.duration = 5.0;
        assert_eq!(
            settings.validate(),
            Err(SettingsError::ItemNotFastest {
                level: Level::Overview
            })
        );
    }

    #[test]
    fn level_blocks_fill_gaps_from_their_own_defaults() {
        let settings: ChoreographySettings = serde_json::from_value(serde_json::json!({
            "shelf": { "duration": 0.7 },
            "item": { "standoff": 0.2 }
        }))
        .unwrap();

        assert_eq!(settings.shelf.duration, 0.7);
        assert_eq!(settings.shelf.standoff, camera::SHELF_STANDOFF);
        assert_eq!(settings.item.standoff, 0.2);
        assert_eq!(settings.item.lift, camera::ITEM_LIFT);
        assert_eq!(settings.item.duration, camera::ITEM_DURATION);
        assert_eq!(settings.section, ChoreographySettings::default().section);
    }
}
