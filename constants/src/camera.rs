/// Base standoff distance; every level scales it by its own multiplier.
pub const BASE_STANDOFF: f32 = 3.0;

/// Standoff multipliers, strictly decreasing from overview to item.
pub const OVERVIEW_STANDOFF: f32 = 4.0;
pub const SECTION_STANDOFF: f32 = 1.0;
pub const SHELF_STANDOFF: f32 = 0.5;
pub const ITEM_STANDOFF: f32 = 0.25;

/// Vertical lift, also expressed as a multiple of the base standoff.
pub const OVERVIEW_LIFT: f32 = 0.6;
pub const SECTION_LIFT: f32 = 0.0;
pub const SHELF_LIFT: f32 = 0.1;
pub const ITEM_LIFT: f32 = 0.0;

/// Transition durations in seconds. The item push-in is the shortest.
pub const OVERVIEW_DURATION: f32 = 1.2;
pub const SECTION_DURATION: f32 = 1.0;
pub const SHELF_DURATION: f32 = 0.9;
pub const ITEM_DURATION: f32 = 0.6;

/// Two poses closer than this (in world units) count as the same pose.
pub const REST_EPSILON: f32 = 1.0e-4;
