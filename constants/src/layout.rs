/// Distance from the library centre to the middle of every section wall.
pub const RING_RADIUS: f32 = 6.0;

/// Section wall extents in world units.
pub const WALL_WIDTH: f32 = 6.0;
pub const WALL_HEIGHT: f32 = 4.0;
pub const WALL_THICKNESS: f32 = 0.05;

/// Shelf board dimensions; width is a fraction of the wall width.
pub const SHELF_WIDTH_FRACTION: f32 = 0.95;
pub const SHELF_THICKNESS: f32 = 0.12;
pub const SHELF_DEPTH: f32 = 0.3;

/// Item slots share this fraction of the wall width, centred on the wall.
pub const ITEM_SPAN_FRACTION: f32 = 0.8;

/// Item slot box size (width, height, depth).
pub const ITEM_SIZE: [f32; 3] = [0.28, 0.38, 0.18];

/// Vertical offset of an item slot centre above its shelf centre.
pub const ITEM_LIFT: f32 = 0.18;
