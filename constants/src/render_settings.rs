use bevy::color::Color;

pub const CLEAR_COLOUR: Color = Color::srgb(0.094, 0.094, 0.094);

pub const WALL_COLOUR: Color = Color::srgb(0.2, 0.2, 0.2);
pub const SHELF_COLOUR: Color = Color::srgb(0.333, 0.333, 0.333);
pub const ITEM_COLOUR: Color = Color::srgb(0.533, 0.533, 0.533);

pub const AMBIENT_BRIGHTNESS: f32 = 700.0;
pub const DIRECTIONAL_ILLUMINANCE: f32 = 5_000.0;

pub const BREADCRUMB_FONT_SIZE: f32 = 16.0;
