use bevy::prelude::*;

/// Trails sit this far above the ground plane to avoid z-fighting.
pub const TRAIL_LIFT: f32 = 0.01;

pub const TRAIL_SATURATION: f32 = 0.8;
pub const TRAIL_LIGHTNESS: f32 = 0.6;

pub const BACKGROUND_COLOUR: Color = Color::srgb(
    0x22 as f32 / 255.0,
    0x22 as f32 / 255.0,
    0x22 as f32 / 255.0,
);

pub const INDICATOR_IDLE_COLOUR: Color = Color::WHITE;
pub const INDICATOR_RECORDING_COLOUR: Color = Color::srgb(1.0, 0.0, 0.0);

pub const HUD_FONT_SIZE: f32 = 16.0;
