use bevy::prelude::*;

/// Standing eye height of the player camera.
pub const EYE_HEIGHT: f32 = 1.6;

pub const CAMERA_START: Vec3 = Vec3::new(0.0, EYE_HEIGHT, 3.0);
pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;

pub const GROUND_SIZE: f32 = 100.0;
pub const GROUND_COLOUR: Color = Color::srgb(
    0x33 as f32 / 255.0,
    0x33 as f32 / 255.0,
    0x33 as f32 / 255.0,
);
pub const GROUND_ROUGHNESS: f32 = 0.8;

pub const CUBE_SIZE: f32 = 0.5;
pub const CUBE_POSITION: Vec3 = Vec3::new(0.0, EYE_HEIGHT - CUBE_SIZE * 0.5, -2.0);
pub const CUBE_COLOUR: Color = Color::srgb(0.0, 1.0, 0.0);

pub const SKY_LIGHT_COLOUR: Color = Color::WHITE;
pub const GROUND_LIGHT_COLOUR: Color = Color::srgb(
    0x44 as f32 / 255.0,
    0x44 as f32 / 255.0,
    0x44 as f32 / 255.0,
);
pub const FILL_LIGHT_COLOUR: Color = Color::srgb(
    0x40 as f32 / 255.0,
    0x40 as f32 / 255.0,
    0x40 as f32 / 255.0,
);
