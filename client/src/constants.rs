use bevy::prelude::*;
use std::f32::consts::PI;

pub const WINDOW_WIDTH: f32 = 1600.0;
pub const WINDOW_HEIGHT: f32 = 900.0;
pub const CAMERA_FOV_DEGREES: f32 = 60.0;

pub const SKY_COLOR: Color = Color::srgb(0.4, 0.75, 1.0);

// Model and texture paths, relative to the assets folder
pub const SHIP_MODEL: &str = "ship.glb";
pub const LADDER_MODEL: &str = "ladder.glb";
pub const POLE_MODEL: &str = "pole.glb";
pub const BOBBER_MODEL: &str = "bobber.glb";
pub const EXCLAMATION_MODEL: &str = "exclamation.glb";
pub const WOOD_TEXTURE: &str = "wood.jpg";
pub const SAIL_TEXTURE: &str = "sail.jpg";
pub const REEL_TEXTURE: &str = "reel.jpg";
pub const LINE_TEXTURE: &str = "line.jpg";
pub const METAL_TEXTURE: &str = "metal.jpg";
pub const WAVE_TEXTURE: &str = "waves/1.jpg";

pub const SHIP_SCALE: f32 = 12.0;
pub const SHIP_TRANSLATION: Vec3 = Vec3::new(35.0, 22.0, 5.0);

pub const LADDER_SCALE: f32 = 0.05;
pub const LADDER_YAW: f32 = 7.0 * PI / 32.0;
pub const LADDER_TRANSLATION: Vec3 = Vec3::new(12.5, -10.0, -9.5);

pub const BOBBER_SCALE: f32 = 0.01;

/// Jukebox cabinet, standing on the deck.
pub const JUKEBOX_TRANSLATION: Vec3 = Vec3::new(6.0, 1.0, 8.0);
pub const JUKEBOX_SIZE: Vec3 = Vec3::new(1.4, 2.0, 0.8);

/// Canvas board, facing the spawn point.
pub const CANVAS_TRANSLATION: Vec3 = Vec3::new(-6.0, 2.0, 8.0);
pub const CANVAS_YAW: f32 = PI;
pub const CANVAS_SIZE_WORLD: Vec2 = Vec2::new(3.0, 3.0);
pub const CANVAS_THICKNESS: f32 = 0.1;

/// Seconds a catch notification stays on screen.
pub const TOAST_SECONDS: f32 = 3.0;
