use bevy::prelude::*;

/// Eye position the player starts the game at.
pub const PLAYER_SPAWN: Vec3 = Vec3::new(0.0, 2.0, 0.0);
/// Height of the eye above the point used for foot collision rays.
pub const EYE_HEIGHT: f32 = 2.0;
/// Walking speed in world units per second.
pub const WALK_SPEED: f32 = 15.0;
/// Radians of view rotation per pixel of mouse motion.
pub const MOUSE_SENSITIVITY: f32 = 0.003;
/// Gamepad right stick deflection is scaled to pseudo mouse pixels per frame.
pub const GAMEPAD_LOOK_SCALE: f32 = 20.0;
pub const GAMEPAD_DEAD_ZONE: f32 = 0.25;

/// Maximum distance from the eye to use the jukebox or the canvas.
pub const INTERACT_REACH: f32 = 6.0;

pub const SAVE_PATH: &str = "save/";
pub const SAVE_FILE: &str = "ark.ron";
pub const BINDS_FILE: &str = "keybindings.ron";
pub const OCEAN_CONFIG_FILE: &str = "ocean.ron";
pub const CATALOG_FILE: &str = "catalog.ron";

/// Side length of the canvas texture in pixels.
pub const CANVAS_SIZE: u32 = 256;
/// Radius of a sticker stamp on the canvas, in pixels.
pub const STAMP_RADIUS: f32 = 14.0;
