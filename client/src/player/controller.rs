use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};
use shared::physics::{resolve_player_motion, ShipColliders};
use shared::players::{walk, MoveIntent, Player};
use shared::{GAMEPAD_LOOK_SCALE, MOUSE_SENSITIVITY, WALK_SPEED};

use super::CurrentPlayerMarker;
use crate::game::PlayerCamera;
use crate::input::data::GameAction;
use crate::input::gamepad::FirstGamepad;
use crate::input::keyboard::is_action_pressed;
use crate::KeyMap;

fn cursor_grabbed(windows: &Query<&Window, With<PrimaryWindow>>) -> bool {
    windows
        .single()
        .is_ok_and(|w| w.cursor_options.grab_mode != CursorGrabMode::None)
}

/// Mouse and right stick turn the view. Both are in pixels per frame, the
/// stick scaled to match a brisk mouse.
pub fn player_look_system(
    mouse_motion: Res<AccumulatedMouseMotion>,
    pad: FirstGamepad,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut player_query: Query<&mut Player, With<CurrentPlayerMarker>>,
) {
    let Ok(mut player) = player_query.single_mut() else {
        debug!("player not found");
        return;
    };

    let mut delta = pad.right_stick() * Vec2::new(1.0, -1.0) * GAMEPAD_LOOK_SCALE;
    if cursor_grabbed(&windows) {
        delta += mouse_motion.delta;
    }
    if delta != Vec2::ZERO {
        player
            .look
            .rotate(-delta.x * MOUSE_SENSITIVITY, -delta.y * MOUSE_SENSITIVITY);
    }
}

pub fn move_intent(keyboard_input: &ButtonInput<KeyCode>, key_map: &KeyMap, stick: Vec2) -> MoveIntent {
    let mut intent = MoveIntent::default();
    let pressed = |action| is_action_pressed(action, keyboard_input, key_map) as i32 as f32;
    intent.forward = pressed(GameAction::MoveForward) - pressed(GameAction::MoveBackward);
    intent.right = pressed(GameAction::MoveRight) - pressed(GameAction::MoveLeft);
    intent.add_stick(stick);
    intent
}

/// Walks the player, then lets the ship decide where they actually end up.
pub fn player_movement_system(
    time: Res<Time>,
    keyboard_input: Res<ButtonInput<KeyCode>>,
    key_map: Res<KeyMap>,
    pad: FirstGamepad,
    colliders: Res<ShipColliders>,
    mut player_query: Query<&mut Player, With<CurrentPlayerMarker>>,
) {
    // until the ship exists there is nothing to stand on
    if !colliders.is_ready() {
        return;
    }
    let Ok(mut player) = player_query.single_mut() else {
        debug!("player not found");
        return;
    };

    let delta = time.delta_secs();
    let intent = move_intent(&keyboard_input, &key_map, pad.left_stick());
    let old_eye = player.eye;
    let wanted_eye = walk(old_eye, &player.look, intent, WALK_SPEED, delta);

    let motion = resolve_player_motion(
        old_eye,
        wanted_eye,
        &colliders.hull,
        colliders.ladder.as_ref(),
        delta,
    );

    if motion.climbing && !player.climbing {
        debug!("Started climbing at {:?}", motion.eye);
    }
    player.eye = motion.eye;
    player.climbing = motion.climbing;
    player.falling = motion.falling;
}

pub fn camera_follow_system(
    player_query: Query<&Player, With<CurrentPlayerMarker>>,
    mut camera_query: Query<&mut Transform, With<PlayerCamera>>,
) {
    let Ok(player) = player_query.single() else {
        return;
    };
    let Ok(mut camera) = camera_query.single_mut() else {
        debug!("Camera not found");
        return;
    };
    *camera = player.transform();
}
