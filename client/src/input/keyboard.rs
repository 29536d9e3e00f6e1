use crate::{config::write_ron, input::data::GameAction, KeyMap};
use bevy::prelude::*;
use shared::{GameFolderPaths, BINDS_FILE};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

pub fn is_action_pressed(
    action: GameAction,
    keyboard_input: &ButtonInput<KeyCode>,
    key_map: &KeyMap,
) -> bool {
    key_map
        .map
        .get(&action)
        .is_some_and(|keys| keyboard_input.any_pressed(keys.iter().copied()))
}

pub fn is_action_just_pressed(
    action: GameAction,
    keyboard_input: &ButtonInput<KeyCode>,
    key_map: &KeyMap,
) -> bool {
    key_map
        .map
        .get(&action)
        .is_some_and(|keys| keyboard_input.any_just_pressed(keys.iter().copied()))
}

pub fn is_action_just_released(
    action: GameAction,
    keyboard_input: &ButtonInput<KeyCode>,
    key_map: &KeyMap,
) -> bool {
    key_map
        .map
        .get(&action)
        .is_some_and(|keys| keyboard_input.any_just_released(keys.iter().copied()))
}

pub(crate) fn default_key_map() -> BTreeMap<GameAction, Vec<KeyCode>> {
    let mut map = BTreeMap::new();
    map.insert(GameAction::MoveForward, vec![KeyCode::KeyW, KeyCode::ArrowUp]);
    map.insert(
        GameAction::MoveBackward,
        vec![KeyCode::KeyS, KeyCode::ArrowDown],
    );
    map.insert(GameAction::MoveLeft, vec![KeyCode::KeyA, KeyCode::ArrowLeft]);
    map.insert(
        GameAction::MoveRight,
        vec![KeyCode::KeyD, KeyCode::ArrowRight],
    );
    map.insert(GameAction::Cast, vec![KeyCode::Space]);
    map.insert(GameAction::Interact, vec![KeyCode::KeyE]);
    map.insert(GameAction::CycleSticker, vec![KeyCode::KeyQ]);
    map.insert(GameAction::ClearCanvas, vec![KeyCode::KeyC]);
    map.insert(GameAction::Escape, vec![KeyCode::Escape]);
    map.insert(GameAction::ToggleFps, vec![KeyCode::F3]);
    map.insert(GameAction::ToggleInspector, vec![KeyCode::F9]);
    map
}

pub fn get_bindings(game_folder_paths: &GameFolderPaths) -> KeyMap {
    let binds_path: PathBuf = game_folder_paths.game_folder_path.join(BINDS_FILE);

    if let Ok(content) = fs::read_to_string(&binds_path) {
        match ron::from_str::<KeyMap>(&content) {
            Ok(key_map) => return key_map,
            Err(e) => error!("Invalid keybindings in {:?}, using defaults: {}", binds_path, e),
        }
    }

    let key_map = KeyMap::default();
    if let Err(e) = write_ron(&key_map, &binds_path) {
        error!(
            "Failed to create default keybindings file at {:?}: {}",
            binds_path, e
        );
    }
    key_map
}
