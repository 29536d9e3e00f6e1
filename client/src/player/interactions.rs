use bevy::input::gamepad::GamepadButton;
use bevy::prelude::*;
use shared::canvas::Canvas;
use shared::interaction::{
    interact, pick_interactable, InteractTargets, InteractionOutcome, StickerSelection,
};
use shared::jukebox::Jukebox;
use shared::players::Player;
use shared::rewards::{Collection, RewardCatalog};
use shared::save::SaveRequestEvent;
use shared::INTERACT_REACH;

use super::CurrentPlayerMarker;
use crate::input::data::GameAction;
use crate::input::gamepad::FirstGamepad;
use crate::input::keyboard::is_action_just_pressed;
use crate::ui::hud::toast::ToastEvent;
use crate::KeyMap;

fn action_just_pressed(
    action: GameAction,
    button: GamepadButton,
    keyboard_input: &ButtonInput<KeyCode>,
    key_map: &KeyMap,
    pad: &FirstGamepad,
) -> bool {
    is_action_just_pressed(action, keyboard_input, key_map) || pad.just_pressed(button)
}

fn outcome_message(outcome: InteractionOutcome, catalog: &RewardCatalog) -> Option<String> {
    match outcome {
        InteractionOutcome::Playing(id) => catalog
            .song(id)
            .map(|song| format!("Now playing: {}", song.title)),
        InteractionOutcome::NoSongs => Some("No songs yet. Go fishing!".to_string()),
        InteractionOutcome::NoStickers => Some("No stickers yet. Go fishing!".to_string()),
        InteractionOutcome::Stamped { .. } | InteractionOutcome::OffCanvas => None,
    }
}

/// Uses the jukebox or stamps the canvas, whichever is in front of the player.
pub fn interact_system(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    key_map: Res<KeyMap>,
    pad: FirstGamepad,
    player_query: Query<&Player, With<CurrentPlayerMarker>>,
    targets: Option<Res<InteractTargets>>,
    mut jukebox: ResMut<Jukebox>,
    mut canvas: ResMut<Canvas>,
    selection: Res<StickerSelection>,
    collection: Res<Collection>,
    catalog: Res<RewardCatalog>,
    mut save_events: EventWriter<SaveRequestEvent>,
    mut toasts: EventWriter<ToastEvent>,
) {
    if !action_just_pressed(
        GameAction::Interact,
        GamepadButton::West,
        &keyboard_input,
        &key_map,
        &pad,
    ) {
        return;
    }
    let Ok(player) = player_query.single() else {
        debug!("player not found");
        return;
    };
    let Some(targets) = targets else {
        return;
    };
    let Some((kind, hit)) = pick_interactable(
        player.eye,
        player.look.forward(),
        INTERACT_REACH,
        targets.iter(),
    ) else {
        debug!("Nothing to interact with");
        return;
    };

    // only the branch that actually changes something marks it changed
    let outcome = interact(
        kind,
        &hit,
        jukebox.bypass_change_detection(),
        canvas.bypass_change_detection(),
        targets.canvas.as_ref(),
        &selection,
        &collection,
        &catalog,
    );
    info!("Interacted with {:?}: {:?}", kind, outcome);

    match outcome {
        InteractionOutcome::Playing(_) => jukebox.set_changed(),
        InteractionOutcome::Stamped { .. } => {
            canvas.set_changed();
            save_events.write(SaveRequestEvent::CanvasChanged);
        }
        _ => {}
    }
    if let Some(message) = outcome_message(outcome, &catalog) {
        toasts.write(ToastEvent(message));
    }
}

pub fn cycle_sticker_system(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    key_map: Res<KeyMap>,
    pad: FirstGamepad,
    mut selection: ResMut<StickerSelection>,
    collection: Res<Collection>,
    catalog: Res<RewardCatalog>,
    mut toasts: EventWriter<ToastEvent>,
) {
    if !action_just_pressed(
        GameAction::CycleSticker,
        GamepadButton::RightTrigger,
        &keyboard_input,
        &key_map,
        &pad,
    ) {
        return;
    }
    let message = match selection.cycle(&collection).and_then(|id| catalog.sticker(id)) {
        Some(sticker) => format!("Sticker: {}", sticker.name),
        None => "No stickers yet. Go fishing!".to_string(),
    };
    debug!("{}", message);
    toasts.write(ToastEvent(message));
}

pub fn clear_canvas_system(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    key_map: Res<KeyMap>,
    mut canvas: ResMut<Canvas>,
    mut save_events: EventWriter<SaveRequestEvent>,
) {
    if !is_action_just_pressed(GameAction::ClearCanvas, &keyboard_input, &key_map) {
        return;
    }
    if canvas.stamps().is_empty() {
        return;
    }
    canvas.clear();
    info!("Canvas cleared");
    save_events.write(SaveRequestEvent::CanvasChanged);
}
