use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use shared::fishing::{FishingLine, FishingState};
use shared::interaction::StickerSelection;
use shared::players::Player;
use shared::rewards::{Collection, RewardCatalog};

use crate::player::CurrentPlayerMarker;

#[derive(Component)]
pub struct FpsText;

#[derive(Component)]
pub struct CoordsText;

#[derive(Component)]
pub struct FishingText;

#[derive(Component)]
pub struct CatchesText;

pub fn fps_text_update_system(
    diagnostics: Res<DiagnosticsStore>,
    query: Query<Entity, With<FpsText>>,
    mut writer: TextUiWriter,
) {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps| fps.smoothed());
    for entity in query.iter() {
        *writer.text(entity, 0) = match fps {
            Some(value) => format!("FPS: {value:.0}"),
            None => "FPS: N/A".to_string(),
        };
    }
}

pub fn coords_text_update_system(
    player: Query<&Player, With<CurrentPlayerMarker>>,
    query: Query<Entity, With<CoordsText>>,
    mut writer: TextUiWriter,
) {
    let Ok(player) = player.single() else {
        return;
    };
    let eye = player.eye;
    let mode = if player.climbing {
        " (climbing)"
    } else if player.falling {
        " (falling)"
    } else {
        ""
    };
    for entity in query.iter() {
        *writer.text(entity, 0) = format!("Eye: {:.1} {:.1} {:.1}{}", eye.x, eye.y, eye.z, mode);
    }
}

fn state_name(state: FishingState) -> &'static str {
    match state {
        FishingState::Pole => "Pole",
        FishingState::Casting => "Casting",
        FishingState::Cast => "Waiting for a bite",
        FishingState::Hooked => "Hooked!",
        FishingState::Reeling => "Reeling",
    }
}

pub fn fishing_text_update_system(
    player: Query<&FishingLine, With<CurrentPlayerMarker>>,
    query: Query<Entity, With<FishingText>>,
    mut writer: TextUiWriter,
) {
    let Ok(line) = player.single() else {
        return;
    };
    for entity in query.iter() {
        *writer.text(entity, 0) = format!(
            "Fishing: {} (charge {:.2})",
            state_name(line.state),
            line.cast_angle
        );
    }
}

pub fn catches_text_update_system(
    collection: Res<Collection>,
    catalog: Res<RewardCatalog>,
    selection: Res<StickerSelection>,
    query: Query<Entity, With<CatchesText>>,
    mut writer: TextUiWriter,
) {
    let sticker = selection
        .selected(&collection)
        .and_then(|id| catalog.sticker(id))
        .map_or("none", |sticker| sticker.name.as_str());
    let complete = if collection.is_complete(&catalog) {
        ", collection complete"
    } else {
        ""
    };
    for entity in query.iter() {
        *writer.text(entity, 0) = format!(
            "Catches: {} | songs {}/{} | stickers {}/{} | sticker: {}{}",
            collection.catches,
            collection.songs.len(),
            catalog.songs.len(),
            collection.stickers.len(),
            catalog.stickers.len(),
            sticker,
            complete
        );
    }
}
