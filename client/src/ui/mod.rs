pub mod hud;

use bevy::prelude::*;
use shared::sets::{GameOnEnterSet, GameUpdateSet};

use crate::{
    ui::hud::{
        debug::{
            inspector::{register_inspector_types, toggle_inspector_system, InspectorVisible},
            setup::{setup_debug_hud, toggle_hud_system},
            stats::{
                catches_text_update_system, coords_text_update_system, fishing_text_update_system,
                fps_text_update_system,
            },
        },
        loading_overlay::{setup_loading_overlay, update_loading_overlay},
        reticle::spawn_reticle,
        toast::{setup_toast, toast_system, ToastEvent},
    },
    GameState,
};

pub struct PlayerUiPlugin;
impl Plugin for PlayerUiPlugin {
    fn build(&self, app: &mut App) {
        register_inspector_types(app);

        app.add_event::<ToastEvent>()
            .init_resource::<InspectorVisible>()
            .add_systems(Startup, setup_loading_overlay)
            .add_systems(
                OnEnter(GameState::Game),
                (spawn_reticle, setup_debug_hud, setup_toast)
                    .chain()
                    .in_set(GameOnEnterSet::Ui),
            )
            // the overlay also covers the loading state, outside the game sets
            .add_systems(Update, update_loading_overlay)
            .add_systems(
                Update,
                (
                    toast_system,
                    toggle_hud_system,
                    toggle_inspector_system,
                    fps_text_update_system,
                    coords_text_update_system,
                    fishing_text_update_system,
                    catches_text_update_system,
                )
                    .in_set(GameUpdateSet::Ui),
            );
    }
}
