pub mod models;
pub mod ocean;
pub mod props;
pub mod ship;

use bevy::prelude::*;
use shared::jukebox::Jukebox;
use shared::sets::{GameOnEnterSet, GameUpdateSet};

use crate::GameState;

pub struct WorldPlugin;
impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Jukebox>()
            .add_systems(
                OnEnter(GameState::Game),
                (ocean::setup_ocean, ship::spawn_ship, props::spawn_props)
                    .in_set(GameOnEnterSet::Scene),
            )
            .add_systems(
                Update,
                (ocean::ocean_config_changed_system, ocean::animate_ocean_system)
                    .chain()
                    .in_set(GameUpdateSet::Ocean),
            )
            .add_systems(
                Update,
                (
                    props::sync_canvas_image_system,
                    props::jukebox_playback_system,
                )
                    .in_set(GameUpdateSet::Rendering),
            );
    }
}
