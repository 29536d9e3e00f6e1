//! Model and texture handles, loaded before the game scene is spawned.

use bevy::asset::{LoadState, RecursiveDependencyLoadState, UntypedAssetId};
use bevy::gltf::GltfAssetLabel;
use bevy::prelude::*;
use shared::physics::ShipColliders;

use crate::constants::*;
use crate::GameState;

#[derive(Resource)]
pub struct GameAssets {
    pub ship: Handle<Scene>,
    pub ladder: Handle<Scene>,
    pub pole: Handle<Scene>,
    pub bobber: Handle<Scene>,
    pub exclamation: Handle<Scene>,
    pub wood: Handle<Image>,
    pub sail: Handle<Image>,
    pub reel: Handle<Image>,
    pub line: Handle<Image>,
    pub metal: Handle<Image>,
    pub waves: Handle<Image>,
}

impl GameAssets {
    fn ids(&self) -> [(UntypedAssetId, &'static str); 11] {
        [
            (self.ship.id().untyped(), SHIP_MODEL),
            (self.ladder.id().untyped(), LADDER_MODEL),
            (self.pole.id().untyped(), POLE_MODEL),
            (self.bobber.id().untyped(), BOBBER_MODEL),
            (self.exclamation.id().untyped(), EXCLAMATION_MODEL),
            (self.wood.id().untyped(), WOOD_TEXTURE),
            (self.sail.id().untyped(), SAIL_TEXTURE),
            (self.reel.id().untyped(), REEL_TEXTURE),
            (self.line.id().untyped(), LINE_TEXTURE),
            (self.metal.id().untyped(), METAL_TEXTURE),
            (self.waves.id().untyped(), WAVE_TEXTURE),
        ]
    }
}

fn scene(asset_server: &AssetServer, path: &'static str) -> Handle<Scene> {
    asset_server.load(GltfAssetLabel::Scene(0).from_asset(path))
}

pub fn load_game_assets(mut commands: Commands, asset_server: Res<AssetServer>) {
    info!("Loading game assets");
    commands.insert_resource(GameAssets {
        ship: scene(&asset_server, SHIP_MODEL),
        ladder: scene(&asset_server, LADDER_MODEL),
        pole: scene(&asset_server, POLE_MODEL),
        bobber: scene(&asset_server, BOBBER_MODEL),
        exclamation: scene(&asset_server, EXCLAMATION_MODEL),
        wood: asset_server.load(WOOD_TEXTURE),
        sail: asset_server.load(SAIL_TEXTURE),
        reel: asset_server.load(REEL_TEXTURE),
        line: asset_server.load(LINE_TEXTURE),
        metal: asset_server.load(METAL_TEXTURE),
        waves: asset_server.load(WAVE_TEXTURE),
    });
}

/// Moves on to the game once every asset has either loaded or failed.
/// Failures are logged and the game runs without the missing pieces.
pub fn check_assets_loaded(
    assets: Res<GameAssets>,
    asset_server: Res<AssetServer>,
    mut colliders: ResMut<ShipColliders>,
    mut next_state: ResMut<NextState<GameState>>,
    mut failed: Local<Vec<&'static str>>,
) {
    let mut pending = 0;

    for (id, path) in assets.ids() {
        let error = match (
            asset_server.get_load_state(id),
            asset_server.get_recursive_dependency_load_state(id),
        ) {
            (_, Some(RecursiveDependencyLoadState::Loaded)) => continue,
            (Some(LoadState::Failed(err)), _) => err.to_string(),
            (_, Some(RecursiveDependencyLoadState::Failed(err))) => err.to_string(),
            _ => {
                pending += 1;
                continue;
            }
        };
        if !failed.contains(&path) {
            error!("Failed to load {}: {}", path, error);
            failed.push(path);
        }
    }

    if pending > 0 {
        return;
    }

    if failed.contains(&SHIP_MODEL) || failed.contains(&LADDER_MODEL) {
        warn!("Ship models are missing, player collision is disabled");
        colliders.mark_missing_ready();
    }
    info!("Game assets loaded");
    next_state.set(GameState::Game);
}

pub fn loading_plugin(app: &mut App) {
    app.init_resource::<ShipColliders>()
        .add_systems(OnEnter(GameState::Loading), load_game_assets)
        .add_systems(
            Update,
            check_assets_loaded.run_if(in_state(GameState::Loading)),
        );
}
