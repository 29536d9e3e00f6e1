mod assets;
mod config;
mod constants;
mod game;
mod input;
mod player;
mod save;
mod ui;
mod world;

use bevy::{prelude::*, window::PresentMode, window::WindowMode};
use bevy_inspector_egui::{bevy_egui::EguiPlugin, DefaultInspectorConfigPlugin};
use clap::Parser;
use constants::{WINDOW_HEIGHT, WINDOW_WIDTH};
use input::{data::GameAction, keyboard::get_bindings};
use serde::{Deserialize, Serialize};
use shared::get_game_folder_paths;
use std::collections::BTreeMap;
use ui::hud::debug::inspector::inspector_ui;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long)]
    game_folder_path: Option<String>,

    #[arg(
        short,
        long,
        help = "Allows overriding of the asset folder path, defaults to <game_folder_path>/data"
    )]
    assets_folder_path: Option<String>,

    #[arg(long, help = "Overrides the wave noise seed from ocean.ron")]
    seed: Option<u32>,

    #[arg(long)]
    fullscreen: bool,
}

// Enum that will be used as a global state for the game
#[derive(Clone, Copy, Default, Eq, PartialEq, Debug, Hash, States)]
pub enum GameState {
    #[default]
    Loading,
    Game,
}

#[derive(Resource, Serialize, Deserialize)]
pub struct KeyMap {
    #[serde(default = "input::keyboard::default_key_map")]
    pub map: BTreeMap<GameAction, Vec<KeyCode>>,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            map: input::keyboard::default_key_map(),
        }
    }
}

fn main() {
    let args = Args::parse();

    let game_folder_paths = get_game_folder_paths(args.game_folder_path, args.assets_folder_path);

    println!(
        "Starting application with game folder: {}",
        game_folder_paths.game_folder_path.display()
    );

    let mut ocean_config = config::load_ocean_config(&game_folder_paths);
    if let Some(seed) = args.seed {
        ocean_config.seed = seed;
    }
    let catalog = config::load_catalog(&game_folder_paths);

    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(AssetPlugin {
                file_path: game_folder_paths.assets_folder_path.display().to_string(),
                ..Default::default()
            })
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Ark".to_string(),
                    present_mode: PresentMode::AutoVsync,
                    resolution: (WINDOW_WIDTH, WINDOW_HEIGHT).into(),
                    mode: if args.fullscreen {
                        WindowMode::BorderlessFullscreen(MonitorSelection::Current)
                    } else {
                        WindowMode::Windowed
                    },
                    ..default()
                }),
                ..default()
            }),
    );

    app.add_plugins(EguiPlugin {
        enable_multipass_for_primary_context: false,
    })
    .add_plugins(DefaultInspectorConfigPlugin)
    .add_systems(Update, inspector_ui);

    app.insert_resource(get_bindings(&game_folder_paths))
        .insert_resource(ocean_config)
        .insert_resource(catalog)
        .insert_resource(game_folder_paths)
        .init_state::<GameState>()
        .enable_state_scoped_entities::<GameState>()
        .add_plugins((assets::loading_plugin, game::game_plugin))
        .run();
}
