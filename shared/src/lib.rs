use std::path::PathBuf;

use bevy_ecs::resource::Resource;

pub mod canvas;
pub mod constants;
pub mod fishing;
pub mod interaction;
pub mod jukebox;
pub mod ocean;
pub mod physics;
pub mod players;
pub mod rewards;
pub mod save;
pub mod sets;

pub use constants::*;

#[derive(Resource, Debug, Clone)]
pub struct GameFolderPaths {
    pub game_folder_path: PathBuf,
    pub assets_folder_path: PathBuf,
}

pub fn get_game_folder_paths(
    game_folder_path: Option<String>,
    assets_folder_path: Option<String>,
) -> GameFolderPaths {
    let mut paths = default_game_folder_paths();

    if let Some(game_data) = game_folder_path {
        paths.game_folder_path = game_data.into();
    }
    if let Some(game_assets) = assets_folder_path {
        paths.assets_folder_path = game_assets.into();
    }

    paths
}

fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(target_os = "windows")]
pub fn default_game_folder_paths() -> GameFolderPaths {
    let base = std::env::var_os("APPDATA")
        .map(PathBuf::from)
        .unwrap_or_else(home_dir)
        .join("ark");
    GameFolderPaths {
        assets_folder_path: base.join("data"),
        game_folder_path: base,
    }
}

#[cfg(target_os = "macos")]
pub fn default_game_folder_paths() -> GameFolderPaths {
    let base = home_dir().join("Library/Application Support/ark");
    GameFolderPaths {
        assets_folder_path: base.join("data"),
        game_folder_path: base,
    }
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
pub fn default_game_folder_paths() -> GameFolderPaths {
    let home = home_dir();
    GameFolderPaths {
        game_folder_path: home.join(".local/share/ark"),
        assets_folder_path: home.join(".config/ark"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_defaults() {
        let paths = get_game_folder_paths(Some("/tmp/ark".into()), Some("/tmp/assets".into()));
        assert_eq!(paths.game_folder_path, PathBuf::from("/tmp/ark"));
        assert_eq!(paths.assets_folder_path, PathBuf::from("/tmp/assets"));
    }

    #[test]
    fn test_defaults_are_used_without_overrides() {
        let paths = get_game_folder_paths(None, None);
        assert_eq!(paths.game_folder_path, default_game_folder_paths().game_folder_path);
    }
}
