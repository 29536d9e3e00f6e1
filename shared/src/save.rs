use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use bevy_log::info;
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};

use crate::canvas::Stamp;
use crate::constants::{SAVE_FILE, SAVE_PATH};
use crate::rewards::Collection;
use crate::GameFolderPaths;

/// Asks the client to write the save file at the end of the frame.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveRequestEvent {
    NewCatch,
    CanvasChanged,
    Exit,
}

/// Everything that survives a restart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveData {
    pub collection: Collection,
    pub stamps: Vec<Stamp>,
}

pub fn save_file_path(paths: &GameFolderPaths) -> PathBuf {
    paths.game_folder_path.join(SAVE_PATH).join(SAVE_FILE)
}

pub fn save_game(data: &SaveData, file_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let pretty_config = PrettyConfig::new()
        .with_depth_limit(3)
        .with_separate_tuple_members(true)
        .with_enumerate_arrays(true);

    let serialized = ron::ser::to_string_pretty(data, pretty_config)?;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(file_path)?;
    file.write_all(serialized.as_bytes())?;
    info!(
        "Game saved to {} ({} catches, {} stamps)",
        file_path.display(),
        data.collection.catches,
        data.stamps.len()
    );
    Ok(())
}

/// Reads the save file. A missing file is a fresh game, not an error.
pub fn load_game(file_path: &Path) -> Result<SaveData, Box<dyn std::error::Error>> {
    if !file_path.exists() {
        info!("No save at {}, starting fresh", file_path.display());
        return Ok(SaveData::default());
    }
    let contents = fs::read_to_string(file_path)?;
    let data: SaveData = ron::from_str(&contents)?;
    Ok(data)
}

/// Moves an unreadable save aside to `<name>.bak` so the next write does not
/// destroy it. Returns the backup path.
pub fn back_up_save(file_path: &Path) -> std::io::Result<PathBuf> {
    let mut name = file_path.file_name().unwrap_or_default().to_os_string();
    name.push(".bak");
    let backup = file_path.with_file_name(name);
    fs::rename(file_path, &backup)?;
    info!("Moved unreadable save to {}", backup.display());
    Ok(backup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewards::Reward;

    #[test]
    fn test_missing_save_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let data = load_game(&dir.path().join("nothing.ron")).unwrap();
        assert_eq!(data, SaveData::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let paths = GameFolderPaths {
            game_folder_path: dir.path().to_path_buf(),
            assets_folder_path: dir.path().to_path_buf(),
        };
        let path = save_file_path(&paths);

        let mut collection = Collection::default();
        collection.add(Reward::Sticker(3));
        collection.add(Reward::Song(1));
        collection.add(Reward::Junk);
        let data = SaveData {
            collection,
            stamps: vec![Stamp {
                sticker: 3,
                uv: Vec2::new(0.25, 0.75),
                radius: 14.0,
            }],
        };

        save_game(&data, &path).unwrap();
        assert!(path.starts_with(dir.path().join("save")));
        assert_eq!(load_game(&path).unwrap(), data);
    }

    #[test]
    fn test_corrupt_save_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ark.ron");
        fs::write(&path, "(collection: [oops").unwrap();
        assert!(load_game(&path).is_err());
    }

    #[test]
    fn test_back_up_save_keeps_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ark.ron");
        fs::write(&path, "(collection: [oops").unwrap();

        let backup = back_up_save(&path).unwrap();
        assert_eq!(backup, dir.path().join("ark.ron.bak"));
        assert!(!path.exists());
        assert_eq!(fs::read_to_string(backup).unwrap(), "(collection: [oops");
    }

    #[test]
    fn test_partial_save_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ark.ron");
        fs::write(&path, "(collection: (catches: 9))").unwrap();
        let data = load_game(&path).unwrap();
        assert_eq!(data.collection.catches, 9);
        assert!(data.stamps.is_empty());
    }
}
