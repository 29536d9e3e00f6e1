use bevy::prelude::*;
use ron::ser::PrettyConfig;
use serde::{de::DeserializeOwned, Serialize};
use shared::ocean::OceanConfig;
use shared::rewards::RewardCatalog;
use shared::{GameFolderPaths, CATALOG_FILE, OCEAN_CONFIG_FILE};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

pub(crate) fn write_ron<T: Serialize>(
    value: &T,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let pretty_config = PrettyConfig::new()
        .with_depth_limit(3)
        .with_separate_tuple_members(true)
        .with_enumerate_arrays(true);

    let serialized = ron::ser::to_string_pretty(value, pretty_config)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(serialized.as_bytes())?;
    Ok(())
}

/// Reads a RON file from the game folder. A missing file is created with
/// the defaults; an unreadable one is reported and left untouched.
fn load_or_create<T>(path: &Path) -> T
where
    T: Serialize + DeserializeOwned + Default,
{
    match fs::read_to_string(path) {
        Ok(content) => match ron::from_str::<T>(&content) {
            Ok(value) => {
                info!("Loaded {}", path.display());
                value
            }
            Err(e) => {
                error!("Failed to parse {}, using defaults: {}", path.display(), e);
                T::default()
            }
        },
        Err(_) => {
            let value = T::default();
            if let Err(e) = write_ron(&value, path) {
                error!("Failed to create default {}: {}", path.display(), e);
            }
            value
        }
    }
}

pub fn load_ocean_config(paths: &GameFolderPaths) -> OceanConfig {
    load_or_create(&paths.game_folder_path.join(OCEAN_CONFIG_FILE))
}

pub fn load_catalog(paths: &GameFolderPaths) -> RewardCatalog {
    load_or_create(&paths.game_folder_path.join(CATALOG_FILE))
}
