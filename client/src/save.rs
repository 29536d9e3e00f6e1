use bevy::prelude::*;
use shared::canvas::Canvas;
use shared::rewards::{Collection, RewardCatalog};
use shared::save::{
    back_up_save, load_game, save_file_path, save_game, SaveData, SaveRequestEvent,
};
use shared::{GameFolderPaths, CANVAS_SIZE};

pub struct SavePlugin;
impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SaveRequestEvent>()
            .add_systems(Startup, load_save_system)
            .add_systems(Last, (request_save_on_exit, save_game_system).chain());
    }
}

/// Present when an unreadable save could not be moved aside. Saving is skipped
/// so the player's old progress is not overwritten.
#[derive(Resource, Debug)]
pub struct SaveBlocked;

fn restore(data: SaveData, catalog: &RewardCatalog) -> (Collection, Canvas) {
    let canvas = Canvas::from_stamps(CANVAS_SIZE, CANVAS_SIZE, &data.stamps, catalog);
    (data.collection, canvas)
}

pub fn load_save_system(
    mut commands: Commands,
    paths: Res<GameFolderPaths>,
    catalog: Res<RewardCatalog>,
) {
    let path = save_file_path(&paths);
    let data = match load_game(&path) {
        Ok(data) => data,
        Err(e) => {
            error!("Could not read save {}: {}", path.display(), e);
            if let Err(e) = back_up_save(&path) {
                error!("Could not back up {}, saving disabled: {}", path.display(), e);
                commands.insert_resource(SaveBlocked);
            }
            SaveData::default()
        }
    };
    info!(
        "Loaded {} catches, {} songs, {} stickers",
        data.collection.catches,
        data.collection.songs.len(),
        data.collection.stickers.len()
    );

    let (collection, canvas) = restore(data, &catalog);
    commands.insert_resource(collection);
    commands.insert_resource(canvas);
}

fn request_save_on_exit(
    mut exit_events: EventReader<AppExit>,
    mut save_events: EventWriter<SaveRequestEvent>,
) {
    if exit_events.read().next().is_some() {
        save_events.write(SaveRequestEvent::Exit);
    }
}

pub fn save_game_system(
    paths: Res<GameFolderPaths>,
    collection: Option<Res<Collection>>,
    canvas: Option<Res<Canvas>>,
    blocked: Option<Res<SaveBlocked>>,
    mut events: EventReader<SaveRequestEvent>,
) {
    // Reads all events so a burst of requests produces a single write
    let mut save_requested = false;
    for event in events.read() {
        debug!("Save requested: {:?}", event);
        save_requested = true;
    }
    if !save_requested {
        return;
    }
    if blocked.is_some() {
        warn!("Save skipped, the old save could not be backed up");
        return;
    }
    let (Some(collection), Some(canvas)) = (collection, canvas) else {
        return;
    };

    let data = SaveData {
        collection: collection.clone(),
        stamps: canvas.stamps().to_vec(),
    };
    let path = save_file_path(&paths);
    if let Err(e) = save_game(&data, &path) {
        error!("Failed to save game to {}: {}", path.display(), e);
    }
}
