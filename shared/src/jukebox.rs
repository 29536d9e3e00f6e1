use bevy::prelude::*;

use crate::rewards::{Collection, SongId};

/// The ship's jukebox. Cycles through the songs the player has collected.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct Jukebox {
    pub current: Option<SongId>,
}

impl Jukebox {
    /// Advances to the collected song after the current one, wrapping around.
    /// Starts from the first song when nothing is playing or the current
    /// song is no longer collected.
    pub fn next(&mut self, collection: &Collection) -> Option<SongId> {
        let songs = &collection.songs;
        self.current = match self
            .current
            .and_then(|current| songs.iter().position(|&id| id == current))
        {
            Some(index) => songs.get((index + 1) % songs.len()).copied(),
            None => songs.first().copied(),
        };
        self.current
    }

    pub fn stop(&mut self) {
        self.current = None;
    }
}
