//! Things that can come up on the line, and what the player has found so far.

use bevy::prelude::*;
use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};

pub type SongId = u32;
pub type StickerId = u32;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongDef {
    pub id: SongId,
    pub title: String,
    /// Audio file, relative to the assets folder.
    pub path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Reflect)]
pub enum StickerShape {
    Circle,
    Square,
    Diamond,
    Ring,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StickerDef {
    pub id: StickerId,
    pub name: String,
    /// Straight RGBA.
    pub color: [u8; 4],
    pub shape: StickerShape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reward {
    Song(SongId),
    Sticker(StickerId),
    /// Seaweed, old boots. Counts as a catch, unlocks nothing.
    Junk,
}

/// Every reward that exists in the game, loaded from `catalog.ron`.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardCatalog {
    pub songs: Vec<SongDef>,
    pub stickers: Vec<StickerDef>,
    /// Chance that a catch is junk, in [0, 1].
    pub junk_chance: f64,
}

impl Default for RewardCatalog {
    fn default() -> Self {
        let song = |id, title: &str, file: &str| SongDef {
            id,
            title: title.to_string(),
            path: format!("songs/{file}.ogg"),
        };
        let sticker = |id, name: &str, color, shape| StickerDef {
            id,
            name: name.to_string(),
            color,
            shape,
        };
        Self {
            songs: vec![
                song(0, "Sea Shanty", "shanty"),
                song(1, "Tide Waltz", "waltz"),
                song(2, "Gull Song", "gulls"),
                song(3, "Deep Blue", "deep_blue"),
            ],
            stickers: vec![
                sticker(0, "Sun", [250, 204, 21, 255], StickerShape::Circle),
                sticker(1, "Crate", [146, 94, 50, 255], StickerShape::Square),
                sticker(2, "Gem", [56, 189, 248, 255], StickerShape::Diamond),
                sticker(3, "Life Ring", [239, 68, 68, 255], StickerShape::Ring),
                sticker(4, "Kelp", [34, 139, 34, 255], StickerShape::Diamond),
                sticker(5, "Pearl", [240, 240, 235, 255], StickerShape::Circle),
            ],
            junk_chance: 0.2,
        }
    }
}

impl RewardCatalog {
    pub fn song(&self, id: SongId) -> Option<&SongDef> {
        self.songs.iter().find(|s| s.id == id)
    }

    pub fn sticker(&self, id: StickerId) -> Option<&StickerDef> {
        self.stickers.iter().find(|s| s.id == id)
    }

    fn all_rewards(&self) -> impl Iterator<Item = Reward> + '_ {
        self.songs
            .iter()
            .map(|s| Reward::Song(s.id))
            .chain(self.stickers.iter().map(|s| Reward::Sticker(s.id)))
    }

    pub fn describe(&self, reward: Reward) -> String {
        match reward {
            Reward::Song(id) => match self.song(id) {
                Some(song) => format!("song \"{}\"", song.title),
                None => format!("unknown song #{id}"),
            },
            Reward::Sticker(id) => match self.sticker(id) {
                Some(sticker) => format!("{} sticker", sticker.name),
                None => format!("unknown sticker #{id}"),
            },
            Reward::Junk => "some junk".to_string(),
        }
    }
}

/// What the player has fished up, in the order it was found.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Collection {
    pub songs: Vec<SongId>,
    pub stickers: Vec<StickerId>,
    pub catches: u32,
}

impl Collection {
    pub fn contains(&self, reward: Reward) -> bool {
        match reward {
            Reward::Song(id) => self.songs.contains(&id),
            Reward::Sticker(id) => self.stickers.contains(&id),
            Reward::Junk => false,
        }
    }

    /// Records a catch. Returns true if it unlocked something new.
    pub fn add(&mut self, reward: Reward) -> bool {
        self.catches += 1;
        if self.contains(reward) {
            return false;
        }
        match reward {
            Reward::Song(id) => self.songs.push(id),
            Reward::Sticker(id) => self.stickers.push(id),
            Reward::Junk => return false,
        }
        true
    }

    pub fn is_complete(&self, catalog: &RewardCatalog) -> bool {
        catalog.all_rewards().all(|r| self.contains(r))
    }
}

/// Picks what was on the hook. New rewards are preferred until the catalog is
/// exhausted, after which duplicates come up.
pub fn roll_reward(catalog: &RewardCatalog, collection: &Collection, rng: &mut impl Rng) -> Reward {
    if rng.gen_bool(catalog.junk_chance.clamp(0.0, 1.0)) {
        return Reward::Junk;
    }
    let fresh: Vec<Reward> = catalog
        .all_rewards()
        .filter(|r| !collection.contains(*r))
        .collect();
    if let Some(reward) = fresh.choose(rng) {
        return *reward;
    }
    let all: Vec<Reward> = catalog.all_rewards().collect();
    all.choose(rng).copied().unwrap_or(Reward::Junk)
}
