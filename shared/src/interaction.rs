//! Using the props on deck: the jukebox and the sticker canvas.

use bevy::prelude::*;

use crate::canvas::{Canvas, CanvasFrame};
use crate::constants::STAMP_RADIUS;
use crate::jukebox::Jukebox;
use crate::physics::{Collider, OrientedBox, RayHit};
use crate::rewards::{Collection, RewardCatalog, SongId, StickerId};

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interactable {
    Jukebox,
    Canvas,
}

/// World volumes of the props, filled in once their models are loaded.
#[derive(Resource, Debug, Default)]
pub struct InteractTargets {
    pub jukebox: Option<OrientedBox>,
    pub canvas: Option<CanvasFrame>,
}

impl InteractTargets {
    pub fn iter(&self) -> impl Iterator<Item = (Interactable, &OrientedBox)> {
        self.jukebox
            .iter()
            .map(|volume| (Interactable::Jukebox, volume))
            .chain(
                self.canvas
                    .iter()
                    .map(|frame| (Interactable::Canvas, &frame.volume)),
            )
    }
}

/// Nearest prop hit by the ray within `reach`.
pub fn pick_interactable<'a>(
    origin: Vec3,
    direction: Vec3,
    reach: f32,
    targets: impl IntoIterator<Item = (Interactable, &'a OrientedBox)>,
) -> Option<(Interactable, RayHit)> {
    targets
        .into_iter()
        .filter_map(|(kind, volume)| {
            volume
                .cast_ray(origin, direction, reach)
                .map(|hit| (kind, hit))
        })
        .min_by(|a, b| a.1.distance.total_cmp(&b.1.distance))
}

/// Which collected sticker the player will stamp next.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct StickerSelection {
    current: Option<StickerId>,
}

impl StickerSelection {
    /// The selected sticker, falling back to the first collected one.
    pub fn selected(&self, collection: &Collection) -> Option<StickerId> {
        match self.current {
            Some(id) if collection.stickers.contains(&id) => Some(id),
            _ => collection.stickers.first().copied(),
        }
    }

    pub fn cycle(&mut self, collection: &Collection) -> Option<StickerId> {
        let stickers = &collection.stickers;
        self.current = match self
            .selected(collection)
            .and_then(|id| stickers.iter().position(|&s| s == id))
        {
            Some(index) => stickers.get((index + 1) % stickers.len()).copied(),
            None => None,
        };
        self.current
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionOutcome {
    Playing(SongId),
    NoSongs,
    Stamped { sticker: StickerId, uv: Vec2 },
    NoStickers,
    /// The ray hit the canvas frame but not its painted face.
    OffCanvas,
}

/// Applies the interact action to whatever `kind` the player is looking at.
pub fn interact(
    kind: Interactable,
    hit: &RayHit,
    jukebox: &mut Jukebox,
    canvas: &mut Canvas,
    frame: Option<&CanvasFrame>,
    selection: &StickerSelection,
    collection: &Collection,
    catalog: &RewardCatalog,
) -> InteractionOutcome {
    match kind {
        Interactable::Jukebox => match jukebox.next(collection) {
            Some(song) => InteractionOutcome::Playing(song),
            None => InteractionOutcome::NoSongs,
        },
        Interactable::Canvas => {
            let Some(sticker) = selection
                .selected(collection)
                .and_then(|id| catalog.sticker(id))
            else {
                return InteractionOutcome::NoStickers;
            };
            let Some(uv) = frame.and_then(|frame| frame.uv_at(hit.point)) else {
                return InteractionOutcome::OffCanvas;
            };
            canvas.stamp(uv, sticker, STAMP_RADIUS);
            InteractionOutcome::Stamped {
                sticker: sticker.id,
                uv,
            }
        }
    }
}
