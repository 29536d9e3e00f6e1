//! Sticker painting. The canvas is a CPU-side RGBA8 image the client uploads
//! to the GPU whenever it changes.

use bevy::prelude::*;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::physics::OrientedBox;
use crate::rewards::{RewardCatalog, StickerDef, StickerId, StickerShape};

const BLANK: [u8; 4] = [255, 255, 255, 255];
/// Inner radius of a ring, relative to its outer radius.
const RING_INNER: f32 = 0.6;

/// One sticker placed on the canvas. `uv` has v pointing down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stamp {
    pub sticker: StickerId,
    pub uv: Vec2,
    pub radius: f32,
}

#[derive(Resource, Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    stamps: Vec<Stamp>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: BLANK.repeat((width * height) as usize),
            stamps: Vec::new(),
        }
    }

    /// Rebuilds a canvas from saved stamps. Stamps of stickers missing from
    /// the catalog are dropped.
    pub fn from_stamps(
        width: u32,
        height: u32,
        stamps: &[Stamp],
        catalog: &RewardCatalog,
    ) -> Self {
        let mut canvas = Self::new(width, height);
        for stamp in stamps {
            match catalog.sticker(stamp.sticker) {
                Some(sticker) => canvas.stamp(stamp.uv, sticker, stamp.radius),
                None => debug!("Dropping stamp of unknown sticker {}", stamp.sticker),
            }
        }
        canvas
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn stamps(&self) -> &[Stamp] {
        &self.stamps
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        let mut out = [0; 4];
        out.copy_from_slice(&self.pixels[i..i + 4]);
        Some(out)
    }

    pub fn clear(&mut self) {
        self.pixels.fill(255);
        self.stamps.clear();
    }

    /// Paints `sticker` centered at `uv` and records the stamp. Parts falling
    /// outside the canvas are clipped.
    pub fn stamp(&mut self, uv: Vec2, sticker: &StickerDef, radius_px: f32) {
        self.stamps.push(Stamp {
            sticker: sticker.id,
            uv,
            radius: radius_px,
        });

        let center = uv * Vec2::new(self.width as f32, self.height as f32);
        let min = (center - radius_px).floor().max(Vec2::ZERO);
        let max = (center + radius_px)
            .ceil()
            .min(Vec2::new(self.width as f32, self.height as f32));
        if min.x >= max.x || min.y >= max.y {
            return;
        }

        for y in min.y as u32..max.y as u32 {
            for x in min.x as u32..max.x as u32 {
                let offset = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - center;
                if covers(sticker.shape, offset, radius_px) {
                    self.blend(x, y, sticker.color);
                }
            }
        }
    }

    fn blend(&mut self, x: u32, y: u32, color: [u8; 4]) {
        let i = ((y * self.width + x) * 4) as usize;
        let alpha = color[3] as u32;
        for c in 0..3 {
            let dst = self.pixels[i + c] as u32;
            self.pixels[i + c] = ((color[c] as u32 * alpha + dst * (255 - alpha)) / 255) as u8;
        }
        self.pixels[i + 3] = 255;
    }
}

fn covers(shape: StickerShape, offset: Vec2, radius: f32) -> bool {
    match shape {
        StickerShape::Circle => offset.length() <= radius,
        StickerShape::Square => offset.abs().max_element() <= radius,
        StickerShape::Diamond => offset.x.abs() + offset.y.abs() <= radius,
        StickerShape::Ring => {
            let d = offset.length();
            d <= radius && d >= radius * RING_INNER
        }
    }
}

/// The paintable face of the canvas prop in the world. The face is the
/// local XY rectangle of `volume`, with local +Y up.
#[derive(Debug, Clone, Copy)]
pub struct CanvasFrame {
    pub volume: OrientedBox,
    pub size: UVec2,
}

impl CanvasFrame {
    /// Maps a world point on the canvas to texture coordinates.
    pub fn uv_at(&self, world_point: Vec3) -> Option<Vec2> {
        let local = self.volume.local_point(world_point);
        let min = self.volume.local_min();
        let max = self.volume.local_max();
        let extent = (max - min).truncate();
        if extent.x <= f32::EPSILON || extent.y <= f32::EPSILON {
            return None;
        }
        let u = (local.x - min.x) / extent.x;
        let v = (max.y - local.y) / extent.y;
        ((0.0..=1.0).contains(&u) && (0.0..=1.0).contains(&v)).then(|| Vec2::new(u, v))
    }
}
