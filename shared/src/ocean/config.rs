use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Smallest grid side length, in world units.
pub const MIN_SPAN: f32 = 1.0;

/// Runtime ocean configuration, loaded from `ocean.ron` in the game folder.
#[derive(Resource, Clone, Debug, Reflect, Serialize, Deserialize, PartialEq)]
#[reflect(Resource)]
#[serde(default)]
pub struct OceanConfig {
    /// Number of vertices along each side of the grid.
    pub grid_resolution: u32,
    /// World units covered by each side of the grid.
    pub span: f32,
    /// How many times the surface texture repeats along each side.
    pub texture_tiles: u32,
    /// Y of the undisturbed water surface.
    pub sea_level: f32,
    /// Peak wave height above or below `sea_level`.
    pub amplitude: f32,
    /// Multiplier applied to x and z before sampling the noise.
    pub spatial_scale: f32,
    /// Multiplier applied to elapsed seconds before sampling the noise.
    pub time_scale: f32,
    /// Base frequency of the noise field.
    pub noise_frequency: f32,
    pub seed: u32,
}

impl Default for OceanConfig {
    fn default() -> Self {
        Self {
            grid_resolution: 256,
            span: 1024.0,
            texture_tiles: 8,
            sea_level: -13.0,
            amplitude: 4.0,
            spatial_scale: 2.0,
            time_scale: 30.0,
            noise_frequency: 0.01,
            seed: 1337,
        }
    }
}

impl OceanConfig {
    /// Grid resolution with the lower bound a mesh needs.
    pub fn resolution(&self) -> usize {
        self.grid_resolution.max(2) as usize
    }

    /// Grid side length, kept positive so grid steps never divide by zero.
    pub fn span(&self) -> f32 {
        self.span.max(MIN_SPAN)
    }

    /// Calm water, handy for tests and for debugging collision.
    pub fn flat(sea_level: f32) -> Self {
        Self {
            amplitude: 0.0,
            sea_level,
            ..Default::default()
        }
    }
}
