//! Procedural ocean surface.
//!
//! The ocean is a single square grid of `grid_resolution²` vertices centred on
//! the origin. Vertex heights are sampled every frame from a 3D OpenSimplex
//! field where the third axis is time, so the surface rolls without any
//! per-vertex state. The same field answers point queries, which is how the
//! bobber floats on exactly the surface the player sees.

pub mod config;
pub mod grid;
pub mod waves;

pub use config::OceanConfig;
pub use grid::{grid_coordinate, OceanGrid};
pub use waves::WaveField;
