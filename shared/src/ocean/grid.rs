use super::{OceanConfig, WaveField};

/// World coordinate of grid line `index` on a grid of `resolution` lines
/// spanning `span` units centred on the origin.
#[inline]
pub fn grid_coordinate(index: usize, resolution: usize, span: f32) -> f32 {
    (index as f32 / (resolution - 1) as f32 - 0.5) * span
}

/// Texture coordinate for grid line `index` with mirrored tiling.
///
/// Every other tile is flipped so neighbouring tiles meet on identical texels
/// and the seam disappears without needing a tileable texture.
fn mirrored_uv(index: usize, resolution: usize, tiles: usize) -> f32 {
    let tiles = tiles.max(1);
    let tile_len = (resolution / tiles).max(1);
    let u = index as f32 / (resolution - 1) as f32;
    let preflip = (u * tiles as f32).rem_euclid(1.0);
    if (index / tile_len) % 2 == 1 {
        1.0 - preflip
    } else {
        preflip
    }
}

/// CPU-side vertex data of the ocean surface.
#[derive(Debug, Clone)]
pub struct OceanGrid {
    resolution: usize,
    step: f32,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

impl OceanGrid {
    pub fn new(config: &OceanConfig) -> Self {
        let resolution = config.resolution();
        let span = config.span();
        let tiles = config.texture_tiles as usize;
        let vertex_count = resolution * resolution;

        let mut positions = Vec::with_capacity(vertex_count);
        let mut uvs = Vec::with_capacity(vertex_count);
        for z in 0..resolution {
            let z_pos = grid_coordinate(z, resolution, span);
            let v = mirrored_uv(z, resolution, tiles);
            for x in 0..resolution {
                let x_pos = grid_coordinate(x, resolution, span);
                positions.push([x_pos, 0.0, z_pos]);
                uvs.push([mirrored_uv(x, resolution, tiles), v]);
            }
        }

        let quads = (resolution - 1) * (resolution - 1);
        let mut indices = Vec::with_capacity(quads * 6);
        for z in 0..resolution - 1 {
            for x in 0..resolution - 1 {
                let a = (z * resolution + x) as u32;
                let b = a + 1;
                let c = a + resolution as u32;
                let d = c + 1;
                indices.extend_from_slice(&[a, c, b, b, c, d]);
            }
        }

        Self {
            resolution,
            step: span / (resolution - 1) as f32,
            positions,
            normals: vec![[0.0, 1.0, 0.0]; vertex_count],
            uvs,
            indices,
        }
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Resamples every vertex height at time `t` and rebuilds the normals.
    ///
    /// Heights are relative to the mesh origin; the mesh entity itself is
    /// placed at the sea level.
    pub fn update(&mut self, field: &WaveField, t: f32) {
        for position in self.positions.iter_mut() {
            position[1] = field.height(position[0], position[2], t);
        }
        self.recompute_normals();
    }

    fn height_at(&self, x: usize, z: usize) -> f32 {
        self.positions[z * self.resolution + x][1]
    }

    fn recompute_normals(&mut self) {
        let last = self.resolution - 1;
        for z in 0..self.resolution {
            let (z0, z1) = (z.saturating_sub(1), (z + 1).min(last));
            for x in 0..self.resolution {
                let (x0, x1) = (x.saturating_sub(1), (x + 1).min(last));
                let dx = (x1 - x0) as f32 * self.step;
                let dz = (z1 - z0) as f32 * self.step;
                let slope_x = (self.height_at(x1, z) - self.height_at(x0, z)) / dx;
                let slope_z = (self.height_at(x, z1) - self.height_at(x, z0)) / dz;
                let len = (slope_x * slope_x + 1.0 + slope_z * slope_z).sqrt();
                self.normals[z * self.resolution + x] = [-slope_x / len, 1.0 / len, -slope_z / len];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> OceanConfig {
        OceanConfig {
            grid_resolution: 16,
            span: 64.0,
            texture_tiles: 4,
            ..Default::default()
        }
    }

    #[test]
    fn test_grid_counts() {
        let grid = OceanGrid::new(&small_config());
        assert_eq!(grid.vertex_count(), 16 * 16);
        assert_eq!(grid.indices.len(), 6 * 15 * 15);
        assert!(grid.indices.iter().all(|i| (*i as usize) < grid.vertex_count()));
    }

    #[test]
    fn test_grid_is_centred() {
        assert_eq!(grid_coordinate(0, 256, 1024.0), -512.0);
        assert_eq!(grid_coordinate(255, 256, 1024.0), 512.0);
    }

    #[test]
    fn test_uvs_stay_in_unit_range() {
        let grid = OceanGrid::new(&OceanConfig::default());
        for uv in &grid.uvs {
            assert!((0.0..=1.0).contains(&uv[0]) && (0.0..=1.0).contains(&uv[1]));
        }
    }

    #[test]
    fn test_odd_tiles_are_mirrored() {
        // 16 lines, 4 tiles: lines 4..8 belong to the second (mirrored) tile
        let res = 16;
        let straight = mirrored_uv(1, res, 4);
        let mirrored = mirrored_uv(5, res, 4);
        assert!(straight < 0.5);
        assert!(mirrored > 0.5);
    }

    #[test]
    fn test_update_moves_only_heights() {
        let config = small_config();
        let field = WaveField::new(config.clone());
        let mut grid = OceanGrid::new(&config);
        let before = grid.positions.clone();
        grid.update(&field, 2.5);
        for (a, b) in before.iter().zip(grid.positions.iter()) {
            assert_eq!(a[0], b[0]);
            assert_eq!(a[2], b[2]);
        }
        assert!(grid.positions.iter().any(|p| p[1] != 0.0));
    }

    #[test]
    fn test_flat_water_normals_point_up() {
        let mut config = small_config();
        config.amplitude = 0.0;
        let field = WaveField::new(config.clone());
        let mut grid = OceanGrid::new(&config);
        grid.update(&field, 1.0);
        assert!(grid.normals.iter().all(|n| *n == [0.0, 1.0, 0.0]));
    }

    #[test]
    fn test_normals_are_unit_length() {
        let config = small_config();
        let field = WaveField::new(config.clone());
        let mut grid = OceanGrid::new(&config);
        grid.update(&field, 7.0);
        for n in &grid.normals {
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_zero_span_keeps_normals_finite() {
        let config = OceanConfig {
            span: 0.0,
            ..small_config()
        };
        let field = WaveField::new(config.clone());
        let mut grid = OceanGrid::new(&config);
        grid.update(&field, 3.0);
        assert!(grid.normals.iter().flatten().all(|c| c.is_finite()));
        assert!(grid.positions.iter().flatten().all(|c| c.is_finite()));
    }
}
