use bevy::prelude::*;
use noise::{NoiseFn, OpenSimplex};

use super::OceanConfig;

/// Height field of the animated ocean.
#[derive(Resource, Clone)]
pub struct WaveField {
    noise: OpenSimplex,
    config: OceanConfig,
}

impl WaveField {
    pub fn new(config: OceanConfig) -> Self {
        Self {
            noise: OpenSimplex::new(config.seed),
            config,
        }
    }

    pub fn config(&self) -> &OceanConfig {
        &self.config
    }

    /// Wave displacement relative to the sea level at `(x, z)` and time `t`.
    pub fn height(&self, x: f32, z: f32, t: f32) -> f32 {
        let c = &self.config;
        if c.amplitude == 0.0 {
            return 0.0;
        }
        let f = c.noise_frequency as f64;
        let sample = self.noise.get([
            (c.spatial_scale * x) as f64 * f,
            (c.spatial_scale * z) as f64 * f,
            (c.time_scale * t) as f64 * f,
        ]);
        c.amplitude * sample as f32
    }

    /// World-space Y of the water surface.
    pub fn surface_y(&self, x: f32, z: f32, t: f32) -> f32 {
        self.config.sea_level + self.height(x, z, t)
    }

    /// True when `point` is below the water surface.
    pub fn is_submerged(&self, point: Vec3, t: f32) -> bool {
        point.y < self.surface_y(point.x, point.z, t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_is_bounded_by_amplitude() {
        let field = WaveField::new(OceanConfig::default());
        for i in 0..200 {
            let x = i as f32 * 7.3 - 500.0;
            let z = i as f32 * -3.1 + 120.0;
            let h = field.height(x, z, i as f32 * 0.05);
            assert!(h.abs() <= 4.0 * 1.05, "height {h} out of range at {i}");
        }
    }

    #[test]
    fn test_height_varies_with_time() {
        let field = WaveField::new(OceanConfig::default());
        let samples: Vec<f32> = (0..20).map(|i| field.height(10.0, 20.0, i as f32)).collect();
        assert!(samples.iter().any(|h| (h - samples[0]).abs() > 0.01));
    }

    #[test]
    fn test_same_seed_is_deterministic() {
        let a = WaveField::new(OceanConfig::default());
        let b = WaveField::new(OceanConfig::default());
        assert_eq!(a.height(33.0, -12.0, 4.5), b.height(33.0, -12.0, 4.5));
    }

    #[test]
    fn test_flat_ocean_sits_at_sea_level() {
        let field = WaveField::new(OceanConfig::flat(-13.0));
        assert_eq!(field.surface_y(100.0, -40.0, 3.0), -13.0);
        assert!(field.is_submerged(Vec3::new(0.0, -13.5, 0.0), 0.0));
        assert!(!field.is_submerged(Vec3::new(0.0, -12.5, 0.0), 0.0));
    }
}
