use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;

/// Pitch stops just short of straight up or down so `forward` never lines
/// up with the world up axis.
pub const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;

/// Yaw and pitch of the first-person view, in radians.
///
/// Yaw 0 looks down -Z, Bevy's default camera forward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub struct LookAngles {
    pub yaw: f32,
    pub pitch: f32,
}

impl LookAngles {
    /// Angles looking along `direction`.
    pub fn facing(direction: Vec3) -> Self {
        let d = direction.normalize_or(Vec3::NEG_Z);
        Self {
            yaw: (-d.x).atan2(-d.z),
            pitch: d.y.asin().clamp(-PITCH_LIMIT, PITCH_LIMIT),
        }
    }

    /// Turns the view. Positive `yaw_delta` turns left, positive
    /// `pitch_delta` looks up.
    pub fn rotate(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw = (self.yaw + yaw_delta).rem_euclid(std::f32::consts::TAU);
        self.pitch = (self.pitch + pitch_delta).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }

    /// Forward projected on the ground plane.
    pub fn flat_forward(&self) -> Vec3 {
        Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    pub fn flat_right(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_default_looks_down_negative_z() {
        assert!(close(LookAngles::default().forward(), Vec3::NEG_Z));
    }

    #[test]
    fn test_facing_round_trips_forward() {
        for dir in [Vec3::Z, Vec3::X, Vec3::new(1.0, 0.5, -2.0).normalize()] {
            assert!(close(LookAngles::facing(dir).forward(), dir), "{dir:?}");
        }
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut look = LookAngles::default();
        look.rotate(0.0, 10.0);
        assert_eq!(look.pitch, PITCH_LIMIT);
        look.rotate(0.0, -20.0);
        assert_eq!(look.pitch, -PITCH_LIMIT);
    }

    #[test]
    fn test_flat_axes_ignore_pitch() {
        let mut look = LookAngles::facing(Vec3::X);
        look.rotate(0.0, 0.8);
        assert!(close(look.flat_forward(), Vec3::X));
        assert!(close(look.flat_right(), Vec3::Z));
    }

    #[test]
    fn test_positive_yaw_turns_left() {
        let mut look = LookAngles::default();
        look.rotate(0.1, 0.0);
        // left of -Z is -X
        assert!(look.forward().x < 0.0);
    }
}
