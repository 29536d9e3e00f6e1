use bevy::prelude::*;
use std::f32::consts::PI;

/// Scale applied to the pole model.
pub const POLE_SCALE: Vec3 = Vec3::new(0.6, 0.4, 0.4);
/// Position of the line guide at the end of the rod, in unscaled pole space.
pub const TIP_OFFSET: Vec3 = Vec3::new(0.0, -0.2, -4.5);
/// Where the grip sits relative to the eye, along the flattened forward and
/// right axes.
pub const GRIP_FORWARD: f32 = 2.0;
pub const GRIP_RIGHT: f32 = 1.0;
pub const GRIP_DROP: f32 = 1.0;

/// Placement of the fishing pole held in front of the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolePose {
    pub rotation: Quat,
    pub translation: Vec3,
    /// World position of the rod tip, where the bobber hangs.
    pub tip: Vec3,
}

impl Default for PolePose {
    fn default() -> Self {
        pole_pose(Vec3::ZERO, Vec3::NEG_Z, 0.0)
    }
}

impl PolePose {
    pub fn transform(&self) -> Transform {
        Transform {
            translation: self.translation,
            rotation: self.rotation,
            scale: POLE_SCALE,
        }
    }
}

/// Computes the pole placement for a camera at `eye` looking along `forward`.
///
/// The rod follows the view yaw and pitch. `cast_angle` then swings it back
/// over the shoulder around the camera right axis.
pub fn pole_pose(eye: Vec3, forward: Vec3, cast_angle: f32) -> PolePose {
    let forward = forward.normalize_or(Vec3::NEG_Z);
    let right = forward.cross(Vec3::Y).normalize_or(Vec3::X);
    let yaw = forward.x.atan2(forward.z) + PI;
    let pitch = forward.y.atan2(Vec2::new(forward.x, forward.z).length());

    let rotation =
        Quat::from_axis_angle(right, cast_angle + pitch) * Quat::from_axis_angle(Vec3::Y, yaw);
    let translation = Vec3::new(
        eye.x + forward.x * GRIP_FORWARD + right.x * GRIP_RIGHT,
        eye.y - GRIP_DROP,
        eye.z + forward.z * GRIP_FORWARD + right.z * GRIP_RIGHT,
    );

    PolePose {
        rotation,
        translation,
        tip: translation + rotation * TIP_OFFSET,
    }
}
