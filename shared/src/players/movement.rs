use bevy::prelude::*;

use super::LookAngles;
use crate::constants::GAMEPAD_DEAD_ZONE;

/// Digital walking intent for one frame. Each axis is -1, 0 or 1.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveIntent {
    pub forward: f32,
    pub right: f32,
}

impl MoveIntent {
    pub fn is_idle(&self) -> bool {
        self.forward == 0.0 && self.right == 0.0
    }

    /// Folds a gamepad left stick into the intent. Stick Y is positive up.
    /// Deflections inside the dead zone are ignored and the rest count as a
    /// full key press.
    pub fn add_stick(&mut self, stick: Vec2) {
        if stick.y >= GAMEPAD_DEAD_ZONE {
            self.forward += 1.0;
        } else if stick.y <= -GAMEPAD_DEAD_ZONE {
            self.forward -= 1.0;
        }
        if stick.x >= GAMEPAD_DEAD_ZONE {
            self.right += 1.0;
        } else if stick.x <= -GAMEPAD_DEAD_ZONE {
            self.right -= 1.0;
        }
        self.forward = self.forward.clamp(-1.0, 1.0);
        self.right = self.right.clamp(-1.0, 1.0);
    }
}

/// Where the eye wants to be after walking for `delta` seconds. Movement stays
/// on the ground plane regardless of pitch, and the forward and right axes
/// are applied independently.
pub fn walk(eye: Vec3, look: &LookAngles, intent: MoveIntent, speed: f32, delta: f32) -> Vec3 {
    let step = speed * delta;
    eye + look.flat_forward() * intent.forward * step + look.flat_right() * intent.right * step
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_intent_does_not_move() {
        let eye = Vec3::new(1.0, 2.0, 3.0);
        let moved = walk(eye, &LookAngles::default(), MoveIntent::default(), 15.0, 0.1);
        assert_eq!(moved, eye);
    }

    #[test]
    fn test_walk_ignores_pitch() {
        let mut look = LookAngles::default();
        look.rotate(0.0, 1.2);
        let intent = MoveIntent {
            forward: 1.0,
            right: 0.0,
        };
        let moved = walk(Vec3::ZERO, &look, intent, 15.0, 1.0);
        assert_eq!(moved.y, 0.0);
        assert!((moved - Vec3::new(0.0, 0.0, -15.0)).length() < 1e-4);
    }

    #[test]
    fn test_strafe_right() {
        let intent = MoveIntent {
            forward: 0.0,
            right: 1.0,
        };
        let moved = walk(Vec3::ZERO, &LookAngles::default(), intent, 10.0, 0.5);
        assert!((moved - Vec3::new(5.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_stick_dead_zone() {
        let mut intent = MoveIntent::default();
        intent.add_stick(Vec2::new(0.2, -0.1));
        assert!(intent.is_idle());
        intent.add_stick(Vec2::new(-0.9, 0.6));
        assert_eq!(intent, MoveIntent { forward: 1.0, right: -1.0 });
    }

    #[test]
    fn test_stick_and_keys_do_not_stack() {
        let mut intent = MoveIntent {
            forward: 1.0,
            right: 0.0,
        };
        intent.add_stick(Vec2::new(0.0, 1.0));
        assert_eq!(intent.forward, 1.0);
    }
}
