//! Per-frame player motion resolution against the ship.
//!
//! Input moves the eye freely first; this module then decides what the ship
//! allows: climbing when walking into the ladder, sliding along walls, and
//! falling when the deck is far below the feet.

use bevy::math::Vec3;

use super::{Collider, OrientedBox};
use crate::constants::EYE_HEIGHT;

/// Maximum distance between the ladder and the feet probe to start climbing.
pub const LADDER_GRAB_DISTANCE: f32 = 0.5;
/// While the feet probe is this close to the ladder the player doesn't fall.
pub const LADDER_HOLD_RADIUS: f32 = 1.0;
/// How far below the feet the ladder probe sits.
pub const LADDER_PROBE_DEPTH: f32 = 4.0;
pub const CLIMB_SPEED: f32 = 12.0;
pub const FALL_SPEED: f32 = 30.0;
/// Gravity only applies when the deck is at least this far below the feet.
pub const FALL_CLEARANCE: f32 = 5.0;
/// Reach of the second wall probe after sliding.
pub const MIN_SLIDE_REACH: f32 = 1.0;
pub const MAX_SLIDE_REACH: f32 = 100.0;

/// Outcome of [`resolve_player_motion`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerMotion {
    pub eye: Vec3,
    pub climbing: bool,
    pub falling: bool,
    pub blocked: bool,
}

/// Removes the component of `v` along `normal`.
fn reject(v: Vec3, normal: Vec3) -> Vec3 {
    let n = normal.normalize_or_zero();
    v - n * v.dot(n)
}

/// Resolves the move from `old_eye` to `wanted_eye` for one frame of `dt`
/// seconds.
pub fn resolve_player_motion(
    old_eye: Vec3,
    wanted_eye: Vec3,
    hull: &impl Collider,
    ladder: Option<&OrientedBox>,
    dt: f32,
) -> PlayerMotion {
    let feet = old_eye - Vec3::Y * EYE_HEIGHT;
    let ladder_probe = feet - Vec3::Y * LADDER_PROBE_DEPTH;
    let movement = wanted_eye - old_eye;

    let climbing = ladder
        .and_then(|ladder| ladder.cast_ray(ladder_probe, movement, LADDER_GRAB_DISTANCE))
        .is_some();

    if climbing {
        return PlayerMotion {
            eye: old_eye + Vec3::Y * CLIMB_SPEED * dt,
            climbing: true,
            falling: false,
            blocked: false,
        };
    }

    let mut eye = wanted_eye;
    let mut blocked = false;

    if let Some(hit) = hull.cast_ray(feet, movement, movement.length()) {
        let slid = reject(movement, hit.normal);
        eye = old_eye + slid;

        let reach = slid.length().clamp(MIN_SLIDE_REACH, MAX_SLIDE_REACH);
        if hull.cast_ray(feet, slid, reach).is_some() {
            eye = old_eye;
            blocked = true;
        }
    }

    let near_ladder =
        ladder.is_some_and(|ladder| ladder.intersects_sphere(ladder_probe, LADDER_HOLD_RADIUS));
    let falling = !near_ladder
        && hull
            .cast_ray(feet, Vec3::NEG_Y, f32::MAX)
            .is_some_and(|hit| hit.distance >= FALL_CLEARANCE);
    if falling {
        eye.y -= FALL_SPEED * dt;
    }

    PlayerMotion {
        eye,
        climbing: false,
        falling,
        blocked,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::TriangleMesh;
    use bevy::math::Affine3A;

    const DT: f32 = 1.0 / 60.0;

    fn quad(a: Vec3, b: Vec3, c: Vec3, d: Vec3) -> [[Vec3; 3]; 2] {
        [[a, b, c], [c, b, d]]
    }

    fn deck() -> TriangleMesh {
        TriangleMesh::from_triangles(
            quad(
                Vec3::new(-20.0, 0.0, -20.0),
                Vec3::new(20.0, 0.0, -20.0),
                Vec3::new(-20.0, 0.0, 20.0),
                Vec3::new(20.0, 0.0, 20.0),
            )
            .to_vec(),
        )
    }

    fn wall_x(x: f32) -> [[Vec3; 3]; 2] {
        quad(
            Vec3::new(x, -10.0, -10.0),
            Vec3::new(x, 20.0, -10.0),
            Vec3::new(x, -10.0, 10.0),
            Vec3::new(x, 20.0, 10.0),
        )
    }

    fn wall_z(z: f32) -> [[Vec3; 3]; 2] {
        quad(
            Vec3::new(-10.0, -10.0, z),
            Vec3::new(10.0, -10.0, z),
            Vec3::new(-10.0, 20.0, z),
            Vec3::new(10.0, 20.0, z),
        )
    }

    fn ladder() -> OrientedBox {
        OrientedBox::new(
            Vec3::new(-0.5, -10.0, 2.0),
            Vec3::new(0.5, 10.0, 2.5),
            Affine3A::IDENTITY,
        )
    }

    #[test]
    fn test_free_walk_on_deck() {
        let old = Vec3::new(0.0, 6.5, 0.0);
        let wanted = old + Vec3::new(0.25, 0.0, 0.0);
        let motion = resolve_player_motion(old, wanted, &deck(), None, DT);
        assert_eq!(motion.eye, wanted);
        assert!(!motion.falling && !motion.blocked && !motion.climbing);
    }

    #[test]
    fn test_falls_when_deck_far_below() {
        let old = Vec3::new(0.0, 9.0, 0.0);
        let motion = resolve_player_motion(old, old, &deck(), None, DT);
        assert!(motion.falling);
        assert!((motion.eye.y - (9.0 - FALL_SPEED * DT)).abs() < 1e-5);
    }

    #[test]
    fn test_no_fall_over_open_water() {
        let old = Vec3::new(100.0, 9.0, 0.0);
        let motion = resolve_player_motion(old, old, &deck(), None, DT);
        assert!(!motion.falling);
        assert_eq!(motion.eye, old);
    }

    #[test]
    fn test_slides_along_wall() {
        let mut hull = deck();
        hull.extend(wall_x(1.0));
        let old = Vec3::new(0.0, 6.5, 0.0);
        let wanted = old + Vec3::new(2.0, 0.0, 1.0);
        let motion = resolve_player_motion(old, wanted, &hull, None, DT);
        assert!(!motion.blocked);
        assert!((motion.eye - (old + Vec3::Z)).length() < 1e-4);
    }

    #[test]
    fn test_blocked_in_corner() {
        let mut hull = deck();
        hull.extend(wall_x(1.0));
        hull.extend(wall_z(0.8));
        let old = Vec3::new(0.0, 6.5, 0.0);
        let wanted = old + Vec3::new(2.0, 0.0, 1.0);
        let motion = resolve_player_motion(old, wanted, &hull, None, DT);
        assert!(motion.blocked);
        assert_eq!(motion.eye, old);
    }

    #[test]
    fn test_climbs_when_walking_into_ladder() {
        let ladder = ladder();
        let old = Vec3::new(0.0, 6.5, 1.8);
        let wanted = old + Vec3::new(0.0, 0.0, 0.25);
        let motion = resolve_player_motion(old, wanted, &deck(), Some(&ladder), DT);
        assert!(motion.climbing);
        assert_eq!(motion.eye.z, old.z);
        assert!((motion.eye.y - (6.5 + CLIMB_SPEED * DT)).abs() < 1e-5);
    }

    #[test]
    fn test_walking_away_from_ladder_does_not_climb() {
        let ladder = ladder();
        let old = Vec3::new(0.0, 6.5, 1.8);
        let wanted = old - Vec3::new(0.0, 0.0, 0.25);
        let motion = resolve_player_motion(old, wanted, &deck(), Some(&ladder), DT);
        assert!(!motion.climbing);
    }

    #[test]
    fn test_holding_ladder_prevents_fall() {
        let ladder = ladder();
        let old = Vec3::new(0.0, 10.0, 1.8);
        let motion = resolve_player_motion(old, old, &deck(), Some(&ladder), DT);
        assert!(!motion.falling);
        assert_eq!(motion.eye, old);
    }

    #[test]
    fn test_reject_removes_normal_component() {
        let v = reject(Vec3::new(3.0, 0.0, 4.0), Vec3::new(-2.0, 0.0, 0.0));
        assert!((v - Vec3::new(0.0, 0.0, 4.0)).length() < 1e-6);
    }
}
