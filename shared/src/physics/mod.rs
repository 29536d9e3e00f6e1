//! Ray-based collision against the hand-modeled scene geometry.
//!
//! The ship hull is collided triangle by triangle; props the player only needs
//! a rough volume for (ladder, jukebox, canvas) use oriented boxes.

pub mod collision;
pub mod movement;

use bevy::prelude::*;

pub use collision::*;
pub use movement::*;

/// Collision geometry extracted from the loaded ship scene.
///
/// Stays empty until the models have finished loading, which keeps player
/// physics disabled so the player doesn't fall through a missing deck.
#[derive(Resource, Default)]
pub struct ShipColliders {
    pub hull: TriangleMesh,
    pub ladder: Option<OrientedBox>,
    pub hull_ready: bool,
    pub ladder_ready: bool,
}

impl ShipColliders {
    pub fn is_ready(&self) -> bool {
        self.hull_ready && self.ladder_ready
    }

    /// Gives up on models that failed to load so the game stays playable.
    pub fn mark_missing_ready(&mut self) {
        self.hull_ready = true;
        self.ladder_ready = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_needs_hull_and_ladder() {
        let mut colliders = ShipColliders::default();
        assert!(!colliders.is_ready());
        colliders.hull_ready = true;
        assert!(!colliders.is_ready());
        colliders.ladder_ready = true;
        assert!(colliders.is_ready());
    }

    #[test]
    fn test_missing_models_still_become_ready() {
        let mut colliders = ShipColliders::default();
        colliders.mark_missing_ready();
        assert!(colliders.is_ready());
        assert!(colliders.hull.is_empty());
        assert!(colliders.ladder.is_none());
    }
}
