pub mod look;
pub mod movement;

use bevy::prelude::*;

pub use look::*;
pub use movement::*;

use crate::constants::PLAYER_SPAWN;

/// First-person player. The camera sits at `eye`.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Player {
    pub eye: Vec3,
    pub look: LookAngles,
    pub climbing: bool,
    pub falling: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            eye: PLAYER_SPAWN,
            look: LookAngles::facing(Vec3::Z),
            climbing: false,
            falling: false,
        }
    }
}

impl Player {
    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye).with_rotation(self.look.rotation())
    }
}
