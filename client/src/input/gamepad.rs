//! Gamepad state for the first connected pad. Without the `gamepad` feature
//! no pads are ever connected and everything here reads as idle.

use bevy::ecs::system::SystemParam;
use bevy::input::gamepad::{Gamepad, GamepadAxis, GamepadButton};
use bevy::prelude::*;

#[derive(SystemParam)]
pub struct FirstGamepad<'w, 's> {
    pads: Query<'w, 's, &'static Gamepad>,
}

impl FirstGamepad<'_, '_> {
    fn pad(&self) -> Option<&Gamepad> {
        self.pads.iter().next()
    }

    pub fn left_stick(&self) -> Vec2 {
        self.stick(GamepadAxis::LeftStickX, GamepadAxis::LeftStickY)
    }

    pub fn right_stick(&self) -> Vec2 {
        self.stick(GamepadAxis::RightStickX, GamepadAxis::RightStickY)
    }

    fn stick(&self, x: GamepadAxis, y: GamepadAxis) -> Vec2 {
        self.pad().map_or(Vec2::ZERO, |pad| {
            Vec2::new(pad.get(x).unwrap_or(0.0), pad.get(y).unwrap_or(0.0))
        })
    }

    pub fn pressed(&self, button: GamepadButton) -> bool {
        self.pad().is_some_and(|pad| pad.pressed(button))
    }

    pub fn just_pressed(&self, button: GamepadButton) -> bool {
        self.pad().is_some_and(|pad| pad.just_pressed(button))
    }

    pub fn just_released(&self, button: GamepadButton) -> bool {
        self.pad().is_some_and(|pad| pad.just_released(button))
    }
}
