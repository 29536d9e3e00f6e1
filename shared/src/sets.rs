use bevy::prelude::*;

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameUpdateSet {
    Ocean,
    PlayerInput,
    PlayerPhysics,
    Fishing,
    Interaction,
    Rendering,
    Ui,
}

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameOnEnterSet {
    Scene,
    Ui,
}
