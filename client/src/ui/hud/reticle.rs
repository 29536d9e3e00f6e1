use bevy::prelude::*;

use crate::GameState;

const RETICLE_SIZE: f32 = 4.0;

/// Dot in the middle of the screen, marking what the interact ray aims at.
pub fn spawn_reticle(mut commands: Commands) {
    commands
        .spawn((
            StateScoped(GameState::Game),
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                ..default()
            },
        ))
        .with_child((
            Node {
                width: Val::Px(RETICLE_SIZE),
                height: Val::Px(RETICLE_SIZE),
                ..default()
            },
            BackgroundColor(Color::WHITE.with_alpha(0.8)),
            BorderRadius::MAX,
        ));
}
