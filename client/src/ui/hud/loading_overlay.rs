use bevy::prelude::*;
use shared::physics::ShipColliders;

use crate::GameState;

/// Marker component for the loading overlay UI
#[derive(Component)]
pub struct LoadingOverlay;

/// Spawns the loading overlay UI, shown until the ship can be walked on.
pub fn setup_loading_overlay(mut commands: Commands) {
    commands
        .spawn((
            LoadingOverlay,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.05, 0.1, 0.85)),
            GlobalZIndex(i32::MAX - 1),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Loading the ark..."),
                TextFont {
                    font_size: 32.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));

            parent.spawn((
                Text::new("Rigging the ship and filling the sea"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgba(0.8, 0.8, 0.8, 1.0)),
                Node {
                    margin: UiRect::top(Val::Px(10.0)),
                    ..default()
                },
            ));
        });
}

/// Keeps the overlay up while assets load and until the ship colliders exist.
pub fn update_loading_overlay(
    state: Res<State<GameState>>,
    colliders: Res<ShipColliders>,
    mut overlay_query: Query<&mut Visibility, With<LoadingOverlay>>,
) {
    let Ok(mut visibility) = overlay_query.single_mut() else {
        return;
    };

    let loading = *state.get() == GameState::Loading || !colliders.is_ready();
    visibility.set_if_neq(if loading {
        Visibility::Visible
    } else {
        Visibility::Hidden
    });
}
