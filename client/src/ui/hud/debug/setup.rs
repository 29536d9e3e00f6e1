use super::stats::{CatchesText, CoordsText, FishingText, FpsText};
use crate::input::data::GameAction;
use crate::input::keyboard::is_action_just_pressed;
use crate::{GameState, KeyMap};
use bevy::prelude::*;

/// Marker to find the container entity so we can show/hide the debug text
#[derive(Component)]
pub struct HudRoot;

fn spawn_debug_text<T: Component>(commands: &mut Commands, marker: T, initial_text: &str) -> Entity {
    commands
        .spawn((
            marker,
            Text::new(initial_text),
            TextFont {
                font_size: 16.0,
                ..default()
            },
            TextColor(Color::WHITE),
        ))
        .id()
}

pub fn setup_debug_hud(mut commands: Commands) {
    let root = commands
        .spawn((
            HudRoot,
            StateScoped(GameState::Game),
            BackgroundColor(Color::BLACK.with_alpha(0.5)),
            // above the game ui, below the loading overlay
            GlobalZIndex(i32::MAX - 2),
            Node {
                position_type: PositionType::Absolute,
                left: Val::Percent(1.),
                top: Val::Percent(1.),
                bottom: Val::Auto,
                right: Val::Auto,
                padding: UiRect::all(Val::Px(4.0)),
                flex_direction: FlexDirection::Column,
                ..Default::default()
            },
        ))
        .id();

    let lines = [
        spawn_debug_text(&mut commands, FpsText, "FPS: N/A"),
        spawn_debug_text(&mut commands, CoordsText, "..."),
        spawn_debug_text(&mut commands, FishingText, "..."),
        spawn_debug_text(&mut commands, CatchesText, "..."),
    ];
    commands.entity(root).add_children(&lines);
}

/// Toggle the debug HUD when pressing F3
pub fn toggle_hud_system(
    mut q: Query<&mut Visibility, With<HudRoot>>,
    kbd: Res<ButtonInput<KeyCode>>,
    key_map: Res<KeyMap>,
) {
    if !is_action_just_pressed(GameAction::ToggleFps, &kbd, &key_map) {
        return;
    }
    let Ok(mut vis) = q.single_mut() else {
        return;
    };
    *vis = match *vis {
        Visibility::Hidden => Visibility::Visible,
        _ => Visibility::Hidden,
    };
}
