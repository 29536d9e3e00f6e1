use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::pbr::light_consts;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};
use bevy_atmosphere::prelude::*;
use shared::sets::{GameOnEnterSet, GameUpdateSet};

use crate::constants::{CAMERA_FOV_DEGREES, SKY_COLOR};
use crate::input::data::GameAction;
use crate::input::keyboard::is_action_just_pressed;
use crate::player::PlayerPlugin;
use crate::save::SavePlugin;
use crate::ui::PlayerUiPlugin;
use crate::world::WorldPlugin;
use crate::{GameState, KeyMap};

/// The first-person camera. Its transform mirrors the player's eye.
#[derive(Component)]
pub struct PlayerCamera;

/// Set by the click that grabs the cursor back, so that click never reaches
/// gameplay. Cleared once the button is up again.
#[derive(Resource, Debug, Default)]
pub struct CursorRegrab {
    pub mouse_consumed: bool,
}

pub fn game_plugin(app: &mut App) {
    app.add_plugins((
        FrameTimeDiagnosticsPlugin::default(),
        AtmospherePlugin,
        WorldPlugin,
        PlayerPlugin,
        PlayerUiPlugin,
        SavePlugin,
    ))
    .insert_resource(ClearColor(SKY_COLOR))
    .init_resource::<CursorRegrab>()
    .configure_sets(
        Update,
        (
            GameUpdateSet::Ocean,
            GameUpdateSet::PlayerInput,
            GameUpdateSet::PlayerPhysics,
            GameUpdateSet::Fishing,
            GameUpdateSet::Interaction,
            GameUpdateSet::Rendering,
            GameUpdateSet::Ui,
        )
            .chain()
            .run_if(in_state(GameState::Game)),
    )
    .configure_sets(
        OnEnter(GameState::Game),
        (GameOnEnterSet::Scene, GameOnEnterSet::Ui).chain(),
    )
    .add_systems(Startup, setup_camera)
    .add_systems(
        OnEnter(GameState::Game),
        (setup_lights, grab_cursor).in_set(GameOnEnterSet::Scene),
    )
    .add_systems(Update, toggle_cursor_system.in_set(GameUpdateSet::PlayerInput));
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((
        PlayerCamera,
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            ..default()
        }),
        AtmosphereCamera::default(),
        Transform::default(),
    ));
}

fn setup_lights(mut commands: Commands) {
    commands.spawn((
        StateScoped(GameState::Game),
        DirectionalLight {
            illuminance: light_consts::lux::OVERCAST_DAY,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(40.0, 80.0, 20.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 400.0,
        ..default()
    });
}

fn set_cursor_grab(window: &mut Window, grabbed: bool) {
    window.cursor_options.grab_mode = if grabbed {
        CursorGrabMode::Locked
    } else {
        CursorGrabMode::None
    };
    window.cursor_options.visible = !grabbed;
}

fn grab_cursor(mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    let Ok(mut window) = windows.single_mut() else {
        return;
    };
    set_cursor_grab(&mut window, true);
}

/// Escape frees the cursor, a click grabs it back.
pub(crate) fn toggle_cursor_system(
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mouse_input: Res<ButtonInput<MouseButton>>,
    key_map: Res<KeyMap>,
    mut regrab: ResMut<CursorRegrab>,
) {
    // stays set through the release frame
    if regrab.mouse_consumed
        && !mouse_input.pressed(MouseButton::Left)
        && !mouse_input.just_released(MouseButton::Left)
    {
        regrab.mouse_consumed = false;
    }
    let Ok(mut window) = windows.single_mut() else {
        return;
    };
    if is_action_just_pressed(GameAction::Escape, &keyboard_input, &key_map) {
        set_cursor_grab(&mut window, false);
    } else if mouse_input.just_pressed(MouseButton::Left)
        && window.cursor_options.grab_mode == CursorGrabMode::None
    {
        set_cursor_grab(&mut window, true);
        regrab.mouse_consumed = true;
    }
}
