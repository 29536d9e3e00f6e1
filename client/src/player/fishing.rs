use bevy::ecs::system::SystemParam;
use bevy::input::gamepad::GamepadButton;
use bevy::prelude::*;
use bevy::scene::SceneInstanceReady;
use bevy::window::{CursorGrabMode, PrimaryWindow};
use shared::fishing::{FishingEvent, FishingFrame, FishingInput, FishingLine, FishingTuning};
use shared::ocean::WaveField;
use shared::players::Player;
use shared::rewards::{roll_reward, Collection, Reward, RewardCatalog};
use shared::save::SaveRequestEvent;

use super::CurrentPlayerMarker;
use crate::assets::GameAssets;
use crate::constants::BOBBER_SCALE;
use crate::game::CursorRegrab;
use crate::input::data::GameAction;
use crate::input::gamepad::FirstGamepad;
use crate::input::keyboard::{is_action_just_pressed, is_action_just_released, is_action_pressed};
use crate::world::models::{MaterialOverride, MaterialSlots, ModelEditor};
use crate::{GameState, KeyMap};

#[derive(Component)]
pub struct FishingPole;

/// Line and hook modeled on the rod, hidden while the bobber is out.
#[derive(Component)]
pub struct PoleLinePart;

#[derive(Component)]
pub struct Bobber;

/// The "!" floating above a hooked bobber.
#[derive(Component)]
pub struct BiteMarker;

/// Sent when a reeled-in fish turns into a reward.
#[derive(Event, Debug, Clone)]
pub struct CatchEvent {
    pub reward: Reward,
    pub new: bool,
}

// glTF material slots of pole.glb
const POLE_REEL: usize = 0;
const POLE_ROD: usize = 1;
const POLE_LINE: usize = 2;
const POLE_HOOK: usize = 3;
const POLE_TRIM: usize = 4;
const POLE_GUIDES: usize = 5;

pub fn spawn_fishing_gear(mut commands: Commands, assets: Res<GameAssets>) {
    commands
        .spawn((
            StateScoped(GameState::Game),
            FishingPole,
            SceneRoot(assets.pole.clone()),
            Transform::default(),
        ))
        .observe(on_pole_ready);

    commands
        .spawn((
            StateScoped(GameState::Game),
            Bobber,
            SceneRoot(assets.bobber.clone()),
            Transform::from_scale(Vec3::splat(BOBBER_SCALE)),
        ))
        .observe(on_bobber_ready);

    commands
        .spawn((
            StateScoped(GameState::Game),
            BiteMarker,
            SceneRoot(assets.exclamation.clone()),
            Transform::from_rotation(Quat::from_rotation_x(std::f32::consts::PI)),
            Visibility::Hidden,
        ))
        .observe(on_marker_ready);
}

fn on_bobber_ready(
    trigger: Trigger<SceneInstanceReady>,
    mut commands: Commands,
    mut editor: ModelEditor,
) {
    let red = MaterialOverride::color(Color::srgb(0.9, 0.16, 0.22));
    editor.apply_overrides(&mut commands, trigger.target(), &MaterialSlots::All(red));
}

fn on_marker_ready(
    trigger: Trigger<SceneInstanceReady>,
    mut commands: Commands,
    mut editor: ModelEditor,
) {
    let yellow = MaterialOverride::color(Color::srgb(0.99, 0.98, 0.0));
    editor.apply_overrides(&mut commands, trigger.target(), &MaterialSlots::All(yellow));
}

fn on_pole_ready(
    trigger: Trigger<SceneInstanceReady>,
    mut commands: Commands,
    mut editor: ModelEditor,
    assets: Res<GameAssets>,
) {
    let metal = MaterialOverride::texture(&assets.metal);
    let touched = editor.apply_overrides(
        &mut commands,
        trigger.target(),
        &MaterialSlots::Indexed(vec![
            (POLE_REEL, MaterialOverride::texture(&assets.reel)),
            (POLE_ROD, MaterialOverride::texture(&assets.wood)),
            (POLE_LINE, MaterialOverride::texture(&assets.line)),
            (POLE_HOOK, metal.clone()),
            (POLE_TRIM, metal.clone()),
            (POLE_GUIDES, metal),
        ]),
    );

    for (entity, index) in touched {
        if matches!(index, Some(POLE_LINE) | Some(POLE_HOOK)) {
            commands.entity(entity).insert(PoleLinePart);
        }
    }
}

/// The cast button: a key, the left mouse button while the cursor is
/// captured, or the gamepad's south face button. The click that captured the
/// cursor does not count.
#[derive(SystemParam)]
pub struct CastButton<'w, 's> {
    keyboard_input: Res<'w, ButtonInput<KeyCode>>,
    mouse_input: Res<'w, ButtonInput<MouseButton>>,
    key_map: Res<'w, KeyMap>,
    pad: FirstGamepad<'w, 's>,
    windows: Query<'w, 's, &'static Window, With<PrimaryWindow>>,
    regrab: Res<'w, CursorRegrab>,
}

impl CastButton<'_, '_> {
    pub fn read(&self) -> FishingInput {
        let mouse = !self.regrab.mouse_consumed
            && self
                .windows
                .single()
                .is_ok_and(|w| w.cursor_options.grab_mode != CursorGrabMode::None);
        let button = GamepadButton::South;
        let action = GameAction::Cast;

        FishingInput {
            held: is_action_pressed(action, &self.keyboard_input, &self.key_map)
                || (mouse && self.mouse_input.pressed(MouseButton::Left))
                || self.pad.pressed(button),
            pressed: is_action_just_pressed(action, &self.keyboard_input, &self.key_map)
                || (mouse && self.mouse_input.just_pressed(MouseButton::Left))
                || self.pad.just_pressed(button),
            released: is_action_just_released(action, &self.keyboard_input, &self.key_map)
                || (mouse && self.mouse_input.just_released(MouseButton::Left))
                || self.pad.just_released(button),
        }
    }
}

pub fn fishing_update_system(
    time: Res<Time>,
    cast_button: CastButton,
    waves: Res<WaveField>,
    tuning: Res<FishingTuning>,
    mut player_query: Query<(&Player, &mut FishingLine), With<CurrentPlayerMarker>>,
    mut fishing_events: EventWriter<FishingEvent>,
) {
    let Ok((player, mut line)) = player_query.single_mut() else {
        debug!("player not found");
        return;
    };

    let frame = FishingFrame {
        eye: player.eye,
        forward: player.look.forward(),
        time: time.elapsed_secs(),
        delta: time.delta_secs(),
    };
    let events = line.update(
        cast_button.read(),
        &frame,
        &waves,
        &tuning,
        &mut rand::thread_rng(),
    );

    for event in events {
        debug!("Fishing: {:?}", event);
        fishing_events.write(event);
    }
}

/// Turns a hooked fish that made it back to the rod into a reward.
pub fn fishing_rewards_system(
    mut fishing_events: EventReader<FishingEvent>,
    catalog: Res<RewardCatalog>,
    mut collection: ResMut<Collection>,
    mut catch_events: EventWriter<CatchEvent>,
    mut save_events: EventWriter<SaveRequestEvent>,
) {
    for event in fishing_events.read() {
        if *event != (FishingEvent::ReeledIn { hooked: true }) {
            continue;
        }
        let reward = roll_reward(&catalog, &collection, &mut rand::thread_rng());
        let new = collection.add(reward);
        info!(
            "Caught {}{}",
            catalog.describe(reward),
            if new { " (new!)" } else { "" }
        );
        catch_events.write(CatchEvent { reward, new });
        save_events.write(SaveRequestEvent::NewCatch);
    }
}

pub fn pole_render_system(
    player_query: Query<&FishingLine, With<CurrentPlayerMarker>>,
    mut pole_query: Query<&mut Transform, With<FishingPole>>,
    mut line_parts: Query<&mut Visibility, With<PoleLinePart>>,
) {
    let Ok(line) = player_query.single() else {
        return;
    };
    for mut transform in pole_query.iter_mut() {
        *transform = line.pole.transform();
    }

    let visibility = if line.rod_line_visible() {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    for mut part in line_parts.iter_mut() {
        part.set_if_neq(visibility);
    }
}

pub fn bobber_render_system(
    player_query: Query<&FishingLine, With<CurrentPlayerMarker>>,
    mut bobber_query: Query<&mut Transform, (With<Bobber>, Without<BiteMarker>)>,
    mut marker_query: Query<(&mut Transform, &mut Visibility), (With<BiteMarker>, Without<Bobber>)>,
) {
    let Ok(line) = player_query.single() else {
        return;
    };
    for mut transform in bobber_query.iter_mut() {
        transform.translation = line.bobber;
    }
    for (mut transform, mut visibility) in marker_query.iter_mut() {
        transform.translation = line.marker;
        visibility.set_if_neq(if line.marker_visible() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        });
    }
}

/// Slack line from the rod tip to the bobber while it is out.
pub fn line_gizmo_system(
    player_query: Query<&FishingLine, With<CurrentPlayerMarker>>,
    mut gizmos: Gizmos,
) {
    let Ok(line) = player_query.single() else {
        return;
    };
    if line.loose_line_visible() {
        gizmos.line(line.bobber, line.pole.tip, Color::WHITE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewards_app() -> App {
        let mut app = App::new();
        app.add_event::<FishingEvent>()
            .add_event::<CatchEvent>()
            .add_event::<SaveRequestEvent>()
            .insert_resource(RewardCatalog::default())
            .insert_resource(Collection::default())
            .add_systems(Update, fishing_rewards_system);
        app
    }

    #[derive(Resource, Default)]
    struct LastInput(Vec<FishingInput>);

    fn record_cast_input(cast_button: CastButton, mut last: ResMut<LastInput>) {
        last.0.push(cast_button.read());
    }

    fn sent<E: Event>(app: &App) -> usize {
        app.world().resource::<Events<E>>().len()
    }

    #[test]
    fn test_empty_line_gives_no_reward() {
        let mut app = rewards_app();
        app.world_mut().send_event(FishingEvent::ReelStarted { hooked: false });
        app.world_mut().send_event(FishingEvent::ReeledIn { hooked: false });
        app.update();

        assert_eq!(app.world().resource::<Collection>().catches, 0);
        assert_eq!(sent::<CatchEvent>(&app), 0);
        assert_eq!(sent::<SaveRequestEvent>(&app), 0);
    }

    #[test]
    fn test_hooked_fish_gives_one_reward() {
        let mut app = rewards_app();
        app.world_mut().send_event(FishingEvent::Hooked);
        app.world_mut().send_event(FishingEvent::ReeledIn { hooked: true });
        app.update();

        assert_eq!(app.world().resource::<Collection>().catches, 1);
        assert_eq!(sent::<CatchEvent>(&app), 1);
        assert_eq!(sent::<SaveRequestEvent>(&app), 1);
    }

    #[test]
    fn test_click_that_grabs_cursor_does_not_cast() {
        let mut app = App::new();
        app.init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<ButtonInput<MouseButton>>()
            .init_resource::<KeyMap>()
            .init_resource::<CursorRegrab>()
            .init_resource::<LastInput>()
            .add_systems(
                Update,
                (crate::game::toggle_cursor_system, record_cast_input).chain(),
            );
        let mut window = Window::default();
        window.cursor_options.grab_mode = CursorGrabMode::None;
        app.world_mut().spawn((window, PrimaryWindow));

        let press = |app: &mut App, down: bool| {
            let mut mouse = app.world_mut().resource_mut::<ButtonInput<MouseButton>>();
            mouse.clear();
            if down {
                mouse.press(MouseButton::Left);
            } else {
                mouse.release(MouseButton::Left);
            }
        };

        // click to grab, hold, release
        press(&mut app, true);
        app.update();
        press(&mut app, true);
        app.update();
        press(&mut app, false);
        app.update();
        let ignored = &app.world().resource::<LastInput>().0;
        assert!(ignored.iter().all(|input| *input == FishingInput::default()));

        // the next click casts
        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .reset_all();
        app.update();
        press(&mut app, true);
        app.update();
        let last = app.world().resource::<LastInput>().0.last().copied();
        assert_eq!(
            last,
            Some(FishingInput {
                held: true,
                pressed: true,
                released: false,
            })
        );
    }
}
