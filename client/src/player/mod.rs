pub mod controller;
pub mod fishing;
pub mod interactions;

use bevy::prelude::*;
use shared::fishing::{FishingEvent, FishingLine, FishingTuning};
use shared::interaction::StickerSelection;
use shared::players::Player;
use shared::sets::{GameOnEnterSet, GameUpdateSet};

use crate::GameState;

#[derive(Component)]
pub struct CurrentPlayerMarker;

pub fn spawn_player(mut commands: Commands) {
    commands.spawn((
        StateScoped(GameState::Game),
        CurrentPlayerMarker,
        Name::new("Player"),
        Player::default(),
        FishingLine::default(),
    ));
}

pub struct PlayerPlugin;
impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FishingTuning>()
            .init_resource::<StickerSelection>()
            .add_event::<FishingEvent>()
            .add_event::<fishing::CatchEvent>()
            .add_systems(
                OnEnter(GameState::Game),
                (spawn_player, fishing::spawn_fishing_gear).in_set(GameOnEnterSet::Scene),
            )
            .add_systems(
                Update,
                controller::player_look_system.in_set(GameUpdateSet::PlayerInput),
            )
            .add_systems(
                Update,
                (controller::player_movement_system, controller::camera_follow_system)
                    .chain()
                    .in_set(GameUpdateSet::PlayerPhysics),
            )
            .add_systems(
                Update,
                (fishing::fishing_update_system, fishing::fishing_rewards_system)
                    .chain()
                    .in_set(GameUpdateSet::Fishing),
            )
            .add_systems(
                Update,
                (
                    interactions::interact_system,
                    interactions::cycle_sticker_system,
                    interactions::clear_canvas_system,
                )
                    .in_set(GameUpdateSet::Interaction),
            )
            .add_systems(
                Update,
                (
                    fishing::pole_render_system,
                    fishing::bobber_render_system,
                    fishing::line_gizmo_system,
                )
                    .in_set(GameUpdateSet::Rendering),
            );
    }
}
