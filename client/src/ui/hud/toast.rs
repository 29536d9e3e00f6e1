//! Short-lived message at the bottom of the screen.

use bevy::prelude::*;
use shared::rewards::{Reward, RewardCatalog};

use crate::constants::TOAST_SECONDS;
use crate::player::fishing::CatchEvent;
use crate::GameState;

#[derive(Event, Debug, Clone, PartialEq)]
pub struct ToastEvent(pub String);

#[derive(Component)]
pub struct ToastRoot;

#[derive(Component)]
pub struct ToastText;

/// Time left on the current toast.
#[derive(Component, Default)]
pub struct ToastTimer(pub Timer);

pub fn catch_message(event: &CatchEvent, catalog: &RewardCatalog) -> String {
    match event.reward {
        Reward::Junk => "Reeled in some junk.".to_string(),
        reward if event.new => format!("New! {}", catalog.describe(reward)),
        reward => format!("Another {}", catalog.describe(reward)),
    }
}

pub fn setup_toast(mut commands: Commands) {
    commands
        .spawn((
            StateScoped(GameState::Game),
            ToastRoot,
            ToastTimer::default(),
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Percent(12.0),
                width: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                ..default()
            },
            Visibility::Hidden,
        ))
        .with_child((
            ToastText,
            Text::new(""),
            TextFont {
                font_size: 24.0,
                ..default()
            },
            TextColor(Color::WHITE),
            BackgroundColor(Color::BLACK.with_alpha(0.5)),
            Node {
                padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
                ..default()
            },
        ));
}

pub fn toast_system(
    time: Res<Time>,
    catalog: Res<RewardCatalog>,
    mut toasts: EventReader<ToastEvent>,
    mut catches: EventReader<CatchEvent>,
    mut root_query: Query<(&mut ToastTimer, &mut Visibility), With<ToastRoot>>,
    mut text_query: Query<&mut Text, With<ToastText>>,
) {
    let Ok((mut timer, mut visibility)) = root_query.single_mut() else {
        return;
    };

    // newest message wins
    let latest = toasts
        .read()
        .map(|toast| toast.0.clone())
        .chain(catches.read().map(|event| catch_message(event, &catalog)))
        .last();

    if let Some(message) = latest {
        if let Ok(mut text) = text_query.single_mut() {
            text.0 = message;
        }
        timer.0 = Timer::from_seconds(TOAST_SECONDS, TimerMode::Once);
        *visibility = Visibility::Inherited;
        return;
    }

    timer.0.tick(time.delta());
    if timer.0.finished() {
        visibility.set_if_neq(Visibility::Hidden);
    }
}
