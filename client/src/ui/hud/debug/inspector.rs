//! Live tuning windows for the ocean and the fishing loop, toggled with F9.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_inspector_egui::bevy_egui::EguiContext;
use bevy_inspector_egui::bevy_inspector;
use shared::fishing::FishingTuning;
use shared::ocean::OceanConfig;

use crate::input::data::GameAction;
use crate::input::keyboard::is_action_just_pressed;
use crate::KeyMap;

#[derive(Resource, Default)]
pub struct InspectorVisible(pub bool);

pub fn register_inspector_types(app: &mut App) {
    app.register_type::<OceanConfig>()
        .register_type::<FishingTuning>();
}

pub fn toggle_inspector_system(
    kbd: Res<ButtonInput<KeyCode>>,
    key_map: Res<KeyMap>,
    mut visible: ResMut<InspectorVisible>,
) {
    if is_action_just_pressed(GameAction::ToggleInspector, &kbd, &key_map) {
        visible.0 = !visible.0;
        debug!("Inspector visible: {}", visible.0);
    }
}

pub fn inspector_ui(world: &mut World) {
    if !world
        .get_resource::<InspectorVisible>()
        .is_some_and(|visible| visible.0)
    {
        return;
    }

    let Ok(egui_context) = world
        .query_filtered::<&EguiContext, With<PrimaryWindow>>()
        .single(world)
    else {
        return;
    };
    let mut egui_context = egui_context.clone();

    egui::Window::new("Tuning")
        .default_width(320.0)
        .show(egui_context.get_mut(), |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Ocean");
                bevy_inspector::ui_for_resource::<OceanConfig>(world, ui);
                ui.separator();
                ui.heading("Fishing");
                bevy_inspector::ui_for_resource::<FishingTuning>(world, ui);
            });
        });
}
