use bevy::prelude::*;

mod camera;
mod config_egui;
mod stats_widget;

/// Whether the pointer currently belongs to the parameter panel.
#[derive(Resource, Default)]
pub struct PanelFocus(pub bool);

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PanelFocus>().add_plugins((
            stats_widget::StatsWidgetPlugin,
            config_egui::ConfigEguiPlugin,
            camera::CameraPlugin,
        ));
    }
}
