use bevy::prelude::*;

mod display;
mod galaxy_config;
mod spawn_points;

pub use display::{CloudHandle, DisplayedCloud, GalaxyPoints};
pub use galaxy_config::{DisplaySettings, GalaxyConfig, GalaxyConfigPlugin};
pub use spawn_points::{GenerationStats, SpawnPointsPlugin};

pub struct GalaxyPlugin;

impl Plugin for GalaxyPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((GalaxyConfigPlugin, SpawnPointsPlugin));
    }
}
