use bevy::prelude::*;
use spiral_galaxy::GalaxyParams;

/// The committed galaxy shape, as last finished in the parameter panel.
///
/// `generation` is bumped whenever the committed settings actually change;
/// the point spawner rebuilds the cloud when it sees a new generation.
#[derive(Resource, Clone, PartialEq)]
pub struct GalaxyConfig {
    pub generation: i32,
    pub params: GalaxyParams,
    /// Fixed seed for reproducible clouds; `None` draws a fresh cloud each time.
    pub seed: Option<u64>,
    /// Bumped to request a new draw with unchanged parameters.
    pub reroll: u32,
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            generation: 0,
            params: GalaxyParams::default(),
            seed: None,
            reroll: 0,
        }
    }
}

impl GalaxyConfig {
    fn same_settings(&self, other: &Self) -> bool {
        self.params == other.params && self.seed == other.seed && self.reroll == other.reroll
    }
}

#[derive(Resource)]
pub(crate) struct GalaxyConfigOld(GalaxyConfig);

impl Default for GalaxyConfigOld {
    fn default() -> Self {
        Self(GalaxyConfig {
            generation: -1,
            // never equal to a live config, so the first frame always builds
            reroll: u32::MAX,
            ..default()
        })
    }
}

/// Settings consumed by the display and render loop only. Editing these never
/// regenerates the cloud.
#[derive(Resource, Clone, PartialEq)]
pub struct DisplaySettings {
    /// Point diameter in world units.
    pub size: f32,
    pub rotation_active: bool,
    /// Radians per 60 Hz frame.
    pub rotation_speed: f32,
    pub rotation_clockwise: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            size: 0.01,
            rotation_active: false,
            rotation_speed: 0.001,
            rotation_clockwise: true,
        }
    }
}

impl DisplaySettings {
    pub const MIN: Self = Self {
        size: 0.001,
        rotation_active: false,
        rotation_speed: 0.0001,
        rotation_clockwise: false,
    };
    pub const MAX: Self = Self {
        size: 0.1,
        rotation_active: true,
        rotation_speed: 0.005,
        rotation_clockwise: true,
    };
}

pub struct GalaxyConfigPlugin;

impl Plugin for GalaxyConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GalaxyConfig>()
            .init_resource::<GalaxyConfigOld>()
            .init_resource::<DisplaySettings>()
            .add_systems(Update, apply_ui_updates);
    }
}

pub(crate) fn apply_ui_updates(
    mut galaxy_config_old: ResMut<GalaxyConfigOld>,
    mut galaxy_config: ResMut<GalaxyConfig>,
) {
    if galaxy_config.is_changed() && !galaxy_config.same_settings(&galaxy_config_old.0) {
        galaxy_config.generation += 1;
        galaxy_config_old.0 = galaxy_config.clone();
    }
}
