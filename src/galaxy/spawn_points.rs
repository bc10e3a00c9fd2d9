use super::display::{self, DisplayedCloud};
use super::galaxy_config::apply_ui_updates;
use crate::prelude::*;
use bevy::platform::time::Instant;
use bevy::prelude::*;
use std::time::Duration;

pub struct SpawnPointsPlugin;

impl Plugin for SpawnPointsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointSpawningControl>()
            .init_resource::<DisplayedCloud>()
            .init_resource::<GenerationStats>()
            .add_systems(
                Update,
                (
                    regenerate_points.after(apply_ui_updates),
                    display::resize_points.after(regenerate_points),
                    display::rotate_points,
                ),
            );
    }
}

/// Which config generation the displayed cloud was last built from.
#[derive(Resource, Default)]
struct PointSpawningControl {
    generation: Option<i32>,
}

/// Summary of the last successful generation, for the stats overlay.
#[derive(Resource, Default)]
pub struct GenerationStats {
    pub points: usize,
    pub branches: usize,
    pub elapsed: Duration,
}

/// Rebuilds the point cloud whenever the committed config moves to a new
/// generation. Runs to completion within the frame.
fn regenerate_points(
    mut commands: Commands,
    galaxy_config: Res<GalaxyConfig>,
    settings: Res<DisplaySettings>,
    mut control: ResMut<PointSpawningControl>,
    mut displayed: ResMut<DisplayedCloud>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut stats: ResMut<GenerationStats>,
) {
    if control.generation == Some(galaxy_config.generation) {
        return;
    }
    control.generation = Some(galaxy_config.generation);

    let params = galaxy_config.params;
    info!(
        "Galaxy config updated, generating {} points on {} branches",
        params.count, params.branches
    );

    let started = Instant::now();
    let result = match galaxy_config.seed {
        Some(seed) => generate_seeded(&params, seed),
        None => generate(&params, &mut rand::rng()),
    };
    let cloud = match result {
        Ok(cloud) => cloud,
        Err(err) => {
            warn!("Galaxy generation rejected, keeping the current cloud: {err}");
            return;
        }
    };
    let elapsed = started.elapsed();
    info!("Generated {} points in {:.2?}", cloud.len(), elapsed);

    *stats = GenerationStats {
        points: cloud.len(),
        branches: params.branches,
        elapsed,
    };
    displayed.replace(
        &mut commands,
        &mut meshes,
        &mut materials,
        cloud,
        settings.size,
    );
}
