use super::DisplaySettings;
use bevy::{
    prelude::*,
    render::{
        mesh::{Indices, PrimitiveTopology},
        render_asset::RenderAssetUsages,
    },
};
use spiral_galaxy::PointCloud;
use std::f32::consts::SQRT_2;

/// Marks the entity drawing the current point cloud.
#[derive(Component)]
pub struct GalaxyPoints;

/// Everything one displayed cloud owns in the world.
#[derive(Clone, Debug)]
pub struct CloudHandle {
    pub entity: Entity,
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
}

/// The display surface's single cloud slot.
///
/// Holds at most one cloud. [`DisplayedCloud::replace`] releases the previous
/// cloud before the new one is attached.
#[derive(Resource, Default)]
pub struct DisplayedCloud {
    handle: Option<CloudHandle>,
    cloud: PointCloud,
    size: f32,
}

impl DisplayedCloud {
    pub fn handle(&self) -> Option<&CloudHandle> {
        self.handle.as_ref()
    }

    pub fn cloud(&self) -> &PointCloud {
        &self.cloud
    }

    /// Point size the current mesh was built with.
    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn replace(
        &mut self,
        commands: &mut Commands,
        meshes: &mut Assets<Mesh>,
        materials: &mut Assets<StandardMaterial>,
        cloud: PointCloud,
        size: f32,
    ) {
        if let Some(old) = self.handle.take() {
            debug!("Releasing point cloud {:?}", old.entity);
            commands.entity(old.entity).despawn();
            meshes.remove(&old.mesh);
            materials.remove(&old.material);
        }

        let mesh = meshes.add(points_mesh(&cloud, size));
        let material = materials.add(points_material());
        let entity = commands
            .spawn((
                Mesh3d(mesh.clone()),
                MeshMaterial3d(material.clone()),
                Transform::IDENTITY,
                GalaxyPoints,
            ))
            .id();
        debug!("Attached point cloud {:?} ({} points)", entity, cloud.len());

        self.handle = Some(CloudHandle {
            entity,
            mesh,
            material,
        });
        self.cloud = cloud;
        self.size = size;
    }

    /// Rebuilds the current mesh at a new point size, keeping the cloud.
    pub fn resize(&mut self, commands: &mut Commands, meshes: &mut Assets<Mesh>, size: f32) {
        let Some(handle) = self.handle.as_mut() else {
            return;
        };
        let mesh = meshes.add(points_mesh(&self.cloud, size));
        commands.entity(handle.entity).insert(Mesh3d(mesh.clone()));
        meshes.remove(&handle.mesh);
        handle.mesh = mesh;
        self.size = size;
    }
}

// Regular tetrahedron with edge length 2 * sqrt(2), centered on the origin.
const TETRAHEDRON: [[f32; 3]; 4] = [
    [1.0, 1.0, 1.0],
    [1.0, -1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
];
const TETRAHEDRON_FACES: [u32; 12] = [0, 1, 2, 0, 3, 1, 0, 2, 3, 1, 3, 2];

/// One tiny tetrahedron per point, so points read the same from any angle.
pub fn points_mesh(cloud: &PointCloud, size: f32) -> Mesh {
    let scale = size / (2.0 * SQRT_2);
    let n = cloud.len();

    let mut positions = Vec::with_capacity(n * TETRAHEDRON.len());
    let mut colors = Vec::with_capacity(n * TETRAHEDRON.len());
    let mut indices = Vec::with_capacity(n * TETRAHEDRON_FACES.len());

    for (i, (center, color)) in cloud.positions().iter().zip(cloud.colors()).enumerate() {
        let center = Vec3::from_array(*center);
        // vertex colors are linear, the cloud's are sRGB
        let linear = LinearRgba::from(Srgba::rgb(color[0], color[1], color[2]));
        let linear = [linear.red, linear.green, linear.blue, 1.0];

        for corner in TETRAHEDRON {
            positions.push((center + Vec3::from_array(corner) * scale).to_array());
            colors.push(linear);
        }
        let base = (i * TETRAHEDRON.len()) as u32;
        indices.extend(TETRAHEDRON_FACES.iter().map(|v| base + v));
    }

    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, colors)
    .with_inserted_indices(Indices::U32(indices))
}

/// Additive, unlit, tinted by vertex color. Transparent passes skip depth
/// writes, so overlapping points simply add up.
fn points_material() -> StandardMaterial {
    StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        alpha_mode: AlphaMode::Add,
        ..default()
    }
}

pub(crate) fn rotate_points(
    time: Res<Time>,
    settings: Res<DisplaySettings>,
    mut points: Query<&mut Transform, With<GalaxyPoints>>,
) {
    if !settings.rotation_active {
        return;
    }
    let direction = if settings.rotation_clockwise { -1.0 } else { 1.0 };
    let angle = settings.rotation_speed * direction * time.delta_secs() * 60.0;
    for mut transform in &mut points {
        transform.rotate_y(angle);
    }
}

pub(crate) fn resize_points(
    mut commands: Commands,
    settings: Res<DisplaySettings>,
    mut displayed: ResMut<DisplayedCloud>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    if settings.size != displayed.size() && displayed.handle().is_some() {
        debug!("Point size changed to {}, rebuilding mesh", settings.size);
        displayed.resize(&mut commands, &mut meshes, settings.size);
    }
}
