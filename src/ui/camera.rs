use super::PanelFocus;
use bevy::{
    input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel},
    prelude::*,
};

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera)
            .add_systems(PostUpdate, camera_control_system);
    }
}

const START_POSITION: Vec3 = Vec3::new(3.0, 3.0, 3.0);
const MIN_DISTANCE: f32 = 0.5;
const MAX_DISTANCE: f32 = 200.0;
const MAX_PITCH: f32 = 1.5;
const ORBIT_SENSITIVITY: f32 = 0.005;
const DAMPING: f32 = 10.0;

fn spawn_camera(mut commands: Commands, mut clearcolor: ResMut<ClearColor>) {
    *clearcolor = ClearColor(Color::BLACK);
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: 75f32.to_radians(),
            near: 0.1,
            far: 2000.0,
            ..default()
        }),
        Transform::from_translation(START_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
        CameraMain::default(),
    ));
}

/// Orbit state around the origin. The `target_*` values follow the input
/// directly, the others ease towards them every frame.
#[derive(Component, Clone)]
pub struct CameraMain {
    yaw: f32,
    pitch: f32,
    distance: f32,
    target_yaw: f32,
    target_pitch: f32,
    target_distance: f32,
    smooth_zoom_buffer: f32,
}

impl Default for CameraMain {
    fn default() -> Self {
        let distance = START_POSITION.length();
        let yaw = f32::atan2(START_POSITION.x, START_POSITION.z);
        let pitch = (START_POSITION.y / distance).asin();
        Self {
            yaw,
            pitch,
            distance,
            target_yaw: yaw,
            target_pitch: pitch,
            target_distance: distance,
            smooth_zoom_buffer: 0.0,
        }
    }
}

impl CameraMain {
    fn translation(&self) -> Vec3 {
        let offset = Vec3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        );
        offset * self.distance
    }

    fn ease(&mut self, dt: f32) {
        let t = 1.0 - f32::exp(-DAMPING * dt);
        self.yaw += (self.target_yaw - self.yaw) * t;
        self.pitch += (self.target_pitch - self.pitch) * t;
        self.distance += (self.target_distance - self.distance) * t;
    }
}

pub fn camera_control_system(
    mut query: Query<(&mut Transform, &mut CameraMain)>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    time: Res<Time>,
    focus: Res<PanelFocus>,
    mut motion_evr: EventReader<MouseMotion>,
    mut scroll_evr: EventReader<MouseWheel>,
) {
    let Ok((mut transform, mut camera_main)) = query.single_mut() else {
        return;
    };

    // the panel owns the pointer while it is hovered
    if focus.0 {
        motion_evr.clear();
        scroll_evr.clear();
    }

    if mouse_buttons.pressed(MouseButton::Left) {
        for ev in motion_evr.read() {
            camera_main.target_yaw -= ev.delta.x * ORBIT_SENSITIVITY;
            camera_main.target_pitch = (camera_main.target_pitch + ev.delta.y * ORBIT_SENSITIVITY)
                .clamp(-MAX_PITCH, MAX_PITCH);
        }
    } else {
        motion_evr.clear();
    }

    // scroll delta is cached to a buffer
    // buffer is converted to actual zoom over time for a smooth zooming effect
    for ev in scroll_evr.read() {
        match ev.unit {
            MouseScrollUnit::Line => {
                camera_main.smooth_zoom_buffer += ev.y * 0.05;
            }
            MouseScrollUnit::Pixel => {
                camera_main.smooth_zoom_buffer += ev.y * 0.005;
            }
        }
    }

    let smooth_zoom_min = 0.001f32;
    let smooth_zoom_factor = 0.2f32;

    let smooth_zoom_amount = if camera_main.smooth_zoom_buffer < 0.0 {
        f32::min(
            camera_main.smooth_zoom_buffer * smooth_zoom_factor,
            (-smooth_zoom_min).max(camera_main.smooth_zoom_buffer),
        )
    } else {
        f32::max(
            camera_main.smooth_zoom_buffer * smooth_zoom_factor,
            smooth_zoom_min.min(camera_main.smooth_zoom_buffer),
        )
    };
    camera_main.smooth_zoom_buffer -= smooth_zoom_amount;
    camera_main.target_distance = (camera_main.target_distance * (1.0 - smooth_zoom_amount))
        .clamp(MIN_DISTANCE, MAX_DISTANCE);

    camera_main.ease(time.delta_secs());

    transform.translation = camera_main.translation();
    transform.look_at(Vec3::ZERO, Vec3::Y);
}
