use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;
use blob_arena::config::{SIM_HEIGHT, SIM_WIDTH};

/// Zoom that fits the whole arena into the default window
const FIT_ZOOM: f32 = 1.3;

#[derive(Component)]
pub struct MainCamera;

#[derive(Resource)]
pub struct CameraState {
    pub zoom: f32,
    pub position: Vec2,
    pub is_panning: bool,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            zoom: FIT_ZOOM,
            position: Vec2::ZERO,
            is_panning: false,
        }
    }
}

/// Arena coordinates (origin top-left, y down) to world coordinates
/// (origin at the arena centre, y up).
pub fn arena_to_world(point: Vec2) -> Vec2 {
    Vec2::new(point.x - SIM_WIDTH / 2.0, SIM_HEIGHT / 2.0 - point.y)
}

pub fn world_to_arena(point: Vec2) -> Vec2 {
    Vec2::new(point.x + SIM_WIDTH / 2.0, SIM_HEIGHT / 2.0 - point.y)
}

pub fn setup_camera(mut commands: Commands, camera_state: Res<CameraState>) {
    commands.spawn((
        Camera2d,
        MainCamera,
        Transform::from_xyz(camera_state.position.x, camera_state.position.y, 0.0),
        OrthographicProjection {
            scale: camera_state.zoom,
            ..OrthographicProjection::default_2d()
        },
    ));
}

pub fn camera_zoom(
    mut scroll_events: EventReader<MouseWheel>,
    mut camera_state: ResMut<CameraState>,
    mut query: Query<&mut OrthographicProjection, With<MainCamera>>,
) {
    for event in scroll_events.read() {
        camera_state.zoom = (camera_state.zoom - event.y * 0.1).clamp(0.2, 5.0);

        if let Ok(mut projection) = query.get_single_mut() {
            projection.scale = camera_state.zoom;
        }
    }
}

pub fn camera_pan(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut motion_events: EventReader<MouseMotion>,
    mut camera_state: ResMut<CameraState>,
    mut query: Query<&mut Transform, With<MainCamera>>,
) {
    if mouse_button.just_pressed(MouseButton::Middle) {
        camera_state.is_panning = true;
    }
    if mouse_button.just_released(MouseButton::Middle) {
        camera_state.is_panning = false;
    }

    if !camera_state.is_panning {
        motion_events.clear();
        return;
    }

    for event in motion_events.read() {
        // screen y grows downwards, world y upwards
        let pan_delta = Vec2::new(-event.delta.x, event.delta.y) * camera_state.zoom;
        camera_state.position += pan_delta;
        if let Ok(mut transform) = query.get_single_mut() {
            transform.translation.x = camera_state.position.x;
            transform.translation.y = camera_state.position.y;
        }
    }
}
