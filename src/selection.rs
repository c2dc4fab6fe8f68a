use crate::camera::{MainCamera, arena_to_world, world_to_arena};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use blob_arena::{BlobId, Simulation};

/// Extra click tolerance around a blob's edge
const SELECTION_MARGIN: f32 = 10.0;

/// Resource to track the currently selected blob
#[derive(Resource, Default)]
pub struct SelectedBlob {
    pub id: Option<BlobId>,
}

/// Ring drawn around the selected blob
#[derive(Component)]
pub struct SelectionOutline;

/// System to select the blob under a left click
pub fn handle_selection(
    mouse_button: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    sim: Res<Simulation>,
    mut selected: ResMut<SelectedBlob>,
) {
    if !mouse_button.just_pressed(MouseButton::Left) {
        return;
    }

    let Ok(window) = windows.get_single() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.get_single() else {
        return;
    };
    let Some(cursor_pos) = window.cursor_position() else {
        return;
    };
    let Ok(world_pos) = camera.viewport_to_world_2d(camera_transform, cursor_pos) else {
        return;
    };
    let click = world_to_arena(world_pos);

    // closest blob whose body (plus margin) contains the click
    selected.id = sim
        .blobs()
        .map(|blob| (blob.id, click.distance(blob.position), blob.radius()))
        .filter(|(_, distance, radius)| *distance <= radius + SELECTION_MARGIN)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _, _)| id);
}

/// System to spawn the selection ring once
pub fn setup_selection_outline(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    commands.spawn((
        SelectionOutline,
        Mesh2d(meshes.add(Annulus::new(1.1, 1.35))),
        MeshMaterial2d(materials.add(ColorMaterial::from_color(Color::srgba(1.0, 0.8, 0.0, 0.8)))),
        Transform::from_xyz(0.0, 0.0, 2.5),
        Visibility::Hidden,
    ));
}

/// System to keep the ring on the selected blob, hiding it when the blob
/// is gone
pub fn update_selection_outline(
    sim: Res<Simulation>,
    mut selected: ResMut<SelectedBlob>,
    mut outline: Query<(&mut Transform, &mut Visibility), With<SelectionOutline>>,
) {
    let Ok((mut transform, mut visibility)) = outline.get_single_mut() else {
        return;
    };

    match selected.id.and_then(|id| sim.blob(id)) {
        Some(blob) => {
            let world = arena_to_world(blob.position);
            transform.translation.x = world.x;
            transform.translation.y = world.y;
            transform.scale = Vec3::splat(blob.radius());
            *visibility = Visibility::Inherited;
        }
        None => {
            if selected.id.is_some() {
                selected.id = None;
            }
            *visibility = Visibility::Hidden;
        }
    }
}
