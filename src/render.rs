use crate::camera::arena_to_world;
use bevy::prelude::*;
use blob_arena::config::{SIM_HEIGHT, SIM_WIDTH};
use blob_arena::{BlobId, CandyId, Simulation};
use std::collections::HashMap;

const BLOB_Z: f32 = 2.0;
const CANDY_Z: f32 = 1.0;
const SEPARATOR_Z: f32 = 3.0;

/// Sprite mirroring a live blob
#[derive(Component)]
pub struct BlobSprite(pub BlobId);

/// Sprite mirroring a live candy
#[derive(Component)]
pub struct CandySprite(pub CandyId);

/// Shared meshes and materials for the arena sprites
#[derive(Resource)]
pub struct ArenaAssets {
    unit_circle: Handle<Mesh>,
    candy_material: Handle<ColorMaterial>,
}

/// System to draw the arena floor and the two separators, and to create
/// the shared sprite assets
pub fn setup_arena(
    mut commands: Commands,
    sim: Res<Simulation>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    commands.spawn((
        Mesh2d(meshes.add(Rectangle::new(SIM_WIDTH, SIM_HEIGHT))),
        MeshMaterial2d(materials.add(ColorMaterial::from_color(Color::WHITE))),
        Transform::from_xyz(0.0, 0.0, 0.0),
    ));

    let separator_material = materials.add(ColorMaterial::from_color(Color::srgb(0.47, 0.31, 0.01)));
    for rect in sim.separators().rects() {
        if rect.is_empty() {
            continue;
        }
        let center = arena_to_world(rect.center());
        commands.spawn((
            Mesh2d(meshes.add(Rectangle::new(rect.width(), rect.height()))),
            MeshMaterial2d(separator_material.clone()),
            Transform::from_xyz(center.x, center.y, SEPARATOR_Z),
        ));
    }

    commands.insert_resource(ArenaAssets {
        unit_circle: meshes.add(Circle::new(1.0)),
        candy_material: materials.add(ColorMaterial::from_color(Color::srgb(0.57, 0.3, 0.61))),
    });
}

fn place(position: Vec2, radius: f32, z: f32) -> Transform {
    let world = arena_to_world(position);
    Transform::from_xyz(world.x, world.y, z).with_scale(Vec3::splat(radius))
}

/// System to mirror the engine's blobs as circles coloured by hue
pub fn sync_blob_sprites(
    mut commands: Commands,
    sim: Res<Simulation>,
    assets: Res<ArenaAssets>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut sprites: Query<(Entity, &BlobSprite, &mut Transform)>,
) {
    if !sim.is_changed() {
        return;
    }

    let mut live: HashMap<BlobId, (Vec2, f32)> = sim
        .blobs()
        .map(|blob| (blob.id, (blob.position, blob.radius())))
        .collect();

    for (entity, sprite, mut transform) in sprites.iter_mut() {
        match live.remove(&sprite.0) {
            Some((position, radius)) => *transform = place(position, radius, BLOB_Z),
            None => commands.entity(entity).despawn(),
        }
    }

    // whatever is left has no sprite yet
    for (id, (position, radius)) in live {
        let hue = sim.blob(id).map_or(0.0, |blob| blob.hue);
        commands.spawn((
            BlobSprite(id),
            Mesh2d(assets.unit_circle.clone()),
            MeshMaterial2d(materials.add(ColorMaterial::from_color(Color::hsl(hue, 0.85, 0.45)))),
            place(position, radius, BLOB_Z),
        ));
    }
}

/// System to mirror the engine's candies
pub fn sync_candy_sprites(
    mut commands: Commands,
    sim: Res<Simulation>,
    assets: Res<ArenaAssets>,
    sprites: Query<(Entity, &CandySprite)>,
) {
    if !sim.is_changed() {
        return;
    }

    let mut live: HashMap<CandyId, (Vec2, f32)> = sim
        .candies()
        .map(|candy| (candy.id, (candy.position, candy.radius())))
        .collect();

    // candies never move, so existing sprites only need culling
    for (entity, sprite) in sprites.iter() {
        if live.remove(&sprite.0).is_none() {
            commands.entity(entity).despawn();
        }
    }

    for (id, (position, radius)) in live {
        commands.spawn((
            CandySprite(id),
            Mesh2d(assets.unit_circle.clone()),
            MeshMaterial2d(assets.candy_material.clone()),
            place(position, radius, CANDY_Z),
        ));
    }
}
