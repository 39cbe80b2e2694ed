//! World plugin: arena floor, plus render-only meshes, materials and lighting.
//!
//! The floor collider is scene furniture: no gameplay layer filters `World`, so it
//! never produces contacts. Bullets and zombies use the numeric
//! `pursuit.floor_height` cut instead.

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::layers::Layer;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::enemies::EnemyAssets;
use crate::plugins::fx::FxAssets;
use crate::plugins::projectiles::BulletAssets;

const ARENA_HALF: f32 = 30.0;
const FLOOR_THICKNESS: f32 = 0.1;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_floor);
}

/// Render-only: needs `Assets<Mesh>` / `Assets<StandardMaterial>`.
pub fn render_plugin(app: &mut App) {
    app.add_systems(Startup, init_render_assets)
        .add_systems(OnEnter(GameState::InGame), (spawn_floor_mesh, spawn_lights));
}

#[derive(Component)]
pub struct Floor;

fn spawn_floor(mut commands: Commands, tunables: Res<Tunables>) {
    let floor = tunables.pursuit.floor_height;
    commands.spawn((
        Name::new("Floor"),
        Floor,
        Transform::from_xyz(0.0, floor - FLOOR_THICKNESS * 0.5, 0.0),
        RigidBody::Static,
        Collider::cuboid(ARENA_HALF * 2.0, FLOOR_THICKNESS, ARENA_HALF * 2.0),
        CollisionLayers::new(Layer::World, [Layer::Player, Layer::Enemy]),
        DespawnOnExit(GameState::InGame),
    ));
}

fn init_render_assets(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(EnemyAssets {
        mesh: meshes.add(Capsule3d::new(0.35, 1.1)),
        material: materials.add(Color::srgb(0.35, 0.55, 0.3)),
    });
    commands.insert_resource(BulletAssets {
        mesh: meshes.add(Sphere::new(tunables.projectiles.bullet_radius)),
        material: materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.85, 0.3),
            emissive: LinearRgba::rgb(4.0, 3.0, 0.8),
            ..default()
        }),
    });
    commands.insert_resource(FxAssets {
        mesh: meshes.add(Sphere::new(0.4)),
        material: materials.add(StandardMaterial {
            base_color: Color::srgba(0.9, 0.2, 0.2, 0.6),
            alpha_mode: AlphaMode::Blend,
            ..default()
        }),
    });
}

fn spawn_floor_mesh(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    tunables: Res<Tunables>,
) {
    commands.spawn((
        Name::new("FloorMesh"),
        Mesh3d(meshes.add(Plane3d::default().mesh().size(ARENA_HALF * 2.0, ARENA_HALF * 2.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.25, 0.27, 0.33))),
        Transform::from_xyz(0.0, tunables.pursuit.floor_height, 0.0),
        DespawnOnExit(GameState::InGame),
    ));
}

fn spawn_lights(mut commands: Commands) {
    commands.spawn((
        Name::new("Sun"),
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(8.0, 20.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
        DespawnOnExit(GameState::InGame),
    ));
}

#[cfg(test)]
mod tests;
