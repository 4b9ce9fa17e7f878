//! Rendering for the range: lighting, the visible ground and the 3D camera.
//!
//! Gameplay entities are spawned without any render components so the
//! simulation runs headless. This plugin decorates them once they exist.

use bevy::prelude::*;

use crate::camera::PlayerCamera;
use crate::range::{Ground, GROUND_HALF_EXTENTS};
use crate::ArcherySet;

/// Adds lights, meshes and a `Camera3d` to the headless gameplay entities.
#[derive(Debug, Default, Clone, Copy)]
pub struct RangeScenePlugin;

fn spawn_lighting(mut commands: Commands) {
    commands.spawn((
        Name::new("Sun"),
        DirectionalLight {
            illuminance: 12_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(10.0, 20.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn attach_camera_lens(
    mut commands: Commands,
    cameras: Query<Entity, (With<PlayerCamera>, Without<Camera3d>)>,
) {
    for camera in &cameras {
        commands.entity(camera).insert(Camera3d::default());
    }
}

fn dress_ground(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    grounds: Query<Entity, (With<Ground>, Without<Mesh3d>)>,
) {
    for ground in &grounds {
        commands.entity(ground).insert((
            Mesh3d(meshes.add(Cuboid::from_size(GROUND_HALF_EXTENTS * 2.0))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgb(0.32, 0.45, 0.24),
                perceptual_roughness: 0.9,
                ..default()
            })),
        ));
    }
}

impl Plugin for RangeScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_lighting);
        app.add_systems(
            Update,
            (attach_camera_lens, dress_ground).in_set(ArcherySet::Props),
        );
    }
}
