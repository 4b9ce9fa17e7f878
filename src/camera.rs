//! The first-person camera: spawning, mouse look and the optional clamp.

use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;

use crate::config::{ArcherySettings, CameraConstraints};
use crate::constants::{CAMERA_HEIGHT, MAX_LOOK_PITCH};

/// Marker for the player's eye.
///
/// Drawn props are parented to this entity; the aim ray starts at its
/// translation and follows its forward direction. Exactly one exists.
#[derive(Component, Reflect, Default, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component, Default)]
pub struct PlayerCamera;

/// Spawns the player camera at eye height if none exists.
pub fn spawn_player_camera(mut commands: Commands, cameras: Query<(), With<PlayerCamera>>) {
    if !cameras.is_empty() {
        return;
    }

    commands.spawn((
        PlayerCamera,
        Name::new("PlayerCamera"),
        Transform::from_xyz(0.0, CAMERA_HEIGHT, 0.0),
    ));
}

/// Turns `rotation` by `delta` pixels of mouse motion.
///
/// Yaw turns about world Y and pitch about the camera's X axis. Pitch stops
/// short of straight up or down and roll is always zero, so the camera can
/// never end up upside down.
///
/// # Examples
///
/// ```
/// use bevy::math::{EulerRot, Quat, Vec2};
/// use quiver::camera::look_rotation;
///
/// let turned = look_rotation(Quat::IDENTITY, Vec2::new(0.0, -100.0), 0.002);
/// let (_, pitch, _) = turned.to_euler(EulerRot::YXZ);
/// assert!((pitch - 0.2).abs() < 1e-5);
/// ```
#[must_use]
pub fn look_rotation(rotation: Quat, delta: Vec2, sensitivity: f32) -> Quat {
    let (yaw, pitch, _) = rotation.to_euler(EulerRot::YXZ);
    let turned = delta * sensitivity;
    Quat::from_euler(
        EulerRot::YXZ,
        yaw - turned.x,
        (pitch - turned.y).clamp(-MAX_LOOK_PITCH, MAX_LOOK_PITCH),
        0.0,
    )
}

/// Rotates the camera by the mouse motion accumulated this frame.
///
/// Does nothing when the input plugin is absent.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
pub fn mouse_look(
    motion: Option<Res<AccumulatedMouseMotion>>,
    settings: Res<ArcherySettings>,
    mut cameras: Query<&mut Transform, With<PlayerCamera>>,
) {
    let Some(motion) = motion else {
        return;
    };
    if motion.delta == Vec2::ZERO {
        return;
    }
    let Ok(mut transform) = cameras.single_mut() else {
        return;
    };

    transform.rotation =
        look_rotation(transform.rotation, motion.delta, settings.look_sensitivity);
}

/// Clamps `rotation` to the pitch and yaw limits, dropping any roll.
///
/// # Examples
///
/// ```
/// use bevy::math::{EulerRot, Quat};
/// use quiver::{clamp_orientation, CameraConstraints};
///
/// let limits = CameraConstraints { enabled: true, pitch_limit: 0.7, yaw_limit: 0.5 };
/// let wild = Quat::from_euler(EulerRot::YXZ, 1.2, -1.0, 0.0);
/// let (yaw, pitch, _) = clamp_orientation(wild, &limits).to_euler(EulerRot::YXZ);
/// assert!((yaw - 0.5).abs() < 1e-5);
/// assert!((pitch + 0.7).abs() < 1e-5);
/// ```
#[must_use]
pub fn clamp_orientation(rotation: Quat, limits: &CameraConstraints) -> Quat {
    let (yaw, pitch, _) = rotation.to_euler(EulerRot::YXZ);
    Quat::from_euler(
        EulerRot::YXZ,
        yaw.clamp(-limits.yaw_limit, limits.yaw_limit),
        pitch.clamp(-limits.pitch_limit, limits.pitch_limit),
        0.0,
    )
}

/// Applies [`clamp_orientation`] to the player camera when enabled.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
pub fn constrain_camera(
    settings: Res<ArcherySettings>,
    mut cameras: Query<&mut Transform, With<PlayerCamera>>,
) {
    if !settings.camera.enabled {
        return;
    }
    let Ok(mut transform) = cameras.single_mut() else {
        return;
    };
    let clamped = clamp_orientation(transform.rotation, &settings.camera);
    // Avoid tripping change detection on frames that were already in range.
    if transform.rotation.angle_between(clamped) > f32::EPSILON {
        transform.rotation = clamped;
    }
}
