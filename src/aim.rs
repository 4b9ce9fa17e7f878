//! The aim step: pointer input, draw-back and impact prediction.

use bevy::prelude::*;
use log::debug;

use crate::camera::PlayerCamera;
use crate::config::ArcherySettings;
use crate::props::DrawBack;
use crate::raycast::{cast_ray, Collider};
use crate::state::{GameState, ImpactPoint, PointerAction};

/// Queues presses and releases of the left mouse button.
///
/// Does nothing when the input plugin is absent, which lets headless apps
/// feed [`PointerAction`] messages directly.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
pub fn sample_pointer_buttons(
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    mut actions: MessageWriter<PointerAction>,
) {
    let Some(buttons) = buttons else {
        return;
    };
    if buttons.just_pressed(MouseButton::Left) {
        actions.write(PointerAction::Down);
    }
    if buttons.just_released(MouseButton::Left) {
        actions.write(PointerAction::Up);
    }
}

/// Folds this frame's pointer actions into [`GameState`] in arrival order.
pub fn apply_pointer_actions(
    mut actions: MessageReader<PointerAction>,
    mut state: ResMut<GameState>,
) {
    for action in actions.read().copied() {
        if state.apply(action) {
            debug!("pointer {action:?}: now {:?}", state.phase());
        }
    }
}

/// Draws camera-attached props toward the eye while aiming.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
pub fn draw_back_props(
    state: Res<GameState>,
    settings: Res<ArcherySettings>,
    time: Res<Time>,
    mut props: Query<(&mut Transform, &DrawBack), With<ChildOf>>,
) {
    if !state.aiming {
        return;
    }
    let delta = settings.frame_delta(&time);
    for (mut transform, draw) in &mut props {
        let depth = -transform.translation.z;
        let drawn = draw.drawn_depth(depth, delta);
        if drawn < depth {
            transform.translation.z = -drawn;
        }
    }
}

/// Samples the aim ray into [`ImpactPoint`] while aiming and on the frame
/// of release, so a press and release inside one frame still has a point.
///
/// Only top-level colliders take part, so the props riding on the camera
/// never block their own aim.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
pub fn predict_impact(
    state: Res<GameState>,
    settings: Res<ArcherySettings>,
    mut impact: ResMut<ImpactPoint>,
    cameras: Query<&Transform, With<PlayerCamera>>,
    colliders: Query<(Entity, &Transform, &Collider, Option<&Name>), Without<ChildOf>>,
) {
    if !(state.aiming || state.ready_to_release()) {
        return;
    }
    let Ok(eye) = cameras.single() else {
        return;
    };

    let hit = cast_ray(
        eye.translation,
        eye.forward(),
        settings.ray_range,
        colliders
            .iter()
            .map(|(entity, transform, collider, _)| (entity, transform.translation, collider)),
    );

    match hit {
        Some(hit) => {
            let name = colliders
                .get(hit.entity)
                .ok()
                .and_then(|(_, _, _, name)| name)
                .map_or("unnamed", Name::as_str);
            debug!("aiming at {name} ({:.2} away)", hit.distance);
            impact.0 = Some(hit.point);
        }
        None => {
            if impact.0.is_some() {
                debug!("aim ray left the scene");
            }
            impact.0 = None;
        }
    }
}
