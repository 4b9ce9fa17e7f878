//! Helpers for driving a headless archery app in tests.
//!
//! The app built by [`archery_app`] runs on `MinimalPlugins` with a fixed
//! frame length, so every `update` advances the clock by [`FRAME`]. Props
//! load on the first frame through the instant loader.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use quiver::{
    ArcheryPlugin, ArcherySettings, InstantPropLoaderPlugin, PlayerCamera, PointerAction,
    PropKind, PropSlots, ShotScored,
};

/// Simulated length of one frame.
pub const FRAME: Duration = Duration::from_millis(50);

/// Every [`ShotScored`] message seen so far, oldest first.
#[derive(Resource, Debug, Default, Clone)]
pub struct ShotLog(pub Vec<ShotScored>);

fn record_shots(mut scored: MessageReader<ShotScored>, mut log: ResMut<ShotLog>) {
    log.0.extend(scored.read().copied());
}

/// Builds a headless app with the archery controller and the instant loader.
pub fn archery_app(settings: ArcherySettings) -> App {
    let mut app = bare_archery_app(settings);
    app.add_plugins(InstantPropLoaderPlugin);
    app
}

/// Builds a headless app with the archery controller but no prop loader, so
/// every prop slot stays pending.
pub fn bare_archery_app(settings: ArcherySettings) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME))
        .insert_resource(settings)
        .add_plugins(ArcheryPlugin)
        .init_resource::<ShotLog>()
        .add_systems(Last, record_shots);
    app
}

/// Runs `frames` updates.
pub fn run_frames(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

/// Queues a pointer action for the next update.
pub fn send_pointer(app: &mut App, action: PointerAction) {
    app.world_mut().write_message(action);
}

/// The player camera, if it has spawned.
pub fn camera_entity(app: &mut App) -> Option<Entity> {
    let world = app.world_mut();
    let mut query = world.query_filtered::<Entity, With<PlayerCamera>>();
    query.single(world).ok()
}

/// Overwrites the camera's rotation.
///
/// # Panics
///
/// Panics if the camera has not spawned.
pub fn set_camera_rotation(app: &mut App, rotation: Quat) {
    let camera = camera_entity(app).unwrap_or_else(|| panic!("camera should exist"));
    let mut entity = app.world_mut().entity_mut(camera);
    let mut transform = entity
        .get_mut::<Transform>()
        .unwrap_or_else(|| panic!("camera should have a transform"));
    transform.rotation = rotation;
}

/// The camera's current rotation.
pub fn camera_rotation(app: &mut App) -> Option<Quat> {
    let camera = camera_entity(app)?;
    app.world().get::<Transform>(camera).map(|t| t.rotation)
}

/// The entity filling `kind`'s slot, if it has loaded.
pub fn prop(app: &App, kind: PropKind) -> Option<Entity> {
    app.world().resource::<PropSlots>().get(kind).ready()
}

/// Depth of `entity` in front of its parent, i.e. `-translation.z`.
pub fn depth(app: &App, entity: Entity) -> Option<f32> {
    app.world()
        .get::<Transform>(entity)
        .map(|transform| -transform.translation.z)
}

/// The parent of `entity`, if it has one.
pub fn parent_of(app: &App, entity: Entity) -> Option<Entity> {
    app.world().get::<ChildOf>(entity).map(ChildOf::parent)
}

/// Every arrow entity currently in the world.
pub fn arrows(app: &mut App) -> Vec<Entity> {
    let world = app.world_mut();
    let mut query = world.query::<(Entity, &PropKind)>();
    query
        .iter(world)
        .filter(|(_, kind)| **kind == PropKind::Arrow)
        .map(|(entity, _)| entity)
        .collect()
}

/// Presses, holds for `hold_frames`, and releases the primary button.
pub fn draw_and_release(app: &mut App, hold_frames: usize) {
    send_pointer(app, PointerAction::Down);
    run_frames(app, hold_frames.max(1));
    send_pointer(app, PointerAction::Up);
    app.update();
}

/// Runs updates until `done` holds, giving up after `limit` frames.
///
/// Returns the number of frames run, or `None` on timeout.
pub fn run_until(
    app: &mut App,
    limit: usize,
    mut done: impl FnMut(&mut App) -> bool,
) -> Option<usize> {
    for frame in 1..=limit {
        app.update();
        if done(app) {
            return Some(frame);
        }
    }
    None
}
