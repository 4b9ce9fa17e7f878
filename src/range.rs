//! Static geometry of the shooting range.

use bevy::prelude::*;

use crate::raycast::Collider;

/// Half size of the ground slab.
pub const GROUND_HALF_EXTENTS: Vec3 = Vec3::new(200.0, 0.5, 200.0);

/// Marker for the ground slab. Its top face sits at `y = 0`.
#[derive(Component, Reflect, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[reflect(Component, Default)]
pub struct Ground;

/// Spawns the ground slab so arrows aimed low still land somewhere.
pub fn spawn_ground(mut commands: Commands, grounds: Query<(), With<Ground>>) {
    if !grounds.is_empty() {
        return;
    }

    commands.spawn((
        Ground,
        Name::new("Ground"),
        Transform::from_xyz(0.0, -GROUND_HALF_EXTENTS.y, 0.0),
        Collider::new(GROUND_HALF_EXTENTS),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raycast::cast_ray;

    #[test]
    fn downward_ray_lands_on_the_top_face() {
        let mut app = App::new();
        app.add_systems(Startup, spawn_ground);
        app.update();

        let world = app.world_mut();
        let mut query = world.query::<(Entity, &Transform, &Collider)>();
        let hit = cast_ray(
            Vec3::new(3.0, 5.0, -2.0),
            Dir3::NEG_Y,
            100.0,
            query
                .iter(world)
                .map(|(entity, transform, collider)| (entity, transform.translation, collider)),
        )
        .expect("ground should be hit");

        approx::assert_relative_eq!(hit.point.y, 0.0, epsilon = 1e-5);
        approx::assert_relative_eq!(hit.distance, 5.0, epsilon = 1e-5);
    }
}
