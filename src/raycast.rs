//! Box colliders and the aim-ray query.
//!
//! Scene geometry that can stop an arrow carries a [`Collider`]: an
//! axis-aligned box centred on the entity's translation. The aim ray is cast
//! against every pickable collider and reports the nearest hit.

use bevy::math::bounding::{Aabb3d, RayCast3d};
use bevy::prelude::*;

/// Axis-aligned box used for ray picking and arrow hit tests.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Component)]
pub struct Collider {
    /// Half the box size along each axis.
    pub half_extents: Vec3,
    /// Whether the aim ray may stop on this box.
    pub pickable: bool,
}

impl Collider {
    /// Creates a pickable collider with the given half extents.
    #[must_use]
    pub const fn new(half_extents: Vec3) -> Self {
        Self {
            half_extents,
            pickable: true,
        }
    }

    /// Returns `true` when `point` lies inside the box centred at `centre`.
    ///
    /// Points on the faces count as inside.
    ///
    /// # Examples
    ///
    /// ```
    /// use bevy::math::Vec3;
    /// use quiver::Collider;
    ///
    /// let collider = Collider::new(Vec3::splat(0.5));
    /// assert!(collider.contains(Vec3::ZERO, Vec3::new(0.5, -0.2, 0.0)));
    /// assert!(!collider.contains(Vec3::ZERO, Vec3::new(0.6, 0.0, 0.0)));
    /// ```
    #[must_use]
    pub fn contains(&self, centre: Vec3, point: Vec3) -> bool {
        (point - centre).abs().cmple(self.half_extents).all()
    }

    fn bounds(&self, centre: Vec3) -> Aabb3d {
        Aabb3d::new(centre, self.half_extents)
    }
}

/// Nearest intersection found by [`cast_ray`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Entity owning the collider that was hit.
    pub entity: Entity,
    /// World-space point where the ray enters the collider.
    pub point: Vec3,
    /// Distance from the ray origin to `point`.
    pub distance: f32,
}

/// Casts a ray against a set of colliders and returns the nearest hit.
///
/// Colliders with `pickable == false` are skipped. Hits further than
/// `max_distance` are ignored. Returns `None` when nothing is hit.
pub fn cast_ray<'a, I>(
    origin: Vec3,
    direction: Dir3,
    max_distance: f32,
    colliders: I,
) -> Option<RayHit>
where
    I: IntoIterator<Item = (Entity, Vec3, &'a Collider)>,
{
    let ray = RayCast3d::from_ray(Ray3d { origin, direction }, max_distance);
    colliders
        .into_iter()
        .filter(|(_, _, collider)| collider.pickable)
        .filter_map(|(entity, centre, collider)| {
            ray.aabb_intersection_at(&collider.bounds(centre))
                .map(|distance| RayHit {
                    entity,
                    point: origin + *direction * distance,
                    distance,
                })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn board() -> Collider {
        Collider::new(Vec3::new(1.0, 1.0, 0.1))
    }

    #[test]
    fn nearest_collider_wins() {
        let mut world = World::new();
        let near_entity = world.spawn_empty().id();
        let far_entity = world.spawn_empty().id();
        let near = board();
        let far = board();
        let colliders = [
            (far_entity, Vec3::new(0.0, 0.0, -20.0), &far),
            (near_entity, Vec3::new(0.0, 0.0, -10.0), &near),
        ];

        let hit = cast_ray(Vec3::ZERO, Dir3::NEG_Z, 1000.0, colliders).expect("ray should hit");

        assert_eq!(hit.entity, near_entity);
        assert_relative_eq!(hit.distance, 9.9, epsilon = 1e-4);
        assert_relative_eq!(hit.point.z, -9.9, epsilon = 1e-4);
    }

    #[test]
    fn unpickable_colliders_are_ignored() {
        let mut spent = board();
        spent.pickable = false;
        let colliders = [(Entity::PLACEHOLDER, Vec3::new(0.0, 0.0, -10.0), &spent)];

        assert!(cast_ray(Vec3::ZERO, Dir3::NEG_Z, 1000.0, colliders).is_none());
    }

    #[test]
    fn hits_beyond_range_are_ignored() {
        let target = board();
        let colliders = [(Entity::PLACEHOLDER, Vec3::new(0.0, 0.0, -50.0), &target)];

        assert!(cast_ray(Vec3::ZERO, Dir3::NEG_Z, 20.0, colliders).is_none());
    }

    #[test]
    fn ray_pointing_away_misses() {
        let target = board();
        let colliders = [(Entity::PLACEHOLDER, Vec3::new(0.0, 0.0, -10.0), &target)];

        assert!(cast_ray(Vec3::ZERO, Dir3::Z, 1000.0, colliders).is_none());
    }

    #[test]
    fn contains_is_inclusive_on_faces() {
        let collider = Collider::new(Vec3::new(0.25, 0.25, 0.5));
        let centre = Vec3::new(0.0, 5.0, -29.0);
        assert!(collider.contains(centre, Vec3::new(0.25, 5.0, -29.5)));
        assert!(!collider.contains(centre, Vec3::new(0.0, 5.0, -29.75)));
    }
}
