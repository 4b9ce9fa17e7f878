//! Props the player holds and the slots tracking their asynchronous loads.
//!
//! Each prop starts life as a [`PropLoadRequest`]. Whatever loader is
//! installed answers once with a [`PropLoaded`] message, and
//! [`attach_loaded_props`] turns the loaded entity into a working prop:
//! camera-attached props get their rest pose and [`DrawBack`] tuning, the
//! target gets its board collider. Until that happens the matching
//! [`PropSlot`] stays [`PropSlot::Pending`] and every system reading it must
//! cope.

use bevy::prelude::*;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::camera::PlayerCamera;
use crate::config::{ArcherySettings, DrawBackTuning};
use crate::raycast::Collider;

/// The loadable props of the archery range.
#[derive(
    Component, Reflect, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[reflect(Component)]
pub enum PropKind {
    /// The bow, attached to the camera.
    Bow,
    /// The nocked arrow, attached to the camera until released.
    Arrow,
    /// The bow sight, attached to the camera.
    Sight,
    /// The aiming crosshair, attached to the camera.
    Crosshair,
    /// The stationary target board.
    Target,
}

impl PropKind {
    /// Every prop requested at start-up.
    pub const ALL: [Self; 5] = [
        Self::Bow,
        Self::Arrow,
        Self::Sight,
        Self::Crosshair,
        Self::Target,
    ];

    /// Entity name given to the loaded prop.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bow => "Bow",
            Self::Arrow => "Arrow",
            Self::Sight => "Sight",
            Self::Crosshair => "Crosshair",
            Self::Target => "Target",
        }
    }
}

/// Load state of one prop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PropSlot {
    /// Requested but not yet delivered by the loader.
    #[default]
    Pending,
    /// Loaded and attached.
    Ready(Entity),
}

impl PropSlot {
    /// The prop entity once it has loaded.
    #[must_use]
    pub const fn ready(self) -> Option<Entity> {
        match self {
            Self::Pending => None,
            Self::Ready(entity) => Some(entity),
        }
    }
}

/// Load state of every prop, one slot per [`PropKind`].
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct PropSlots {
    /// The bow.
    pub bow: PropSlot,
    /// The currently nocked arrow.
    pub arrow: PropSlot,
    /// The sight.
    pub sight: PropSlot,
    /// The crosshair.
    pub crosshair: PropSlot,
    /// The target board.
    pub target: PropSlot,
}

impl PropSlots {
    /// Slot for `kind`.
    #[must_use]
    pub const fn get(&self, kind: PropKind) -> PropSlot {
        match kind {
            PropKind::Bow => self.bow,
            PropKind::Arrow => self.arrow,
            PropKind::Sight => self.sight,
            PropKind::Crosshair => self.crosshair,
            PropKind::Target => self.target,
        }
    }

    /// Mutable slot for `kind`.
    pub fn get_mut(&mut self, kind: PropKind) -> &mut PropSlot {
        match kind {
            PropKind::Bow => &mut self.bow,
            PropKind::Arrow => &mut self.arrow,
            PropKind::Sight => &mut self.sight,
            PropKind::Crosshair => &mut self.crosshair,
            PropKind::Target => &mut self.target,
        }
    }
}

/// Draw-back tuning carried by a camera-attached prop.
///
/// Depth is the distance in front of the eye, i.e. `-translation.z` in the
/// camera's local space.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Component)]
pub struct DrawBack {
    /// Depth units per second while aiming.
    pub speed: f32,
    /// Depth at which drawing stops.
    pub limit: f32,
    /// Local translation when at rest.
    pub rest: Vec3,
}

impl From<&DrawBackTuning> for DrawBack {
    fn from(tuning: &DrawBackTuning) -> Self {
        Self {
            speed: tuning.speed,
            limit: tuning.limit,
            rest: tuning.rest,
        }
    }
}

impl DrawBack {
    /// Depth after drawing for `delta` seconds from `depth`.
    ///
    /// Never goes closer than `limit`; a prop already inside the limit stays
    /// where it is.
    ///
    /// # Examples
    ///
    /// ```
    /// use bevy::math::Vec3;
    /// use quiver::DrawBack;
    ///
    /// let draw = DrawBack { speed: 8.0, limit: 2.5, rest: Vec3::new(0.0, 0.0, -3.5) };
    /// assert!((draw.drawn_depth(3.5, 0.05) - 3.1).abs() < 1e-6);
    /// assert_eq!(draw.drawn_depth(2.6, 0.05), 2.5);
    /// ```
    #[must_use]
    pub fn drawn_depth(&self, depth: f32, delta: f32) -> f32 {
        if depth <= self.limit {
            return depth;
        }
        (depth - self.speed * delta).max(self.limit)
    }
}

/// Marker for the target board; its translation is the scoring centre.
#[derive(Component, Reflect, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[reflect(Component, Default)]
pub struct TargetBoard;

/// Marker for arrows that have landed and no longer take part in play.
#[derive(Component, Reflect, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[reflect(Component, Default)]
pub struct StuckArrow;

/// Request for a loader to produce a prop.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropLoadRequest {
    /// Which prop to load.
    pub kind: PropKind,
}

/// One-shot notification that a requested prop has loaded.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropLoaded {
    /// Which prop loaded.
    pub kind: PropKind,
    /// The entity holding the loaded prop.
    pub entity: Entity,
}

/// Requests every prop once at start-up.
pub fn request_initial_props(mut requests: MessageWriter<PropLoadRequest>) {
    for kind in PropKind::ALL {
        requests.write(PropLoadRequest { kind });
    }
}

/// Turns [`PropLoaded`] notifications into ready props.
///
/// Drawn props are parented to the [`PlayerCamera`] at their rest pose; the
/// target is placed in the world with its board collider. A second load of a
/// slot that is already ready despawns the prop it replaces.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
pub fn attach_loaded_props(
    mut commands: Commands,
    mut loaded: MessageReader<PropLoaded>,
    mut slots: ResMut<PropSlots>,
    settings: Res<ArcherySettings>,
    cameras: Query<Entity, With<PlayerCamera>>,
) {
    for PropLoaded { kind, entity } in loaded.read().copied() {
        let mut prop = commands.entity(entity);
        prop.insert((kind, Name::new(kind.label())));

        if let Some(tuning) = settings.tuning(kind) {
            let Ok(camera) = cameras.single() else {
                warn!("{} loaded before the player camera exists", kind.label());
                continue;
            };
            prop.insert((
                Transform::from_translation(tuning.rest),
                DrawBack::from(tuning),
                ChildOf(camera),
            ));
            if kind == PropKind::Arrow {
                prop.insert(Collider::new(settings.arrow_half_extents));
            }
        } else {
            prop.insert((
                Transform::from_translation(settings.target.position),
                Collider::new(settings.target.half_extents),
                TargetBoard,
            ));
        }

        let slot = slots.get_mut(kind);
        if let Some(previous) = slot.ready().filter(|previous| *previous != entity) {
            warn!("{} loaded again; despawning {previous}", kind.label());
            commands.entity(previous).try_despawn();
        }
        *slot = PropSlot::Ready(entity);
        debug!("{} ready as {entity}", kind.label());
    }
}
