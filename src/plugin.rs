//! Wiring of the archery controller into a Bevy app.
//!
//! [`ArcheryPlugin`] registers the controller's types, resources and messages
//! and schedules its systems in the fixed [`ArcherySet`] order. It does not
//! load any props on its own; pair it with
//! [`InstantPropLoaderPlugin`](crate::loading::InstantPropLoaderPlugin) for
//! headless use or `AssetPropLoaderPlugin` in render builds.

use bevy::prelude::*;

use crate::aim::{apply_pointer_actions, draw_back_props, predict_impact, sample_pointer_buttons};
use crate::camera::{constrain_camera, mouse_look, spawn_player_camera, PlayerCamera};
use crate::config::{ArcherySettings, PropAssets};
use crate::loading::log_prop_error;
use crate::props::{
    attach_loaded_props, request_initial_props, DrawBack, PropKind, PropLoadRequest, PropLoaded,
    PropSlots, StuckArrow, TargetBoard,
};
use crate::range::{spawn_ground, Ground};
use crate::raycast::Collider;
use crate::shoot::{fly_arrow, release_arrow};
use crate::state::{GameState, ImpactPoint, PointerAction, ShotScored};

/// Per-frame stages of the controller, run in declaration order.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArcherySet {
    /// Raw input becomes [`PointerAction`] messages and camera rotation.
    Input,
    /// Finished loads become ready props.
    Props,
    /// Pointer actions, draw-back and impact prediction.
    Aim,
    /// Release, flight and scoring.
    Shoot,
    /// Optional camera clamp.
    Camera,
    /// Score overlay.
    Hud,
}

/// Installs the aim, release and score controller.
///
/// Settings already present in the world are kept, so callers can insert a
/// loaded [`ArcherySettings`] before adding the plugin.
#[derive(Debug, Default, Clone, Copy)]
pub struct ArcheryPlugin;

impl Plugin for ArcheryPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<PlayerCamera>()
            .register_type::<PropKind>()
            .register_type::<DrawBack>()
            .register_type::<Collider>()
            .register_type::<TargetBoard>()
            .register_type::<StuckArrow>()
            .register_type::<Ground>();

        app.add_message::<PointerAction>()
            .add_message::<PropLoadRequest>()
            .add_message::<PropLoaded>()
            .add_message::<ShotScored>();

        app.init_resource::<ArcherySettings>()
            .init_resource::<PropAssets>()
            .init_resource::<GameState>()
            .init_resource::<ImpactPoint>()
            .init_resource::<PropSlots>();

        app.add_observer(log_prop_error);

        app.configure_sets(
            Update,
            (
                ArcherySet::Input,
                ArcherySet::Props,
                ArcherySet::Aim,
                ArcherySet::Shoot,
                ArcherySet::Camera,
                ArcherySet::Hud,
            )
                .chain(),
        );

        app.add_systems(
            Startup,
            (spawn_player_camera, spawn_ground, request_initial_props),
        );
        app.add_systems(
            Update,
            (
                (sample_pointer_buttons, mouse_look).in_set(ArcherySet::Input),
                attach_loaded_props.in_set(ArcherySet::Props),
                (apply_pointer_actions, draw_back_props, predict_impact)
                    .chain()
                    .in_set(ArcherySet::Aim),
                (release_arrow, fly_arrow).chain().in_set(ArcherySet::Shoot),
                constrain_camera.in_set(ArcherySet::Camera),
            ),
        );
    }
}
