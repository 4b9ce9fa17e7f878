#![cfg_attr(docsrs, feature(doc_cfg))]
//! Library crate for the Quiver archery range.
//!
//! A player draws a bow by holding the primary button, looses an arrow at
//! whatever the camera is looking at, and scores by how close it lands to the
//! centre of the target. Everything here runs headless; rendering lives
//! behind the `render` feature.
pub mod aim;
pub mod camera;
pub mod config;
pub mod constants;
pub mod hud;
pub mod loading;
pub mod logging;
pub mod plugin;
pub mod props;
pub mod range;
pub mod raycast;
#[cfg(feature = "render")]
#[cfg_attr(docsrs, doc(cfg(feature = "render")))]
pub mod scene;
pub mod scoring;
pub mod shoot;
pub mod state;

pub use camera::{clamp_orientation, PlayerCamera};
pub use config::{ArcherySettings, CameraConstraints, ConfigError, DrawBackTuning, PropAssets};
#[cfg(feature = "render")]
#[cfg_attr(docsrs, doc(cfg(feature = "render")))]
pub use hud::HudPlugin;
#[cfg(feature = "render")]
#[cfg_attr(docsrs, doc(cfg(feature = "render")))]
pub use loading::AssetPropLoaderPlugin;
pub use loading::{InstantPropLoaderPlugin, PropLoadError};
pub use logging::init as init_logging;
pub use plugin::{ArcheryPlugin, ArcherySet};
pub use props::{DrawBack, PropKind, PropSlot, PropSlots, StuckArrow, TargetBoard};
pub use range::Ground;
pub use raycast::{cast_ray, Collider, RayHit};
#[cfg(feature = "render")]
#[cfg_attr(docsrs, doc(cfg(feature = "render")))]
pub use scene::RangeScenePlugin;
pub use scoring::{classify, classify_impact, Band, Score};
pub use state::{Flight, GameState, ImpactPoint, Phase, PointerAction, ShotScored};
