//! Loaders that answer [`PropLoadRequest`] messages.
//!
//! Two loaders exist. [`InstantPropLoaderPlugin`] spawns a bare entity for
//! every request and reports it loaded on the same frame, which is what
//! headless apps and tests use. [`AssetPropLoaderPlugin`] (render builds
//! only) loads the glTF scene named in [`PropAssets`](crate::config::PropAssets)
//! and reports it once the asset and all of its dependencies are in memory.
//! Exactly one loader should be installed.

use bevy::prelude::*;
use log::error;
use thiserror::Error;

use crate::props::{attach_loaded_props, PropKind, PropLoadRequest, PropLoaded};
use crate::ArcherySet;

/// Failures reported while loading a prop.
#[derive(Event, Error, Debug, Clone, PartialEq, Eq)]
pub enum PropLoadError {
    /// The configured path cannot be served by the asset server.
    #[error("{kind:?} asset path `{path}` is not a relative asset path")]
    InvalidAssetPath {
        /// Prop whose path was rejected.
        kind: PropKind,
        /// The rejected path.
        path: String,
    },
    /// The asset server gave up on the prop.
    #[error("{kind:?} failed to load from `{path}`: {detail}")]
    LoadFailed {
        /// Prop that failed.
        kind: PropKind,
        /// Asset path that was requested.
        path: String,
        /// What the asset server reported.
        detail: String,
    },
}

/// Rejects paths the asset server would resolve outside the asset root.
///
/// # Errors
///
/// Returns [`PropLoadError::InvalidAssetPath`] for empty, absolute or
/// parent-relative paths.
pub fn validate_asset_path(kind: PropKind, path: &str) -> Result<(), PropLoadError> {
    if path.is_empty() || path.starts_with('/') || path.contains("..") {
        return Err(PropLoadError::InvalidAssetPath {
            kind,
            path: path.to_owned(),
        });
    }
    Ok(())
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
pub(crate) fn log_prop_error(event: On<PropLoadError>) {
    error!("prop error: {}", event.event());
}

/// Answers every prop request on the frame it arrives with an empty entity.
#[derive(Debug, Default, Clone, Copy)]
pub struct InstantPropLoaderPlugin;

fn load_props_instantly(
    mut commands: Commands,
    mut requests: MessageReader<PropLoadRequest>,
    mut loaded: MessageWriter<PropLoaded>,
) {
    for PropLoadRequest { kind } in requests.read().copied() {
        let entity = commands.spawn(Transform::default()).id();
        loaded.write(PropLoaded { kind, entity });
    }
}

impl Plugin for InstantPropLoaderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            load_props_instantly
                .in_set(ArcherySet::Props)
                .before(attach_loaded_props),
        );
    }
}

#[cfg(feature = "render")]
pub use asset::AssetPropLoaderPlugin;

#[cfg(feature = "render")]
mod asset {
    use bevy::asset::RecursiveDependencyLoadState;
    use bevy::ecs::system::SystemParam;
    use bevy::gltf::GltfAssetLabel;
    use bevy::prelude::*;
    use log::debug;

    use super::{validate_asset_path, PropLoadError};
    use crate::config::PropAssets;
    use crate::props::{attach_loaded_props, PropKind, PropLoadRequest, PropLoaded};
    use crate::ArcherySet;

    /// Loads props as glTF scenes through the asset server.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct AssetPropLoaderPlugin;

    /// A scene root still waiting on its asset.
    #[derive(Component, Debug)]
    struct PendingProp {
        kind: PropKind,
        path: String,
        handle: Handle<Scene>,
    }

    #[derive(SystemParam)]
    struct PropLoadContext<'w, 's> {
        commands: Commands<'w, 's>,
        asset_server: Res<'w, AssetServer>,
        assets: Res<'w, PropAssets>,
    }

    fn start_prop_loads(mut ctx: PropLoadContext, mut requests: MessageReader<PropLoadRequest>) {
        for PropLoadRequest { kind } in requests.read().copied() {
            let path = ctx.assets.path(kind).to_owned();
            if let Err(err) = validate_asset_path(kind, &path) {
                ctx.commands.trigger(err);
                continue;
            }

            let handle = ctx
                .asset_server
                .load(GltfAssetLabel::Scene(0).from_asset(path.clone()));
            debug!("loading {kind:?} from {path}");
            ctx.commands.spawn((
                SceneRoot(handle.clone()),
                PendingProp { kind, path, handle },
            ));
        }
    }

    #[expect(
        clippy::needless_pass_by_value,
        reason = "Bevy system parameters use `Res<T>` by value."
    )]
    fn finish_prop_loads(
        mut commands: Commands,
        asset_server: Res<AssetServer>,
        pending: Query<(Entity, &PendingProp)>,
        mut loaded: MessageWriter<PropLoaded>,
    ) {
        for (entity, prop) in &pending {
            match asset_server.recursive_dependency_load_state(prop.handle.id()) {
                RecursiveDependencyLoadState::Loaded => {
                    commands.entity(entity).remove::<PendingProp>();
                    loaded.write(PropLoaded {
                        kind: prop.kind,
                        entity,
                    });
                }
                RecursiveDependencyLoadState::Failed(err) => {
                    commands.trigger(PropLoadError::LoadFailed {
                        kind: prop.kind,
                        path: prop.path.clone(),
                        detail: err.to_string(),
                    });
                    commands.entity(entity).despawn();
                }
                RecursiveDependencyLoadState::NotLoaded
                | RecursiveDependencyLoadState::Loading => {}
            }
        }
    }

    impl Plugin for AssetPropLoaderPlugin {
        fn build(&self, app: &mut App) {
            app.init_resource::<PropAssets>();
            app.add_systems(
                Update,
                (start_prop_loads, finish_prop_loads)
                    .chain()
                    .in_set(ArcherySet::Props)
                    .before(attach_loaded_props),
            );
        }
    }
}
