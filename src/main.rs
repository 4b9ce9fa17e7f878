//! Quiver binary: opens a window on the archery range.
use std::path::PathBuf;

use anyhow::Context;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use clap::Parser;
use log::info;
use quiver::{
    init_logging, ArcheryPlugin, ArcherySettings, AssetPropLoaderPlugin, HudPlugin,
    RangeScenePlugin,
};

/// A first-person archery range
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// JSON file overriding the default tuning
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Clamp camera pitch and yaw
    #[arg(long)]
    constrain_camera: bool,
}

fn load_settings(args: &Args) -> anyhow::Result<ArcherySettings> {
    let mut settings = match &args.config {
        Some(path) => ArcherySettings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => ArcherySettings::default(),
    };
    if args.constrain_camera {
        settings.camera.enabled = true;
    }
    Ok(settings)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let settings = load_settings(&args)?;
    if settings.camera.enabled {
        info!(
            "camera clamped to pitch ±{} and yaw ±{}",
            settings.camera.pitch_limit, settings.camera.yaw_limit
        );
    }

    let exit = App::new()
        .add_plugins(DefaultPlugins.build().disable::<LogPlugin>())
        .insert_resource(settings)
        .add_plugins((
            ArcheryPlugin,
            AssetPropLoaderPlugin,
            RangeScenePlugin,
            HudPlugin,
        ))
        .run();

    match exit {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => anyhow::bail!("app exited with code {code}"),
    }
}
