//! Process-wide logger set-up.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Crates whose debug output drowns out gameplay events.
const NOISY_MODULES: &[&str] = &["wgpu", "naga", "bevy_render", "bevy_winit", "gilrs"];

/// Initializes the global logger.
///
/// When `verbose` is `true`, gameplay debug messages such as aim-ray hits are
/// printed. Otherwise only info level and above are shown. Rendering crates
/// are capped at `warn` either way; `RUST_LOG` overrides everything.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = Builder::new();
    builder.filter_level(level);
    for module in NOISY_MODULES {
        builder.filter_module(module, LevelFilter::Warn);
    }
    builder.parse_env(Env::default());

    // `try_init` only fails if a logger was already set. Ignore that case so
    // tests can call `init` multiple times without panicking.
    if builder.try_init().is_err() {
        log::debug!("logger already initialised");
    }
}
