//! Fixture shared by the archery behaviour suites.
//!
//! rspec clones the fixture into every example, so the `App` lives behind a
//! shared mutex. [`ArcheryFixture::reset`] swaps in a freshly built app and
//! runs its first frame, which spawns the camera and loads every prop.

use std::sync::{Arc, Mutex, PoisonError};

use bevy::prelude::*;
use quiver::ArcherySettings;
use test_utils::archery_app;

/// An archery app that may cross threads inside the fixture's mutex.
#[derive(Debug)]
struct RangeApp(App);

// SAFETY: rspec needs `Send + Sync` fixtures. The app is only reached through
// `ArcheryFixture::with_app`, which holds the mutex, and suites run serially.
unsafe impl Send for RangeApp {}
unsafe impl Sync for RangeApp {}

impl RangeApp {
    fn fresh(settings: &ArcherySettings) -> Self {
        Self(archery_app(settings.clone()))
    }
}

/// A shared headless archery app plus the settings it is rebuilt with.
#[derive(Debug, Clone)]
pub struct ArcheryFixture {
    app: Arc<Mutex<RangeApp>>,
    settings: ArcherySettings,
}

impl ArcheryFixture {
    /// Creates a fixture whose app uses `settings`.
    #[must_use]
    pub fn new(settings: ArcherySettings) -> Self {
        Self {
            app: Arc::new(Mutex::new(RangeApp::fresh(&settings))),
            settings,
        }
    }

    /// Replaces the app with a fresh one and runs its first frame.
    pub fn reset(&self) {
        self.with_app(|app| {
            *app = RangeApp::fresh(&self.settings).0;
            app.update();
        });
    }

    /// Runs `f` against the locked app, recovering from a poisoned lock left
    /// by an earlier failing example.
    pub fn with_app<R>(&self, f: impl FnOnce(&mut App) -> R) -> R {
        let mut guard = self.app.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard.0)
    }
}
