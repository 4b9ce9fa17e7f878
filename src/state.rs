//! Session state of the aim-release-score controller.
//!
//! [`GameState`] is the single source of truth for where the player is in the
//! shot cycle. Pointer input never touches it directly: it is queued as
//! [`PointerAction`] messages and folded in once per frame, in arrival order,
//! by the aim step.

use bevy::prelude::*;
use log::debug;

use crate::scoring::{Band, Score};

/// Discrete pointer-button transitions.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    /// The primary button went down: start drawing.
    Down,
    /// The primary button came up: loose the arrow.
    Up,
}

/// Where the controller is in the shot cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the player to draw.
    Idle,
    /// The button is held; props draw back and the aim ray is sampled.
    Aiming,
    /// A release has been requested or an arrow is in flight.
    Shooting,
}

/// The single arrow currently in the air.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flight {
    /// The released arrow.
    pub arrow: Entity,
    /// Point the arrow is closing on.
    pub impact: Vec3,
}

/// Shot-cycle flags and the running score.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct GameState {
    /// The button is held down.
    pub aiming: bool,
    /// A release was requested and has not finished yet.
    pub shoot_requested: bool,
    /// Points scored this session.
    pub score: Score,
    /// Arrow in flight, set by the release entry transition.
    pub flight: Option<Flight>,
}

impl GameState {
    /// Current phase derived from the flags.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        if self.aiming {
            Phase::Aiming
        } else if self.shoot_requested {
            Phase::Shooting
        } else {
            Phase::Idle
        }
    }

    /// Applies one pointer action, returning whether it changed anything.
    ///
    /// A press while a shot is pending or in flight is ignored, as is a
    /// release that was never preceded by a press.
    ///
    /// # Examples
    ///
    /// ```
    /// use quiver::{GameState, Phase, PointerAction};
    ///
    /// let mut state = GameState::default();
    /// assert!(state.apply(PointerAction::Down));
    /// assert_eq!(state.phase(), Phase::Aiming);
    /// assert!(state.apply(PointerAction::Up));
    /// assert_eq!(state.phase(), Phase::Shooting);
    /// assert!(!state.apply(PointerAction::Down));
    /// ```
    pub fn apply(&mut self, action: PointerAction) -> bool {
        match action {
            PointerAction::Down if self.shoot_requested => {
                debug!("ignoring draw while a shot is in progress");
                false
            }
            PointerAction::Down => {
                let changed = !self.aiming;
                self.aiming = true;
                changed
            }
            PointerAction::Up if self.aiming => {
                self.aiming = false;
                self.shoot_requested = true;
                true
            }
            PointerAction::Up => false,
        }
    }

    /// Whether the release entry transition should run this frame.
    #[must_use]
    pub const fn ready_to_release(&self) -> bool {
        self.shoot_requested && !self.aiming && self.flight.is_none()
    }

    /// Returns to idle after a shot lands or is abandoned.
    pub fn finish_shot(&mut self) {
        self.aiming = false;
        self.shoot_requested = false;
        self.flight = None;
    }
}

/// Predicted impact point of the current aim, `None` when the ray hits
/// nothing.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct ImpactPoint(pub Option<Vec3>);

/// Emitted once per landed arrow.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct ShotScored {
    /// Where the arrow landed.
    pub impact: Vec3,
    /// Band the impact fell into.
    pub band: Band,
    /// Points awarded for this shot.
    pub points: u32,
    /// Session total after this shot.
    pub total: u32,
}
