//! Concentric band scoring.
//!
//! A hit is classified by its largest axis-aligned deviation from the target
//! centre, so the rings are squares rather than circles. Depth is ignored: an
//! impact in front of or behind the board scores as if it were on it.
//!
//! Every band boundary is exclusive on the outside: an offset of exactly
//! `0.9` lands in the 4-point band, not the 2-point band.

use bevy::prelude::Reflect;
use glam::Vec2;
use serde::Serialize;

/// Scoring band an impact falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Reflect)]
pub enum Band {
    /// Beyond the outermost ring.
    Miss,
    /// Outer ring, `(0.9, 1.0]`.
    Outer,
    /// `(0.7, 0.9]`.
    Third,
    /// `(0.4, 0.7]`.
    Second,
    /// `(0.2, 0.4]`.
    First,
    /// `(0.1, 0.2]`.
    Inner,
    /// Within `0.1` of the centre on both axes.
    Bullseye,
}

/// Outer edge of each band, checked outermost first.
const BAND_EDGES: [(f32, Band); 6] = [
    (1.0, Band::Miss),
    (0.9, Band::Outer),
    (0.7, Band::Third),
    (0.4, Band::Second),
    (0.2, Band::First),
    (0.1, Band::Inner),
];

impl Band {
    /// Points awarded for landing in this band.
    #[must_use]
    pub const fn points(self) -> u32 {
        match self {
            Self::Miss => 0,
            Self::Outer => 2,
            Self::Third => 4,
            Self::Second => 6,
            Self::First => 8,
            Self::Inner => 9,
            Self::Bullseye => 10,
        }
    }

    /// Short human-readable label used in log lines.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Miss => "miss",
            Self::Outer => "outer ring",
            Self::Third => "third ring",
            Self::Second => "second ring",
            Self::First => "first ring",
            Self::Inner => "inner ring",
            Self::Bullseye => "bullseye",
        }
    }
}

/// Classifies a planar offset from the target centre into a [`Band`].
///
/// Non-finite offsets are treated as a miss so the classification stays
/// total.
///
/// # Examples
///
/// ```
/// use glam::Vec2;
/// use quiver::scoring::{classify, Band};
///
/// assert_eq!(classify(Vec2::new(0.95, 0.0)), Band::Outer);
/// assert_eq!(classify(Vec2::new(0.0, 0.15)), Band::Inner);
/// assert_eq!(classify(Vec2::ZERO), Band::Bullseye);
/// ```
#[must_use]
pub fn classify(offset: Vec2) -> Band {
    if !offset.is_finite() {
        return Band::Miss;
    }
    let deviation = offset.abs().max_element();
    BAND_EDGES
        .iter()
        .find(|(edge, _)| deviation > *edge)
        .map_or(Band::Bullseye, |(_, band)| *band)
}

/// Classifies an impact point against a target centre, ignoring depth.
#[must_use]
pub fn classify_impact(impact: glam::Vec3, centre: glam::Vec3) -> Band {
    classify(impact.truncate() - centre.truncate())
}

/// Running session score.
///
/// The total only ever grows; there is no reset and no round limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Reflect)]
pub struct Score(u32);

impl Score {
    /// Current total.
    #[must_use]
    pub const fn total(self) -> u32 {
        self.0
    }

    /// Adds the points for `band`, saturating at `u32::MAX`.
    pub fn award(&mut self, band: Band) -> u32 {
        self.0 = self.0.saturating_add(band.points());
        self.0
    }
}
