//! Runtime configuration for the archery controller.
//!
//! [`ArcherySettings`] gathers every tunable the gameplay systems read. The
//! defaults come from [`crate::constants`]; a JSON file can override any
//! subset of fields because every struct is `#[serde(default)]`.

use std::fs;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    AIM_RAY_RANGE, ARROW_CLOSING_RATE, ARROW_DRAW_LIMIT, ARROW_DRAW_SPEED, BOW_DRAW_LIMIT,
    BOW_DRAW_SPEED, CAMERA_HEIGHT, CAMERA_PITCH_LIMIT, CAMERA_YAW_LIMIT, CROSSHAIR_DRAW_LIMIT,
    CROSSHAIR_DRAW_SPEED, LOOK_SENSITIVITY, MAX_DELTA_SECONDS, RELEASE_DROP, SIGHT_DRAW_LIMIT,
    SIGHT_DRAW_SPEED, TARGET_DISTANCE,
};
use crate::props::PropKind;

/// Errors raised while loading or validating [`ArcherySettings`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("failed to read settings from {path}: {source}")]
    Read {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The settings file was not valid JSON for [`ArcherySettings`].
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field held a value the controller cannot work with.
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        /// Dotted name of the offending field.
        field: String,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

/// Draw-back tuning for one camera-attached prop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawBackTuning {
    /// Units per second the prop moves toward the eye while aiming.
    pub speed: f32,
    /// Depth in front of the eye at which the prop stops.
    pub limit: f32,
    /// Local offset from the camera when the bow is at rest.
    pub rest: Vec3,
}

impl DrawBackTuning {
    const fn new(speed: f32, limit: f32, rest: Vec3) -> Self {
        Self { speed, limit, rest }
    }
}

impl Default for DrawBackTuning {
    fn default() -> Self {
        Self::new(ARROW_DRAW_SPEED, ARROW_DRAW_LIMIT, Vec3::new(0.0, -0.3, -3.5))
    }
}

/// Placement of the target board.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetTuning {
    /// World-space centre of the board.
    pub position: Vec3,
    /// Half size of the board's collider.
    pub half_extents: Vec3,
}

impl Default for TargetTuning {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, CAMERA_HEIGHT, -TARGET_DISTANCE),
            half_extents: Vec3::new(1.2, 1.2, 0.1),
        }
    }
}

/// Optional clamp on the camera's pitch and yaw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConstraints {
    /// Whether the clamp runs at all.
    pub enabled: bool,
    /// Pitch is kept within `[-pitch_limit, pitch_limit]` radians.
    pub pitch_limit: f32,
    /// Yaw is kept within `[-yaw_limit, yaw_limit]` radians.
    pub yaw_limit: f32,
}

impl Default for CameraConstraints {
    fn default() -> Self {
        Self {
            enabled: false,
            pitch_limit: CAMERA_PITCH_LIMIT,
            yaw_limit: CAMERA_YAW_LIMIT,
        }
    }
}

/// Tunables read by every archery system.
///
/// # Examples
///
/// ```
/// use quiver::ArcherySettings;
///
/// let settings = ArcherySettings::from_json_str(r#"{ "closing_rate": 2.0 }"#)
///     .expect("partial settings should parse");
/// assert_eq!(settings.closing_rate, 2.0);
/// assert_eq!(settings.ray_range, 1000.0);
/// ```
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcherySettings {
    /// Bow draw-back tuning.
    pub bow: DrawBackTuning,
    /// Nocked arrow draw-back tuning.
    pub arrow: DrawBackTuning,
    /// Sight draw-back tuning.
    pub sight: DrawBackTuning,
    /// Crosshair draw-back tuning.
    pub crosshair: DrawBackTuning,
    /// Target board placement.
    pub target: TargetTuning,
    /// Maximum reach of the aim ray.
    pub ray_range: f32,
    /// How far below the eye a released arrow starts.
    pub release_drop: f32,
    /// Fraction of the remaining distance closed per second of flight.
    pub closing_rate: f32,
    /// Clamp applied to frame deltas to survive hitches.
    pub max_delta_seconds: f32,
    /// Half size of an arrow's hit box.
    pub arrow_half_extents: Vec3,
    /// Optional camera clamp.
    pub camera: CameraConstraints,
    /// Radians of rotation per pixel of mouse motion.
    pub look_sensitivity: f32,
}

impl Default for ArcherySettings {
    fn default() -> Self {
        Self {
            bow: DrawBackTuning::new(BOW_DRAW_SPEED, BOW_DRAW_LIMIT, Vec3::new(0.2, -0.4, -4.0)),
            arrow: DrawBackTuning::default(),
            sight: DrawBackTuning::new(
                SIGHT_DRAW_SPEED,
                SIGHT_DRAW_LIMIT,
                Vec3::new(0.0, -0.15, -8.0),
            ),
            crosshair: DrawBackTuning::new(
                CROSSHAIR_DRAW_SPEED,
                CROSSHAIR_DRAW_LIMIT,
                Vec3::new(0.0, 0.0, -5.0),
            ),
            target: TargetTuning::default(),
            ray_range: AIM_RAY_RANGE,
            release_drop: RELEASE_DROP,
            closing_rate: ARROW_CLOSING_RATE,
            max_delta_seconds: MAX_DELTA_SECONDS,
            arrow_half_extents: Vec3::new(0.05, 0.05, 0.6),
            camera: CameraConstraints::default(),
            look_sensitivity: LOOK_SENSITIVITY,
        }
    }
}

impl ArcherySettings {
    /// Parses and validates settings from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] when a value fails validation.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads, parses and validates settings from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read, otherwise
    /// the errors of [`Self::from_json_str`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Draw-back tuning for a camera-attached prop, `None` for the target.
    #[must_use]
    pub const fn tuning(&self, kind: PropKind) -> Option<&DrawBackTuning> {
        match kind {
            PropKind::Bow => Some(&self.bow),
            PropKind::Arrow => Some(&self.arrow),
            PropKind::Sight => Some(&self.sight),
            PropKind::Crosshair => Some(&self.crosshair),
            PropKind::Target => None,
        }
    }

    /// Frame delta clamped to `max_delta_seconds`.
    #[must_use]
    pub fn frame_delta(&self, time: &Time) -> f32 {
        time.delta_secs().min(self.max_delta_seconds.max(f32::EPSILON))
    }

    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let props = [
            ("bow", &self.bow),
            ("arrow", &self.arrow),
            ("sight", &self.sight),
            ("crosshair", &self.crosshair),
        ];
        for (name, tuning) in props {
            ensure_positive(&format!("{name}.speed"), tuning.speed)?;
            ensure_positive(&format!("{name}.limit"), tuning.limit)?;
            if -tuning.rest.z < tuning.limit {
                return Err(ConfigError::Invalid {
                    field: format!("{name}.rest"),
                    reason: "rest depth must not be closer than the draw-back limit",
                });
            }
        }
        ensure_positive("ray_range", self.ray_range)?;
        ensure_positive("closing_rate", self.closing_rate)?;
        ensure_positive("max_delta_seconds", self.max_delta_seconds)?;
        if !self.arrow_half_extents.is_finite() || self.arrow_half_extents.min_element() <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "arrow_half_extents".to_owned(),
                reason: "must be positive on every axis",
            });
        }
        Ok(())
    }
}

fn ensure_positive(field: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field: field.to_owned(),
            reason: "must be a positive finite number",
        })
    }
}

/// Asset-server paths for each loadable prop.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropAssets {
    /// Bow scene.
    pub bow: String,
    /// Arrow scene, loaded again after every scored shot.
    pub arrow: String,
    /// Sight scene.
    pub sight: String,
    /// Crosshair scene.
    pub crosshair: String,
    /// Target board scene.
    pub target: String,
}

impl Default for PropAssets {
    fn default() -> Self {
        Self {
            bow: "models/bow.glb".to_owned(),
            arrow: "models/arrow.glb".to_owned(),
            sight: "models/sight.glb".to_owned(),
            crosshair: "models/crosshair.glb".to_owned(),
            target: "models/target.glb".to_owned(),
        }
    }
}

impl PropAssets {
    /// Asset path for `kind`.
    #[must_use]
    pub fn path(&self, kind: PropKind) -> &str {
        match kind {
            PropKind::Bow => &self.bow,
            PropKind::Arrow => &self.arrow,
            PropKind::Sight => &self.sight,
            PropKind::Crosshair => &self.crosshair,
            PropKind::Target => &self.target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn defaults_are_valid() {
        ArcherySettings::default()
            .validate()
            .expect("default settings should validate");
    }

    #[test]
    fn default_draw_back_matches_tuning_table() {
        let settings = ArcherySettings::default();
        let table = [
            (PropKind::Arrow, 8.0, 2.5),
            (PropKind::Bow, 16.0, 3.0),
            (PropKind::Sight, 16.0, 7.0),
            (PropKind::Crosshair, 16.0, 4.0),
        ];
        for (kind, speed, limit) in table {
            let tuning = settings.tuning(kind).expect("drawn props have tuning");
            assert_eq!((tuning.speed, tuning.limit), (speed, limit), "{kind:?}");
        }
        assert!(settings.tuning(PropKind::Target).is_none());
    }

    #[test]
    fn nested_fields_can_be_overridden() {
        let settings = ArcherySettings::from_json_str(
            r#"{ "camera": { "enabled": true }, "bow": { "speed": 4.0 } }"#,
        )
        .expect("settings should parse");

        assert!(settings.camera.enabled);
        assert_eq!(settings.camera.pitch_limit, CAMERA_PITCH_LIMIT);
        assert_eq!(settings.bow.speed, 4.0);
    }

    #[rstest]
    #[case::zero_range(r#"{ "ray_range": 0.0 }"#, "ray_range")]
    #[case::negative_rate(r#"{ "closing_rate": -1.0 }"#, "closing_rate")]
    #[case::zero_speed(r#"{ "sight": { "speed": 0.0 } }"#, "sight.speed")]
    #[case::rest_inside_limit(r#"{ "arrow": { "rest": [0.0, 0.0, -1.0] } }"#, "arrow.rest")]
    #[case::flat_arrow(r#"{ "arrow_half_extents": [0.1, 0.0, 0.5] }"#, "arrow_half_extents")]
    fn invalid_values_name_their_field(#[case] json: &str, #[case] expected: &str) {
        let err = ArcherySettings::from_json_str(json).expect_err("settings should be rejected");
        match err {
            ConfigError::Invalid { field, .. } => assert_eq!(field, expected),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = ArcherySettings::from_json_str("{ not json").expect_err("should fail");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = ArcherySettings::load(Path::new("/definitely/not/here.json"))
            .expect_err("should fail");
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn frame_delta_is_clamped() {
        let mut time = Time::<()>::default();
        time.advance_by(std::time::Duration::from_secs(2));
        let settings = ArcherySettings::default();
        assert_eq!(settings.frame_delta(&time), MAX_DELTA_SECONDS);
    }
}
