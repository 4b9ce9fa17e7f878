//! Gameplay tuning defaults.
//!
//! Every value here seeds [`crate::ArcherySettings::default`]; a settings
//! file can override any of them at start-up.

/// How far the aim ray reaches, in world units.
pub const AIM_RAY_RANGE: f32 = 1000.0;
/// Downward offset from the eye at which a released arrow starts its flight.
pub const RELEASE_DROP: f32 = 0.5;
/// Fraction of the remaining distance an arrow closes per second of flight.
pub const ARROW_CLOSING_RATE: f32 = 4.0;
/// Upper bound on the frame delta fed to gameplay systems.
pub const MAX_DELTA_SECONDS: f32 = 0.1;

/// Speed at which the nocked arrow is drawn toward the eye.
pub const ARROW_DRAW_SPEED: f32 = 8.0;
/// Closest the nocked arrow comes to the eye while drawing.
pub const ARROW_DRAW_LIMIT: f32 = 2.5;
/// Speed at which the bow is drawn toward the eye.
pub const BOW_DRAW_SPEED: f32 = 16.0;
/// Closest the bow comes to the eye while drawing.
pub const BOW_DRAW_LIMIT: f32 = 3.0;
/// Speed at which the sight is drawn toward the eye.
pub const SIGHT_DRAW_SPEED: f32 = 16.0;
/// Closest the sight comes to the eye while drawing.
pub const SIGHT_DRAW_LIMIT: f32 = 7.0;
/// Speed at which the crosshair is drawn toward the eye.
pub const CROSSHAIR_DRAW_SPEED: f32 = 16.0;
/// Closest the crosshair comes to the eye while drawing.
pub const CROSSHAIR_DRAW_LIMIT: f32 = 4.0;

/// Pitch clamp applied when camera constraints are enabled, in radians.
pub const CAMERA_PITCH_LIMIT: f32 = 0.7;
/// Yaw clamp applied when camera constraints are enabled, in radians.
pub const CAMERA_YAW_LIMIT: f32 = 0.5;
/// Radians of camera rotation per pixel of mouse motion.
pub const LOOK_SENSITIVITY: f32 = 0.002;
/// Mouse look never pitches past this, in radians, so the view cannot flip.
pub const MAX_LOOK_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.1;

/// Eye height of the player camera.
pub const CAMERA_HEIGHT: f32 = 5.0;
/// Distance from the player to the target board along -Z.
pub const TARGET_DISTANCE: f32 = 30.0;
