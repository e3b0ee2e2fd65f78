//! Camera-related constants.

/// Fraction of the remaining gap covered per frame (higher = snappier)
pub const CAMERA_SPEED: f32 = 0.08;
/// Gap below which interpolation snaps exactly onto the target
pub const CAMERA_SNAP_DISTANCE: f32 = 0.001;
/// Rotation applied per rotate keypress (radians)
pub const CAMERA_ROTATION_STEP: f32 = std::f32::consts::FRAC_PI_8;
/// Scale the default configuration starts at
pub const CAMERA_INITIAL_SCALE: f32 = 1.0;

/// Smallest allowed scale (e^-2)
pub const ZOOM_MIN_SCALE: f32 = 0.135_335_28;
/// Largest allowed scale (e^2)
pub const ZOOM_MAX_SCALE: f32 = 7.389_056;
/// Distance-domain delta per scroll notch
pub const ZOOM_SCROLL_STEP: f32 = 0.24;
