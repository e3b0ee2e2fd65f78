//! Input-related constants.

/// Pixel scroll deltas (touchpads) are divided by this to get notches
pub const PIXELS_PER_SCROLL_NOTCH: f32 = 120.0;
