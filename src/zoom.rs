//! Zoom stepping in a logarithmic "distance" domain.
//!
//! A fixed step in linear scale feels huge when zoomed out and invisible when
//! zoomed in. Stepping in distance space instead makes every scroll notch
//! change the perceived zoom by the same amount at any level.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Bijection between linear scale and the distance domain.
///
/// Both variants decrease as scale grows: a larger distance is further away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoomMapping {
    /// `distance = -ln(scale)`
    #[default]
    NegativeLog,
    /// `distance = ln(1/scale + 1)`, finite and non-negative as scale grows
    LogReciprocal,
}

impl ZoomMapping {
    pub fn to_distance(self, scale: f32) -> f32 {
        match self {
            ZoomMapping::NegativeLog => -scale.ln(),
            ZoomMapping::LogReciprocal => (1.0 / scale + 1.0).ln(),
        }
    }

    pub fn from_distance(self, distance: f32) -> f32 {
        match self {
            ZoomMapping::NegativeLog => (-distance).exp(),
            // Non-positive distances lie beyond infinite zoom.
            ZoomMapping::LogReciprocal if distance <= 0.0 => f32::INFINITY,
            ZoomMapping::LogReciprocal => 1.0 / distance.exp_m1(),
        }
    }
}

/// Allowed scale interval plus how far one scroll notch moves in it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomRange {
    min_scale: f32,
    max_scale: f32,
    scroll_step: f32,
    mapping: ZoomMapping,
}

impl ZoomRange {
    /// Validates the range so the view matrix stays invertible for any
    /// scale it can produce.
    pub fn new(
        min_scale: f32,
        max_scale: f32,
        scroll_step: f32,
        mapping: ZoomMapping,
    ) -> Result<Self, ConfigError> {
        if !(min_scale.is_finite() && min_scale > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "min_scale must be finite and > 0, got {min_scale}"
            )));
        }
        if !(max_scale.is_finite() && max_scale >= min_scale) {
            return Err(ConfigError::Invalid(format!(
                "max_scale must be finite and >= min_scale ({min_scale}), got {max_scale}"
            )));
        }
        if !(scroll_step.is_finite() && scroll_step > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "scroll_step must be finite and > 0, got {scroll_step}"
            )));
        }

        Ok(Self {
            min_scale,
            max_scale,
            scroll_step,
            mapping,
        })
    }

    pub fn min_scale(&self) -> f32 {
        self.min_scale
    }

    pub fn max_scale(&self) -> f32 {
        self.max_scale
    }

    pub fn mapping(&self) -> ZoomMapping {
        self.mapping
    }

    pub fn clamp(&self, scale: f32) -> f32 {
        scale.clamp(self.min_scale, self.max_scale)
    }

    /// New target scale after `notches` of scroll (positive zooms in).
    pub fn scroll(&self, target_scale: f32, notches: f32) -> f32 {
        let distance = self.mapping.to_distance(target_scale) - notches * self.scroll_step;
        self.clamp(self.mapping.from_distance(distance))
    }
}
