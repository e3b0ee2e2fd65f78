//! Startup configuration.
//!
//! Read once from a JSON file before the window opens. Every field has a
//! default, so `{}` (or no file at all) is a complete configuration.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::camera::CameraSettings;
use crate::constants::*;
use crate::error::ConfigError;
use crate::zoom::{ZoomMapping, ZoomRange};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: WINDOW_DEFAULT_TITLE.to_string(),
            width: WINDOW_DEFAULT_WIDTH,
            height: WINDOW_DEFAULT_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub min_scale: f32,
    pub max_scale: f32,
    /// Distance-domain step per scroll notch
    pub scroll_step: f32,
    pub mapping: ZoomMapping,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min_scale: ZOOM_MIN_SCALE,
            max_scale: ZOOM_MAX_SCALE,
            scroll_step: ZOOM_SCROLL_STEP,
            mapping: ZoomMapping::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub speed: f32,
    pub snap_distance: f32,
    pub rotation_step: f32,
    /// `null` starts fully at `zoom.max_scale`
    pub initial_scale: Option<f32>,
    pub zoom: ZoomConfig,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            speed: CAMERA_SPEED,
            snap_distance: CAMERA_SNAP_DISTANCE,
            rotation_step: CAMERA_ROTATION_STEP,
            initial_scale: Some(CAMERA_INITIAL_SCALE),
            zoom: ZoomConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    pub path: PathBuf,
    pub tiling: f32,
    pub offset: [f32; 2],
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(BACKGROUND_DEFAULT_PATH),
            tiling: 1.0,
            offset: [0.0, 0.0],
        }
    }
}

impl BackgroundConfig {
    pub fn offset(&self) -> Vec2 {
        Vec2::from(self.offset)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub background: BackgroundConfig,
    /// Serve puffin profiling data over HTTP
    pub profiling: bool,
}

impl AppConfig {
    /// Load from `path`, or from the default location when `None`.
    ///
    /// A missing file at the default location means defaults; a missing
    /// file that was asked for explicitly is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(CONFIG_DEFAULT_PATH), false),
        };

        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if !required && e.kind() == ErrorKind::NotFound => {
                log::info!("No config at {}, using defaults", path.display());
                let config = Self::default();
                config.validate()?;
                return Ok(config);
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        let config = Self::from_json(&text, &path)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would break the camera at runtime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let camera = &self.camera;
        if !(camera.speed > 0.0 && camera.speed <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "camera.speed must be in (0, 1], got {}",
                camera.speed
            )));
        }
        if !(camera.snap_distance >= 0.0 && camera.snap_distance.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "camera.snap_distance must be finite and >= 0, got {}",
                camera.snap_distance
            )));
        }
        if !camera.rotation_step.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "camera.rotation_step must be finite, got {}",
                camera.rotation_step
            )));
        }
        if let Some(scale) = camera.initial_scale {
            if !(scale.is_finite() && scale > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "camera.initial_scale must be finite and > 0, got {scale}"
                )));
            }
        }
        if !(self.background.tiling.is_finite() && self.background.tiling > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "background.tiling must be finite and > 0, got {}",
                self.background.tiling
            )));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        self.zoom_range().map(|_| ())
    }

    pub fn zoom_range(&self) -> Result<ZoomRange, ConfigError> {
        let zoom = &self.camera.zoom;
        ZoomRange::new(zoom.min_scale, zoom.max_scale, zoom.scroll_step, zoom.mapping)
    }

    pub fn camera_settings(&self) -> Result<CameraSettings, ConfigError> {
        Ok(CameraSettings {
            speed: self.camera.speed,
            snap_distance: self.camera.snap_distance,
            rotation_step: self.camera.rotation_step,
            initial_scale: self.camera.initial_scale,
            zoom: self.zoom_range()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<AppConfig, ConfigError> {
        AppConfig::from_json(text, Path::new("test.json"))
    }

    #[test]
    fn test_empty_object_is_default() {
        let config = parse("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.window.title, "Infinite background shader");
        assert!(!config.profiling);
    }

    #[test]
    fn test_default_zoom_range_is_e_squared() {
        let range = AppConfig::default().zoom_range().unwrap();
        assert!((range.min_scale() - (-2.0_f32).exp()).abs() < 1e-6);
        assert!((range.max_scale() - 2.0_f32.exp()).abs() < 1e-5);
    }

    #[test]
    fn test_partial_override() {
        let config = parse(
            r#"{
                "camera": { "speed": 0.2, "zoom": { "max_scale": 4.0, "mapping": "log_reciprocal" } },
                "background": { "tiling": 2.0, "offset": [0.5, 0.5] }
            }"#,
        )
        .unwrap();

        assert_eq!(config.camera.speed, 0.2);
        assert_eq!(config.camera.snap_distance, CAMERA_SNAP_DISTANCE);
        assert_eq!(config.camera.zoom.max_scale, 4.0);
        assert_eq!(config.camera.zoom.min_scale, ZOOM_MIN_SCALE);
        assert_eq!(config.camera.zoom.mapping, ZoomMapping::LogReciprocal);
        assert_eq!(config.background.offset(), Vec2::new(0.5, 0.5));
    }

    #[test]
    fn test_null_initial_scale_starts_at_max() {
        let config = parse(r#"{ "camera": { "initial_scale": null } }"#).unwrap();
        let settings = config.camera_settings().unwrap();
        assert_eq!(settings.initial_scale, None);
    }

    #[test]
    fn test_rejects_zero_min_scale() {
        let err = parse(r#"{ "camera": { "zoom": { "min_scale": 0.0 } } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_bad_speed_and_tiling() {
        assert!(parse(r#"{ "camera": { "speed": 0.0 } }"#).is_err());
        assert!(parse(r#"{ "camera": { "speed": 1.5 } }"#).is_err());
        assert!(parse(r#"{ "background": { "tiling": -1.0 } }"#).is_err());
        assert!(parse(r#"{ "window": { "width": 0 } }"#).is_err());
    }

    #[test]
    fn test_unknown_mapping_is_parse_error() {
        let err = parse(r#"{ "camera": { "zoom": { "mapping": "linear" } } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let err = AppConfig::load(Some(Path::new("definitely/not/here.json"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
