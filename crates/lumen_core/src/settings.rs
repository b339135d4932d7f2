//! Render settings loaded from JSON.
//!
//! Every field has a default, so a settings file only needs to name the
//! values it changes:
//!
//! ```json
//! { "image_width": 800, "samples_per_pixel": 200, "background": { "solid": [0, 0, 0] } }
//! ```
//!
//! [`RenderSettings::load_over`] layers such a file on top of existing
//! settings instead of the built-in defaults.

use std::fs;
use std::path::Path;

use lumen_math::{Color, Point3, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Image height for a width and aspect ratio, never less than one row.
pub fn image_height_for(width: u32, aspect_ratio: f64) -> u32 {
    ((width as f64 / aspect_ratio) as u32).max(1)
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid setting: {0}")]
    Invalid(String),
}

/// What a ray that escapes the scene sees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundSetting {
    /// Vertical white-to-blue gradient.
    Sky,
    /// A constant color.
    Solid([f64; 3]),
}

/// Camera, sampling, and scheduling parameters for one render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub aspect_ratio: f64,
    pub image_width: u32,
    pub samples_per_pixel: u32,
    pub max_depth: u32,

    /// Vertical field of view in degrees
    pub vfov: f64,
    pub look_from: [f64; 3],
    pub look_at: [f64; 3],
    pub vup: [f64; 3],

    /// Variation angle of rays through each pixel, in degrees
    pub defocus_angle: f64,
    /// Distance from the camera to the plane of perfect focus
    pub focus_dist: f64,

    pub background: BackgroundSetting,

    /// Base seed for the per-pixel random streams
    pub seed: u64,
    /// Edge length of a render bucket in pixels
    pub bucket_size: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            aspect_ratio: 16.0 / 9.0,
            image_width: 400,
            samples_per_pixel: 100,
            max_depth: 50,
            vfov: 90.0,
            look_from: [0.0, 0.0, 0.0],
            look_at: [0.0, 0.0, -1.0],
            vup: [0.0, 1.0, 0.0],
            defocus_angle: 0.0,
            focus_dist: 10.0,
            background: BackgroundSetting::Sky,
            seed: 0,
            bucket_size: 64,
        }
    }
}

impl RenderSettings {
    /// Parse and validate settings from a JSON string.
    pub fn from_json(text: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load a JSON file and apply the fields it names on top of `self`.
    pub fn load_over(&self, path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path)?;
        self.merge_json(&text)
    }

    /// Apply the top-level fields of a JSON object on top of `self`, then
    /// validate the result. Fields the object does not name are kept.
    pub fn merge_json(&self, text: &str) -> Result<Self, SettingsError> {
        let serde_json::Value::Object(overrides) = serde_json::from_str::<serde_json::Value>(text)? else {
            return Err(SettingsError::Invalid("settings must be a JSON object".into()));
        };

        let mut merged = serde_json::to_value(self)?;
        if let serde_json::Value::Object(fields) = &mut merged {
            fields.extend(overrides);
        }

        let settings: Self = serde_json::from_value(merged)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the renderer cannot work with.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return Err(SettingsError::Invalid(format!(
                "aspect_ratio must be positive, got {}",
                self.aspect_ratio
            )));
        }
        if self.image_width == 0 {
            return Err(SettingsError::Invalid("image_width must be at least 1".into()));
        }
        if self.samples_per_pixel == 0 {
            return Err(SettingsError::Invalid("samples_per_pixel must be at least 1".into()));
        }
        if self.bucket_size == 0 {
            return Err(SettingsError::Invalid("bucket_size must be at least 1".into()));
        }
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return Err(SettingsError::Invalid(format!(
                "vfov must be in (0, 180), got {}",
                self.vfov
            )));
        }
        if self.look_from == self.look_at {
            return Err(SettingsError::Invalid("look_from and look_at coincide".into()));
        }
        Ok(())
    }

    /// Image height derived from the width and aspect ratio, never below 1.
    pub fn image_height(&self) -> u32 {
        image_height_for(self.image_width, self.aspect_ratio)
    }

    pub fn look_from(&self) -> Point3 {
        Point3::from_array(self.look_from)
    }

    pub fn look_at(&self) -> Point3 {
        Point3::from_array(self.look_at)
    }

    pub fn vup(&self) -> Vec3 {
        Vec3::from_array(self.vup)
    }

    /// Solid background color, or `None` for the sky gradient.
    pub fn background_color(&self) -> Option<Color> {
        match self.background {
            BackgroundSetting::Sky => None,
            BackgroundSetting::Solid(rgb) => Some(Color::from_array(rgb)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = RenderSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.image_height(), 225);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = RenderSettings::from_json(
            r#"{ "image_width": 800, "background": { "solid": [0.0, 0.0, 0.0] } }"#,
        )
        .unwrap();

        assert_eq!(settings.image_width, 800);
        assert_eq!(settings.samples_per_pixel, 100);
        assert_eq!(settings.background_color(), Some(Color::ZERO));
    }

    #[test]
    fn test_sky_background() {
        let settings = RenderSettings::from_json(r#"{ "background": "sky" }"#).unwrap();
        assert_eq!(settings.background_color(), None);
    }

    #[test]
    fn test_image_height_never_zero() {
        let settings = RenderSettings {
            aspect_ratio: 100.0,
            image_width: 10,
            ..Default::default()
        };
        assert_eq!(settings.image_height(), 1);
    }

    #[test]
    fn test_merge_keeps_unnamed_fields() {
        let base = RenderSettings {
            vfov: 40.0,
            look_from: [278.0, 278.0, -800.0],
            look_at: [278.0, 278.0, 0.0],
            background: BackgroundSetting::Solid([0.0, 0.0, 0.0]),
            ..RenderSettings::default()
        };

        let merged = base.merge_json(r#"{ "samples_per_pixel": 500 }"#).unwrap();
        assert_eq!(merged.samples_per_pixel, 500);
        assert_eq!(merged.look_from, base.look_from);
        assert_eq!(merged.look_at, base.look_at);
        assert_eq!(merged.vfov, 40.0);
        assert_eq!(merged.background, base.background);

        // Named fields replace whole values, enums included
        let merged = base.merge_json(r#"{ "background": "sky", "vup": [0, 0, 1] }"#).unwrap();
        assert_eq!(merged.background, BackgroundSetting::Sky);
        assert_eq!(merged.vup, [0.0, 0.0, 1.0]);
        assert_eq!(merged.look_from, base.look_from);
    }

    #[test]
    fn test_merge_rejects_bad_input() {
        let base = RenderSettings::default();

        let err = base.merge_json("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));

        let err = base.merge_json(r#"{ "image_width": 0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));

        let err = base.merge_json(r#"{ "image_width": "wide" }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_image_height_for() {
        assert_eq!(image_height_for(400, 16.0 / 9.0), 225);
        assert_eq!(image_height_for(600, 1.0), 600);
        // Very wide images still get one row
        assert_eq!(image_height_for(10, 100.0), 1);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let err = RenderSettings::from_json(r#"{ "samples_per_pixel": 0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));

        let err = RenderSettings::from_json(r#"{ "look_at": [0, 0, 0] }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));

        let err = RenderSettings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }
}
